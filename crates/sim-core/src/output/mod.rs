//! Output
//!
//! Action log exports and batch statistics.

pub mod export;
pub mod stats;

use thiserror::Error;

pub use export::{write_actions_csv, write_actions_jsonl};
pub use stats::{write_stats, BatchSummary};

/// Output error type
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
