//! Events
//!
//! The append-only action log and its JSONL writer.

pub mod log;
pub mod logger;

pub use log::ActionLog;
pub use logger::LogWriter;
