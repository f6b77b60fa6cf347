//! Shared data types for the impostor simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! Both the engine and any observer (renderer, batch harness) depend on it.

pub mod event;
pub mod history;
pub mod ids;
pub mod outcome;

pub use event::{Action, KillIntent, LogEntry, LogRecord, PlayerState, ReportOutcome, Role, Verdict};
pub use history::{KillWitness, MovementWitness};
pub use ids::{LocationId, PlayerId, TaskId};
pub use outcome::{Outcome, RunReport};
