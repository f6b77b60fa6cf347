//! Impostor Simulation Engine Library
//!
//! Public API for the hidden-role simulation: world model, engine, agent
//! policy, runners and output writers.

pub mod components;
pub mod config;
pub mod events;
pub mod output;
pub mod policy;
pub mod runner;
pub mod setup;
pub mod systems;

pub use components::*;

pub use config::{Config, ConfigError, GameRules, PolicyConfig, RunConfig};
pub use events::{ActionLog, LogWriter};
pub use output::{write_actions_csv, write_actions_jsonl, write_stats, BatchSummary, OutputError};
pub use policy::{Competency, Fuzzer};
pub use runner::{run_batch, run_simulation, run_single, simulate};
pub use setup::{load_map, parse_map, MapError};
pub use systems::{select_suspects, Phase, Policy, Simulation};
