//! Statistics Output
//!
//! Aggregates the reports of many seeded runs for analysis.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use sim_events::{Outcome, RunReport};

use super::OutputError;

/// Aggregate over a batch of runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub runs: usize,
    pub crewmate_wins: usize,
    pub impostor_wins: usize,
    pub timeouts: usize,
    pub crewmate_win_rate: f64,
    pub impostor_win_rate: f64,
    pub mean_ticks: f64,
    pub min_ticks: u64,
    pub max_ticks: u64,
}

impl BatchSummary {
    pub fn from_reports(reports: &[RunReport]) -> Self {
        let mut summary = Self {
            runs: reports.len(),
            ..Default::default()
        };
        if reports.is_empty() {
            return summary;
        }

        let mut tick_sum = 0u64;
        summary.min_ticks = u64::MAX;
        for report in reports {
            match report.outcome {
                Outcome::Crewmate => summary.crewmate_wins += 1,
                Outcome::Impostor => summary.impostor_wins += 1,
                Outcome::Timeout => summary.timeouts += 1,
            }
            tick_sum += report.ticks;
            summary.min_ticks = summary.min_ticks.min(report.ticks);
            summary.max_ticks = summary.max_ticks.max(report.ticks);
        }

        let runs = reports.len() as f64;
        summary.crewmate_win_rate = summary.crewmate_wins as f64 / runs;
        summary.impostor_win_rate = summary.impostor_wins as f64 / runs;
        summary.mean_ticks = tick_sum as f64 / runs;
        summary
    }
}

/// Write the summary as pretty JSON
pub fn write_stats(summary: &BatchSummary, path: impl AsRef<Path>) -> Result<(), OutputError> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }

    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json)?;
    Ok(())
}
