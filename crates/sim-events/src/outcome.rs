//! Run Outcomes
//!
//! What a finished simulation reports back to a batch harness.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a simulation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Every impostor is dead.
    Crewmate,
    /// Every crewmate is dead.
    Impostor,
    /// The tick limit was reached first.
    Timeout,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Crewmate => write!(f, "crewmate"),
            Outcome::Impostor => write!(f, "impostor"),
            Outcome::Timeout => write!(f, "timeout"),
        }
    }
}

/// Result of one seeded run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub seed: u64,
    pub outcome: Outcome,
    pub ticks: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serialization() {
        let report = RunReport {
            seed: 9,
            outcome: Outcome::Impostor,
            ticks: 41,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"seed":9,"outcome":"impostor","ticks":41}"#);
    }
}
