//! Competency Profiles
//!
//! How well a player plays. Assigned once per player when the policy is
//! built and never changed afterwards.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::PolicyConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Competency {
    /// Weighted random play.
    #[default]
    Normal,
    /// Always picks the best option and always reports.
    Full,
    /// Ignores weights and never reports.
    Troll,
}

impl Competency {
    /// Roll a crewmate's profile. Impostors are always [`Competency::Normal`].
    pub fn roll<R: Rng>(rng: &mut R, config: &PolicyConfig) -> Self {
        let roll: f64 = rng.gen();
        if roll < config.full_chance {
            Competency::Full
        } else if roll < config.full_chance + config.troll_chance {
            Competency::Troll
        } else {
            Competency::Normal
        }
    }
}

impl fmt::Display for Competency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Competency::Normal => write!(f, "normal"),
            Competency::Full => write!(f, "full"),
            Competency::Troll => write!(f, "troll"),
        }
    }
}
