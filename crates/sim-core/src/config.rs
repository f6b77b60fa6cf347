//! Configuration System
//!
//! Loads tuning parameters from tuning.toml for easy adjustment without recompiling.
//! Every table is defaulted, so a partial file only overrides what it names.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::components::world::TaskLength;

/// Default tuning file path
pub const DEFAULT_TUNING_PATH: &str = "tuning.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rules: GameRules,
    pub policy: PolicyConfig,
    pub run: RunConfig,
}

/// Engine constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    /// Dislike added to a destination on every move into it
    pub delta_dislike: f32,
    /// Upper bound for any dislike weight
    pub max_dislike: f32,
    pub kill_cooldown_ticks: u32,
    pub vent_cooldown_ticks: u32,
    /// How far below the top suspicion score a player still counts as a suspect
    pub sus_window: i64,
    pub short_ticks: u32,
    pub medium_ticks: u32,
    pub long_ticks: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            delta_dislike: 0.15,
            max_dislike: 0.9,
            kill_cooldown_ticks: 5,
            vent_cooldown_ticks: 5,
            sus_window: 2,
            short_ticks: 1,
            medium_ticks: 2,
            long_ticks: 3,
        }
    }
}

impl GameRules {
    /// Ticks of work needed to finish a task of the given length
    pub fn task_ticks(&self, length: TaskLength) -> u32 {
        match length {
            TaskLength::Short => self.short_ticks,
            TaskLength::Medium => self.medium_ticks,
            TaskLength::Long => self.long_ticks,
        }
    }
}

/// Agent policy tuning. Gates are "1 in N" rolls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub group_size: usize,
    pub enable_competency: bool,
    pub full_chance: f64,
    pub troll_chance: f64,
    pub normal_body_report_chance: f64,
    pub normal_witness_report_chance: f64,
    pub kill_gate: u32,
    pub self_report_gate: u32,
    pub impostor_stop_working_gate: u32,
    pub impostor_leave_group_gate: u32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        // two impostors, three crewmates watching each
        let impostors = 2;
        Self {
            group_size: impostors + 3 * impostors,
            enable_competency: true,
            full_chance: 0.2,
            troll_chance: 0.2,
            normal_body_report_chance: 0.7,
            normal_witness_report_chance: 0.5,
            kill_gate: 4,
            self_report_gate: 4,
            impostor_stop_working_gate: 4,
            impostor_leave_group_gate: 4,
        }
    }
}

/// Run limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub max_ticks: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { max_ticks: 50_000 }
    }
}

/// Parse and validate configuration from a TOML string
impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        content.parse()
    }

    /// Load configuration from default path, or use defaults if not found
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_TUNING_PATH).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", DEFAULT_TUNING_PATH, e);
            Self::default()
        })
    }

    /// Render as TOML, e.g. to seed a tuning file
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rules = &self.rules;
        if !(0.0..=1.0).contains(&rules.max_dislike) {
            return Err(ConfigError::Invalid("rules.max_dislike must lie in [0, 1]".into()));
        }
        if rules.delta_dislike < 0.0 {
            return Err(ConfigError::Invalid("rules.delta_dislike must not be negative".into()));
        }
        if rules.sus_window < 0 {
            return Err(ConfigError::Invalid("rules.sus_window must not be negative".into()));
        }

        let policy = &self.policy;
        if policy.group_size == 0 {
            return Err(ConfigError::Invalid("policy.group_size must be at least 1".into()));
        }
        let chances = [
            ("policy.full_chance", policy.full_chance),
            ("policy.troll_chance", policy.troll_chance),
            ("policy.normal_body_report_chance", policy.normal_body_report_chance),
            ("policy.normal_witness_report_chance", policy.normal_witness_report_chance),
        ];
        for (name, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!("{name} must lie in [0, 1]")));
            }
        }
        if policy.full_chance + policy.troll_chance > 1.0 {
            return Err(ConfigError::Invalid(
                "policy.full_chance + policy.troll_chance must not exceed 1".into(),
            ));
        }
        let gates = [
            ("policy.kill_gate", policy.kill_gate),
            ("policy.self_report_gate", policy.self_report_gate),
            ("policy.impostor_stop_working_gate", policy.impostor_stop_working_gate),
            ("policy.impostor_leave_group_gate", policy.impostor_leave_group_gate),
        ];
        for (name, value) in gates {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be at least 1")));
            }
        }
        Ok(())
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.rules.kill_cooldown_ticks, 5);
        assert_eq!(config.rules.sus_window, 2);
        assert_eq!(config.policy.group_size, 8);
        assert_eq!(config.run.max_ticks, 50_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_str(
            r#"
            [rules]
            kill_cooldown_ticks = 9

            [policy]
            group_size = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.rules.kill_cooldown_ticks, 9);
        assert_eq!(config.rules.vent_cooldown_ticks, 5);
        assert_eq!(config.policy.group_size, 2);
        assert_eq!(config.policy.kill_gate, 4);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Config::from_str("[policy]\nkill_gate = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = Config::from_str("[rules]\nmax_dislike = 1.5").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = Config::from_str("[policy]\nfull_chance = 0.7\ntroll_chance = 0.7").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_parse_through_from_str() {
        let config: Config = "[run]\nmax_ticks = 12".parse().unwrap();
        assert_eq!(config.run.max_ticks, 12);
        assert_eq!(config.rules, GameRules::default());
        assert!("[run]\nmax_ticks = \"many\"".parse::<Config>().is_err());
    }

    #[test]
    fn test_bad_toml() {
        let err = Config::from_str("[rules\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let text = config.to_toml().unwrap();
        assert_eq!(Config::from_str(&text).unwrap(), config);
    }

    #[test]
    fn test_shipped_tuning_matches_defaults() {
        let config = Config::from_str(include_str!("../../../tuning.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuning.toml");
        fs::write(&path, "[run]\nmax_ticks = 10\n").unwrap();
        assert_eq!(Config::load(&path).unwrap().run.max_ticks, 10);
        assert!(matches!(
            Config::load(dir.path().join("missing.toml")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_task_ticks() {
        let rules = GameRules::default();
        assert_eq!(rules.task_ticks(TaskLength::Short), 1);
        assert_eq!(rules.task_ticks(TaskLength::Long), 3);
    }
}
