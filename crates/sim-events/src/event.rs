//! Action Protocol and Log Types
//!
//! The closed set of intents the policy can hand to the engine, plus the
//! append-only log entries the engine records while applying them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{LocationId, PlayerId, TaskId};

/// Which side a player is on. Fixed at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Crewmate,
    Impostor,
}

impl Role {
    pub fn is_impostor(self) -> bool {
        matches!(self, Role::Impostor)
    }
}

/// Lifecycle state of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerState {
    Idle,
    Working,
    Following,
    /// Terminal. A dead player never leaves this state.
    Dead,
    /// Reserved for sabotage handling; nothing transitions into it yet.
    FixSabotage,
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayerState::Idle => "IDLE",
            PlayerState::Working => "WORKING",
            PlayerState::Following => "FOLLOWING",
            PlayerState::Dead => "DEAD",
            PlayerState::FixSabotage => "FIX_SABOTAGE",
        };
        f.write_str(name)
    }
}

/// A kill attempt plus the reports the policy wants attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillIntent {
    pub target: PlayerId,
    /// The killer reports its own victim straight away.
    #[serde(default)]
    pub self_report: bool,
    /// Bystander the killer blames when self-reporting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_report_witness: Option<PlayerId>,
    /// Bystander who reports the killer directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub witness_reporter: Option<PlayerId>,
}

impl KillIntent {
    pub fn new(target: PlayerId) -> Self {
        Self {
            target,
            self_report: false,
            self_report_witness: None,
            witness_reporter: None,
        }
    }

    pub fn with_self_report(mut self, blamed: Option<PlayerId>) -> Self {
        self.self_report = true;
        self.self_report_witness = blamed;
        self
    }

    pub fn with_witness_reporter(mut self, reporter: PlayerId) -> Self {
        self.witness_reporter = Some(reporter);
        self
    }
}

/// Intents produced by the policy and consumed by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Do nothing. Never logged.
    None,
    SetState { state: PlayerState },
    Move { dest: LocationId },
    StartTask { task: TaskId },
    WorkTask,
    Kill(KillIntent),
    Report {
        #[serde(default)]
        bodies: Vec<PlayerId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        witnessed: Option<PlayerId>,
    },
    /// Attach to a leader, or detach and go idle with `None`.
    Follow { leader: Option<PlayerId> },
    /// Install a fresh leader/follower star.
    Regroup {
        leader: PlayerId,
        followers: Vec<PlayerId>,
    },
}

impl Action {
    pub fn is_none(&self) -> bool {
        matches!(self, Action::None)
    }

    pub fn set_state(state: PlayerState) -> Self {
        Action::SetState { state }
    }

    /// Short tag used in summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::None => "none",
            Action::SetState { .. } => "set_state",
            Action::Move { .. } => "move",
            Action::StartTask { .. } => "start_task",
            Action::WorkTask => "work_task",
            Action::Kill(_) => "kill",
            Action::Report { .. } => "report",
            Action::Follow { .. } => "follow",
            Action::Regroup { .. } => "regroup",
        }
    }
}

/// How a report was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Impostors outnumbered crewmates around the reporter.
    ReporterOutvoted,
    /// Crewmates outnumbered impostors and the reporter was lying.
    FalseReporterOutvoted,
    /// Crewmates outnumbered impostors and believed the reporter.
    WitnessedOutvoted,
    /// Even split around the reporter.
    NoMajority,
    /// The kill had at least one direct witness.
    DirectWitness,
    /// A single suspicion group stood out.
    Suspicion,
    /// Suspicion was spread across unrelated players.
    InsufficientInformation,
    /// No kill record matched the reported bodies.
    NoKillRecord,
}

/// Structured record of a report resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOutcome {
    pub reporter: PlayerId,
    pub witnessed: Option<PlayerId>,
    pub bodies: Vec<PlayerId>,
    pub voted_out: Option<PlayerId>,
    pub verdict: Verdict,
}

/// Payload of a log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "snake_case")]
pub enum LogRecord {
    Action { action: Action },
    ReportOutcome { outcome: ReportOutcome },
}

/// One line of the append-only action log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub tick: u64,
    pub player: PlayerId,
    #[serde(flatten)]
    pub record: LogRecord,
}

impl LogEntry {
    pub fn action(tick: u64, player: PlayerId, action: Action) -> Self {
        Self {
            tick,
            player,
            record: LogRecord::Action { action },
        }
    }

    pub fn outcome(tick: u64, player: PlayerId, outcome: ReportOutcome) -> Self {
        Self {
            tick,
            player,
            record: LogRecord::ReportOutcome { outcome },
        }
    }

    /// Serialize to a single JSONL line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from a JSONL line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serialization_is_tagged() {
        let json = serde_json::to_string(&Action::Move { dest: LocationId(2) }).unwrap();
        assert_eq!(json, r#"{"type":"move","dest":2}"#);

        let json = serde_json::to_string(&Action::WorkTask).unwrap();
        assert_eq!(json, r#"{"type":"work_task"}"#);
    }

    #[test]
    fn test_kill_intent_builder() {
        let intent = KillIntent::new(PlayerId(1))
            .with_self_report(Some(PlayerId(2)))
            .with_witness_reporter(PlayerId(3));
        assert!(intent.self_report);
        assert_eq!(intent.self_report_witness, Some(PlayerId(2)));
        assert_eq!(intent.witness_reporter, Some(PlayerId(3)));
    }

    #[test]
    fn test_log_entry_jsonl() {
        let entry = LogEntry::outcome(
            4,
            PlayerId(0),
            ReportOutcome {
                reporter: PlayerId(0),
                witnessed: None,
                bodies: vec![PlayerId(2)],
                voted_out: Some(PlayerId(1)),
                verdict: Verdict::Suspicion,
            },
        );
        let line = entry.to_jsonl().unwrap();
        assert!(line.contains(r#""record":"report_outcome""#));
        assert_eq!(LogEntry::from_jsonl(&line).unwrap(), entry);
    }

    #[test]
    fn test_player_state_display() {
        assert_eq!(PlayerState::FixSabotage.to_string(), "FIX_SABOTAGE");
        assert_eq!(PlayerState::Following.to_string(), "FOLLOWING");
    }
}
