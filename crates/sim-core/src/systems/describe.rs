//! Human-readable rendering of log entries, used by the CSV export.

use sim_events::{Action, LocationId, LogEntry, LogRecord, PlayerId, TaskId};

use super::Simulation;

impl Simulation {
    fn player_name(&self, id: PlayerId) -> String {
        self.get_player(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    fn location_name(&self, id: LocationId) -> String {
        self.map()
            .locations()
            .get(id.index())
            .map(|l| l.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    fn task_name(&self, id: TaskId) -> String {
        self.map()
            .task(id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    fn names(&self, ids: &[PlayerId]) -> String {
        let names: Vec<String> = ids.iter().map(|&id| self.player_name(id)).collect();
        format!("[{}]", names.join(" "))
    }

    fn maybe_name(&self, id: Option<PlayerId>) -> String {
        id.map(|id| self.player_name(id))
            .unwrap_or_else(|| "none".to_string())
    }

    pub fn describe_action(&self, action: &Action) -> String {
        match action {
            Action::None => "NONE".to_string(),
            Action::SetState { state } => format!("SET_STATE {state}"),
            Action::Move { dest } => format!("MOVE {}", self.location_name(*dest)),
            Action::StartTask { task } => format!("START_TASK {}", self.task_name(*task)),
            Action::WorkTask => "WORK_TASK".to_string(),
            Action::Kill(intent) => {
                let mut text = format!("KILL {}", self.player_name(intent.target));
                if intent.self_report {
                    text.push_str(&format!(
                        " self_report blaming {}",
                        self.maybe_name(intent.self_report_witness)
                    ));
                }
                if let Some(reporter) = intent.witness_reporter {
                    text.push_str(&format!(" reported_by {}", self.player_name(reporter)));
                }
                text
            }
            Action::Report { bodies, witnessed } => format!(
                "REPORT bodies={} witnessed={}",
                self.names(bodies),
                self.maybe_name(*witnessed)
            ),
            Action::Follow { leader } => format!("FOLLOW {}", self.maybe_name(*leader)),
            Action::Regroup { leader, followers } => format!(
                "REGROUP leader={} followers={}",
                self.player_name(*leader),
                self.names(followers)
            ),
        }
    }

    /// One-line description of a log entry, with names instead of handles.
    pub fn describe(&self, entry: &LogEntry) -> String {
        match &entry.record {
            LogRecord::Action { action } => self.describe_action(action),
            LogRecord::ReportOutcome { outcome } => format!(
                "REPORT_OUTCOME reporter={} witnessed={} bodies={} voted_out={} verdict={:?}",
                self.player_name(outcome.reporter),
                self.maybe_name(outcome.witnessed),
                self.names(&outcome.bodies),
                self.maybe_name(outcome.voted_out),
                outcome.verdict
            ),
        }
    }
}
