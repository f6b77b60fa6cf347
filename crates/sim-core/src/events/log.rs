//! Action Log
//!
//! Append-only record of every applied action and report outcome.

use std::collections::BTreeMap;

use sim_events::{Action, LogEntry, PlayerId, ReportOutcome};

/// In-memory action log owned by one simulation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionLog {
    entries: Vec<LogEntry>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_action(&mut self, tick: u64, player: PlayerId, action: Action) {
        self.entries.push(LogEntry::action(tick, player, action));
    }

    pub fn record_outcome(&mut self, tick: u64, player: PlayerId, outcome: ReportOutcome) {
        self.entries.push(LogEntry::outcome(tick, player, outcome));
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Report outcomes in the order they were resolved.
    pub fn outcomes(&self) -> impl Iterator<Item = (&LogEntry, &ReportOutcome)> {
        self.entries.iter().filter_map(|entry| match &entry.record {
            sim_events::LogRecord::ReportOutcome { outcome } => Some((entry, outcome)),
            sim_events::LogRecord::Action { .. } => None,
        })
    }

    /// Entries grouped by tick, ticks ascending, insertion order kept within a tick.
    pub fn per_tick(&self) -> BTreeMap<u64, Vec<&LogEntry>> {
        let mut grouped: BTreeMap<u64, Vec<&LogEntry>> = BTreeMap::new();
        for entry in &self.entries {
            grouped.entry(entry.tick).or_default().push(entry);
        }
        grouped
    }
}
