//! JSONL Export
//!
//! Writes the action log as it was recorded: every action and every report
//! outcome becomes one JSON object on its own line, in tick order.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use sim_events::LogEntry;

/// Sink for `LogEntry` lines. Buffered; flushed on drop.
pub struct LogWriter {
    writer: Option<BufWriter<File>>,
    entry_count: u64,
}

impl LogWriter {
    /// Open `path` for writing, replacing anything already there.
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            entry_count: 0,
        })
    }

    /// Counts entries but writes nothing.
    pub fn null() -> Self {
        Self {
            writer: None,
            entry_count: 0,
        }
    }

    /// Entries accepted so far, written or not.
    pub fn entry_count(&self) -> u64 {
        self.entry_count
    }

    pub fn log(&mut self, entry: &LogEntry) -> std::io::Result<()> {
        self.entry_count += 1;
        if let Some(ref mut writer) = self.writer {
            let json = entry.to_jsonl()?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }

    /// Write a slice of entries in order, stopping at the first I/O error.
    pub fn log_all(&mut self, entries: &[LogEntry]) -> std::io::Result<()> {
        for entry in entries {
            self.log(entry)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, "unflushed JSONL lines lost on drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_events::{Action, LocationId, PlayerId, ReportOutcome, Verdict};
    use std::io::BufRead;

    #[test]
    fn test_jsonl_logging() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actions.jsonl");

        let mut writer = LogWriter::new(&path).unwrap();
        let entries = vec![
            LogEntry::action(1, PlayerId(0), Action::Move { dest: LocationId(3) }),
            LogEntry::action(1, PlayerId(2), Action::WorkTask),
        ];
        writer.log_all(&entries).unwrap();
        writer.flush().unwrap();

        let file = File::open(&path).unwrap();
        let lines: Vec<String> = std::io::BufReader::new(file)
            .lines()
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(LogEntry::from_jsonl(&lines[1]).unwrap(), entries[1]);
    }

    #[test]
    fn test_outcomes_keep_their_place_in_the_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actions.jsonl");
        let outcome = ReportOutcome {
            reporter: PlayerId(1),
            witnessed: None,
            bodies: vec![PlayerId(2)],
            voted_out: None,
            verdict: Verdict::NoKillRecord,
        };
        let entries = vec![
            LogEntry::action(2, PlayerId(1), Action::WorkTask),
            LogEntry::outcome(2, PlayerId(1), outcome),
            LogEntry::action(3, PlayerId(0), Action::WorkTask),
        ];
        {
            let mut writer = LogWriter::new(&path).unwrap();
            writer.log_all(&entries).unwrap();
        }

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<LogEntry> = text
            .lines()
            .map(|line| LogEntry::from_jsonl(line).unwrap())
            .collect();
        assert_eq!(parsed, entries);
    }

    #[test]
    fn test_null_writer() {
        let mut writer = LogWriter::null();
        writer
            .log(&LogEntry::action(1, PlayerId(0), Action::WorkTask))
            .unwrap();
        assert_eq!(writer.entry_count(), 1);
    }
}
