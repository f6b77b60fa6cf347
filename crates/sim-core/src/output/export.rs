//! Action Log Export
//!
//! CSV for reading a game by eye, JSONL for feeding it back into tools.

use std::fs;
use std::path::Path;

use crate::events::LogWriter;
use crate::systems::Simulation;

use super::OutputError;

/// Write `tick,player,action` rows, ticks ascending.
pub fn write_actions_csv(sim: &Simulation, path: impl AsRef<Path>) -> Result<(), OutputError> {
    create_parent_dir(path.as_ref())?;
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    writer.write_record(["tick", "player", "action"])?;

    for (tick, entries) in sim.log().per_tick() {
        for entry in entries {
            let player = sim
                .get_player(entry.player)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| entry.player.to_string());
            writer.write_record([tick.to_string(), player, sim.describe(entry)])?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Write every log entry as one JSON object per line.
pub fn write_actions_jsonl(sim: &Simulation, path: impl AsRef<Path>) -> Result<(), OutputError> {
    create_parent_dir(path.as_ref())?;
    let mut writer = LogWriter::new(path)?;
    writer.log_all(sim.log().entries())?;
    writer.flush()?;
    Ok(())
}

fn create_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => fs::create_dir_all(dir),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::test_support::{id, loc, sim};
    use sim_events::{Action, LogEntry};

    #[test]
    fn test_csv_export() {
        let mut sim = sim();
        let blue = id(&sim, "blue");
        sim.apply(blue, Action::Move { dest: loc(&sim, "admin") });

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("actions.csv");
        write_actions_csv(&sim, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "tick,player,action");
        assert_eq!(lines[1], "0,blue,MOVE admin");
    }

    #[test]
    fn test_jsonl_export_round_trips() {
        let mut sim = sim();
        let blue = id(&sim, "blue");
        sim.apply(blue, Action::WorkTask);
        sim.apply(blue, Action::Move { dest: loc(&sim, "admin") });

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actions.jsonl");
        write_actions_jsonl(&sim, &path).unwrap();

        let parsed: Vec<LogEntry> = fs::read_to_string(&path)
            .unwrap()
            .lines()
            .map(|line| LogEntry::from_jsonl(line).unwrap())
            .collect();
        assert_eq!(parsed, sim.log().entries());
    }
}
