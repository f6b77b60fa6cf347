//! Map Loading
//!
//! Parses the line-oriented map format into a [`WorldMap`].
//!
//! ```text
//! // comment
//! start cafeteria
//! cafeteria -- admin
//! admin -v- admin_vent
//! swipe | admin | S, V -> upload
//! reactor | engine | D
//! red P -> swipe
//! ```

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use sim_events::{LocationId, Role, TaskId};
use thiserror::Error;

use crate::components::world::{
    EdgeKind, Location, PlayerSpec, SabotageDef, SabotageVariant, TaskDef, TaskLength, WorldMap,
};

/// Fatal problems found while loading a map.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("could not read map file: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line_no}: unrecognised syntax `{line}`")]
    UnknownLine { line_no: usize, line: String },

    #[error("map has no `start` directive")]
    MissingStart,

    #[error("start location `{0}` is not part of the graph")]
    UnknownStart(String),

    #[error("line {line_no}: unknown duration or sabotage code `{code}`")]
    UnknownDuration { line_no: usize, code: String },

    #[error("line {line_no}: unexpected field `{field}`")]
    UnknownField { line_no: usize, field: String },

    #[error("task `{0}` is declared more than once")]
    DuplicateTask(String),

    #[error("player `{0}` is declared more than once")]
    DuplicatePlayer(String),

    #[error("`{referenced_by}` references unknown task `{name}`")]
    UnknownTask { referenced_by: String, name: String },

    #[error("`{referenced_by}` references unknown location `{name}`")]
    UnknownLocation { referenced_by: String, name: String },

    #[error("edge between `{a}` and `{b}` is not symmetric")]
    AsymmetricEdge { a: String, b: String },
}

/// Load a map from disk.
pub fn load_map(path: impl AsRef<Path>) -> Result<WorldMap, MapError> {
    let content = fs::read_to_string(path.as_ref())?;
    parse_map(&content)
}

/// Parse a map from its textual form.
pub fn parse_map(source: &str) -> Result<WorldMap, MapError> {
    let mut builder = MapBuilder::default();

    for (index, raw) in source.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }
        builder.parse_line(line_no, line)?;
    }

    builder.finish()
}

#[derive(Debug)]
struct RawTask {
    name: String,
    location: String,
    length: TaskLength,
    visual: bool,
    successors: Vec<String>,
}

#[derive(Debug)]
struct RawSabotage {
    name: String,
    location: String,
    variant: SabotageVariant,
}

#[derive(Debug)]
struct RawPlayer {
    name: String,
    role: Role,
    tasks: Vec<String>,
}

#[derive(Debug, Default)]
struct MapBuilder {
    start: Option<String>,
    location_names: Vec<String>,
    location_index: HashMap<String, LocationId>,
    adjacency: Vec<Vec<(LocationId, EdgeKind)>>,
    tasks: Vec<RawTask>,
    sabotages: Vec<RawSabotage>,
    players: Vec<RawPlayer>,
}

impl MapBuilder {
    fn parse_line(&mut self, line_no: usize, line: &str) -> Result<(), MapError> {
        let unknown = || MapError::UnknownLine {
            line_no,
            line: line.to_string(),
        };

        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.first() == Some(&"start") {
            return match tokens.as_slice() {
                [_, name] => {
                    self.start = Some((*name).to_string());
                    Ok(())
                }
                _ => Err(unknown()),
            };
        }

        if line.contains('|') {
            return self.parse_definition(line_no, line);
        }

        if let Some((a, b)) = line.split_once("-v-") {
            let (a, b) = edge_endpoints(a, b).ok_or_else(unknown)?;
            self.add_edge(a, b, EdgeKind::Vent);
            return Ok(());
        }

        if let Some((a, b)) = line.split_once("--") {
            let (a, b) = edge_endpoints(a, b).ok_or_else(unknown)?;
            self.add_edge(a, b, EdgeKind::Normal);
            return Ok(());
        }

        let (head, task_list) = match line.split_once("->") {
            Some((head, rest)) => (head, Some(rest)),
            None => (line, None),
        };
        let role = match head.split_whitespace().collect::<Vec<_>>().as_slice() {
            [name] => (name.to_string(), Role::Crewmate),
            [name, "P"] => (name.to_string(), Role::Impostor),
            _ => return Err(unknown()),
        };
        self.players.push(RawPlayer {
            name: role.0,
            role: role.1,
            tasks: task_list.map(split_list).unwrap_or_default(),
        });
        Ok(())
    }

    /// Task or sabotage line: `name | location | CODE [, V] [-> next, ...]`.
    fn parse_definition(&mut self, line_no: usize, line: &str) -> Result<(), MapError> {
        let fields: Vec<&str> = line.split('|').map(str::trim).collect();
        let (name, location, rest) = match fields.as_slice() {
            [name, location, rest @ ..] if !name.is_empty() && !location.is_empty() && !rest.is_empty() => {
                (*name, *location, rest.join(","))
            }
            _ => {
                return Err(MapError::UnknownLine {
                    line_no,
                    line: line.to_string(),
                })
            }
        };

        let (head, successors) = match rest.split_once("->") {
            Some((head, tail)) => (head.to_string(), Some(split_list(tail))),
            None => (rest, None),
        };
        let mut head_tokens = head.split(',').map(str::trim).filter(|t| !t.is_empty());
        let code = head_tokens.next().unwrap_or_default().to_string();
        let flags: Vec<String> = head_tokens.map(str::to_string).collect();

        if let Some(length) = TaskLength::from_code(&code) {
            if let Some(field) = flags.iter().find(|f| f.as_str() != "V") {
                return Err(MapError::UnknownField {
                    line_no,
                    field: field.clone(),
                });
            }
            self.tasks.push(RawTask {
                name: name.to_string(),
                location: location.to_string(),
                length,
                visual: !flags.is_empty(),
                successors: successors.unwrap_or_default(),
            });
            return Ok(());
        }

        if let Some(variant) = SabotageVariant::from_code(&code) {
            if let Some(field) = flags.first() {
                return Err(MapError::UnknownField {
                    line_no,
                    field: field.clone(),
                });
            }
            if successors.is_some() {
                return Err(MapError::UnknownField {
                    line_no,
                    field: "->".to_string(),
                });
            }
            self.sabotages.push(RawSabotage {
                name: name.to_string(),
                location: location.to_string(),
                variant,
            });
            return Ok(());
        }

        Err(MapError::UnknownDuration { line_no, code })
    }

    fn intern(&mut self, name: &str) -> LocationId {
        if let Some(&id) = self.location_index.get(name) {
            return id;
        }
        let id = LocationId(self.location_names.len());
        self.location_names.push(name.to_string());
        self.location_index.insert(name.to_string(), id);
        self.adjacency.push(Vec::new());
        id
    }

    /// Redeclaring an edge overwrites its kind in both directions.
    fn add_edge(&mut self, a: &str, b: &str, kind: EdgeKind) {
        let a = self.intern(a);
        let b = self.intern(b);
        for (from, to) in [(a, b), (b, a)] {
            let neighbors = &mut self.adjacency[from.index()];
            match neighbors.iter_mut().find(|(n, _)| *n == to) {
                Some(entry) => entry.1 = kind,
                None => neighbors.push((to, kind)),
            }
        }
    }

    fn resolve_location(&self, referenced_by: &str, name: &str) -> Result<LocationId, MapError> {
        self.location_index
            .get(name)
            .copied()
            .ok_or_else(|| MapError::UnknownLocation {
                referenced_by: referenced_by.to_string(),
                name: name.to_string(),
            })
    }

    fn finish(self) -> Result<WorldMap, MapError> {
        let start_name = self.start.clone().ok_or(MapError::MissingStart)?;
        let start = self
            .location_index
            .get(&start_name)
            .copied()
            .ok_or(MapError::UnknownStart(start_name))?;

        let mut task_index: HashMap<&str, TaskId> = HashMap::new();
        for (i, task) in self.tasks.iter().enumerate() {
            if task_index.insert(task.name.as_str(), TaskId(i)).is_some() {
                return Err(MapError::DuplicateTask(task.name.clone()));
            }
        }
        let resolve_task = |referenced_by: &str, name: &str| {
            task_index
                .get(name)
                .copied()
                .ok_or_else(|| MapError::UnknownTask {
                    referenced_by: referenced_by.to_string(),
                    name: name.to_string(),
                })
        };

        let mut tasks = Vec::with_capacity(self.tasks.len());
        for (i, raw) in self.tasks.iter().enumerate() {
            let successors = raw
                .successors
                .iter()
                .map(|next| resolve_task(&raw.name, next))
                .collect::<Result<Vec<_>, _>>()?;
            tasks.push(TaskDef {
                id: TaskId(i),
                name: raw.name.clone(),
                length: raw.length,
                visual: raw.visual,
                location: self.resolve_location(&raw.name, &raw.location)?,
                successors,
            });
        }

        let sabotages = self
            .sabotages
            .iter()
            .map(|raw| {
                Ok(SabotageDef {
                    name: raw.name.clone(),
                    location: self.resolve_location(&raw.name, &raw.location)?,
                    variant: raw.variant,
                })
            })
            .collect::<Result<Vec<_>, MapError>>()?;

        let mut seen_players = HashSet::new();
        let mut players = Vec::with_capacity(self.players.len());
        for raw in &self.players {
            if !seen_players.insert(raw.name.as_str()) {
                return Err(MapError::DuplicatePlayer(raw.name.clone()));
            }
            let tasks = raw
                .tasks
                .iter()
                .map(|t| resolve_task(&raw.name, t))
                .collect::<Result<Vec<_>, _>>()?;
            players.push(PlayerSpec {
                name: raw.name.clone(),
                role: raw.role,
                tasks,
            });
        }

        let locations = self
            .location_names
            .iter()
            .enumerate()
            .map(|(i, name)| Location {
                id: LocationId(i),
                name: name.clone(),
                vent: name.contains("vent"),
            })
            .collect();

        WorldMap::new(locations, self.adjacency, tasks, sabotages, players, start)
    }
}

fn edge_endpoints<'a>(a: &'a str, b: &'a str) -> Option<(&'a str, &'a str)> {
    let (a, b) = (a.trim(), b.trim());
    let well_formed = |s: &str| !s.is_empty() && !s.contains(char::is_whitespace);
    if well_formed(a) && well_formed(b) && a != b {
        Some((a, b))
    } else {
        None
    }
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = "
        // tiny map
        start hall

        hall -- lab
        lab -- store
        lab -v- lab_vent
        lab_vent -v- store

        swipe | lab | S, V -> fuel, scan
        fuel | store | M
        scan | lab | L | V
        lights | store | C
        reactor | lab | D

        red P -> swipe
        blue -> swipe, fuel
        green
    ";

    #[test]
    fn test_parse_full_map() {
        let map = parse_map(MAP).unwrap();

        assert_eq!(map.location_count(), 4);
        let hall = map.location_id("hall").unwrap();
        let lab = map.location_id("lab").unwrap();
        let vent = map.location_id("lab_vent").unwrap();
        assert_eq!(map.start(), hall);
        assert!(map.is_vent(vent));
        assert!(!map.is_vent(lab));
        assert_eq!(map.edge(lab, vent), Some(EdgeKind::Vent));
        assert_eq!(map.edge(hall, lab), Some(EdgeKind::Normal));

        let neighbors: Vec<_> = map.neighbors(lab).iter().map(|(id, _)| *id).collect();
        assert_eq!(neighbors.len(), 3);
        assert_eq!(neighbors[0], hall);

        let swipe = map.task(map.task_id("swipe").unwrap()).unwrap();
        assert!(swipe.visual);
        assert_eq!(swipe.length, TaskLength::Short);
        assert_eq!(swipe.successors.len(), 2);
        assert_eq!(swipe.successors[0], map.task_id("fuel").unwrap());

        let scan = map.task(map.task_id("scan").unwrap()).unwrap();
        assert!(scan.visual);
        assert_eq!(scan.length, TaskLength::Long);
        assert!(!map.task(map.task_id("fuel").unwrap()).unwrap().visual);

        assert_eq!(map.sabotages().len(), 2);
        assert_eq!(map.sabotages()[1].variant, SabotageVariant::Deadly);

        let players = map.players();
        assert_eq!(players.len(), 3);
        assert_eq!(players[0].role, Role::Impostor);
        assert_eq!(players[1].role, Role::Crewmate);
        assert_eq!(players[1].tasks.len(), 2);
        assert!(players[2].tasks.is_empty());
    }

    #[test]
    fn test_missing_start() {
        let err = parse_map("a -- b\nred").unwrap_err();
        assert!(matches!(err, MapError::MissingStart));
    }

    #[test]
    fn test_start_not_in_graph() {
        let err = parse_map("start nowhere\na -- b").unwrap_err();
        assert!(matches!(err, MapError::UnknownStart(name) if name == "nowhere"));
    }

    #[test]
    fn test_unknown_duration_code() {
        let err = parse_map("start a\na -- b\nwires | a | X").unwrap_err();
        assert!(matches!(err, MapError::UnknownDuration { line_no: 3, .. }));
    }

    #[test]
    fn test_unknown_task_flag() {
        let err = parse_map("start a\na -- b\nwires | a | S, Q").unwrap_err();
        assert!(matches!(err, MapError::UnknownField { .. }));
    }

    #[test]
    fn test_malformed_lines() {
        assert!(matches!(
            parse_map("start a\na -- b\nred blue green").unwrap_err(),
            MapError::UnknownLine { line_no: 3, .. }
        ));
        assert!(matches!(
            parse_map("start a b").unwrap_err(),
            MapError::UnknownLine { line_no: 1, .. }
        ));
        assert!(matches!(
            parse_map("start a\na -- \n").unwrap_err(),
            MapError::UnknownLine { line_no: 2, .. }
        ));
    }

    #[test]
    fn test_duplicate_task() {
        let err = parse_map("start a\na -- b\nw | a | S\nw | b | M").unwrap_err();
        assert!(matches!(err, MapError::DuplicateTask(name) if name == "w"));
    }

    #[test]
    fn test_unresolvable_references() {
        let err = parse_map("start a\na -- b\nred -> nope").unwrap_err();
        assert!(matches!(err, MapError::UnknownTask { .. }));

        let err = parse_map("start a\na -- b\nw | a | S -> ghost").unwrap_err();
        assert!(matches!(err, MapError::UnknownTask { .. }));

        let err = parse_map("start a\na -- b\nw | moon | S").unwrap_err();
        assert!(matches!(err, MapError::UnknownLocation { .. }));
    }

    #[test]
    fn test_duplicate_player() {
        let err = parse_map("start a\na -- b\nred\nred P").unwrap_err();
        assert!(matches!(err, MapError::DuplicatePlayer(_)));
    }

    #[test]
    fn test_tasks_may_precede_edges() {
        let map = parse_map("w | b | S\nstart a\nred -> w\na -- b").unwrap();
        let w = map.task(map.task_id("w").unwrap()).unwrap();
        assert_eq!(w.location, map.location_id("b").unwrap());
    }

    #[test]
    fn test_redeclared_edge_updates_kind() {
        let map = parse_map("start a\na -- b\nb -v- a").unwrap();
        let (a, b) = (map.location_id("a").unwrap(), map.location_id("b").unwrap());
        assert_eq!(map.edge(a, b), Some(EdgeKind::Vent));
        assert_eq!(map.neighbors(a).len(), 1);
    }
}
