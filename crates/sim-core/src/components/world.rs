//! World Components
//!
//! The immutable location graph plus task and sabotage definitions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use sim_events::{LocationId, Role, TaskId};

use crate::setup::MapError;

/// A node of the world graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    /// Vent chambers are only reachable through vent edges.
    pub vent: bool,
}

/// How an edge may be traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Normal,
    /// Impostors off vent cooldown only.
    Vent,
}

impl EdgeKind {
    pub fn is_vent(self) -> bool {
        matches!(self, EdgeKind::Vent)
    }
}

/// Duration class of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskLength {
    Short,
    Medium,
    Long,
}

impl TaskLength {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "S" => Some(TaskLength::Short),
            "M" => Some(TaskLength::Medium),
            "L" => Some(TaskLength::Long),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDef {
    pub id: TaskId,
    pub name: String,
    pub length: TaskLength,
    /// Onlookers can vouch for whoever finishes a visual task.
    pub visual: bool,
    pub location: LocationId,
    /// Chained tasks; the first one is enqueued on completion.
    pub successors: Vec<TaskId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SabotageVariant {
    Deadly,
    Comms,
}

impl SabotageVariant {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "D" => Some(SabotageVariant::Deadly),
            "C" => Some(SabotageVariant::Comms),
            _ => None,
        }
    }
}

/// Parsed but not yet driven by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SabotageDef {
    pub name: String,
    pub location: LocationId,
    pub variant: SabotageVariant,
}

/// A player as declared in the map file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub name: String,
    pub role: Role,
    pub tasks: Vec<TaskId>,
}

/// The loaded world. Shared read-only between simulations.
#[derive(Debug, Clone)]
pub struct WorldMap {
    locations: Vec<Location>,
    /// Neighbors in declaration order, per location.
    adjacency: Vec<Vec<(LocationId, EdgeKind)>>,
    edges: HashMap<(LocationId, LocationId), EdgeKind>,
    location_index: HashMap<String, LocationId>,
    tasks: Vec<TaskDef>,
    task_index: HashMap<String, TaskId>,
    sabotages: Vec<SabotageDef>,
    players: Vec<PlayerSpec>,
    start: LocationId,
}

impl WorldMap {
    /// Assemble a map from already-resolved parts, checking edge symmetry.
    pub fn new(
        locations: Vec<Location>,
        adjacency: Vec<Vec<(LocationId, EdgeKind)>>,
        tasks: Vec<TaskDef>,
        sabotages: Vec<SabotageDef>,
        players: Vec<PlayerSpec>,
        start: LocationId,
    ) -> Result<Self, MapError> {
        if start.index() >= locations.len() {
            return Err(MapError::UnknownStart(start.to_string()));
        }

        let mut edges = HashMap::new();
        for (from, neighbors) in adjacency.iter().enumerate() {
            for &(to, kind) in neighbors {
                edges.insert((LocationId(from), to), kind);
            }
        }
        for (&(a, b), &kind) in &edges {
            if edges.get(&(b, a)) != Some(&kind) {
                let name = |id: LocationId| {
                    locations
                        .get(id.index())
                        .map(|l| l.name.clone())
                        .unwrap_or_else(|| id.to_string())
                };
                return Err(MapError::AsymmetricEdge {
                    a: name(a),
                    b: name(b),
                });
            }
        }

        let location_index = locations
            .iter()
            .map(|l| (l.name.clone(), l.id))
            .collect();
        let task_index = tasks.iter().map(|t| (t.name.clone(), t.id)).collect();

        Ok(Self {
            locations,
            adjacency,
            edges,
            location_index,
            tasks,
            task_index,
            sabotages,
            players,
            start,
        })
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn location(&self, id: LocationId) -> &Location {
        &self.locations[id.index()]
    }

    pub fn location_id(&self, name: &str) -> Option<LocationId> {
        self.location_index.get(name).copied()
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    pub fn is_vent(&self, id: LocationId) -> bool {
        self.locations
            .get(id.index())
            .map(|l| l.vent)
            .unwrap_or(false)
    }

    /// Neighbors of a location in declaration order.
    pub fn neighbors(&self, id: LocationId) -> &[(LocationId, EdgeKind)] {
        self.adjacency
            .get(id.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Edge kind between two locations, if they are adjacent.
    pub fn edge(&self, from: LocationId, to: LocationId) -> Option<EdgeKind> {
        self.edges.get(&(from, to)).copied()
    }

    pub fn tasks(&self) -> &[TaskDef] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&TaskDef> {
        self.tasks.get(id.index())
    }

    pub fn task_id(&self, name: &str) -> Option<TaskId> {
        self.task_index.get(name).copied()
    }

    pub fn sabotages(&self) -> &[SabotageDef] {
        &self.sabotages
    }

    pub fn players(&self) -> &[PlayerSpec] {
        &self.players
    }

    pub fn start(&self) -> LocationId {
        self.start
    }
}
