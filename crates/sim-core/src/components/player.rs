//! Player Components
//!
//! Mutable per-player state. Only the engine's apply functions write to it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use sim_events::{LocationId, PlayerId, PlayerState, Role, TaskId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub role: Role,
    pub state: PlayerState,
    pub location: LocationId,

    /// Assigned tasks not yet started.
    pub tasks: Vec<TaskId>,
    pub current_task: Option<TaskId>,
    pub ticks_elapsed: u32,

    /// Per-location dislike, indexed by location. Always within [0, max_dislike].
    pub dislike: Vec<f32>,

    pub kill_cooldown: u32,
    pub vent_cooldown: u32,

    /// Set only on followers.
    pub leader: Option<PlayerId>,
    /// Non-empty only on leaders.
    pub followers: Vec<PlayerId>,
    /// Players this one has watched finish a visual task.
    pub vouches_for: BTreeSet<PlayerId>,

    pub voted_out: bool,
    pub body_reported: bool,
}

impl Player {
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        role: Role,
        location: LocationId,
        tasks: Vec<TaskId>,
        location_count: usize,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            state: PlayerState::Idle,
            location,
            tasks,
            current_task: None,
            ticks_elapsed: 0,
            dislike: vec![0.0; location_count],
            kill_cooldown: 0,
            vent_cooldown: 0,
            leader: None,
            followers: Vec::new(),
            vouches_for: BTreeSet::new(),
            voted_out: false,
            body_reported: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.state != PlayerState::Dead
    }

    pub fn is_impostor(&self) -> bool {
        self.role.is_impostor()
    }

    pub fn is_crewmate(&self) -> bool {
        !self.role.is_impostor()
    }

    pub fn dislike_of(&self, location: LocationId) -> f32 {
        self.dislike.get(location.index()).copied().unwrap_or(0.0)
    }

    /// Raise dislike for a location, capped at `max`.
    pub fn add_dislike(&mut self, location: LocationId, delta: f32, max: f32) {
        if let Some(value) = self.dislike.get_mut(location.index()) {
            *value = (*value + delta).min(max);
        }
    }

    pub fn has_work(&self) -> bool {
        !self.tasks.is_empty() || self.current_task.is_some()
    }

    /// Unreported corpse that was killed rather than voted out.
    pub fn is_unreported_body(&self) -> bool {
        self.state == PlayerState::Dead && !self.voted_out && !self.body_reported
    }

    pub fn is_leader(&self) -> bool {
        !self.followers.is_empty()
    }

    pub fn is_follower(&self) -> bool {
        self.leader.is_some()
    }

    pub fn mark_dead(&mut self) {
        self.state = PlayerState::Dead;
    }

    pub fn mark_voted_out(&mut self) {
        self.state = PlayerState::Dead;
        self.voted_out = true;
    }
}
