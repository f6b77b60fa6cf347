//! Simulation Engine
//!
//! [`Simulation`] owns every piece of mutable game state for one run. The
//! policy only ever sees it through `&Simulation`; all writes go through
//! [`Simulation::apply`], which validates each intent and silently declines
//! illegal ones.

pub mod describe;
pub mod kill;
pub mod movement;
pub mod report;
pub mod social;
pub mod step;
pub mod suspicion;
pub mod tasks;

use std::sync::Arc;

use sim_events::{
    Action, KillWitness, LocationId, MovementWitness, Outcome, PlayerId, PlayerState,
};

use crate::components::{Player, WorldMap};
use crate::config::GameRules;
use crate::events::ActionLog;

pub use step::{Phase, Policy};
pub use suspicion::select_suspects;

/// One game in progress.
#[derive(Debug, Clone)]
pub struct Simulation {
    map: Arc<WorldMap>,
    rules: GameRules,
    /// Arena indexed by `PlayerId`. Never reordered.
    players: Vec<Player>,
    /// Processing order for the current tick.
    roster: Vec<PlayerId>,
    /// Occupants per location, bodies included.
    occupants: Vec<Vec<PlayerId>>,
    movement_history: Vec<MovementWitness>,
    kill_history: Vec<KillWitness>,
    log: ActionLog,
    tick: u64,
}

impl Simulation {
    /// Place every declared player at the start location.
    pub fn new(map: Arc<WorldMap>, rules: GameRules) -> Self {
        let start = map.start();
        let location_count = map.location_count();

        let players: Vec<Player> = map
            .players()
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                Player::new(
                    PlayerId(i),
                    spec.name.clone(),
                    spec.role,
                    start,
                    spec.tasks.clone(),
                    location_count,
                )
            })
            .collect();

        let roster: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
        let mut occupants = vec![Vec::new(); location_count];
        occupants[start.index()] = roster.clone();

        Self {
            map,
            rules,
            players,
            roster,
            occupants,
            movement_history: Vec::new(),
            kill_history: Vec::new(),
            log: ActionLog::new(),
            tick: 0,
        }
    }

    pub fn map(&self) -> &WorldMap {
        &self.map
    }

    pub fn shared_map(&self) -> Arc<WorldMap> {
        Arc::clone(&self.map)
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// All players, indexed by `PlayerId`.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Current processing order.
    pub fn roster(&self) -> &[PlayerId] {
        &self.roster
    }

    pub fn occupants(&self, location: LocationId) -> &[PlayerId] {
        self.occupants
            .get(location.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn movement_history(&self) -> &[MovementWitness] {
        &self.movement_history
    }

    pub fn kill_history(&self) -> &[KillWitness] {
        &self.kill_history
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    pub fn is_alive(&self, id: PlayerId) -> bool {
        self.players.get(id.index()).is_some_and(Player::is_alive)
    }

    /// Living players sharing a location with `id`, excluding `id`.
    pub fn living_others_here(&self, id: PlayerId) -> Vec<PlayerId> {
        let Some(player) = self.players.get(id.index()) else {
            return Vec::new();
        };
        self.occupants(player.location)
            .iter()
            .copied()
            .filter(|&other| other != id && self.is_alive(other))
            .collect()
    }

    /// Killed players nobody has reported yet, in roster order.
    pub fn unreported_bodies(&self) -> Vec<PlayerId> {
        self.roster
            .iter()
            .copied()
            .filter(|&id| self.players[id.index()].is_unreported_body())
            .collect()
    }

    pub fn crewmate_win(&self) -> bool {
        self.players
            .iter()
            .filter(|p| p.is_impostor())
            .all(|p| !p.is_alive())
    }

    pub fn impostor_win(&self) -> bool {
        self.players
            .iter()
            .filter(|p| p.is_crewmate())
            .all(|p| !p.is_alive())
    }

    /// Crewmate win is checked first.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.crewmate_win() {
            Some(Outcome::Crewmate)
        } else if self.impostor_win() {
            Some(Outcome::Impostor)
        } else {
            None
        }
    }

    /// Apply one intent on behalf of `player`.
    ///
    /// Every intent except [`Action::None`] is logged before it is validated,
    /// so declined attempts still show up in the audit trail.
    pub fn apply(&mut self, player: PlayerId, action: Action) {
        if action.is_none() || player.index() >= self.players.len() {
            return;
        }
        self.log.record_action(self.tick, player, action.clone());

        match action {
            Action::None => {}
            Action::SetState { state } => {
                self.set_state(player, state);
            }
            Action::Move { dest } => {
                self.apply_move(player, dest);
            }
            Action::StartTask { task } => {
                self.start_task(player, task);
            }
            Action::WorkTask => {
                self.work_task(player);
            }
            Action::Kill(intent) => {
                self.kill(player, &intent);
            }
            Action::Report { bodies, witnessed } => {
                if self.is_alive(player) {
                    self.report(player, &bodies, witnessed);
                }
            }
            Action::Follow { leader } => {
                self.follow(player, leader);
            }
            Action::Regroup { leader, followers } => {
                if self.is_alive(player) {
                    self.regroup(leader, &followers);
                }
            }
        }
    }

    /// Dead players are frozen; death itself only comes from kills and votes.
    pub(crate) fn set_state(&mut self, id: PlayerId, state: PlayerState) -> bool {
        let Some(player) = self.players.get_mut(id.index()) else {
            return false;
        };
        if !player.is_alive() || state == PlayerState::Dead {
            return false;
        }
        player.state = state;
        true
    }

    pub(crate) fn tick_cooldowns(&mut self) {
        for player in self.players.iter_mut().filter(|p| p.is_alive()) {
            player.kill_cooldown = player.kill_cooldown.saturating_sub(1);
            player.vent_cooldown = player.vent_cooldown.saturating_sub(1);
        }
    }
}
