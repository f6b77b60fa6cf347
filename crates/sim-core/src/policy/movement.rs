//! Movement decisions.
//!
//! Destination weights are `1 - dislike`, plus a bonus toward vent chambers
//! that grows with the impostor's remaining kill cooldown.

use rand::seq::SliceRandom;

use sim_events::{Action, LocationId, PlayerId, PlayerState};

use crate::systems::Simulation;

use super::competency::Competency;
use super::select::{best_choice, one_in, weighted_random_choice};
use super::Fuzzer;

impl Fuzzer {
    pub(crate) fn movement_decision(&mut self, id: PlayerId, sim: &Simulation) -> Action {
        let player = sim.player(id);
        match player.state {
            PlayerState::Following => self.follow_leader(id, sim),
            PlayerState::Idle => self.wander(id, sim),
            PlayerState::Working => {
                let task_location = player
                    .current_task
                    .and_then(|task| sim.map().task(task))
                    .map(|task| task.location);
                match task_location {
                    Some(location) if location != player.location => self.random_move(id, sim),
                    _ => Action::None,
                }
            }
            PlayerState::Dead | PlayerState::FixSabotage => Action::None,
        }
    }

    fn follow_leader(&mut self, id: PlayerId, sim: &Simulation) -> Action {
        let player = sim.player(id);
        let wanders_off = player.is_impostor()
            && one_in(&mut self.rng, self.config.impostor_leave_group_gate);
        if self.competency_of(id) == Competency::Troll || wanders_off {
            return Action::set_state(PlayerState::Idle);
        }

        let Some(leader) = player.leader else {
            return Action::set_state(PlayerState::Idle);
        };
        let target = sim.player(leader).location;
        if target != player.location {
            Action::Move { dest: target }
        } else {
            Action::None
        }
    }

    fn wander(&mut self, id: PlayerId, sim: &Simulation) -> Action {
        match self.competency_of(id) {
            Competency::Troll => {
                // any neighbor, vents included; the engine sorts out legality
                let location = sim.player(id).location;
                match sim.map().neighbors(location).choose(&mut self.rng) {
                    Some(&(dest, _)) => Action::Move { dest },
                    None => Action::None,
                }
            }
            Competency::Full => {
                let player = sim.player(id);
                let candidates: Vec<(LocationId, f32)> = sim
                    .legal_moves(id)
                    .into_iter()
                    .map(|dest| (dest, 1.0 - player.dislike_of(dest)))
                    .collect();
                match best_choice(&candidates) {
                    Some(&dest) => Action::Move { dest },
                    None => Action::None,
                }
            }
            Competency::Normal => self.random_move(id, sim),
        }
    }

    fn random_move(&mut self, id: PlayerId, sim: &Simulation) -> Action {
        let candidates = destination_weights(id, sim);
        match weighted_random_choice(&mut self.rng, &candidates) {
            Some(&dest) => Action::Move { dest },
            None => Action::None,
        }
    }
}

/// Legal neighbors with their positive weights, in declaration order.
pub fn destination_weights(id: PlayerId, sim: &Simulation) -> Vec<(LocationId, f32)> {
    let player = sim.player(id);
    let cooldown_ticks = sim.rules().kill_cooldown_ticks;
    let cooldown_fraction = if cooldown_ticks > 0 {
        player.kill_cooldown as f32 / cooldown_ticks as f32
    } else {
        0.0
    };

    sim.legal_moves(id)
        .into_iter()
        .filter_map(|dest| {
            let vent_bonus = if player.is_impostor() && sim.map().is_vent(dest) {
                cooldown_fraction
            } else {
                0.0
            };
            let weight = 1.0 - player.dislike_of(dest) + vent_bonus;
            (weight > 0.0).then_some((dest, weight))
        })
        .collect()
}
