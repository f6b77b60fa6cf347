//! Simulation Stepper
//!
//! One tick is: cooldowns, state phase, roster reorder, movement phase,
//! action phase. Each phase applies every action as soon as it is decided,
//! so later players see the effects of earlier ones.

use sim_events::{Action, PlayerId, PlayerState};

use super::Simulation;

/// Decision-making side of the engine. Implementations read the simulation
/// and return an intent; they never mutate it directly.
pub trait Policy {
    fn decide_state(&mut self, player: PlayerId, sim: &Simulation) -> Action;
    fn decide_move(&mut self, player: PlayerId, sim: &Simulation) -> Action;
    fn decide_action(&mut self, player: PlayerId, sim: &Simulation) -> Action;
}

/// The three decision phases of a tick, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    State,
    Movement,
    Action,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::State, Phase::Movement, Phase::Action];

    fn decide<P: Policy + ?Sized>(self, policy: &mut P, player: PlayerId, sim: &Simulation) -> Action {
        match self {
            Phase::State => policy.decide_state(player, sim),
            Phase::Movement => policy.decide_move(player, sim),
            Phase::Action => policy.decide_action(player, sim),
        }
    }
}

impl Simulation {
    /// Advance exactly one tick.
    pub fn step<P: Policy + ?Sized>(&mut self, policy: &mut P) {
        self.tick += 1;
        self.tick_cooldowns();

        self.run_phase(Phase::State, policy);
        self.reorder_roster();
        self.run_phase(Phase::Movement, policy);
        self.run_phase(Phase::Action, policy);
    }

    fn run_phase<P: Policy + ?Sized>(&mut self, phase: Phase, policy: &mut P) {
        let order = self.roster.clone();
        for player in order {
            if !self.is_alive(player) {
                continue;
            }
            let action = phase.decide(policy, player, self);
            self.apply(player, action);
        }
    }

    /// Followers go last so they can chase their leader's new position.
    fn reorder_roster(&mut self) {
        let players = &self.players;
        self.roster
            .sort_by_key(|id| players[id.index()].state == PlayerState::Following);
        tracing::debug!(tick = self.tick, order = ?self.roster, "roster order");
    }
}
