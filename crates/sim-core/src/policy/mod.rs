//! Agent Decision Policy
//!
//! The fuzzer drives every player with randomized but rule-following
//! behavior. It owns the only random number generator of a run, so a fixed
//! seed and a fixed map always replay the same game.

pub mod action;
pub mod competency;
pub mod movement;
pub mod select;
pub mod state;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use sim_events::{Action, PlayerId};

use crate::config::PolicyConfig;
use crate::systems::{Policy, Simulation};

pub use competency::Competency;

/// Randomized policy with per-player competency and social groups.
#[derive(Debug, Clone)]
pub struct Fuzzer {
    rng: SmallRng,
    config: PolicyConfig,
    /// Indexed by `PlayerId`.
    competencies: Vec<Competency>,
    groups_initialised: bool,
}

impl Fuzzer {
    pub fn new(sim: &Simulation, seed: u64, config: PolicyConfig) -> Self {
        Self::with_rng(sim, SmallRng::seed_from_u64(seed), config)
    }

    /// Build with an existing generator. Competencies are rolled here, in
    /// player order.
    pub fn with_rng(sim: &Simulation, mut rng: SmallRng, config: PolicyConfig) -> Self {
        let competencies = sim
            .players()
            .iter()
            .map(|player| {
                if !config.enable_competency || player.is_impostor() {
                    Competency::Normal
                } else {
                    Competency::roll(&mut rng, &config)
                }
            })
            .collect();

        Self {
            rng,
            config,
            competencies,
            groups_initialised: false,
        }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    pub fn competency_of(&self, player: PlayerId) -> Competency {
        if !self.config.enable_competency {
            return Competency::Normal;
        }
        self.competencies
            .get(player.index())
            .copied()
            .unwrap_or_default()
    }

    /// Split the living roster into shuffled groups of `group_size`, each
    /// with a randomly elected leader. Runs once.
    pub fn ensure_groups(&mut self, sim: &mut Simulation) {
        if self.groups_initialised {
            return;
        }
        self.groups_initialised = true;

        let mut players: Vec<PlayerId> = sim
            .roster()
            .iter()
            .copied()
            .filter(|&id| sim.is_alive(id))
            .collect();
        players.shuffle(&mut self.rng);

        for group in players.chunks(self.config.group_size.max(1)) {
            let Some(&leader) = group.choose(&mut self.rng) else {
                continue;
            };
            let followers: Vec<PlayerId> = group.iter().copied().filter(|&p| p != leader).collect();
            sim.form_group(leader, &followers);
            tracing::debug!(leader = %leader, followers = ?followers, "formed group");
        }
    }

    /// Form groups if needed, then advance the simulation by one tick.
    pub fn tick(&mut self, sim: &mut Simulation) {
        self.ensure_groups(sim);
        sim.step(self);
    }
}

impl Policy for Fuzzer {
    fn decide_state(&mut self, player: PlayerId, sim: &Simulation) -> Action {
        self.state_decision(player, sim)
    }

    fn decide_move(&mut self, player: PlayerId, sim: &Simulation) -> Action {
        self.movement_decision(player, sim)
    }

    fn decide_action(&mut self, player: PlayerId, sim: &Simulation) -> Action {
        self.action_decision(player, sim)
    }
}
