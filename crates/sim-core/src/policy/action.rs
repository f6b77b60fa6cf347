//! Action decisions: reporting bodies, kills, task work and emergency
//! reports on a leader caught venting.

use rand::seq::SliceRandom;
use rand::Rng;

use sim_events::{Action, KillIntent, PlayerId, PlayerState};

use crate::systems::Simulation;

use super::competency::Competency;
use super::select::one_in;
use super::Fuzzer;

impl Fuzzer {
    pub(crate) fn action_decision(&mut self, id: PlayerId, sim: &Simulation) -> Action {
        if !sim.is_alive(id) {
            return Action::None;
        }

        let report = self.auto_report(id, sim);
        if !report.is_none() {
            return report;
        }

        let kill = self.attempt_kill(id, sim);
        if !kill.is_none() {
            return kill;
        }

        match sim.player(id).state {
            PlayerState::Working => self.work(id, sim),
            PlayerState::Following => self.watch_leader(id, sim),
            _ => Action::None,
        }
    }

    /// Crewmates report every unreported body, depending on competency.
    fn auto_report(&mut self, id: PlayerId, sim: &Simulation) -> Action {
        if sim.player(id).is_impostor() {
            return Action::None;
        }
        let bodies = sim.unreported_bodies();
        if bodies.is_empty() {
            return Action::None;
        }

        let reports = match self.competency_of(id) {
            Competency::Full => true,
            Competency::Normal => self.rng.gen::<f64>() < self.config.normal_body_report_chance,
            Competency::Troll => false,
        };
        if reports {
            Action::Report {
                bodies,
                witnessed: None,
            }
        } else {
            Action::None
        }
    }

    fn attempt_kill(&mut self, id: PlayerId, sim: &Simulation) -> Action {
        let player = sim.player(id);
        if !player.is_impostor() || player.kill_cooldown > 0 {
            return Action::None;
        }
        if !one_in(&mut self.rng, self.config.kill_gate) {
            return Action::None;
        }

        let crewmates: Vec<PlayerId> = sim
            .living_others_here(id)
            .into_iter()
            .filter(|&p| sim.player(p).is_crewmate())
            .collect();
        let Some(&target) = crewmates.choose(&mut self.rng) else {
            return Action::None;
        };
        let bystanders: Vec<PlayerId> = crewmates.into_iter().filter(|&p| p != target).collect();

        let mut intent = KillIntent::new(target);
        if one_in(&mut self.rng, self.config.self_report_gate) {
            let blamed = bystanders.choose(&mut self.rng).copied();
            intent = intent.with_self_report(blamed);
        }

        if let Some(&bystander) = bystanders.choose(&mut self.rng) {
            let reports = match self.competency_of(bystander) {
                Competency::Full => true,
                Competency::Normal => {
                    self.rng.gen::<f64>() < self.config.normal_witness_report_chance
                }
                Competency::Troll => false,
            };
            if reports {
                intent = intent.with_witness_reporter(bystander);
            }
        }

        Action::Kill(intent)
    }

    fn work(&mut self, id: PlayerId, sim: &Simulation) -> Action {
        let player = sim.player(id);
        let Some(current) = player.current_task else {
            let task = match self.competency_of(id) {
                // shortest first
                Competency::Full => player
                    .tasks
                    .iter()
                    .copied()
                    .min_by_key(|&task| sim.map().task(task).map(|t| t.length)),
                _ => player.tasks.choose(&mut self.rng).copied(),
            };
            return match task {
                Some(task) => Action::StartTask { task },
                None => Action::None,
            };
        };

        match sim.map().task(current) {
            Some(task) if task.location == player.location => Action::WorkTask,
            _ => Action::None,
        }
    }

    /// Report a leader seen in a vent chamber the follower cannot enter.
    fn watch_leader(&mut self, id: PlayerId, sim: &Simulation) -> Action {
        if self.competency_of(id) == Competency::Troll {
            return Action::set_state(PlayerState::Idle);
        }
        let player = sim.player(id);
        let Some(leader) = player.leader else {
            return Action::None;
        };

        let leader_in_vent = sim.map().is_vent(sim.player(leader).location);
        let can_vent = player.is_impostor() && player.vent_cooldown == 0;
        if leader_in_vent && !can_vent {
            Action::Report {
                bodies: Vec::new(),
                witnessed: Some(leader),
            }
        } else {
            Action::None
        }
    }
}
