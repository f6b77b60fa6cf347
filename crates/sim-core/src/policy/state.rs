//! State decisions: work, idle, follow, and leader re-election.

use rand::seq::SliceRandom;

use sim_events::{Action, PlayerId, PlayerState};

use crate::systems::Simulation;

use super::select::one_in;
use super::Fuzzer;

impl Fuzzer {
    pub(crate) fn state_decision(&mut self, id: PlayerId, sim: &Simulation) -> Action {
        let player = sim.player(id);
        match player.state {
            PlayerState::Idle => {
                if player.has_work() {
                    Action::set_state(PlayerState::Working)
                } else {
                    Action::None
                }
            }
            PlayerState::Working => {
                let bored = player.is_impostor()
                    && one_in(&mut self.rng, self.config.impostor_stop_working_gate);
                if !player.has_work() || bored {
                    Action::set_state(PlayerState::Idle)
                } else {
                    Action::None
                }
            }
            PlayerState::Following => match player.leader {
                None => Action::set_state(PlayerState::Idle),
                Some(leader) if !sim.is_alive(leader) => self.reelect(leader, sim),
                Some(_) => Action::None,
            },
            PlayerState::Dead | PlayerState::FixSabotage => Action::None,
        }
    }

    /// New leader for the group of a dead leader.
    ///
    /// Prefers followers still standing by the body; otherwise any living
    /// follower. The rest of the living group follows the new leader.
    fn reelect(&mut self, dead_leader: PlayerId, sim: &Simulation) -> Action {
        let fallen = sim.player(dead_leader);
        let living: Vec<PlayerId> = fallen
            .followers
            .iter()
            .copied()
            .filter(|&f| sim.is_alive(f))
            .collect();
        let nearby: Vec<PlayerId> = living
            .iter()
            .copied()
            .filter(|&f| sim.player(f).location == fallen.location)
            .collect();
        let pool = if nearby.is_empty() { &living } else { &nearby };

        let Some(&leader) = pool.choose(&mut self.rng) else {
            return Action::Follow { leader: None };
        };
        let followers = living.iter().copied().filter(|&f| f != leader).collect();
        Action::Regroup { leader, followers }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::systems::test_support::{id, loc, place, player_mut};

    #[test]
    fn test_idle_with_tasks_goes_to_work() {
        let sim = sim();
        let mut fuzzer = fuzzer(&sim, 0);
        let blue = id(&sim, "blue");
        let pink = id(&sim, "pink");
        assert_eq!(
            fuzzer.state_decision(blue, &sim),
            Action::set_state(PlayerState::Working)
        );
        // pink has nothing to do
        assert_eq!(fuzzer.state_decision(pink, &sim), Action::None);
    }

    #[test]
    fn test_crewmate_keeps_working_until_done() {
        let mut sim = sim();
        let mut fuzzer = fuzzer(&sim, 0);
        let blue = id(&sim, "blue");
        player_mut(&mut sim, blue).state = PlayerState::Working;
        for _ in 0..50 {
            assert_eq!(fuzzer.state_decision(blue, &sim), Action::None);
        }
        player_mut(&mut sim, blue).tasks.clear();
        assert_eq!(
            fuzzer.state_decision(blue, &sim),
            Action::set_state(PlayerState::Idle)
        );
    }

    #[test]
    fn test_impostor_sometimes_stops_working() {
        let mut sim = sim();
        let mut fuzzer = fuzzer(&sim, 0);
        let red = id(&sim, "red");
        player_mut(&mut sim, red).state = PlayerState::Working;
        let stops = (0..400)
            .filter(|_| fuzzer.state_decision(red, &sim) == Action::set_state(PlayerState::Idle))
            .count();
        assert!((50..150).contains(&stops));
    }

    #[test]
    fn test_orphaned_follower_goes_idle() {
        let mut sim = sim();
        let mut fuzzer = fuzzer(&sim, 0);
        let blue = id(&sim, "blue");
        player_mut(&mut sim, blue).state = PlayerState::Following;
        assert_eq!(
            fuzzer.state_decision(blue, &sim),
            Action::set_state(PlayerState::Idle)
        );
    }

    #[test]
    fn test_dead_leader_triggers_reelection_from_nearby() {
        let mut sim = sim();
        let mut fuzzer = fuzzer(&sim, 0);
        let blue = id(&sim, "blue");
        let green = id(&sim, "green");
        let yellow = id(&sim, "yellow");
        let pink = id(&sim, "pink");
        assert!(sim.form_group(blue, &[green, yellow, pink]));
        let admin = loc(&sim, "admin");
        place(&mut sim, pink, admin);
        player_mut(&mut sim, blue).mark_dead();

        for _ in 0..20 {
            match fuzzer.state_decision(green, &sim) {
                Action::Regroup { leader, followers } => {
                    assert!(leader == green || leader == yellow);
                    assert_eq!(followers.len(), 2);
                    assert!(!followers.contains(&leader));
                    assert!(followers.contains(&pink) || leader == pink);
                }
                other => panic!("expected a regroup, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_reelection_falls_back_to_any_living_follower() {
        let mut sim = sim();
        let mut fuzzer = fuzzer(&sim, 0);
        let blue = id(&sim, "blue");
        let green = id(&sim, "green");
        assert!(sim.form_group(blue, &[green]));
        let admin = loc(&sim, "admin");
        place(&mut sim, green, admin);
        player_mut(&mut sim, blue).mark_dead();

        assert_eq!(
            fuzzer.state_decision(green, &sim),
            Action::Regroup {
                leader: green,
                followers: vec![]
            }
        );
    }
}
