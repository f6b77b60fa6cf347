//! Kill & Witness System
//!
//! Resolves kill attempts, records who saw them and triggers the reports
//! attached to the kill.

use sim_events::{KillIntent, KillWitness, PlayerId, PlayerState};

use super::Simulation;

impl Simulation {
    pub(crate) fn kill(&mut self, attacker: PlayerId, intent: &KillIntent) -> bool {
        let target = intent.target;
        let (Some(killer), Some(victim)) = (self.get_player(attacker), self.get_player(target)) else {
            return false;
        };
        let legal = killer.is_alive()
            && killer.is_impostor()
            && killer.kill_cooldown == 0
            && victim.is_alive()
            && victim.is_crewmate()
            && killer.location == victim.location;
        if !legal {
            return false;
        }

        let location = killer.location;
        let witnesses: Vec<PlayerId> = self
            .occupants(location)
            .iter()
            .copied()
            .filter(|&p| p != attacker && p != target && self.is_alive(p))
            .collect();

        self.kill_history.push(KillWitness {
            tick: self.tick,
            killer: attacker,
            victim: target,
            location,
            witnesses: witnesses.clone(),
        });

        self.players[target.index()].state = PlayerState::Dead;
        self.sever(attacker, target);
        self.players[attacker.index()].kill_cooldown = self.rules.kill_cooldown_ticks;

        tracing::debug!(
            tick = self.tick,
            killer = %attacker,
            victim = %target,
            witnesses = witnesses.len(),
            "kill"
        );

        if intent.self_report {
            self.report(attacker, &[target], intent.self_report_witness);
        }

        if let Some(reporter) = intent.witness_reporter {
            if witnesses.contains(&reporter) && self.is_alive(reporter) {
                self.report(reporter, &[target], Some(attacker));
            }
        }
        true
    }

    /// Cut any leader/follower link between the two players.
    fn sever(&mut self, a: PlayerId, b: PlayerId) {
        for (x, y) in [(a, b), (b, a)] {
            if self.players[x.index()].leader == Some(y) {
                self.players[x.index()].leader = None;
                self.players[y.index()].followers.retain(|&f| f != x);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use sim_events::{Action, Verdict};

    #[test]
    fn test_lone_kill() {
        let mut sim = sim();
        let red = id(&sim, "red");
        let blue = id(&sim, "blue");
        let admin = loc(&sim, "admin");
        place(&mut sim, red, admin);
        place(&mut sim, blue, admin);

        sim.apply(red, Action::Kill(KillIntent::new(blue)));
        assert_eq!(sim.player(blue).state, PlayerState::Dead);
        assert!(!sim.player(blue).voted_out);
        assert_eq!(sim.player(red).kill_cooldown, sim.rules().kill_cooldown_ticks);

        let record = &sim.kill_history()[0];
        assert_eq!(record.killer, red);
        assert_eq!(record.victim, blue);
        assert_eq!(record.location, admin);
        assert!(!record.has_witnesses());
        // the body stays in the room
        assert!(sim.occupants(admin).contains(&blue));
        assert_eq!(sim.unreported_bodies(), vec![blue]);
    }

    #[test]
    fn test_witnesses_are_living_bystanders() {
        let mut sim = sim();
        let red = id(&sim, "red");
        let blue = id(&sim, "blue");
        let green = id(&sim, "green");
        let yellow = id(&sim, "yellow");
        player_mut(&mut sim, yellow).mark_dead();

        assert!(sim.kill(red, &KillIntent::new(blue)));
        assert_eq!(sim.kill_history()[0].witnesses, vec![green, id(&sim, "pink")]);
    }

    #[test]
    fn test_illegal_kills_declined() {
        let mut sim = sim();
        let red = id(&sim, "red");
        let blue = id(&sim, "blue");
        let green = id(&sim, "green");

        // crewmate attacker
        assert!(!sim.kill(blue, &KillIntent::new(green)));
        // cooldown
        player_mut(&mut sim, red).kill_cooldown = 1;
        assert!(!sim.kill(red, &KillIntent::new(blue)));
        player_mut(&mut sim, red).kill_cooldown = 0;
        // different rooms
        let admin = loc(&sim, "admin");
        place(&mut sim, blue, admin);
        assert!(!sim.kill(red, &KillIntent::new(blue)));
        // dead target
        player_mut(&mut sim, green).mark_dead();
        assert!(!sim.kill(red, &KillIntent::new(green)));

        assert!(sim.kill_history().is_empty());
        assert_eq!(sim.player(blue).state, PlayerState::Idle);
    }

    #[test]
    fn test_kill_severs_relation() {
        let mut sim = sim();
        let red = id(&sim, "red");
        let blue = id(&sim, "blue");
        let green = id(&sim, "green");
        assert!(sim.form_group(blue, &[red, green]));

        assert!(sim.kill(red, &KillIntent::new(blue)));
        assert!(sim.player(red).leader.is_none());
        assert_eq!(sim.player(blue).followers, vec![green]);
        assert!(sim.star_invariant_holds());
    }

    #[test]
    fn test_self_report_with_witness_votes_out_killer() {
        let mut sim = sim();
        let red = id(&sim, "red");
        let blue = id(&sim, "blue");

        // everyone is in the cafeteria, so the kill is witnessed
        sim.apply(red, Action::Kill(KillIntent::new(blue).with_self_report(None)));
        assert!(sim.player(red).voted_out);
        let (_, outcome) = sim.log().outcomes().next().expect("outcome logged");
        assert_eq!(outcome.verdict, Verdict::DirectWitness);
        assert_eq!(outcome.voted_out, Some(red));
        assert!(sim.player(blue).body_reported);
    }

    #[test]
    fn test_tied_reports_eliminate_nobody() {
        let mut sim = sim();
        let red = id(&sim, "red");
        let blue = id(&sim, "blue");
        let green = id(&sim, "green");
        let admin = loc(&sim, "admin");
        for p in [red, blue, green] {
            place(&mut sim, p, admin);
        }

        // red blames green; one impostor against one crewmate is a tie
        let intent = KillIntent::new(blue)
            .with_self_report(Some(green))
            .with_witness_reporter(green);
        assert!(sim.kill(red, &intent));
        let verdicts: Vec<Verdict> = sim.log().outcomes().map(|(_, o)| o.verdict).collect();
        assert_eq!(verdicts, vec![Verdict::NoMajority, Verdict::NoMajority]);
        assert!(sim.player(green).is_alive());
        assert!(sim.player(red).is_alive());
    }

    #[test]
    fn test_witness_reporter_must_be_a_witness() {
        let mut sim = sim();
        let red = id(&sim, "red");
        let blue = id(&sim, "blue");
        let green = id(&sim, "green");
        let admin = loc(&sim, "admin");
        place(&mut sim, red, admin);
        place(&mut sim, blue, admin);

        assert!(sim.kill(red, &KillIntent::new(blue).with_witness_reporter(green)));
        assert_eq!(sim.log().outcomes().count(), 0);
        assert!(sim.player(red).is_alive());
    }
}
