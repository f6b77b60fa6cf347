//! Report & Voting
//!
//! Turns a report into an elimination decision. A report that names a
//! witnessed player is settled by a head count around the reporter; a plain
//! body report falls back to the kill history and, failing a direct witness,
//! to suspicion scoring. Every resolution lands in the action log.

use sim_events::{PlayerId, ReportOutcome, Verdict};

use super::suspicion::select_suspects;
use super::Simulation;

impl Simulation {
    pub(crate) fn report(
        &mut self,
        reporter: PlayerId,
        bodies: &[PlayerId],
        witnessed: Option<PlayerId>,
    ) -> bool {
        if self.get_player(reporter).is_none() {
            return false;
        }
        for &body in bodies {
            if let Some(player) = self.players.get_mut(body.index()) {
                if !player.is_alive() {
                    player.body_reported = true;
                }
            }
        }

        let (voted_out, verdict) = match witnessed.filter(|w| self.get_player(*w).is_some()) {
            Some(witnessed) => self.resolve_witnessed(reporter, witnessed),
            None => self.resolve_bodies(bodies),
        };

        tracing::debug!(
            tick = self.tick,
            reporter = %reporter,
            ?verdict,
            voted_out = ?voted_out,
            "report resolved"
        );
        self.log.record_outcome(
            self.tick,
            reporter,
            ReportOutcome {
                reporter,
                witnessed,
                bodies: bodies.to_vec(),
                voted_out,
                verdict,
            },
        );
        true
    }

    /// Head count of the living around the reporter, reporter included.
    fn resolve_witnessed(&mut self, reporter: PlayerId, witnessed: PlayerId) -> (Option<PlayerId>, Verdict) {
        let reporter_is_impostor = self.player(reporter).is_impostor();
        let (mut impostors, mut crewmates) = (0i64, 0i64);
        for other in self.living_others_here(reporter) {
            if self.player(other).is_impostor() {
                impostors += 1;
            } else {
                crewmates += 1;
            }
        }
        if reporter_is_impostor {
            impostors += 1;
        } else {
            crewmates += 1;
        }

        if impostors - crewmates >= 1 {
            (self.vote_out(reporter), Verdict::ReporterOutvoted)
        } else if crewmates - impostors >= 1 {
            if reporter_is_impostor {
                (self.vote_out(reporter), Verdict::FalseReporterOutvoted)
            } else {
                (self.vote_out(witnessed), Verdict::WitnessedOutvoted)
            }
        } else {
            (None, Verdict::NoMajority)
        }
    }

    fn resolve_bodies(&mut self, bodies: &[PlayerId]) -> (Option<PlayerId>, Verdict) {
        // earliest record wins
        let Some(record) = self
            .kill_history
            .iter()
            .find(|entry| bodies.contains(&entry.victim))
            .cloned()
        else {
            return (None, Verdict::NoKillRecord);
        };

        if record.has_witnesses() {
            return (self.vote_out(record.killer), Verdict::DirectWitness);
        }

        let scores = self.suspicion_scores(&record, bodies);
        let suspects = select_suspects(&scores, self.rules.sus_window);
        tracing::debug!(tick = self.tick, ?scores, ?suspects, "suspicion");

        match suspects.first() {
            Some(&chosen) if suspects.len() == 1 || self.share_one_group(&suspects) => {
                (self.vote_out(chosen), Verdict::Suspicion)
            }
            _ => (None, Verdict::InsufficientInformation),
        }
    }

    /// Eliminate a living player. Already-dead players are left alone.
    fn vote_out(&mut self, id: PlayerId) -> Option<PlayerId> {
        let player = self.players.get_mut(id.index())?;
        if !player.is_alive() {
            return None;
        }
        player.mark_voted_out();
        Some(id)
    }
}
