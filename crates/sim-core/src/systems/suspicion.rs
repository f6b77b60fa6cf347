//! Suspicion Scoring
//!
//! Heuristic used when a body report has no direct witness. Every living
//! player gets an integer score from three signals, vouched-for players are
//! cleared, and the players near the top become suspects.
//!
//! "The killer's room" is wherever the killer stands when the body is
//! reported, not where the kill happened.

use sim_events::{KillWitness, PlayerId};

use super::Simulation;

/// Movement records within this many ticks of a kill count for their onlooker.
pub const MOVEMENT_WINDOW: i64 = 2;

/// Players whose score lies within `window` of the maximum, in input order.
pub fn select_suspects(scores: &[(PlayerId, i64)], window: i64) -> Vec<PlayerId> {
    let Some(max) = scores.iter().map(|&(_, score)| score).max() else {
        return Vec::new();
    };
    scores
        .iter()
        .filter(|&&(_, score)| max - window <= score && score <= max)
        .map(|&(id, _)| id)
        .collect()
}

/// Departures from the killer's room up to the window after the kill, or
/// arrivals into it less than the window before. The bounds are asymmetric.
fn correlates(entry_tick: u64, kill_tick: u64, departed: bool, arrived: bool) -> bool {
    let (entry_tick, kill_tick) = (entry_tick as i64, kill_tick as i64);
    (entry_tick - kill_tick <= MOVEMENT_WINDOW && departed)
        || (kill_tick - entry_tick < MOVEMENT_WINDOW && arrived)
}

impl Simulation {
    /// Scores for every living player, in roster order.
    pub fn suspicion_scores(&self, record: &KillWitness, bodies: &[PlayerId]) -> Vec<(PlayerId, i64)> {
        let mut scores: Vec<Option<i64>> = self
            .players
            .iter()
            .map(|p| p.is_alive().then_some(0))
            .collect();
        let mut bump = |id: PlayerId| {
            if let Some(Some(score)) = scores.get_mut(id.index()) {
                *score += 1;
            }
        };

        if let Some(room) = self.get_player(record.killer).map(|k| k.location) {
            // sharing a room with the killer right now
            for &p in self.occupants(room) {
                if !bodies.contains(&p) && self.is_alive(p) {
                    bump(p);
                }
            }

            // watched someone leave or enter that room around the kill
            for entry in &self.movement_history {
                if !self.is_alive(entry.mover) || !self.is_alive(entry.witness) {
                    continue;
                }
                let departed = entry.from == room;
                let arrived = entry.to == room;
                if correlates(entry.tick, record.tick, departed, arrived) {
                    bump(entry.witness);
                }
            }
        }

        // tied to a victim
        for player in self.players.iter().filter(|p| p.is_alive()) {
            let leads_victim = player.followers.iter().any(|f| bodies.contains(f));
            let follows_victim = player.leader.is_some_and(|l| bodies.contains(&l));
            if leads_victim || follows_victim {
                bump(player.id);
            }
        }

        for truster in self.players.iter().filter(|p| p.is_alive()) {
            for vouched in &truster.vouches_for {
                if let Some(Some(score)) = scores.get_mut(vouched.index()) {
                    *score = 0;
                }
            }
        }

        self.roster
            .iter()
            .filter_map(|&id| scores[id.index()].map(|score| (id, score)))
            .collect()
    }

    /// Whether all suspects belong to one leader/follower star.
    pub(crate) fn share_one_group(&self, suspects: &[PlayerId]) -> bool {
        let root = |id: PlayerId| self.player(id).leader.unwrap_or(id);
        match suspects.split_first() {
            None => false,
            Some((&first, rest)) => rest.iter().all(|&p| root(p) == root(first)),
        }
    }
}
