//! Social System
//!
//! Leader/follower relations. Relations are handles into the player arena
//! and always form disjoint stars: a leader never follows anyone and a
//! follower never leads.

use sim_events::{PlayerId, PlayerState};

use super::Simulation;

impl Simulation {
    /// Detach `id` from its leader, if any.
    fn detach_from_leader(&mut self, id: PlayerId) {
        if let Some(old) = self.players[id.index()].leader.take() {
            self.players[old.index()].followers.retain(|&f| f != id);
        }
    }

    /// Drop every follower of `id`. Orphans keep their state and go idle on
    /// their next state decision.
    fn release_followers(&mut self, id: PlayerId) {
        let followers = std::mem::take(&mut self.players[id.index()].followers);
        for follower in followers {
            if self.players[follower.index()].leader == Some(id) {
                self.players[follower.index()].leader = None;
            }
        }
    }

    pub(crate) fn follow(&mut self, id: PlayerId, leader: Option<PlayerId>) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        if let Some(leader) = leader {
            let valid = leader != id
                && self.is_alive(leader)
                && !self.players[leader.index()].is_follower()
                && !self.players[id.index()].is_leader();
            if !valid {
                return false;
            }
        }

        self.detach_from_leader(id);
        match leader {
            None => {
                self.players[id.index()].state = PlayerState::Idle;
            }
            Some(leader) => {
                self.players[id.index()].leader = Some(leader);
                self.players[id.index()].state = PlayerState::Following;
                let followers = &mut self.players[leader.index()].followers;
                if !followers.contains(&id) {
                    followers.push(id);
                }
            }
        }
        true
    }

    pub(crate) fn regroup(&mut self, leader: PlayerId, followers: &[PlayerId]) -> bool {
        let formed = self.form_group(leader, followers);
        if formed {
            tracing::debug!(
                tick = self.tick,
                leader = %leader,
                followers = followers.len(),
                "group re-elected its leader"
            );
        }
        formed
    }

    /// Install a new star with `leader` at its centre.
    ///
    /// Every member is first cut loose from whatever relations it had.
    /// Declined unless all members are alive and distinct.
    pub fn form_group(&mut self, leader: PlayerId, followers: &[PlayerId]) -> bool {
        let mut members = Vec::with_capacity(followers.len() + 1);
        members.push(leader);
        members.extend_from_slice(followers);
        for (i, member) in members.iter().enumerate() {
            if !self.is_alive(*member) || members[..i].contains(member) {
                return false;
            }
        }

        for &member in &members {
            self.detach_from_leader(member);
            self.release_followers(member);
        }

        let head = &mut self.players[leader.index()];
        head.state = PlayerState::Idle;
        head.followers = followers.to_vec();
        for &follower in followers {
            let player = &mut self.players[follower.index()];
            player.leader = Some(leader);
            player.state = PlayerState::Following;
        }
        true
    }

    /// Whether every relation in the arena forms a well-formed star.
    pub fn star_invariant_holds(&self) -> bool {
        self.players.iter().all(|player| {
            if player.is_leader() && player.is_follower() {
                return false;
            }
            let leader_ok = player.leader.map_or(true, |leader| {
                self.get_player(leader).is_some_and(|l| {
                    l.leader.is_none() && l.followers.iter().filter(|&&f| f == player.id).count() == 1
                })
            });
            let followers_ok = player.followers.iter().all(|&f| {
                self.get_player(f)
                    .is_some_and(|follower| follower.leader == Some(player.id))
            });
            leader_ok && followers_ok
        })
    }
}
