//! Movement
//!
//! Moves between adjacent locations, dislike bookkeeping, vent rules and
//! movement witnesses.

use sim_events::{LocationId, MovementWitness, PlayerId};

use crate::components::{EdgeKind, Player};

use super::Simulation;

impl Simulation {
    /// Whether `player` may cross an edge of the given kind right now.
    pub fn can_traverse(player: &Player, kind: EdgeKind) -> bool {
        !kind.is_vent() || (player.is_impostor() && player.vent_cooldown == 0)
    }

    /// Neighbors `id` could legally move to, in declaration order.
    pub fn legal_moves(&self, id: PlayerId) -> Vec<LocationId> {
        let Some(player) = self.get_player(id) else {
            return Vec::new();
        };
        if !player.is_alive() {
            return Vec::new();
        }
        self.map()
            .neighbors(player.location)
            .iter()
            .filter(|(_, kind)| Self::can_traverse(player, *kind))
            .map(|(dest, _)| *dest)
            .collect()
    }

    pub(crate) fn apply_move(&mut self, id: PlayerId, dest: LocationId) -> bool {
        let Some(player) = self.players.get(id.index()) else {
            return false;
        };
        if !player.is_alive() || dest.index() >= self.map.location_count() {
            return false;
        }
        let from = player.location;
        let Some(kind) = self.map.edge(from, dest) else {
            return false;
        };
        if !Self::can_traverse(player, kind) {
            return false;
        }

        let (delta, max) = (self.rules.delta_dislike, self.rules.max_dislike);
        let player = &mut self.players[id.index()];
        player.add_dislike(dest, delta, max);
        player.location = dest;

        self.occupants[from.index()].retain(|&p| p != id);
        if !self.occupants[dest.index()].contains(&id) {
            self.occupants[dest.index()].push(id);
        }

        let tick = self.tick;
        for &witness in &self.occupants[dest.index()] {
            if witness != id && self.players[witness.index()].is_alive() {
                self.movement_history.push(MovementWitness {
                    tick,
                    witness,
                    mover: id,
                    from,
                    to: dest,
                });
            }
        }

        if self.map.is_vent(from) && !self.map.is_vent(dest) {
            self.players[id.index()].vent_cooldown = self.rules.vent_cooldown_ticks;
        }
        true
    }
}
