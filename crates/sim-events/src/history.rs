//! History Records
//!
//! Append-only observations the engine keeps for report resolution.

use serde::{Deserialize, Serialize};

use crate::ids::{LocationId, PlayerId};

/// A living player saw another player arrive in its location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementWitness {
    pub tick: u64,
    pub witness: PlayerId,
    pub mover: PlayerId,
    pub from: LocationId,
    pub to: LocationId,
}

/// A kill together with everyone else alive in the room at the time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillWitness {
    pub tick: u64,
    pub killer: PlayerId,
    pub victim: PlayerId,
    /// Where the kill happened. Suspicion scoring ignores this and looks at
    /// where the killer is when the body is reported.
    pub location: LocationId,
    /// Living occupants other than the killer and the victim.
    pub witnesses: Vec<PlayerId>,
}

impl KillWitness {
    pub fn has_witnesses(&self) -> bool {
        !self.witnesses.is_empty()
    }
}
