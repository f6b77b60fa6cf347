//! Handle Types
//!
//! Index handles into the simulation's arenas. Handles are plain indices so
//! relations between players never form owning cycles.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub usize);

        impl $name {
            /// Position of this handle in its arena.
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl From<usize> for $name {
            fn from(index: usize) -> Self {
                Self(index)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

handle!(
    /// Handle to a player in the simulation roster arena.
    PlayerId,
    "player_"
);

handle!(
    /// Handle to a location node of the world graph.
    LocationId,
    "location_"
);

handle!(
    /// Handle to a task definition.
    TaskId,
    "task_"
);
