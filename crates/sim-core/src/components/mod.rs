//! Components
//!
//! The world graph and per-player state.

pub mod player;
pub mod world;

pub use player::*;
pub use world::*;
