//! World Setup
//!
//! Map loading and initial player placement.

pub mod map;

pub use map::{load_map, parse_map, MapError};
