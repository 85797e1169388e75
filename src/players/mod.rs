//! Players: four zones, three per-turn counters, and the draw/discard
//! protocol.

pub mod player;

pub use player::{Player, PlayerZone};
