//! Core engine types: seats, RNG, phases, targets, configuration, errors.
//!
//! Nothing in here knows about specific cards. Content is supplied through
//! the catalog (`cards`) and setup through `GameConfig`.

pub mod action;
pub mod config;
pub mod error;
pub mod phase;
pub mod player;
pub mod rng;

pub use action::{ActionRecord, Target, TargetDomain, TargetList};
pub use config::{CardCount, GameConfig, DEFAULT_KINGDOM};
pub use error::{RulesError, RulesResult};
pub use phase::Phase;
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
