//! # rust-deckbuilder
//!
//! Rules engine for a Dominion-style deck-building card game, built for
//! simulation: strategies can clone the game, play forward, and throw the
//! clone away.
//!
//! ## Design Principles
//!
//! 1. **Content-Agnostic**: No hardcoded card names in the engine. Card
//!    types come from a `CardCatalog`, setup from a `GameConfig`.
//!
//! 2. **N-Player**: Every per-player structure is a `PlayerMap`, sized at
//!    setup.
//!
//! 3. **Soft Invalidity**: An illegal decision from a strategy degrades to
//!    its benign default (no card, no targets, no buy). Only contract
//!    violations by the caller are errors.
//!
//! ## Architecture
//!
//! - **Card Arena**: `Game` owns every card; zones hold ids. A location
//!   index maps each card to exactly one holder.
//!
//! - **Persistent Data Structures**: Cheap cloning via `im-rs`, so
//!   lookahead strategies can simulate on copies.
//!
//! - **Deterministic**: All shuffling goes through a seeded `GameRng`.
//!
//! ## Modules
//!
//! - `core`: Player ids, RNG, phases, targets, configuration, errors
//! - `cards`: Card types, card copies, the catalog
//! - `zones`: Ordered card containers
//! - `players`: Per-player zones, counters and the draw protocol
//! - `effects`: Micro-actions, targeting and their interpreter
//! - `game`: Game state, turn state machine, buying, scoring, setup
//! - `strategy`: Decision providers
//! - `games`: Card content (the base set)

pub mod cards;
pub mod core;
pub mod effects;
pub mod game;
pub mod games;
pub mod players;
pub mod strategy;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    ActionRecord, GameConfig, GameRng, GameRngState, Phase, PlayerId, PlayerMap, RulesError,
    RulesResult, Target, TargetDomain, TargetList, DEFAULT_KINGDOM,
};

pub use crate::cards::{Card, CardCatalog, CardClass, CardId, CardType, CardTypeId, CatalogProvider};

pub use crate::zones::{Zone, ZonePosition};

pub use crate::players::{Player, PlayerZone};

pub use crate::effects::{
    ActionInterpreter, Amount, Effect, MicroAction, TargetCount, TargetFilter, TargetSelector,
    TargetSpec,
};

pub use crate::game::{
    enumerate_buy_options, BuyOption, CardLocation, Game, GameBuilder, GameResult, MAX_PLAYERS,
};

pub use crate::strategy::{
    LookaheadStrategy, PerPlayer, RandomStrategy, ScriptedStrategy, StrategyProvider,
};

pub use crate::games::base::BaseSet;
