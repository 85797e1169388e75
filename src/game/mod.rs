//! The game: state, phase machine, buying, scoring and setup.
//!
//! ## Key Types
//!
//! - `Game`: authoritative aggregate; sole authority for card transfers
//! - `GameBuilder`: deals a game from a catalog and a `GameConfig`
//! - `BuyOption`: one purchase combination
//! - `CardLocation`: where a card currently is
//! - `GameResult`: winner(s) of a finished game

mod builder;
mod buy;
mod scoring;
mod state;
mod turn;

pub use builder::{GameBuilder, MAX_PLAYERS};
pub use buy::{enumerate_buy_options, BuyOption, PileSummary};
pub use scoring::GameResult;
pub use state::{CardLocation, Game};
