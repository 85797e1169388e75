//! The base set.
//!
//! Treasures, victory cards, Curse, and the kingdom cards, each action card
//! written as a list of micro-actions. `GameConfig::base` names these cards
//! for the standard setup.
//!
//! ```
//! use rust_deckbuilder::cards::CardCatalog;
//! use rust_deckbuilder::games::base::BaseSet;
//!
//! let catalog = CardCatalog::from_provider(&BaseSet).unwrap();
//! assert_eq!(catalog.by_name("Province").unwrap().end_weight, 1);
//! assert_eq!(catalog.by_name("Smithy").unwrap().actions.len(), 1);
//! ```

mod cards;

pub use cards::{kingdom_cards, BaseSet, KINGDOM};
