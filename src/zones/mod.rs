//! Card containers.
//!
//! Every place a card can be (hand, draw pile, discard, play area, a supply
//! pile, the trash) is a `Zone`. A card id appears in at most one zone of a
//! game at any time; the game enforces that across zones, each `Zone`
//! enforces it internally.

pub mod zone;

pub use zone::{Zone, ZonePosition};
