//! Effect system for action cards.
//!
//! Card abilities are lists of micro-actions:
//! - `MicroAction`: an `Effect` paired with a `TargetSpec`
//! - `TargetSpec` / `TargetSelector`: what may be targeted, and validation
//! - `ActionInterpreter`: chooses targets and applies effects to a `Game`
//!
//! ## Design Philosophy
//!
//! Effects are game-agnostic verbs over three target domains (players,
//! cards, card types). Multi-step cards coordinate through the executed
//! history of the current play: an `Amount` can refer back to what an
//! earlier step targeted.

mod effect;
mod resolver;
mod targeting;

pub use effect::{Amount, Effect, MicroAction};
pub use resolver::ActionInterpreter;
pub use targeting::{TargetCount, TargetFilter, TargetSelector, TargetSpec};
