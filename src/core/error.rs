//! Contract violations.
//!
//! Only engine bugs and malformed setup end up here. A provider choosing an
//! illegal target, an unaffordable buy, or drawing from an empty deck is a
//! legitimate game outcome and never produces a `RulesError`.

use thiserror::Error;

use super::phase::Phase;
use crate::cards::{CardClass, CardId, CardTypeId};

/// A violated engine contract.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("card type '{name}' is already registered")]
    DuplicateCardType { name: String },

    #[error("card type '{name}' ({class:?}) has an invalid value: {reason}")]
    InvalidCardValue {
        name: String,
        class: CardClass,
        reason: &'static str,
    },

    #[error("unknown card type '{0}'")]
    UnknownCardType(String),

    #[error("card type {0} is not in the catalog")]
    UnknownCardTypeId(CardTypeId),

    #[error("{0} does not exist")]
    UnknownCard(CardId),

    #[error("{0} is already in the zone")]
    CardAlreadyInZone(CardId),

    #[error("{0} is not in the zone")]
    CardNotInZone(CardId),

    #[error("position {index} is out of range for a zone of {len} cards")]
    PositionOutOfRange { index: usize, len: usize },

    #[error("operation requires phase {expected:?}, but the game is in {actual:?}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("no pending micro-action to execute")]
    NoPendingAction,

    #[error("no card is being played")]
    NoSelectedCard,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the engine.
pub type RulesResult<T> = Result<T, RulesError>;
