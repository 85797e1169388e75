//! Physical cards.
//!
//! A `Card` is one copy of a `CardType`. Cards are created once when a game
//! is dealt and are never destroyed: trashing relocates a card to the trash
//! and sets its `trashed` flag. The game stores every card in a flat arena
//! indexed by `CardId`; zones only hold ids.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use super::definition::CardTypeId;
use crate::core::PlayerId;

/// Identity of a physical card (its index in the game's arena).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card#{}", self.0)
    }
}

/// Mutable per-copy state.
///
/// Equality is identity-and-type: two `Card` values are equal when they
/// denote the same physical card, whatever their current owner.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub card_type: CardTypeId,

    /// Player currently holding the card. `None` while in a supply pile or
    /// the trash.
    pub owner: Option<PlayerId>,

    pub trashed: bool,
}

impl Card {
    /// A fresh card sitting in a supply pile.
    #[must_use]
    pub fn new(id: CardId, card_type: CardTypeId) -> Self {
        Self {
            id,
            card_type,
            owner: None,
            trashed: false,
        }
    }

    /// A fresh card dealt straight to a player.
    #[must_use]
    pub fn owned(id: CardId, card_type: CardTypeId, owner: PlayerId) -> Self {
        Self {
            owner: Some(owner),
            ..Self::new(id, card_type)
        }
    }

    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.owner.is_none()
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.card_type == other.card_type
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, hasher: &mut H) {
        self.id.hash(hasher);
        self.card_type.hash(hasher);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card_is_neutral() {
        let card = Card::new(CardId::new(3), CardTypeId::new(1));
        assert!(card.is_neutral());
        assert!(!card.trashed);
        assert_eq!(card.id.to_string(), "Card#3");
    }

    #[test]
    fn test_owned_card() {
        let card = Card::owned(CardId::new(3), CardTypeId::new(1), PlayerId::new(1));
        assert_eq!(card.owner, Some(PlayerId::new(1)));
        assert!(!card.is_neutral());
    }

    #[test]
    fn test_clone_is_equal_but_independent() {
        let original = Card::owned(CardId::new(7), CardTypeId::new(2), PlayerId::new(0));
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.owner = Some(PlayerId::new(1));
        copy.trashed = true;

        assert_eq!(original.owner, Some(PlayerId::new(0)));
        assert!(!original.trashed);
        // Still the same physical card.
        assert_eq!(copy, original);
    }

    #[test]
    fn test_equality_requires_same_type() {
        let a = Card::new(CardId::new(7), CardTypeId::new(2));
        let b = Card::new(CardId::new(7), CardTypeId::new(3));
        let c = Card::new(CardId::new(8), CardTypeId::new(2));
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_serialization() {
        let card = Card::owned(CardId::new(12), CardTypeId::new(4), PlayerId::new(1));
        let json = serde_json::to_string(&card).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
        assert_eq!(back.owner, card.owner);
    }
}
