//! An ordered card container.
//!
//! Hands, draw piles, discard piles, play areas, supply piles and the trash
//! are all `Zone`s. Order is kept in a persistent `im::Vector` (index 0 is
//! the bottom, the last element is the top) alongside a membership map that
//! also records each card's type, so `contains` and `cards_of_type` need no
//! access to the card arena.

use im::{HashMap as ImHashMap, Vector};
use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardTypeId};
use crate::core::{GameRng, RulesError, RulesResult};

/// Where to put a card in a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// After the current top card.
    Top,
    /// Below every card.
    Bottom,
    /// Insert before the card currently at this index (`len` = top).
    Index(usize),
}

/// Ordered, duplicate-free collection of card ids.
///
/// ```
/// use rust_deckbuilder::cards::{CardId, CardTypeId};
/// use rust_deckbuilder::zones::Zone;
///
/// let copper = CardTypeId::new(0);
/// let mut hand = Zone::new();
/// hand.add(CardId::new(1), copper).unwrap();
/// hand.add(CardId::new(2), copper).unwrap();
///
/// assert_eq!(hand.peek(), Some(CardId::new(2)));
/// assert_eq!(hand.cards_of_type(copper).count(), 2);
/// assert!(hand.add(CardId::new(1), copper).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Card ids, bottom first.
    order: Vector<CardId>,
    /// Membership and card type, for O(1) `contains` and type queries.
    members: ImHashMap<CardId, CardTypeId>,
}

impl Zone {
    /// Create an empty zone.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cards in the zone.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the zone holds no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Check if a card is in this zone. O(1).
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.members.contains_key(&card)
    }

    /// Type of a member card.
    #[must_use]
    pub fn type_of(&self, card: CardId) -> Option<CardTypeId> {
        self.members.get(&card).copied()
    }

    /// Put a card on top.
    pub fn add(&mut self, card: CardId, card_type: CardTypeId) -> RulesResult<()> {
        self.insert(card, card_type, ZonePosition::Top)
    }

    /// Put a card at a position.
    ///
    /// Fails if the card is already here or the index is past the top.
    pub fn insert(
        &mut self,
        card: CardId,
        card_type: CardTypeId,
        position: ZonePosition,
    ) -> RulesResult<()> {
        if self.contains(card) {
            return Err(RulesError::CardAlreadyInZone(card));
        }
        let index = match position {
            ZonePosition::Top => self.order.len(),
            ZonePosition::Bottom => 0,
            ZonePosition::Index(i) if i <= self.order.len() => i,
            ZonePosition::Index(index) => {
                return Err(RulesError::PositionOutOfRange {
                    index,
                    len: self.order.len(),
                })
            }
        };

        self.order.insert(index, card);
        self.members.insert(card, card_type);
        Ok(())
    }

    /// Take a specific card out.
    ///
    /// Fails with `CardNotInZone` if the card is not here. Returns the
    /// card's type.
    pub fn remove(&mut self, card: CardId) -> RulesResult<CardTypeId> {
        let card_type = self
            .members
            .remove(&card)
            .ok_or(RulesError::CardNotInZone(card))?;
        if let Some(index) = self.order.index_of(&card) {
            self.order.remove(index);
        }
        Ok(card_type)
    }

    /// Take out whatever card sits at `index` (0 = bottom).
    ///
    /// Fails with `PositionOutOfRange` past the top.
    pub fn remove_at(&mut self, index: usize) -> RulesResult<(CardId, CardTypeId)> {
        if index >= self.order.len() {
            return Err(RulesError::PositionOutOfRange {
                index,
                len: self.order.len(),
            });
        }
        let card = self.order.remove(index);
        let card_type = self
            .members
            .remove(&card)
            .ok_or(RulesError::CardNotInZone(card))?;
        Ok((card, card_type))
    }

    /// Remove and return the top card, or `None` if the zone is empty.
    pub fn take_top(&mut self) -> Option<(CardId, CardTypeId)> {
        let card = self.order.pop_back()?;
        let card_type = self.members.remove(&card)?;
        Some((card, card_type))
    }

    /// Empty the zone, returning its contents bottom to top.
    pub fn take_all(&mut self) -> Vec<(CardId, CardTypeId)> {
        let order = std::mem::take(&mut self.order);
        let members = std::mem::take(&mut self.members);
        order
            .into_iter()
            .filter_map(|card| members.get(&card).map(|&t| (card, t)))
            .collect()
    }

    /// The top card, without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<CardId> {
        self.order.back().copied()
    }

    /// Card at `index`, counting from the bottom.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<CardId> {
        self.order.get(index).copied()
    }

    /// Cards bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = CardId> + ExactSizeIterator + '_ {
        self.order.iter().copied()
    }

    /// `(card, type)` pairs bottom to top.
    pub fn entries(&self) -> impl Iterator<Item = (CardId, CardTypeId)> + '_ {
        self.order
            .iter()
            .filter_map(move |card| self.members.get(card).map(|&t| (*card, t)))
    }

    /// Member cards of one type, bottom to top.
    pub fn cards_of_type(&self, card_type: CardTypeId) -> impl Iterator<Item = CardId> + '_ {
        self.entries()
            .filter(move |&(_, t)| t == card_type)
            .map(|(card, _)| card)
    }

    /// Number of member cards of one type.
    #[must_use]
    pub fn count_of_type(&self, card_type: CardTypeId) -> usize {
        self.members.values().filter(|&&t| t == card_type).count()
    }

    /// Reorder with a Fisher–Yates pass driven by `rng`.
    ///
    /// Membership is unchanged; only the order moves, so the same seed
    /// always yields the same order.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<CardId> = self.order.iter().copied().collect();
        rng.shuffle(&mut cards);
        self.order = cards.into_iter().collect();
    }
}
