//! Card types - immutable catalog entries.
//!
//! A `CardType` is "Smithy": its cost, its class, what it is worth and the
//! ordered micro-actions printed on it. Physical copies are `Card`s.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{RulesError, RulesResult};
use crate::effects::MicroAction;

/// Index of a card type in its `CardCatalog`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CardTypeId(pub u32);

impl CardTypeId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CardType#{}", self.0)
    }
}

/// Card class. Decides which values a type may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardClass {
    Action,
    Victory,
    Treasure,
}

/// Property marking a card that protects its holder from attacks.
pub const DEFENSE: &str = "defense";

/// Property marking an attack card.
pub const ATTACK: &str = "attack";

/// Static card-type data.
///
/// ```
/// use rust_deckbuilder::cards::{CardClass, CardType};
///
/// let gold = CardType::new("Gold", CardClass::Treasure, 6).with_money(3);
/// assert!(gold.validate().is_ok());
///
/// let broken = CardType::new("Bogus", CardClass::Action, 2).with_money(1);
/// assert!(broken.validate().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardType {
    /// Assigned by the catalog on registration.
    #[serde(skip)]
    pub id: CardTypeId,

    pub name: String,
    pub class: CardClass,
    pub cost: u32,

    /// Victory points. Only VICTORY types may be non-zero.
    #[serde(default)]
    pub victory_points: i32,

    /// Money produced while in hand. Only TREASURE types may be non-zero.
    #[serde(default)]
    pub money: u32,

    /// Scarcity weight for the end-of-game check (0 = never counts).
    #[serde(default)]
    pub end_weight: u32,

    /// Micro-actions resolved in order when the card is played.
    #[serde(default)]
    pub actions: Vec<MicroAction>,

    #[serde(default)]
    pub properties: FxHashSet<String>,
}

impl CardType {
    #[must_use]
    pub fn new(name: impl Into<String>, class: CardClass, cost: u32) -> Self {
        Self {
            id: CardTypeId::default(),
            name: name.into(),
            class,
            cost,
            victory_points: 0,
            money: 0,
            end_weight: 0,
            actions: Vec::new(),
            properties: FxHashSet::default(),
        }
    }

    #[must_use]
    pub fn with_victory_points(mut self, points: i32) -> Self {
        self.victory_points = points;
        self
    }

    #[must_use]
    pub fn with_money(mut self, money: u32) -> Self {
        self.money = money;
        self
    }

    #[must_use]
    pub fn with_end_weight(mut self, weight: u32) -> Self {
        self.end_weight = weight;
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: MicroAction) -> Self {
        self.actions.push(action);
        self
    }

    #[must_use]
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.properties.insert(property.into());
        self
    }

    #[must_use]
    pub fn has_property(&self, property: &str) -> bool {
        self.properties.contains(property)
    }

    #[must_use]
    pub fn is_action(&self) -> bool {
        self.class == CardClass::Action
    }

    /// Check the class/value invariants.
    pub fn validate(&self) -> RulesResult<()> {
        let invalid = |reason| RulesError::InvalidCardValue {
            name: self.name.clone(),
            class: self.class,
            reason,
        };

        if self.name.is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if self.class != CardClass::Victory && self.victory_points != 0 {
            return Err(invalid("only victory cards may carry victory points"));
        }
        if self.class != CardClass::Treasure && self.money != 0 {
            return Err(invalid("only treasure cards may carry monetary value"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{Amount, Effect, TargetSpec};

    #[test]
    fn test_builder() {
        let moat = CardType::new("Moat", CardClass::Action, 2)
            .with_end_weight(3)
            .with_action(MicroAction::new(
                Effect::DrawCards(Amount::Fixed(2)),
                TargetSpec::acting_player(),
            ))
            .with_property(DEFENSE);

        assert_eq!(moat.cost, 2);
        assert_eq!(moat.actions.len(), 1);
        assert!(moat.has_property(DEFENSE));
        assert!(!moat.has_property(ATTACK));
        assert!(moat.is_action());
        assert!(moat.validate().is_ok());
    }

    #[test]
    fn test_victory_points_only_on_victory() {
        let err = CardType::new("Odd", CardClass::Treasure, 3)
            .with_victory_points(1)
            .validate()
            .unwrap_err();
        assert!(matches!(err, RulesError::InvalidCardValue { .. }));

        let curse = CardType::new("Curse", CardClass::Victory, 0).with_victory_points(-1);
        assert!(curse.validate().is_ok());
    }

    #[test]
    fn test_money_only_on_treasure() {
        assert!(CardType::new("Estate", CardClass::Victory, 2)
            .with_money(1)
            .validate()
            .is_err());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(CardType::new("", CardClass::Action, 0).validate().is_err());
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{"name": "Silver", "class": "Treasure", "cost": 3, "money": 2}"#;
        let silver: CardType = serde_json::from_str(json).unwrap();
        assert_eq!(silver.money, 2);
        assert_eq!(silver.victory_points, 0);
        assert!(silver.actions.is_empty());
        assert!(silver.validate().is_ok());
    }
}
