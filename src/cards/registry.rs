//! The card catalog.
//!
//! An explicit value, built once and shared (behind an `Arc`) by every game
//! and every clone of a game. There is no process-wide registry.

use rustc_hash::FxHashMap;

use super::definition::{CardType, CardTypeId};
use crate::core::{RulesError, RulesResult};

/// Supplies card types to a catalog.
///
/// Loading formats are the provider's business; the catalog only sees
/// finished `CardType` values.
pub trait CatalogProvider {
    /// Card types in registration order.
    fn card_types(&self) -> Vec<CardType>;
}

/// Registered card types, indexed by `CardTypeId` and by name.
///
/// ```
/// use rust_deckbuilder::cards::{CardCatalog, CardClass, CardType};
///
/// let mut catalog = CardCatalog::new();
/// let copper = catalog
///     .register(CardType::new("Copper", CardClass::Treasure, 0).with_money(1))
///     .unwrap();
///
/// assert_eq!(catalog.id_of("Copper"), Some(copper));
/// assert_eq!(catalog[copper].money, 1);
/// assert!(catalog
///     .register(CardType::new("Copper", CardClass::Treasure, 0))
///     .is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    types: Vec<CardType>,
    by_name: FxHashMap<String, CardTypeId>,
}

impl CardCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from everything a provider supplies.
    pub fn from_provider(provider: &impl CatalogProvider) -> RulesResult<Self> {
        let mut catalog = Self::new();
        for card_type in provider.card_types() {
            catalog.register(card_type)?;
        }
        Ok(catalog)
    }

    /// Register a card type and assign its id.
    ///
    /// Fails on a duplicate name or a class/value mismatch.
    pub fn register(&mut self, mut card_type: CardType) -> RulesResult<CardTypeId> {
        card_type.validate()?;
        if self.by_name.contains_key(&card_type.name) {
            return Err(RulesError::DuplicateCardType {
                name: card_type.name,
            });
        }

        let id = CardTypeId::new(self.types.len() as u32);
        card_type.id = id;
        self.by_name.insert(card_type.name.clone(), id);
        self.types.push(card_type);
        Ok(id)
    }

    #[must_use]
    pub fn get(&self, id: CardTypeId) -> Option<&CardType> {
        self.types.get(id.index())
    }

    /// Lookup that reports a missing id as a contract violation.
    pub fn try_get(&self, id: CardTypeId) -> RulesResult<&CardType> {
        self.get(id).ok_or(RulesError::UnknownCardTypeId(id))
    }

    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<CardTypeId> {
        self.by_name.get(name).copied()
    }

    /// Resolve a name, reporting unknown names as a contract violation.
    pub fn require(&self, name: &str) -> RulesResult<CardTypeId> {
        self.id_of(name)
            .ok_or_else(|| RulesError::UnknownCardType(name.to_string()))
    }

    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&CardType> {
        self.id_of(name).and_then(|id| self.get(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardType> {
        self.types.iter()
    }
}

impl std::ops::Index<CardTypeId> for CardCatalog {
    type Output = CardType;

    fn index(&self, id: CardTypeId) -> &Self::Output {
        &self.types[id.index()]
    }
}
