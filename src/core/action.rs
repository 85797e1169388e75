//! Targets and the executed-action history.
//!
//! A micro-action is applied to exactly one target domain. `Target` is the
//! tagged union over those domains and `ActionRecord` pairs a micro-action
//! with the targets it was actually applied to, in the order they were
//! chosen.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::cards::{CardId, CardTypeId};
use crate::effects::MicroAction;

/// The three kinds of thing a micro-action can be aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetDomain {
    Players,
    Cards,
    CardTypes,
}

impl TargetDomain {
    /// Order in which providers are consulted.
    pub const SELECTION_ORDER: [TargetDomain; 3] = [
        TargetDomain::Players,
        TargetDomain::Cards,
        TargetDomain::CardTypes,
    ];
}

/// A single resolved target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Player(PlayerId),
    Card(CardId),
    CardType(CardTypeId),
}

impl Target {
    #[must_use]
    pub const fn domain(self) -> TargetDomain {
        match self {
            Target::Player(_) => TargetDomain::Players,
            Target::Card(_) => TargetDomain::Cards,
            Target::CardType(_) => TargetDomain::CardTypes,
        }
    }

    #[must_use]
    pub const fn as_player(self) -> Option<PlayerId> {
        match self {
            Target::Player(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_card(self) -> Option<CardId> {
        match self {
            Target::Card(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_card_type(self) -> Option<CardTypeId> {
        match self {
            Target::CardType(t) => Some(t),
            _ => None,
        }
    }
}

/// Inline capacity covers every base-set card (Chapel trashes up to 4).
pub type TargetList = SmallVec<[Target; 4]>;

/// A micro-action together with the targets it was applied to.
///
/// An empty `targets` list means the action was applied with no targets,
/// either deliberately or because the selection was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub action: MicroAction,
    pub targets: TargetList,
}

impl ActionRecord {
    #[must_use]
    pub fn new(action: MicroAction, targets: TargetList) -> Self {
        Self { action, targets }
    }

    #[must_use]
    pub fn untargeted(action: MicroAction) -> Self {
        Self {
            action,
            targets: TargetList::new(),
        }
    }

    #[must_use]
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }

    pub fn cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.targets.iter().filter_map(|t| t.as_card())
    }

    pub fn card_types(&self) -> impl Iterator<Item = CardTypeId> + '_ {
        self.targets.iter().filter_map(|t| t.as_card_type())
    }
}
