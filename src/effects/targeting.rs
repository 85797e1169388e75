//! Effect targeting.
//!
//! - `TargetSpec`: what a micro-action may be aimed at, and how many
//! - `TargetFilter`: restrictions on the candidate set
//! - `TargetSelector`: computes candidates and validates a selection
//!
//! Validation is all-or-nothing. A selection with a duplicate, a member
//! outside the candidate set, or a size the count does not accept is
//! replaced by the empty selection; it is never an error.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::effect::Amount;
use crate::cards::{CardClass, CardId, CardType, DEFENSE};
use crate::core::{ActionRecord, PlayerId, Target, TargetDomain, TargetList};
use crate::game::Game;
use crate::players::PlayerZone;

/// Specification for micro-action targeting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub domain: TargetDomain,
    /// Acting player's zone that card candidates come from.
    #[serde(default = "default_zone")]
    pub zone: PlayerZone,
    #[serde(default)]
    pub filters: Vec<TargetFilter>,
    pub count: TargetCount,
    /// Resolved by the engine to every candidate; the provider is not asked.
    #[serde(default)]
    pub automatic: bool,
}

fn default_zone() -> PlayerZone {
    PlayerZone::Hand
}

/// Number of targets a selection may contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetCount {
    Exactly(usize),
    UpTo(usize),
    Range { min: usize, max: usize },
    /// Any number, including none.
    Any,
}

impl TargetCount {
    #[must_use]
    pub fn accepts(self, n: usize) -> bool {
        match self {
            TargetCount::Exactly(k) => n == k,
            TargetCount::UpTo(k) => n <= k,
            TargetCount::Range { min, max } => (min..=max).contains(&n),
            TargetCount::Any => true,
        }
    }

    #[must_use]
    pub fn min(self) -> usize {
        match self {
            TargetCount::Exactly(k) => k,
            TargetCount::Range { min, .. } => min,
            TargetCount::UpTo(_) | TargetCount::Any => 0,
        }
    }

    /// `None` means unbounded.
    #[must_use]
    pub fn max(self) -> Option<usize> {
        match self {
            TargetCount::Exactly(k) | TargetCount::UpTo(k) => Some(k),
            TargetCount::Range { max, .. } => Some(max),
            TargetCount::Any => None,
        }
    }
}

/// Restrictions on the candidate set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetFilter {
    // === Player filters ===
    /// The player whose turn it is.
    Acting,
    /// Everyone but the acting player.
    Others,
    /// Players without a defense card in hand.
    Unprotected,

    // === Card and card-type filters ===
    OfClass(CardClass),
    /// Card type name.
    OfType(String),
    /// Not the card being played.
    NotSource,
    CostAtMost(Amount),
}

impl TargetSpec {
    /// "You": the acting player, resolved automatically.
    #[must_use]
    pub fn acting_player() -> Self {
        Self {
            domain: TargetDomain::Players,
            zone: PlayerZone::Hand,
            filters: vec![TargetFilter::Acting],
            count: TargetCount::Exactly(1),
            automatic: true,
        }
    }

    /// "Each other player", resolved automatically.
    #[must_use]
    pub fn other_players() -> Self {
        Self {
            domain: TargetDomain::Players,
            zone: PlayerZone::Hand,
            filters: vec![TargetFilter::Others],
            count: TargetCount::Any,
            automatic: true,
        }
    }

    /// Attack targets: every other player not holding a defense card.
    #[must_use]
    pub fn unprotected_opponents() -> Self {
        Self::other_players().with_filter(TargetFilter::Unprotected)
    }

    /// One card from the acting player's hand.
    #[must_use]
    pub fn cards_in_hand() -> Self {
        Self {
            domain: TargetDomain::Cards,
            zone: PlayerZone::Hand,
            filters: vec![TargetFilter::NotSource],
            count: TargetCount::Exactly(1),
            automatic: false,
        }
    }

    /// One card type with at least one card left in the supply.
    #[must_use]
    pub fn card_types_in_supply() -> Self {
        Self {
            domain: TargetDomain::CardTypes,
            zone: PlayerZone::Hand,
            filters: Vec::new(),
            count: TargetCount::Exactly(1),
            automatic: false,
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: TargetFilter) -> Self {
        self.filters.push(filter);
        self
    }

    #[must_use]
    pub fn with_count(mut self, count: TargetCount) -> Self {
        self.count = count;
        self
    }

    #[must_use]
    pub fn from_zone(mut self, zone: PlayerZone) -> Self {
        self.zone = zone;
        self
    }
}

/// Candidate computation and selection validation for one spec.
#[derive(Clone, Debug)]
pub struct TargetSelector<'a> {
    spec: &'a TargetSpec,
    acting_player: PlayerId,
    source: Option<CardId>,
    history: &'a [ActionRecord],
}

impl<'a> TargetSelector<'a> {
    #[must_use]
    pub fn new(spec: &'a TargetSpec, acting_player: PlayerId) -> Self {
        Self {
            spec,
            acting_player,
            source: None,
            history: &[],
        }
    }

    /// Card being played (for `NotSource`).
    #[must_use]
    pub fn with_source(mut self, source: CardId) -> Self {
        self.source = Some(source);
        self
    }

    /// Steps already executed in this play (for history-dependent amounts).
    #[must_use]
    pub fn with_history(mut self, history: &'a [ActionRecord]) -> Self {
        self.history = history;
        self
    }

    /// Every legal target, in a deterministic order.
    ///
    /// Players start with the acting player and continue in turn order;
    /// cards are listed bottom to top; card types by id.
    #[must_use]
    pub fn valid_targets(&self, game: &Game) -> Vec<Target> {
        match self.spec.domain {
            TargetDomain::Players => {
                let count = game.player_count();
                std::iter::successors(Some(self.acting_player), |p| Some(p.next(count)))
                    .take(count)
                    .filter(|&p| self.player_passes(game, p))
                    .map(Target::Player)
                    .collect()
            }
            TargetDomain::Cards => game
                .player(self.acting_player)
                .zone(self.spec.zone)
                .entries()
                .filter(|&(card, card_type)| {
                    game.catalog()
                        .get(card_type)
                        .is_some_and(|t| self.card_passes(game, Some(card), t))
                })
                .map(|(card, _)| Target::Card(card))
                .collect(),
            TargetDomain::CardTypes => game
                .supply_piles()
                .filter(|(_, pile)| !pile.is_empty())
                .filter(|&(card_type, _)| {
                    game.catalog()
                        .get(card_type)
                        .is_some_and(|t| self.card_passes(game, None, t))
                })
                .map(|(card_type, _)| Target::CardType(card_type))
                .collect(),
        }
    }

    fn player_passes(&self, game: &Game, player: PlayerId) -> bool {
        self.spec.filters.iter().all(|filter| match filter {
            TargetFilter::Acting => player == self.acting_player,
            TargetFilter::Others => player != self.acting_player,
            TargetFilter::Unprotected => !game
                .player(player)
                .hand()
                .entries()
                .filter_map(|(_, t)| game.catalog().get(t))
                .any(|t| t.has_property(DEFENSE)),
            _ => false,
        })
    }

    fn card_passes(&self, game: &Game, card: Option<CardId>, card_type: &CardType) -> bool {
        self.spec.filters.iter().all(|filter| match filter {
            TargetFilter::OfClass(class) => card_type.class == *class,
            TargetFilter::OfType(name) => card_type.name == *name,
            TargetFilter::NotSource => card.is_none() || card != self.source,
            TargetFilter::CostAtMost(amount) => amount
                .resolve(game, self.history)
                .is_some_and(|limit| card_type.cost <= limit),
            TargetFilter::Acting | TargetFilter::Others | TargetFilter::Unprotected => false,
        })
    }

    /// Whether `selected` is an acceptable answer for this spec.
    #[must_use]
    pub fn validate_selection(&self, game: &Game, selected: &[Target]) -> bool {
        if !self.spec.count.accepts(selected.len()) {
            return false;
        }
        let mut seen = FxHashSet::default();
        if !selected.iter().all(|t| seen.insert(*t)) {
            return false;
        }
        let candidates = self.valid_targets(game);
        selected.iter().all(|t| candidates.contains(t))
    }

    /// The selection if valid, otherwise the empty list.
    #[must_use]
    pub fn resolve(&self, game: &Game, selected: &[Target]) -> TargetList {
        if self.validate_selection(game, selected) {
            selected.iter().copied().collect()
        } else {
            TargetList::new()
        }
    }

    /// Full candidate set for automatic specs, subject to the same count
    /// check as a provider's answer.
    #[must_use]
    pub fn resolve_automatic(&self, game: &Game) -> TargetList {
        let candidates = self.valid_targets(game);
        if self.spec.count.accepts(candidates.len()) {
            candidates.into_iter().collect()
        } else {
            TargetList::new()
        }
    }
}
