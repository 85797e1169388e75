//! Micro-actions: the steps printed on an action card.
//!
//! A card type carries an ordered list of `MicroAction`s. Each one pairs an
//! `Effect` (what happens to each target) with a `TargetSpec` (what may be
//! targeted and how many). Effects are game-agnostic verbs; the base set is
//! built entirely out of them.

use serde::{Deserialize, Serialize};

use super::targeting::TargetSpec;
use crate::core::{ActionRecord, TargetDomain};
use crate::game::Game;
use crate::players::PlayerZone;

/// A quantity that may depend on earlier steps of the same card play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Amount {
    Fixed(u32),
    /// `each` for every target chosen by step `step` ("draw one per card
    /// discarded").
    PerTarget { step: usize, each: u32 },
    /// Highest cost among the targets of step `step`, plus `plus` ("gain a
    /// card costing up to 2 more than the trashed card"). Undefined when
    /// that step had no targets.
    TargetCostPlus { step: usize, plus: u32 },
}

impl Amount {
    /// Evaluate against the executed history of the current play.
    ///
    /// `None` only for `TargetCostPlus` when the referenced step is missing
    /// or had no targets. Results saturate at `u32::MAX`.
    #[must_use]
    pub fn resolve(&self, game: &Game, history: &[ActionRecord]) -> Option<u32> {
        match self {
            Amount::Fixed(n) => Some(*n),
            Amount::PerTarget { step, each } => {
                let chosen = history.get(*step).map_or(0, ActionRecord::target_count);
                let chosen = u32::try_from(chosen).unwrap_or(u32::MAX);
                Some(chosen.saturating_mul(*each))
            }
            Amount::TargetCostPlus { step, plus } => {
                let record = history.get(*step)?;
                let card_costs = record
                    .cards()
                    .filter_map(|c| game.card_type(c))
                    .map(|t| t.cost);
                let type_costs = record
                    .card_types()
                    .filter_map(|t| game.catalog().get(t))
                    .map(|t| t.cost);
                card_costs
                    .chain(type_costs)
                    .max()
                    .map(|cost| cost.saturating_add(*plus))
            }
        }
    }

    /// Like `resolve`, treating an undefined amount as zero.
    #[must_use]
    pub fn resolve_or_zero(&self, game: &Game, history: &[ActionRecord]) -> u32 {
        self.resolve(game, history).unwrap_or(0)
    }
}

/// What a micro-action does to each of its targets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    // === Player targets ===
    DrawCards(Amount),
    AddActions(Amount),
    AddBuys(Amount),
    AddMoney(Amount),
    /// The target discards from hand until `n` cards remain.
    DiscardDownTo(u32),
    /// The target gains a card of the named type from the supply.
    GainNamed {
        card_type: String,
        destination: PlayerZone,
    },

    // === Card targets ===
    Trash,
    /// Hand to discard pile.
    Discard,
    /// Move to another of the acting player's zones.
    MoveTo(PlayerZone),

    // === Card-type targets ===
    /// The acting player gains a card of the target type.
    Gain { destination: PlayerZone },
}

impl Effect {
    /// The only domain this effect can be applied to.
    #[must_use]
    pub fn domain(&self) -> TargetDomain {
        match self {
            Effect::DrawCards(_)
            | Effect::AddActions(_)
            | Effect::AddBuys(_)
            | Effect::AddMoney(_)
            | Effect::DiscardDownTo(_)
            | Effect::GainNamed { .. } => TargetDomain::Players,
            Effect::Trash | Effect::Discard | Effect::MoveTo(_) => TargetDomain::Cards,
            Effect::Gain { .. } => TargetDomain::CardTypes,
        }
    }

    #[must_use]
    pub fn draw(n: u32) -> Self {
        Effect::DrawCards(Amount::Fixed(n))
    }

    #[must_use]
    pub fn actions(n: u32) -> Self {
        Effect::AddActions(Amount::Fixed(n))
    }

    #[must_use]
    pub fn buys(n: u32) -> Self {
        Effect::AddBuys(Amount::Fixed(n))
    }

    #[must_use]
    pub fn money(n: u32) -> Self {
        Effect::AddMoney(Amount::Fixed(n))
    }

    #[must_use]
    pub fn gain_named(card_type: impl Into<String>, destination: PlayerZone) -> Self {
        Effect::GainNamed {
            card_type: card_type.into(),
            destination,
        }
    }
}

/// One step of a card's effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MicroAction {
    pub effect: Effect,
    pub targets: TargetSpec,
}

impl MicroAction {
    #[must_use]
    pub fn new(effect: Effect, targets: TargetSpec) -> Self {
        Self { effect, targets }
    }

    /// An effect applied to the acting player without asking anyone.
    #[must_use]
    pub fn on_self(effect: Effect) -> Self {
        Self::new(effect, TargetSpec::acting_player())
    }

    /// Domain the action's targets must come from.
    #[must_use]
    pub fn domain(&self) -> TargetDomain {
        self.targets.domain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardCatalog, CardId};
    use crate::core::{GameConfig, Target, DEFAULT_KINGDOM};
    use crate::effects::TargetCount;
    use crate::game::GameBuilder;
    use crate::games::base::BaseSet;
    use smallvec::smallvec;
    use std::sync::Arc;

    fn game() -> Game {
        let catalog = Arc::new(CardCatalog::from_provider(&BaseSet).unwrap());
        GameBuilder::new(catalog, GameConfig::base(2, &DEFAULT_KINGDOM, 12))
            .players(["Alice", "Bob"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_per_target_amount() {
        let game = game();
        let record = ActionRecord::new(
            MicroAction::new(Effect::Discard, TargetSpec::cards_in_hand()),
            smallvec![Target::Card(CardId::new(0)), Target::Card(CardId::new(1))],
        );
        let history = [record];

        let amount = Amount::PerTarget { step: 0, each: 3 };
        assert_eq!(amount.resolve(&game, &history), Some(6));
        let missing = Amount::PerTarget { step: 1, each: 3 };
        assert_eq!(missing.resolve(&game, &history), Some(0));
    }

    #[test]
    fn test_amounts_saturate() {
        let game = game();
        let province = game.catalog().require("Province").unwrap();
        let discarded = ActionRecord::new(
            MicroAction::new(Effect::Discard, TargetSpec::cards_in_hand()),
            smallvec![Target::Card(CardId::new(0)), Target::Card(CardId::new(1))],
        );
        let gained = ActionRecord::new(
            MicroAction::new(
                Effect::Gain {
                    destination: PlayerZone::Discard,
                },
                TargetSpec::card_types_in_supply(),
            ),
            smallvec![Target::CardType(province)],
        );
        let history = [discarded, gained];

        let per_target = Amount::PerTarget {
            step: 0,
            each: u32::MAX,
        };
        assert_eq!(per_target.resolve(&game, &history), Some(u32::MAX));

        let cost_plus = Amount::TargetCostPlus {
            step: 1,
            plus: u32::MAX,
        };
        assert_eq!(cost_plus.resolve(&game, &history), Some(u32::MAX));
    }

    #[test]
    fn test_effect_domains() {
        assert_eq!(Effect::draw(2).domain(), TargetDomain::Players);
        assert_eq!(Effect::DiscardDownTo(3).domain(), TargetDomain::Players);
        assert_eq!(Effect::Trash.domain(), TargetDomain::Cards);
        assert_eq!(
            Effect::MoveTo(PlayerZone::DrawPile).domain(),
            TargetDomain::Cards
        );
        assert_eq!(
            Effect::Gain {
                destination: PlayerZone::Discard
            }
            .domain(),
            TargetDomain::CardTypes
        );
    }

    #[test]
    fn test_on_self() {
        let action = MicroAction::on_self(Effect::actions(2));
        assert_eq!(action.domain(), TargetDomain::Players);
        assert!(action.targets.automatic);
        assert_eq!(action.targets.count, TargetCount::Exactly(1));
    }

    #[test]
    fn test_micro_action_serialization() {
        let action = MicroAction::new(
            Effect::Gain {
                destination: PlayerZone::Hand,
            },
            TargetSpec::card_types_in_supply(),
        );
        let json = serde_json::to_string(&action).unwrap();
        let back: MicroAction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }
}
