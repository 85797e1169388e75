//! Base set card types.

use crate::cards::{CardClass, CardType, CatalogProvider, ATTACK, DEFENSE};
use crate::effects::{Amount, Effect, MicroAction, TargetCount, TargetFilter, TargetSpec};
use crate::players::PlayerZone;

/// Every kingdom card in the set, in registration order.
pub const KINGDOM: [&str; 15] = [
    "Cellar",
    "Chapel",
    "Moat",
    "Village",
    "Woodcutter",
    "Workshop",
    "Militia",
    "Moneylender",
    "Remodel",
    "Smithy",
    "Festival",
    "Laboratory",
    "Market",
    "Witch",
    "Mine",
];

/// Pile weight for the end-of-game check. A single empty Province pile
/// ends the game; any three other empty piles do.
const PROVINCE_WEIGHT: u32 = 1;
const PILE_WEIGHT: u32 = 3;

/// Catalog provider for the base set.
#[derive(Clone, Copy, Debug, Default)]
pub struct BaseSet;

impl CatalogProvider for BaseSet {
    fn card_types(&self) -> Vec<CardType> {
        let mut types = basic_cards();
        types.extend(kingdom_cards());
        types
    }
}

fn treasure(name: &str, cost: u32, money: u32) -> CardType {
    CardType::new(name, CardClass::Treasure, cost)
        .with_money(money)
        .with_end_weight(PILE_WEIGHT)
}

fn victory(name: &str, cost: u32, points: i32) -> CardType {
    CardType::new(name, CardClass::Victory, cost)
        .with_victory_points(points)
        .with_end_weight(PILE_WEIGHT)
}

fn action(name: &str, cost: u32) -> CardType {
    CardType::new(name, CardClass::Action, cost).with_end_weight(PILE_WEIGHT)
}

fn basic_cards() -> Vec<CardType> {
    vec![
        treasure("Copper", 0, 1),
        treasure("Silver", 3, 2),
        treasure("Gold", 6, 3),
        victory("Estate", 2, 1),
        victory("Duchy", 5, 3),
        victory("Province", 8, 6).with_end_weight(PROVINCE_WEIGHT),
        victory("Curse", 0, -1),
    ]
}

/// Up to `n` cards from the acting player's hand.
fn hand_up_to(n: usize) -> TargetSpec {
    TargetSpec::cards_in_hand().with_count(TargetCount::UpTo(n))
}

/// One supply pile whose card costs at most `limit`.
fn supply_costing(limit: Amount) -> TargetSpec {
    TargetSpec::card_types_in_supply().with_filter(TargetFilter::CostAtMost(limit))
}

/// The kingdom cards, in `KINGDOM` order.
#[must_use]
pub fn kingdom_cards() -> Vec<CardType> {
    let treasure_class = TargetFilter::OfClass(CardClass::Treasure);

    vec![
        // +1 Action. Discard any number of cards, then draw that many.
        action("Cellar", 2)
            .with_action(MicroAction::on_self(Effect::actions(1)))
            .with_action(MicroAction::new(
                Effect::Discard,
                TargetSpec::cards_in_hand().with_count(TargetCount::Any),
            ))
            .with_action(MicroAction::on_self(Effect::DrawCards(Amount::PerTarget {
                step: 1,
                each: 1,
            }))),
        action("Chapel", 2).with_action(MicroAction::new(Effect::Trash, hand_up_to(4))),
        action("Moat", 2)
            .with_action(MicroAction::on_self(Effect::draw(2)))
            .with_property(DEFENSE),
        action("Village", 3)
            .with_action(MicroAction::on_self(Effect::draw(1)))
            .with_action(MicroAction::on_self(Effect::actions(2))),
        action("Woodcutter", 3)
            .with_action(MicroAction::on_self(Effect::buys(1)))
            .with_action(MicroAction::on_self(Effect::money(2))),
        action("Workshop", 3).with_action(MicroAction::new(
            Effect::Gain {
                destination: PlayerZone::Discard,
            },
            supply_costing(Amount::Fixed(4)),
        )),
        action("Militia", 4)
            .with_action(MicroAction::on_self(Effect::money(2)))
            .with_action(MicroAction::new(
                Effect::DiscardDownTo(3),
                TargetSpec::unprotected_opponents(),
            ))
            .with_property(ATTACK),
        // Trash a Copper for +$3.
        action("Moneylender", 4)
            .with_action(MicroAction::new(
                Effect::Trash,
                hand_up_to(1).with_filter(TargetFilter::OfType("Copper".into())),
            ))
            .with_action(MicroAction::on_self(Effect::AddMoney(Amount::PerTarget {
                step: 0,
                each: 3,
            }))),
        // Trash a card, gain one costing up to $2 more.
        action("Remodel", 4)
            .with_action(MicroAction::new(Effect::Trash, TargetSpec::cards_in_hand()))
            .with_action(MicroAction::new(
                Effect::Gain {
                    destination: PlayerZone::Discard,
                },
                supply_costing(Amount::TargetCostPlus { step: 0, plus: 2 }),
            )),
        action("Smithy", 4).with_action(MicroAction::on_self(Effect::draw(3))),
        action("Festival", 5)
            .with_action(MicroAction::on_self(Effect::actions(2)))
            .with_action(MicroAction::on_self(Effect::buys(1)))
            .with_action(MicroAction::on_self(Effect::money(2))),
        action("Laboratory", 5)
            .with_action(MicroAction::on_self(Effect::draw(2)))
            .with_action(MicroAction::on_self(Effect::actions(1))),
        action("Market", 5)
            .with_action(MicroAction::on_self(Effect::draw(1)))
            .with_action(MicroAction::on_self(Effect::actions(1)))
            .with_action(MicroAction::on_self(Effect::buys(1)))
            .with_action(MicroAction::on_self(Effect::money(1))),
        action("Witch", 5)
            .with_action(MicroAction::on_self(Effect::draw(2)))
            .with_action(MicroAction::new(
                Effect::gain_named("Curse", PlayerZone::Discard),
                TargetSpec::unprotected_opponents(),
            ))
            .with_property(ATTACK),
        // Trash a treasure, gain one costing up to $3 more into hand.
        action("Mine", 5)
            .with_action(MicroAction::new(
                Effect::Trash,
                hand_up_to(1).with_filter(treasure_class.clone()),
            ))
            .with_action(MicroAction::new(
                Effect::Gain {
                    destination: PlayerZone::Hand,
                },
                supply_costing(Amount::TargetCostPlus { step: 0, plus: 3 })
                    .with_filter(treasure_class),
            )),
    ]
}
