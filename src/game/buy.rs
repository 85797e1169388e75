//! Buying: option enumeration and purchases.

use log::debug;
use smallvec::SmallVec;

use super::state::Game;
use crate::cards::CardTypeId;
use crate::core::{Phase, RulesError, RulesResult};
use crate::players::PlayerZone;

/// One purchase combination, as a multiset of card types in id order.
pub type BuyOption = SmallVec<[CardTypeId; 4]>;

/// A supply pile as seen by the enumerator: `(type, cost, cards left)`.
pub type PileSummary = (CardTypeId, u32, usize);

/// Every multiset of card types purchasable with `buys` purchases and
/// `money` to spend.
///
/// The empty purchase is always the first option. Each multiset appears
/// once, with its types in the order `piles` lists them.
///
/// ```
/// use rust_deckbuilder::cards::CardTypeId;
/// use rust_deckbuilder::game::enumerate_buy_options;
///
/// let copper = CardTypeId::new(0);
/// let estate = CardTypeId::new(1);
/// let options = enumerate_buy_options(2, 4, &[(copper, 0, 10), (estate, 2, 1)]);
///
/// assert_eq!(options.len(), 5);
/// assert!(!options.iter().any(|o| o.as_slice() == [estate, estate]));
/// ```
#[must_use]
pub fn enumerate_buy_options(buys: u32, money: i64, piles: &[PileSummary]) -> Vec<BuyOption> {
    let mut remaining: Vec<usize> = piles.iter().map(|&(_, _, left)| left).collect();
    let mut out = Vec::new();
    let mut prefix = BuyOption::new();
    enumerate_from(buys, money, piles, &mut remaining, 0, &mut prefix, &mut out);
    out
}

fn enumerate_from(
    buys: u32,
    money: i64,
    piles: &[PileSummary],
    remaining: &mut [usize],
    first: usize,
    prefix: &mut BuyOption,
    out: &mut Vec<BuyOption>,
) {
    out.push(prefix.clone());
    if buys == 0 {
        return;
    }
    for i in first..piles.len() {
        let (card_type, cost, _) = piles[i];
        let cost = i64::from(cost);
        if remaining[i] == 0 || cost > money {
            continue;
        }
        remaining[i] -= 1;
        prefix.push(card_type);
        enumerate_from(buys - 1, money - cost, piles, remaining, i, prefix, out);
        prefix.pop();
        remaining[i] += 1;
    }
}

impl Game {
    /// Purchase combinations open to the current player.
    #[must_use]
    pub fn valid_buy_options(&self) -> Vec<BuyOption> {
        let player = self.current_player();
        let piles: Vec<PileSummary> = self
            .supply_piles()
            .filter_map(|(t, pile)| self.catalog.get(t).map(|ct| (t, ct.cost, pile.len())))
            .collect();
        enumerate_buy_options(player.buys, player.spendable_money(), &piles)
    }

    /// Buy one card of `card_type` for the current player.
    ///
    /// `false` (and no change) when the player has no buys left, the pile
    /// is missing or empty, or the card costs more than the player can
    /// spend. Calling outside the buy phase is a contract violation.
    pub fn buy(&mut self, card_type: CardTypeId) -> RulesResult<bool> {
        if self.phase != Phase::Buy {
            return Err(RulesError::WrongPhase {
                expected: Phase::Buy,
                actual: self.phase,
            });
        }

        let player = self.current;
        let cost = self.catalog.try_get(card_type)?.cost;
        let buyer = &self.players[player];
        if buyer.buys == 0
            || self.supply_count(card_type) == 0
            || i64::from(cost) > buyer.spendable_money()
        {
            return Ok(false);
        }

        if self.gain(player, card_type, PlayerZone::PlayArea)?.is_none() {
            return Ok(false);
        }
        let buyer = &mut self.players[player];
        buyer.money -= i64::from(cost);
        buyer.buys -= 1;
        debug!(
            "{} bought {} for {}",
            player, self.catalog[card_type].name, cost
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardCatalog;
    use crate::core::{GameConfig, PlayerId};
    use crate::game::GameBuilder;
    use crate::games::base::BaseSet;
    use smallvec::smallvec;
    use std::sync::Arc;

    const COPPER: CardTypeId = CardTypeId::new(0);
    const ESTATE: CardTypeId = CardTypeId::new(1);

    #[test]
    fn test_two_buys_four_money() {
        let options = enumerate_buy_options(2, 4, &[(COPPER, 0, 10), (ESTATE, 2, 1)]);
        let expected: Vec<BuyOption> = vec![
            smallvec![],
            smallvec![COPPER],
            smallvec![COPPER, COPPER],
            smallvec![COPPER, ESTATE],
            smallvec![ESTATE],
        ];
        assert_eq!(options, expected);
    }

    #[test]
    fn test_zero_buys_only_empty() {
        let options = enumerate_buy_options(0, 100, &[(COPPER, 0, 10)]);
        assert_eq!(options, vec![BuyOption::new()]);
    }

    #[test]
    fn test_money_limits_options() {
        let options = enumerate_buy_options(2, 3, &[(COPPER, 2, 10), (ESTATE, 3, 10)]);
        assert!(options.contains(&smallvec![COPPER]));
        assert!(options.contains(&smallvec![ESTATE]));
        assert!(!options.contains(&smallvec![COPPER, COPPER]));
        assert!(!options.contains(&smallvec![COPPER, ESTATE]));
    }

    #[test]
    fn test_empty_pile_excluded() {
        let options = enumerate_buy_options(1, 5, &[(COPPER, 0, 0), (ESTATE, 2, 3)]);
        let expected: Vec<BuyOption> = vec![smallvec![], smallvec![ESTATE]];
        assert_eq!(options, expected);
    }

    fn buy_phase_game() -> Game {
        let catalog = Arc::new(CardCatalog::from_provider(&BaseSet).unwrap());
        let config = GameConfig::new(1)
            .with_starting_cards("Copper", 5)
            .with_supply("Copper", 10)
            .with_supply("Silver", 2)
            .with_supply("Province", 8);
        let mut game = GameBuilder::new(catalog, config)
            .players(["Alice", "Bob"])
            .build()
            .unwrap();
        game.set_phase(Phase::Buy);
        game
    }

    #[test]
    fn test_buy_spends_money_and_buy() {
        let mut game = buy_phase_game();
        let silver = game.catalog().require("Silver").unwrap();
        let alice = PlayerId::new(0);

        assert!(game.buy(silver).unwrap());

        let player = game.player(alice);
        assert_eq!(player.buys, 0);
        assert_eq!(player.spendable_money(), 2);
        assert_eq!(player.play_area().len(), 1);
        assert_eq!(game.supply_count(silver), 1);

        // Out of buys.
        assert!(!game.buy(silver).unwrap());
        assert_eq!(game.supply_count(silver), 1);
    }

    #[test]
    fn test_unaffordable_buy_is_noop() {
        let mut game = buy_phase_game();
        let province = game.catalog().require("Province").unwrap();
        let before = game.clone();

        assert!(!game.buy(province).unwrap());
        assert_eq!(game, before);
    }

    #[test]
    fn test_buy_outside_phase() {
        let mut game = buy_phase_game();
        game.set_phase(Phase::Play);
        let silver = game.catalog().require("Silver").unwrap();

        assert_eq!(
            game.buy(silver),
            Err(RulesError::WrongPhase {
                expected: Phase::Buy,
                actual: Phase::Play
            })
        );
    }

    #[test]
    fn test_valid_buy_options_from_game() {
        let game = buy_phase_game();
        let copper = game.catalog().require("Copper").unwrap();
        let silver = game.catalog().require("Silver").unwrap();

        let options = game.valid_buy_options();

        let expected: Vec<BuyOption> = vec![smallvec![], smallvec![copper], smallvec![silver]];
        assert_eq!(options, expected);
    }
}
