//! Card ownership invariants.
//!
//! Whatever the decisions, every card stays in exactly one zone, no card is
//! created or lost, and the location index agrees with the zones.

use std::sync::Arc;

use proptest::prelude::*;
use rust_deckbuilder::{
    BaseSet, CardCatalog, CardLocation, Game, GameBuilder, GameConfig, Phase, PlayerId,
    RandomStrategy, DEFAULT_KINGDOM,
};

fn new_game(players: usize, seed: u64) -> Game {
    let catalog = Arc::new(CardCatalog::from_provider(&BaseSet).unwrap());
    GameBuilder::new(catalog, GameConfig::base(players, &DEFAULT_KINGDOM, seed))
        .players((0..players).map(|i| format!("P{i}")))
        .build()
        .unwrap()
}

/// Cards held by players, supply and trash add up to the arena.
fn total_held(game: &Game) -> usize {
    let players: usize = game.players().values().map(|p| p.card_count()).sum();
    let supply: usize = game.supply_piles().map(|(_, pile)| pile.len()).sum();
    players + supply + game.trash().len()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Random play never duplicates, loses or misplaces a card.
    #[test]
    fn test_random_play_preserves_ownership(
        game_seed in 0u64..10_000,
        strategy_seed in 0u64..10_000,
        players in 2usize..5,
        steps in 1usize..400,
    ) {
        let mut game = new_game(players, game_seed);
        let total = game.card_count();
        let mut strategy = RandomStrategy::new(strategy_seed);

        for _ in 0..steps {
            if game.phase() == Phase::End {
                break;
            }
            game.play_step(&mut strategy).unwrap();

            prop_assert!(game.check_ownership());
            prop_assert_eq!(total_held(&game), total);
            prop_assert!(game.current_player().spendable_money() >= 0);
        }
    }

    /// `locate` reports the zone that actually holds the card.
    #[test]
    fn test_locate_matches_zones(seed in 0u64..10_000, turns in 1u32..12) {
        let mut game = new_game(2, seed);
        let mut strategy = RandomStrategy::new(seed ^ 0x5eed);
        game.play_game(&mut strategy, turns).unwrap();

        for (id, player) in game.players().iter() {
            for (card, _) in player.all_cards() {
                let zone = player.find_card(card).unwrap();
                prop_assert_eq!(
                    game.locate(card),
                    Some(CardLocation::Player { player: id, zone })
                );
                prop_assert_eq!(game.card(card).unwrap().owner, Some(id));
            }
        }
        for card in game.trash().iter() {
            prop_assert_eq!(game.locate(card), Some(CardLocation::Trash));
            prop_assert!(game.card(card).unwrap().trashed);
        }
        for (card_type, pile) in game.supply_piles() {
            for card in pile.iter() {
                prop_assert_eq!(game.locate(card), Some(CardLocation::Supply(card_type)));
            }
        }
    }
}

/// Rebuilding the index from the zones changes nothing.
#[test]
fn test_rebuild_index_is_stable() {
    let mut game = new_game(3, 77);
    let mut strategy = RandomStrategy::new(7);
    game.play_game(&mut strategy, 15).unwrap();

    let before = game.clone();
    game.rebuild_index();

    assert_eq!(game, before);
    assert!(game.check_ownership());
}

/// Starting decks are dealt to their owners.
#[test]
fn test_starting_decks_owned() {
    let game = new_game(4, 1);
    for player in PlayerId::all(4) {
        let holder = game.player(player);
        assert_eq!(holder.card_count(), 10);
        assert_eq!(holder.hand().len(), 5);
        assert!(holder
            .all_cards()
            .all(|(card, _)| game.card(card).unwrap().owner == Some(player)));
    }
}
