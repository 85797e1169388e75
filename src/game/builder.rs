//! Game setup.

use std::sync::Arc;

use im::{HashMap as ImHashMap, OrdMap, Vector};
use log::debug;

use super::state::{Game, Holder};
use crate::cards::{Card, CardCatalog, CardId, CardTypeId};
use crate::core::{GameConfig, GameRng, Phase, PlayerId, PlayerMap, RulesError, RulesResult};
use crate::players::{Player, PlayerZone};
use crate::zones::Zone;

/// Most seats a `PlayerId` can address.
pub const MAX_PLAYERS: usize = u8::MAX as usize;

/// Builder for a new `Game`.
///
/// ```
/// use std::sync::Arc;
/// use rust_deckbuilder::cards::CardCatalog;
/// use rust_deckbuilder::core::{GameConfig, Phase, DEFAULT_KINGDOM};
/// use rust_deckbuilder::game::GameBuilder;
/// use rust_deckbuilder::games::base::BaseSet;
///
/// let catalog = Arc::new(CardCatalog::from_provider(&BaseSet).unwrap());
/// let game = GameBuilder::new(catalog, GameConfig::base(3, &DEFAULT_KINGDOM, 7))
///     .players(["Ann", "Ben", "Cat"])
///     .build()
///     .unwrap();
///
/// assert_eq!(game.player_count(), 3);
/// assert_eq!(game.phase(), Phase::Play);
/// assert_eq!(game.current_player().hand().len(), 5);
/// ```
pub struct GameBuilder {
    catalog: Arc<CardCatalog>,
    config: GameConfig,
    names: Vec<String>,
}

impl GameBuilder {
    #[must_use]
    pub fn new(catalog: Arc<CardCatalog>, config: GameConfig) -> Self {
        Self {
            catalog,
            config,
            names: Vec::new(),
        }
    }

    #[must_use]
    pub fn player(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    #[must_use]
    pub fn players<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    /// Deal the supply and starting decks, draw opening hands, and start
    /// the first player's turn.
    ///
    /// Fails on an unknown card type name, a duplicated supply pile, no
    /// players, too many players, or a zero hand size.
    pub fn build(self) -> RulesResult<Game> {
        let GameBuilder {
            catalog,
            config,
            names,
        } = self;

        if names.is_empty() {
            return Err(RulesError::InvalidConfig("a game needs at least one player".into()));
        }
        if names.len() > MAX_PLAYERS {
            return Err(RulesError::InvalidConfig(format!(
                "{} players exceeds the maximum of {}",
                names.len(),
                MAX_PLAYERS
            )));
        }
        if config.hand_size == 0 {
            return Err(RulesError::InvalidConfig("hand size must be positive".into()));
        }

        let supply_types = resolve(&catalog, &config.supply)?;
        let deck_types = resolve(&catalog, &config.starting_deck)?;

        let mut cards = Vector::new();
        let mut holders = ImHashMap::new();
        let mut next_id = 0u32;
        let mut deal = |card_type: CardTypeId, owner: Option<PlayerId>| {
            let id = CardId::new(next_id);
            next_id += 1;
            let card = match owner {
                Some(player) => Card::owned(id, card_type, player),
                None => Card::new(id, card_type),
            };
            cards.push_back(card);
            holders.insert(id, owner.map_or(Holder::Supply, Holder::Player));
            id
        };

        let mut supply = OrdMap::new();
        for (card_type, count) in supply_types {
            if supply.contains_key(&card_type) {
                return Err(RulesError::InvalidConfig(format!(
                    "supply lists '{}' twice",
                    catalog[card_type].name
                )));
            }
            let mut pile = Zone::new();
            for _ in 0..count {
                pile.add(deal(card_type, None), card_type)?;
            }
            supply.insert(card_type, pile);
        }

        let mut rng = GameRng::new(config.seed);
        let player_count = names.len();
        let mut players = PlayerMap::new(player_count, |id| {
            Player::new(id, names[id.index()].clone())
        });
        for (id, player) in players.iter_mut() {
            for &(card_type, count) in &deck_types {
                for _ in 0..count {
                    let card = deal(card_type, Some(id));
                    player.acquire_card(card, card_type, PlayerZone::DrawPile, &catalog)?;
                }
            }
            player.shuffle_draw_pile(&mut rng);
            player.draw(config.hand_size, &catalog, &mut rng)?;
        }

        let first = PlayerId::new(0);
        players[first].start_turn(config.actions_per_turn, config.buys_per_turn);

        debug!(
            "dealt {} cards to {} players and {} supply piles",
            next_id,
            player_count,
            supply.len()
        );

        Ok(Game {
            catalog,
            hand_size: config.hand_size,
            actions_per_turn: config.actions_per_turn,
            buys_per_turn: config.buys_per_turn,
            cards,
            holders,
            players,
            supply,
            trash: Zone::new(),
            current: first,
            turn: 1,
            turns_taken: PlayerMap::with_value(player_count, 0),
            phase: Phase::Play,
            selected: None,
            pending: Vec::new(),
            history: Vec::new(),
            rng,
        })
    }
}

fn resolve(catalog: &CardCatalog, counts: &[(String, u32)]) -> RulesResult<Vec<(CardTypeId, u32)>> {
    counts
        .iter()
        .map(|(name, count)| Ok((catalog.require(name)?, *count)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DEFAULT_KINGDOM;
    use crate::games::base::BaseSet;

    fn catalog() -> Arc<CardCatalog> {
        Arc::new(CardCatalog::from_provider(&BaseSet).unwrap())
    }

    #[test]
    fn test_base_setup() {
        let game = GameBuilder::new(catalog(), GameConfig::base(2, &DEFAULT_KINGDOM, 1))
            .players(["Alice", "Bob"])
            .build()
            .unwrap();

        for player in game.players().values() {
            assert_eq!(player.card_count(), 10);
            assert_eq!(player.hand().len(), 5);
            assert_eq!(player.draw_pile().len(), 5);
        }
        let province = game.catalog().require("Province").unwrap();
        assert_eq!(game.supply_count(province), 8);
        assert_eq!(game.turn(), 1);
        assert_eq!(game.current_player_id(), PlayerId::new(0));
        let alice = game.current_player();
        assert_eq!((alice.actions, alice.buys, alice.money), (1, 1, 0));
        assert_eq!(game.player(PlayerId::new(1)).buys, 0);
        assert!(game.check_ownership());
    }

    #[test]
    fn test_same_seed_same_game() {
        let build = || {
            GameBuilder::new(catalog(), GameConfig::base(2, &DEFAULT_KINGDOM, 77))
                .players(["Alice", "Bob"])
                .build()
                .unwrap()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_unknown_card_type() {
        let config = GameConfig::new(0).with_supply("Platinum", 12);
        let err = GameBuilder::new(catalog(), config)
            .player("Alice")
            .build()
            .unwrap_err();
        assert_eq!(err, RulesError::UnknownCardType("Platinum".into()));
    }

    #[test]
    fn test_duplicate_supply_pile() {
        let config = GameConfig::new(0)
            .with_supply("Copper", 10)
            .with_supply("Copper", 10);
        let err = GameBuilder::new(catalog(), config)
            .player("Alice")
            .build()
            .unwrap_err();
        assert!(matches!(err, RulesError::InvalidConfig(_)));
    }

    #[test]
    fn test_needs_players() {
        let err = GameBuilder::new(catalog(), GameConfig::new(0))
            .build()
            .unwrap_err();
        assert!(matches!(err, RulesError::InvalidConfig(_)));
    }

    #[test]
    fn test_turn_allowance() {
        let config = GameConfig::base(2, &DEFAULT_KINGDOM, 1).with_turn_allowance(2, 3);
        let game = GameBuilder::new(catalog(), config)
            .players(["Alice", "Bob"])
            .build()
            .unwrap();

        let alice = game.current_player();
        assert_eq!((alice.actions, alice.buys), (2, 3));
        let bob = game.player(PlayerId::new(1));
        assert_eq!((bob.actions, bob.buys), (0, 0));
    }
}
