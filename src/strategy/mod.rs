//! Decision providers.
//!
//! The engine suspends at four points and asks a `StrategyProvider`:
//! which card to play, which targets to pick, what to buy, what to discard.
//! Calls are synchronous; the engine validates every answer and degrades
//! an illegal one to its benign default.
//!
//! - `ScriptedStrategy`: canned answers, for tests and forced simulations
//! - `RandomStrategy`: uniform over legal choices, seeded
//! - `LookaheadStrategy`: evaluates buys on clones of the game
//! - `PerPlayer`: one provider per seat

mod lookahead;
mod random;
mod scripted;

pub use lookahead::LookaheadStrategy;
pub use random::RandomStrategy;
pub use scripted::ScriptedStrategy;

use crate::cards::{CardId, CardTypeId};
use crate::core::{ActionRecord, PlayerId, PlayerMap, Target, TargetDomain};
use crate::effects::MicroAction;
use crate::game::{BuyOption, Game};

/// The four decision points.
pub trait StrategyProvider {
    /// An action card from `hand` to play, or `None` to stop playing.
    fn select_card_to_play(&mut self, game: &Game, hand: &[CardId]) -> Option<CardId>;

    /// Targets for `action` of the played `card`, restricted to `domain`.
    ///
    /// Asked once per domain, players first, until a non-empty answer.
    /// An empty answer means "nothing from this domain".
    fn select_targets(
        &mut self,
        game: &Game,
        card: CardId,
        action: &MicroAction,
        history: &[ActionRecord],
        domain: TargetDomain,
    ) -> Vec<Target>;

    /// A card type to buy, or `None` to end the turn.
    fn select_buy(&mut self, game: &Game, options: &[BuyOption]) -> Option<CardTypeId>;

    /// Exactly `count` cards from `player`'s hand to discard.
    fn select_discards(&mut self, game: &Game, player: PlayerId, count: usize) -> Vec<CardId>;
}

/// Routes each decision to the provider of the player it concerns.
///
/// Discards go to the discarding player; everything else to the player
/// whose turn it is. A seat without a provider declines.
pub struct PerPlayer {
    providers: PlayerMap<Box<dyn StrategyProvider>>,
}

impl PerPlayer {
    pub fn new(
        player_count: usize,
        factory: impl FnMut(PlayerId) -> Box<dyn StrategyProvider>,
    ) -> Self {
        Self {
            providers: PlayerMap::new(player_count, factory),
        }
    }

    pub fn provider_mut(
        &mut self,
        player: PlayerId,
    ) -> Option<&mut (dyn StrategyProvider + 'static)> {
        self.providers.try_get_mut(player).map(|p| &mut **p)
    }
}

impl StrategyProvider for PerPlayer {
    fn select_card_to_play(&mut self, game: &Game, hand: &[CardId]) -> Option<CardId> {
        self.provider_mut(game.current_player_id())?
            .select_card_to_play(game, hand)
    }

    fn select_targets(
        &mut self,
        game: &Game,
        card: CardId,
        action: &MicroAction,
        history: &[ActionRecord],
        domain: TargetDomain,
    ) -> Vec<Target> {
        self.provider_mut(game.current_player_id())
            .map(|p| p.select_targets(game, card, action, history, domain))
            .unwrap_or_default()
    }

    fn select_buy(&mut self, game: &Game, options: &[BuyOption]) -> Option<CardTypeId> {
        self.provider_mut(game.current_player_id())?
            .select_buy(game, options)
    }

    fn select_discards(&mut self, game: &Game, player: PlayerId, count: usize) -> Vec<CardId> {
        self.provider_mut(player)
            .map(|p| p.select_discards(game, player, count))
            .unwrap_or_default()
    }
}
