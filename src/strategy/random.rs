//! Uniformly random legal decisions.

use super::StrategyProvider;
use crate::cards::{CardId, CardTypeId};
use crate::core::{ActionRecord, GameRng, PlayerId, Target, TargetDomain};
use crate::effects::{MicroAction, TargetSelector};
use crate::game::{BuyOption, Game};

/// Picks uniformly among legal choices, including declining.
///
/// Owns its own seeded `GameRng`, so a game played by random strategies
/// is reproducible from the two seeds.
#[derive(Clone, Debug)]
pub struct RandomStrategy {
    rng: GameRng,
}

impl RandomStrategy {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl StrategyProvider for RandomStrategy {
    fn select_card_to_play(&mut self, game: &Game, hand: &[CardId]) -> Option<CardId> {
        let playable: Vec<CardId> = hand
            .iter()
            .copied()
            .filter(|&c| game.card_type(c).is_some_and(|t| t.is_action()))
            .collect();
        // Index `len` stands for "stop playing".
        let pick = self.rng.index(playable.len() + 1);
        playable.get(pick).copied()
    }

    fn select_targets(
        &mut self,
        game: &Game,
        card: CardId,
        action: &MicroAction,
        history: &[ActionRecord],
        domain: TargetDomain,
    ) -> Vec<Target> {
        if domain != action.domain() {
            return Vec::new();
        }
        let mut candidates = TargetSelector::new(&action.targets, game.current_player_id())
            .with_source(card)
            .with_history(history)
            .valid_targets(game);

        let count = action.targets.count;
        let max = count.max().map_or(candidates.len(), |m| m.min(candidates.len()));
        let min = count.min();
        if min > max {
            return Vec::new();
        }
        let size = min + self.rng.index(max - min + 1);
        self.rng.shuffle(&mut candidates);
        candidates.truncate(size);
        candidates
    }

    fn select_buy(&mut self, _game: &Game, options: &[BuyOption]) -> Option<CardTypeId> {
        let mut firsts: Vec<CardTypeId> = options.iter().filter_map(|o| o.first().copied()).collect();
        firsts.dedup();
        let pick = self.rng.index(firsts.len() + 1);
        firsts.get(pick).copied()
    }

    fn select_discards(&mut self, game: &Game, player: PlayerId, count: usize) -> Vec<CardId> {
        let mut hand: Vec<CardId> = game.player(player).hand().iter().collect();
        self.rng.shuffle(&mut hand);
        hand.truncate(count);
        hand
    }
}
