//! End-of-game detection and results.
//!
//! Each exhausted supply pile with end weight `w > 0` counts towards the
//! bucket for `w`; the game is over as soon as some bucket holds `w` piles.
//! With the base weights this reads "the Province pile is empty, or any
//! three other piles are".

use rustc_hash::FxHashMap;

use super::state::Game;
use crate::core::{PlayerId, PlayerMap};

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Shared victory: equal score and equal number of turns.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
        }
    }
}

impl Game {
    /// Whether the supply piles meet the end condition.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        let mut buckets: FxHashMap<u32, u32> = FxHashMap::default();
        for (card_type, pile) in self.supply_piles() {
            if !pile.is_empty() {
                continue;
            }
            let weight = self.catalog.get(card_type).map_or(0, |t| t.end_weight);
            if weight == 0 {
                continue;
            }
            let count = buckets.entry(weight).or_insert(0);
            *count += 1;
            if *count >= weight {
                return true;
            }
        }
        false
    }

    /// Victory points per player over all their zones.
    #[must_use]
    pub fn scores(&self) -> PlayerMap<i32> {
        PlayerMap::new(self.player_count(), |p| self.players[p].score(&self.catalog))
    }

    /// Highest score wins; among equal scores, fewer turns taken wins.
    #[must_use]
    pub fn winners(&self) -> Vec<PlayerId> {
        let scores = self.scores();
        let rank = |p: PlayerId| (scores[p], std::cmp::Reverse(self.turns_taken[p]));
        let Some(best) = self.players.player_ids().map(rank).max() else {
            return Vec::new();
        };
        self.players
            .player_ids()
            .filter(|&p| rank(p) == best)
            .collect()
    }

    /// The outcome, once the game has ended.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        if !self.is_over() {
            return None;
        }
        let mut winners = self.winners();
        if winners.len() == 1 {
            winners.pop().map(GameResult::Winner)
        } else {
            Some(GameResult::Winners(winners))
        }
    }
}
