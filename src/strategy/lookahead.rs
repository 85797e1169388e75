//! One-step lookahead on clones of the game.

use log::{debug, trace};

use super::{ScriptedStrategy, StrategyProvider};
use crate::cards::{CardClass, CardId, CardTypeId};
use crate::core::{ActionRecord, Phase, PlayerId, Target, TargetDomain};
use crate::effects::{Effect, MicroAction, TargetSelector};
use crate::game::{BuyOption, Game};

/// Chooses buys by simulating each candidate on a clone.
///
/// For every distinct first purchase (and for buying nothing) the game is
/// cloned, the purchase is forced through a `ScriptedStrategy`, the clone
/// is run to the end of the buy phase and scored with `evaluate`. The real
/// game is never touched.
///
/// Other decisions are simple rules: play the first action card in hand,
/// gain the most expensive card type, trash or discard junk first.
#[derive(Clone, Debug)]
pub struct LookaheadStrategy {
    /// Turn by which victory points outweigh deck quality entirely.
    pub horizon: u32,
    /// Weight of average money per card while the horizon is far.
    pub money_weight: f64,
}

impl Default for LookaheadStrategy {
    fn default() -> Self {
        Self {
            horizon: 40,
            money_weight: 10.0,
        }
    }
}

impl LookaheadStrategy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Heuristic value of `game` for `player`.
    ///
    /// Early on, money density dominates; towards `horizon`, victory
    /// points do. A finished game is decided by its result.
    #[must_use]
    pub fn evaluate(&self, game: &Game, player: PlayerId) -> f64 {
        if let Some(result) = game.result() {
            return if result.is_winner(player) { 1e6 } else { -1e6 };
        }

        let holder = game.player(player);
        let cards = holder.card_count().max(1) as f64;
        let money: u32 = holder
            .all_cards()
            .filter_map(|(_, t)| game.catalog().get(t))
            .map(|t| t.money)
            .sum();
        let density = f64::from(money) / cards;
        let points = f64::from(holder.score(game.catalog()));

        let progress = (f64::from(game.turn()) / f64::from(self.horizon.max(1))).min(1.0);
        (1.0 - progress) * density * self.money_weight + progress * points
    }

    fn simulate_buy(&self, game: &Game, choice: Option<CardTypeId>) -> Option<f64> {
        let me = game.current_player_id();
        let mut sim = game.clone();
        let mut script = ScriptedStrategy::new();
        if let Some(card_type) = choice {
            script = script.with_buy(card_type);
        }
        match sim.play_phase(&mut script) {
            Ok(_) => Some(self.evaluate(&sim, me)),
            Err(err) => {
                debug!("simulated buy {:?} failed: {}", choice, err);
                None
            }
        }
    }

    /// Lower is worse to keep.
    fn keep_value(game: &Game, card: CardId) -> (i32, u32, u32) {
        game.card_type(card).map_or((0, 0, 0), |t| {
            let useful = match t.class {
                CardClass::Victory => 0,
                CardClass::Treasure | CardClass::Action => 1,
            };
            (useful, t.money, t.cost)
        })
    }
}

impl StrategyProvider for LookaheadStrategy {
    fn select_card_to_play(&mut self, game: &Game, hand: &[CardId]) -> Option<CardId> {
        hand.iter()
            .copied()
            .find(|&c| game.card_type(c).is_some_and(|t| t.is_action()))
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

        match domain {
            TargetDomain::CardTypes => {
                let cost = |t: &Target| {
                    t.as_card_type()
                        .and_then(|t| game.catalog().get(t))
                        .map_or(0, |t| t.cost)
                };
                candidates.sort_by_key(|t| std::cmp::Reverse(cost(t)));
                candidates.truncate(min.max(1).min(max));
            }
            TargetDomain::Cards => {
                candidates.sort_by_key(|t| t.as_card().map(|c| Self::keep_value(game, c)));
                let junk = candidates
                    .iter()
                    .filter(|t| {
                        t.as_card()
                            .and_then(|c| game.card_type(c))
                            .is_some_and(|ct| match action.effect {
                                Effect::Trash => ct.victory_points < 0,
                                _ => ct.class == CardClass::Victory,
                            })
                    })
                    .count();
                candidates.truncate(junk.clamp(min, max));
            }
            TargetDomain::Players => candidates.truncate(min),
        }
        trace!("lookahead picks {:?}", candidates);
        candidates
    }

    fn select_buy(&mut self, game: &Game, options: &[BuyOption]) -> Option<CardTypeId> {
        if game.phase() != Phase::Buy {
            return None;
        }
        let mut firsts: Vec<CardTypeId> = options.iter().filter_map(|o| o.first().copied()).collect();
        firsts.dedup();

        let mut best = (None, self.simulate_buy(game, None).unwrap_or(f64::MIN));
        for card_type in firsts {
            if let Some(value) = self.simulate_buy(game, Some(card_type)) {
                if value > best.1 {
                    best = (Some(card_type), value);
                }
            }
        }
        debug!("lookahead buys {:?} (value {:.2})", best.0, best.1);
        best.0
    }

    fn select_discards(&mut self, game: &Game, player: PlayerId, count: usize) -> Vec<CardId> {
        let mut hand: Vec<CardId> = game.player(player).hand().iter().collect();
        hand.sort_by_key(|&c| Self::keep_value(game, c));
        hand.truncate(count);
        hand
    }
}
