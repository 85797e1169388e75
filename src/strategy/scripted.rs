//! Canned decisions.

use std::collections::VecDeque;

use super::StrategyProvider;
use crate::cards::{CardId, CardTypeId};
use crate::core::{ActionRecord, PlayerId, Target, TargetDomain};
use crate::effects::MicroAction;
use crate::game::{BuyOption, Game};

/// Answers each decision point from its own queue.
///
/// An empty queue declines: no card, no targets, no buy, and no discard
/// choice (the engine then discards its default cards).
///
/// A queued target list is consumed by the query for its own domain. An
/// empty target list is consumed by the last query of a micro-action, so
/// every non-automatic micro-action uses up exactly one entry.
#[derive(Clone, Debug, Default)]
pub struct ScriptedStrategy {
    plays: VecDeque<Option<CardId>>,
    targets: VecDeque<Vec<Target>>,
    buys: VecDeque<Option<CardTypeId>>,
    discards: VecDeque<Vec<CardId>>,
}

impl ScriptedStrategy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_play(mut self, card: CardId) -> Self {
        self.plays.push_back(Some(card));
        self
    }

    /// Decline to play, even if later plays are queued.
    #[must_use]
    pub fn with_no_play(mut self) -> Self {
        self.plays.push_back(None);
        self
    }

    #[must_use]
    pub fn with_targets(mut self, targets: Vec<Target>) -> Self {
        self.targets.push_back(targets);
        self
    }

    #[must_use]
    pub fn with_buy(mut self, card_type: CardTypeId) -> Self {
        self.buys.push_back(Some(card_type));
        self
    }

    #[must_use]
    pub fn with_no_buy(mut self) -> Self {
        self.buys.push_back(None);
        self
    }

    #[must_use]
    pub fn with_discards(mut self, cards: Vec<CardId>) -> Self {
        self.discards.push_back(cards);
        self
    }

    /// Whether every queued answer has been used.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.plays.is_empty()
            && self.targets.is_empty()
            && self.buys.is_empty()
            && self.discards.is_empty()
    }
}

impl StrategyProvider for ScriptedStrategy {
    fn select_card_to_play(&mut self, _game: &Game, _hand: &[CardId]) -> Option<CardId> {
        self.plays.pop_front().flatten()
    }

    fn select_targets(
        &mut self,
        _game: &Game,
        _card: CardId,
        _action: &MicroAction,
        _history: &[ActionRecord],
        domain: TargetDomain,
    ) -> Vec<Target> {
        let last_query = domain == TargetDomain::CardTypes;
        let matches = match self.targets.front() {
            None => return Vec::new(),
            Some(front) => front.first().map(|t| t.domain()) == Some(domain),
        };
        if matches || last_query {
            let answer = self.targets.pop_front().unwrap_or_default();
            if matches {
                return answer;
            }
        }
        Vec::new()
    }

    fn select_buy(&mut self, _game: &Game, _options: &[BuyOption]) -> Option<CardTypeId> {
        self.buys.pop_front().flatten()
    }

    fn select_discards(&mut self, _game: &Game, _player: PlayerId, _count: usize) -> Vec<CardId> {
        self.discards.pop_front().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardCatalog;
    use crate::core::{GameConfig, DEFAULT_KINGDOM};
    use crate::effects::{Effect, TargetSpec};
    use crate::game::GameBuilder;
    use crate::games::base::BaseSet;
    use std::sync::Arc;

    fn game() -> Game {
        let catalog = Arc::new(CardCatalog::from_provider(&BaseSet).unwrap());
        GameBuilder::new(catalog, GameConfig::base(2, &DEFAULT_KINGDOM, 2))
            .players(["Alice", "Bob"])
            .build()
            .unwrap()
    }

    fn query_all(strategy: &mut ScriptedStrategy, game: &Game) -> Vec<Vec<Target>> {
        let action = MicroAction::new(Effect::Trash, TargetSpec::cards_in_hand());
        TargetDomain::SELECTION_ORDER
            .iter()
            .map(|&d| strategy.select_targets(game, CardId::new(0), &action, &[], d))
            .collect()
    }

    #[test]
    fn test_targets_consumed_by_matching_domain() {
        let game = game();
        let card = Target::Card(CardId::new(3));
        let mut strategy = ScriptedStrategy::new().with_targets(vec![card]);

        let answers = query_all(&mut strategy, &game);

        assert_eq!(answers, vec![vec![], vec![card], vec![]]);
        assert!(strategy.is_exhausted());
    }

    #[test]
    fn test_empty_targets_consumed_once() {
        let game = game();
        let card = Target::Card(CardId::new(3));
        let mut strategy = ScriptedStrategy::new()
            .with_targets(Vec::new())
            .with_targets(vec![card]);

        assert!(query_all(&mut strategy, &game).iter().all(Vec::is_empty));
        assert_eq!(query_all(&mut strategy, &game)[1], vec![card]);
    }

    #[test]
    fn test_queues_decline_when_empty() {
        let game = game();
        let mut strategy = ScriptedStrategy::new().with_no_play().with_play(CardId::new(1));

        assert_eq!(strategy.select_card_to_play(&game, &[]), None);
        assert_eq!(strategy.select_card_to_play(&game, &[]), Some(CardId::new(1)));
        assert_eq!(strategy.select_card_to_play(&game, &[]), None);
        assert_eq!(strategy.select_buy(&game, &[]), None);
        assert!(strategy
            .select_discards(&game, PlayerId::new(0), 2)
            .is_empty());
    }
}
