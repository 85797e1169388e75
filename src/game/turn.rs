//! The per-turn state machine.
//!
//! `play_step` is one atomic transition. `play_phase`, `play_turn` and
//! `play_game` are loops over it. Every decision is taken synchronously
//! from the `StrategyProvider` passed in.

use log::{debug, info};

use super::state::Game;
use crate::cards::CardId;
use crate::core::{ActionRecord, Phase, RulesError, RulesResult};
use crate::effects::ActionInterpreter;
use crate::strategy::StrategyProvider;

impl Game {
    /// Advance the state machine by one step. Returns the new phase.
    pub fn play_step(&mut self, strategy: &mut dyn StrategyProvider) -> RulesResult<Phase> {
        match self.phase {
            Phase::Play => self.step_play(strategy)?,
            Phase::Action => self.step_action(strategy)?,
            Phase::Buy => self.step_buy(strategy)?,
            Phase::Advance => self.step_advance()?,
            Phase::End => {}
        }
        Ok(self.phase)
    }

    /// Step until the phase changes or the game ends.
    pub fn play_phase(&mut self, strategy: &mut dyn StrategyProvider) -> RulesResult<Phase> {
        let start = self.phase;
        while self.phase == start && !self.phase.is_terminal() {
            self.play_step(strategy)?;
        }
        Ok(self.phase)
    }

    /// Step until the next player's turn begins or the game ends.
    pub fn play_turn(&mut self, strategy: &mut dyn StrategyProvider) -> RulesResult<Phase> {
        let turn = self.turn;
        while self.turn == turn && !self.phase.is_terminal() {
            self.play_step(strategy)?;
        }
        Ok(self.phase)
    }

    /// Play whole turns until the game ends or `max_turns` have started.
    ///
    /// Returns `true` if the game reached its end.
    pub fn play_game(
        &mut self,
        strategy: &mut dyn StrategyProvider,
        max_turns: u32,
    ) -> RulesResult<bool> {
        while !self.phase.is_terminal() && self.turn <= max_turns {
            self.play_turn(strategy)?;
        }
        if self.is_over() {
            info!(
                "game over after {} turns, scores {:?}",
                self.turn,
                self.scores().values().collect::<Vec<_>>()
            );
        }
        Ok(self.is_over())
    }

    /// Start playing an action card from the current player's hand.
    ///
    /// `false` (and no change) if the player has no actions left or the
    /// card is not an action card in their hand.
    pub fn play_card(&mut self, card: CardId) -> RulesResult<bool> {
        self.require_phase(Phase::Play)?;

        let player = self.current;
        let Some(card_type) = self.card_type(card) else {
            return Err(RulesError::UnknownCard(card));
        };
        if self.players[player].actions == 0
            || !card_type.is_action()
            || !self.players[player].hand().contains(card)
        {
            return Ok(false);
        }

        let name = card_type.name.clone();
        let actions = card_type.actions.clone();
        let catalog = std::sync::Arc::clone(&self.catalog);
        let acting = &mut self.players[player];
        acting.actions -= 1;
        acting.play_card(card, &catalog)?;

        self.selected = Some(card);
        self.pending = actions.into_iter().rev().collect();
        self.history.clear();
        self.phase = Phase::Action;
        debug!("{} plays {} ({})", player, name, card);
        Ok(true)
    }

    /// Pop, target and apply the next pending micro-action.
    pub fn execute_next_action(
        &mut self,
        strategy: &mut dyn StrategyProvider,
    ) -> RulesResult<ActionRecord> {
        self.require_phase(Phase::Action)?;
        let source = self.selected.ok_or(RulesError::NoSelectedCard)?;
        let action = self.pending.pop().ok_or(RulesError::NoPendingAction)?;

        let targets = ActionInterpreter::choose_targets(self, strategy, source, &action);
        let record = ActionRecord::new(action, targets);
        ActionInterpreter::apply(self, strategy, &record)?;
        self.history.push(record.clone());
        Ok(record)
    }

    fn require_phase(&self, expected: Phase) -> RulesResult<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(RulesError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn step_play(&mut self, strategy: &mut dyn StrategyProvider) -> RulesResult<()> {
        let player = self.current;
        if self.players[player].actions > 0 {
            let hand: Vec<CardId> = self.players[player].hand().iter().collect();
            if let Some(card) = strategy.select_card_to_play(self, &hand) {
                if self.card(card).is_some() && self.play_card(card)? {
                    return Ok(());
                }
                debug!("{} offered unplayable {}", player, card);
            }
        }
        self.players[player].actions = 0;
        self.phase = Phase::Buy;
        Ok(())
    }

    fn step_action(&mut self, strategy: &mut dyn StrategyProvider) -> RulesResult<()> {
        let player = self.current;
        if self.selected.is_none() {
            self.players[player].actions = 0;
            self.pending.clear();
            self.phase = Phase::Buy;
            return Ok(());
        }

        if !self.pending.is_empty() {
            self.execute_next_action(strategy)?;
        }

        if self.pending.is_empty() {
            self.selected = None;
            self.phase = if self.players[player].actions > 0 {
                Phase::Play
            } else {
                Phase::Buy
            };
        }
        Ok(())
    }

    fn step_buy(&mut self, strategy: &mut dyn StrategyProvider) -> RulesResult<()> {
        let player = self.current;
        if self.players[player].buys > 0 {
            let options = self.valid_buy_options();
            let bought = match strategy.select_buy(self, &options) {
                Some(card_type) if self.catalog.get(card_type).is_some() => {
                    self.buy(card_type)?
                }
                _ => false,
            };
            if bought && self.players[player].buys > 0 {
                return Ok(());
            }
        }

        self.phase = if self.is_game_over() {
            Phase::End
        } else {
            Phase::Advance
        };
        Ok(())
    }

    fn step_advance(&mut self) -> RulesResult<()> {
        let Self {
            players,
            catalog,
            rng,
            current,
            hand_size,
            ..
        } = self;
        players[*current].end_turn(*hand_size, catalog, rng)?;
        self.turns_taken[self.current] += 1;

        self.turn += 1;
        self.current = self.current.next(self.player_count());
        let (actions, buys) = (self.actions_per_turn, self.buys_per_turn);
        self.players[self.current].start_turn(actions, buys);
        self.selected = None;
        self.pending.clear();
        self.history.clear();
        self.phase = Phase::Play;
        debug!("turn {}: {}", self.turn, self.current);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardCatalog;
    use crate::core::{GameConfig, PlayerId, Target};
    use crate::game::GameBuilder;
    use crate::games::base::BaseSet;
    use crate::players::PlayerZone;
    use crate::strategy::ScriptedStrategy;
    use std::sync::Arc;

    /// Alice holds one copy of `action` plus Coppers; Bob holds Coppers.
    fn game_with(action: &str) -> (Game, CardId) {
        let catalog = Arc::new(CardCatalog::from_provider(&BaseSet).unwrap());
        let config = GameConfig::new(9)
            .with_starting_cards("Copper", 9)
            .with_supply("Copper", 20)
            .with_supply("Silver", 10)
            .with_supply("Gold", 10)
            .with_supply("Estate", 8)
            .with_supply("Province", 8)
            .with_supply(action, 10);
        let mut game = GameBuilder::new(catalog, config)
            .players(["Alice", "Bob"])
            .build()
            .unwrap();
        let alice = PlayerId::new(0);
        let action = game.catalog().require(action).unwrap();
        let card = game
            .gain(alice, action, PlayerZone::Hand)
            .unwrap()
            .unwrap();
        (game, card)
    }

    #[test]
    fn test_play_moves_to_action() {
        let (mut game, smithy) = game_with("Smithy");
        let mut strategy = ScriptedStrategy::new().with_play(smithy);

        assert_eq!(game.play_step(&mut strategy).unwrap(), Phase::Action);

        let alice = game.current_player();
        assert_eq!(alice.actions, 0);
        assert!(alice.play_area().contains(smithy));
        assert_eq!(game.selected_card(), Some(smithy));
        assert_eq!(game.pending_actions().count(), 1);
    }

    #[test]
    fn test_action_resolves_then_buy() {
        let (mut game, smithy) = game_with("Smithy");
        let mut strategy = ScriptedStrategy::new().with_play(smithy);
        game.play_step(&mut strategy).unwrap();
        let hand_before = game.current_player().hand().len();

        assert_eq!(game.play_step(&mut strategy).unwrap(), Phase::Buy);

        assert_eq!(game.current_player().hand().len(), hand_before + 3);
        assert_eq!(game.selected_card(), None);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_actions_left_returns_to_play() {
        let (mut game, village) = game_with("Village");
        let mut strategy = ScriptedStrategy::new().with_play(village);
        game.play_phase(&mut strategy).unwrap();

        assert_eq!(game.play_phase(&mut strategy).unwrap(), Phase::Play);
        assert_eq!(game.current_player().actions, 2);
    }

    #[test]
    fn test_no_card_goes_to_buy() {
        let (mut game, _) = game_with("Smithy");
        let mut strategy = ScriptedStrategy::new();

        assert_eq!(game.play_step(&mut strategy).unwrap(), Phase::Buy);
        assert_eq!(game.current_player().actions, 0);
    }

    #[test]
    fn test_treasure_offered_as_action_goes_to_buy() {
        let (mut game, _) = game_with("Smithy");
        let copper = game
            .current_player()
            .hand()
            .iter()
            .find(|&c| game.card_type(c).is_some_and(|t| t.name == "Copper"))
            .unwrap();
        let mut strategy = ScriptedStrategy::new().with_play(copper);

        assert_eq!(game.play_step(&mut strategy).unwrap(), Phase::Buy);
        assert!(game.current_player().hand().contains(copper));
    }

    #[test]
    fn test_action_without_selection_falls_through() {
        let (mut game, _) = game_with("Smithy");
        game.set_phase(Phase::Action);

        assert_eq!(game.play_step(&mut ScriptedStrategy::new()).unwrap(), Phase::Buy);
        assert_eq!(game.current_player().actions, 0);
    }

    #[test]
    fn test_execute_next_action_contract() {
        let (mut game, smithy) = game_with("Smithy");
        let mut strategy = ScriptedStrategy::new();

        assert!(matches!(
            game.execute_next_action(&mut strategy),
            Err(RulesError::WrongPhase { .. })
        ));

        game.set_phase(Phase::Action);
        assert_eq!(
            game.execute_next_action(&mut strategy),
            Err(RulesError::NoSelectedCard)
        );

        game.set_phase(Phase::Play);
        game.play_card(smithy).unwrap();
        game.execute_next_action(&mut strategy).unwrap();
        assert_eq!(
            game.execute_next_action(&mut strategy),
            Err(RulesError::NoPendingAction)
        );
    }

    #[test]
    fn test_play_card_wrong_phase() {
        let (mut game, smithy) = game_with("Smithy");
        game.set_phase(Phase::Buy);

        assert_eq!(
            game.play_card(smithy),
            Err(RulesError::WrongPhase {
                expected: Phase::Play,
                actual: Phase::Buy
            })
        );
    }

    #[test]
    fn test_buy_then_advance() {
        let (mut game, _) = game_with("Smithy");
        let silver = game.catalog().require("Silver").unwrap();
        let mut strategy = ScriptedStrategy::new().with_buy(silver);

        assert_eq!(game.play_turn(&mut strategy).unwrap(), Phase::Play);

        assert_eq!(game.turn(), 2);
        assert_eq!(game.current_player_id(), PlayerId::new(1));
        assert_eq!(game.turns_taken(PlayerId::new(0)), 1);
        let alice = game.player(PlayerId::new(0));
        assert_eq!(alice.hand().len(), 5);
        assert!(alice.play_area().is_empty());
        assert_eq!(alice.card_count(), 11);
        let bob = game.current_player();
        assert_eq!((bob.actions, bob.buys, bob.money), (1, 1, 0));
    }

    #[test]
    fn test_declined_buy_ends_turn() {
        let (mut game, _) = game_with("Smithy");
        game.set_phase(Phase::Buy);

        assert_eq!(
            game.play_step(&mut ScriptedStrategy::new()).unwrap(),
            Phase::Advance
        );
    }

    #[test]
    fn test_extra_buys_stay_in_buy() {
        let (mut game, market) = game_with("Market");
        let copper = game.catalog().require("Copper").unwrap();
        let mut strategy = ScriptedStrategy::new()
            .with_play(market)
            .with_buy(copper)
            .with_buy(copper);

        // Play, resolve Market, decline a second play.
        game.play_phase(&mut strategy).unwrap();
        game.play_phase(&mut strategy).unwrap();
        game.play_phase(&mut strategy).unwrap();
        assert_eq!(game.phase(), Phase::Buy);
        assert_eq!(game.current_player().buys, 2);

        assert_eq!(game.play_step(&mut strategy).unwrap(), Phase::Buy);
        assert_eq!(game.play_step(&mut strategy).unwrap(), Phase::Advance);
        assert_eq!(game.player(PlayerId::new(0)).play_area().len(), 3);
    }

    #[test]
    fn test_invalid_targets_recorded_empty() {
        let (mut game, chapel) = game_with("Chapel");
        let bobs = game.player(PlayerId::new(1)).hand().peek().unwrap();
        let mut strategy = ScriptedStrategy::new()
            .with_play(chapel)
            .with_targets(vec![Target::Card(bobs)]);
        game.play_step(&mut strategy).unwrap();
        let before = game.player(PlayerId::new(1)).clone();

        let record = game.execute_next_action(&mut strategy).unwrap();

        assert!(record.targets.is_empty());
        assert_eq!(game.player(PlayerId::new(1)), &before);
        assert!(game.trash().is_empty());
    }
}
