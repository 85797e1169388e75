//! Micro-action resolution: choosing targets and applying effects.
//!
//! `ActionInterpreter` is the single generic path from a `MicroAction` to a
//! state change. Target selection consults the provider domain by domain
//! (players, then cards, then card types) and keeps the first non-empty
//! answer; application then dispatches on the effect's domain.

use log::{debug, trace};

use super::effect::{Effect, MicroAction};
use super::targeting::TargetSelector;
use crate::cards::CardId;
use crate::core::{ActionRecord, PlayerId, RulesResult, Target, TargetDomain, TargetList};
use crate::game::Game;
use crate::players::PlayerZone;
use crate::strategy::StrategyProvider;

/// Applies micro-actions to a game.
pub struct ActionInterpreter;

impl ActionInterpreter {
    /// Choose and validate targets for `action`, played from `source`.
    ///
    /// Automatic specs resolve to their full candidate set. Otherwise the
    /// provider's first non-empty answer is validated; an invalid answer,
    /// or one from a domain the action does not act on, yields no targets.
    pub fn choose_targets(
        game: &Game,
        strategy: &mut dyn StrategyProvider,
        source: CardId,
        action: &MicroAction,
    ) -> TargetList {
        let history = game.history();
        let selector = TargetSelector::new(&action.targets, game.current_player_id())
            .with_source(source)
            .with_history(history);

        if action.targets.automatic {
            return selector.resolve_automatic(game);
        }

        for domain in TargetDomain::SELECTION_ORDER {
            let selected = strategy.select_targets(game, source, action, history, domain);
            if selected.is_empty() {
                continue;
            }
            if domain != action.domain() {
                debug!(
                    "rejected {:?} targets for a {:?} action",
                    domain,
                    action.domain()
                );
                return TargetList::new();
            }
            let resolved = selector.resolve(game, &selected);
            if resolved.is_empty() {
                debug!("rejected target selection {:?}", selected);
            }
            return resolved;
        }
        TargetList::new()
    }

    /// Apply `record.action` to each of `record.targets`.
    ///
    /// Amounts are evaluated once, against the history before this record
    /// is appended.
    pub fn apply(
        game: &mut Game,
        strategy: &mut dyn StrategyProvider,
        record: &ActionRecord,
    ) -> RulesResult<()> {
        let acting = game.current_player_id();
        trace!(
            "{} applies {:?} to {} target(s)",
            acting,
            record.action.effect,
            record.target_count()
        );

        match &record.action.effect {
            Effect::DrawCards(amount) => {
                let n = amount.resolve_or_zero(game, game.history()) as usize;
                for player in players(&record.targets) {
                    game.draw(player, n)?;
                }
            }
            Effect::AddActions(amount) => {
                let n = amount.resolve_or_zero(game, game.history());
                for player in players(&record.targets) {
                    let counter = &mut game.player_mut(player).actions;
                    *counter = counter.saturating_add(n);
                }
            }
            Effect::AddBuys(amount) => {
                let n = amount.resolve_or_zero(game, game.history());
                for player in players(&record.targets) {
                    let counter = &mut game.player_mut(player).buys;
                    *counter = counter.saturating_add(n);
                }
            }
            Effect::AddMoney(amount) => {
                let n = i64::from(amount.resolve_or_zero(game, game.history()));
                for player in players(&record.targets) {
                    let money = &mut game.player_mut(player).money;
                    *money = money.saturating_add(n);
                }
            }
            Effect::DiscardDownTo(keep) => {
                for player in players(&record.targets) {
                    Self::discard_down_to(game, strategy, player, *keep as usize)?;
                }
            }
            Effect::GainNamed {
                card_type,
                destination,
            } => {
                let card_type = game.catalog().require(card_type)?;
                for player in players(&record.targets) {
                    game.gain(player, card_type, *destination)?;
                }
            }
            Effect::Trash => {
                for card in record.cards() {
                    game.trash_card(card)?;
                }
            }
            Effect::Discard => {
                for card in record.cards() {
                    game.move_card_within(acting, card, PlayerZone::Discard)?;
                }
            }
            Effect::MoveTo(zone) => {
                for card in record.cards() {
                    game.move_card_within(acting, card, *zone)?;
                }
            }
            Effect::Gain { destination } => {
                for card_type in record.card_types() {
                    game.gain(acting, card_type, *destination)?;
                }
            }
        }
        Ok(())
    }

    /// Ask `player` to discard down to `keep` cards.
    ///
    /// A selection of the wrong size, with duplicates, or with cards not in
    /// hand is replaced by the top cards of the hand.
    fn discard_down_to(
        game: &mut Game,
        strategy: &mut dyn StrategyProvider,
        player: PlayerId,
        keep: usize,
    ) -> RulesResult<()> {
        let hand = game.player(player).hand();
        let Some(count) = hand.len().checked_sub(keep).filter(|&n| n > 0) else {
            return Ok(());
        };

        let chosen = strategy.select_discards(game, player, count);
        let hand = game.player(player).hand();
        let mut distinct = chosen.clone();
        distinct.sort_unstable();
        distinct.dedup();
        let valid = chosen.len() == count
            && distinct.len() == count
            && chosen.iter().all(|&c| hand.contains(c));

        let discards = if valid {
            chosen
        } else {
            debug!("{} gave an invalid discard selection, using default", player);
            hand.iter().rev().take(count).collect()
        };

        for card in discards {
            game.move_card_within(player, card, PlayerZone::Discard)?;
        }
        Ok(())
    }
}

fn players(targets: &TargetList) -> impl Iterator<Item = PlayerId> + '_ {
    targets.iter().filter_map(|t| t.as_player())
}
