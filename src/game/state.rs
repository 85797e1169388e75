//! The authoritative game aggregate.
//!
//! `Game` owns the card arena, the players, the supply piles and the trash,
//! and is the only place a card changes holder. Zones store ids only; the
//! arena (`im::Vector<Card>`) and the owner index (`im::HashMap`) make any
//! card locatable by id. All collections are persistent, so `clone` is cheap
//! enough to simulate a decision on a copy and throw the copy away.

use std::sync::Arc;

use im::{HashMap as ImHashMap, OrdMap, Vector};
use log::trace;
use rustc_hash::FxHashMap;

use crate::cards::{Card, CardCatalog, CardId, CardType, CardTypeId};
use crate::core::{
    ActionRecord, GameRng, Phase, PlayerId, PlayerMap, RulesError, RulesResult,
};
use crate::effects::MicroAction;
use crate::players::{Player, PlayerZone};
use crate::zones::Zone;

/// Who holds a card, at the granularity of the owner index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Holder {
    /// In one of this player's four zones.
    Player(PlayerId),
    /// In the supply pile of its own type.
    Supply,
    Trash,
}

/// Where a card currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardLocation {
    /// In a player's hand, draw pile, discard pile or play area.
    Player { player: PlayerId, zone: PlayerZone },
    /// In the supply pile for this type.
    Supply(CardTypeId),
    /// Trashed; no longer owned by anyone.
    Trash,
}

/// A running game.
///
/// `Clone` is an exact replica, RNG included, so two clones fed the same
/// decisions stay equal. Use `fork` for a replica whose future shuffles are
/// resampled.
#[derive(Clone, Debug)]
pub struct Game {
    /// Shared, immutable card definitions.
    pub(crate) catalog: Arc<CardCatalog>,
    /// Cards drawn at the end of each turn.
    pub(crate) hand_size: usize,
    /// Actions and buys granted at the start of each turn.
    pub(crate) actions_per_turn: u32,
    pub(crate) buys_per_turn: u32,

    /// Card arena, indexed by `CardId`.
    pub(crate) cards: Vector<Card>,
    /// Owner index: which kind of zone holds each card.
    pub(crate) holders: ImHashMap<CardId, Holder>,

    pub(crate) players: PlayerMap<Player>,
    /// One pile per card type in play, ordered by type id.
    pub(crate) supply: OrdMap<CardTypeId, Zone>,
    pub(crate) trash: Zone,

    /// Player whose turn it is.
    pub(crate) current: PlayerId,
    pub(crate) turn: u32,
    /// Turns each player has completed.
    pub(crate) turns_taken: PlayerMap<u32>,
    pub(crate) phase: Phase,

    /// Action card whose micro-actions are being resolved.
    pub(crate) selected: Option<CardId>,
    /// Remaining micro-actions of the selected card; next one on top.
    pub(crate) pending: Vec<MicroAction>,
    /// Micro-actions executed so far in the current play.
    pub(crate) history: Vec<ActionRecord>,

    pub(crate) rng: GameRng,
}

/// Structural equality over the game position.
///
/// Compares players, the card arena, supply, trash, current seat, turn,
/// phase and the action state. The catalog, the RNG, the hand size, the
/// turn allowance and the per-player turn tally are left out.
impl PartialEq for Game {
    fn eq(&self, other: &Self) -> bool {
        self.players == other.players
            && self.supply == other.supply
            && self.trash == other.trash
            && self.current == other.current
            && self.turn == other.turn
            && self.phase == other.phase
            && self.selected == other.selected
            && self.pending == other.pending
            && self.history == other.history
            && self.cards == other.cards
    }
}

impl Eq for Game {}

impl Game {
    /// Replica with a forked RNG.
    ///
    /// The copy is equal to `self` but its future shuffles differ. Forking
    /// advances `self`'s fork counter, so successive forks differ too.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        let mut copy = self.clone();
        copy.rng = self.rng.fork();
        copy
    }

    // === Accessors ===

    /// Card definitions used by this game.
    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    /// Shared handle to the catalog, for building another game.
    #[must_use]
    pub fn shared_catalog(&self) -> Arc<CardCatalog> {
        Arc::clone(&self.catalog)
    }

    /// Cards drawn at the end of each turn.
    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand_size
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    /// One player's state.
    ///
    /// # Panics
    ///
    /// Panics if `player` is not a seat in this game.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> &Player {
        &self.players[player]
    }

    pub(crate) fn player_mut(&mut self, player: PlayerId) -> &mut Player {
        &mut self.players[player]
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn current_player_id(&self) -> PlayerId {
        self.current
    }

    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// Turn counter, starting at 1 and advanced once per player turn.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Completed turns of one player.
    #[must_use]
    pub fn turns_taken(&self, player: PlayerId) -> u32 {
        self.turns_taken[player]
    }

    /// Current state of the turn machine.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Check if the game has reached `Phase::End`.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Action card being resolved, if any.
    #[must_use]
    pub fn selected_card(&self) -> Option<CardId> {
        self.selected
    }

    /// Pending micro-actions in execution order.
    pub fn pending_actions(&self) -> impl Iterator<Item = &MicroAction> {
        self.pending.iter().rev()
    }

    /// Micro-actions executed so far for the selected card, oldest first.
    #[must_use]
    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }

    /// Look up a physical card in the arena.
    #[must_use]
    pub fn card(&self, card: CardId) -> Option<&Card> {
        self.cards.get(card.index())
    }

    /// Catalog entry of a physical card.
    #[must_use]
    pub fn card_type(&self, card: CardId) -> Option<&CardType> {
        self.card(card).and_then(|c| self.catalog.get(c.card_type))
    }

    /// Number of physical cards in the game.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Supply pile of a card type, if the type is in this game.
    #[must_use]
    pub fn supply(&self, card_type: CardTypeId) -> Option<&Zone> {
        self.supply.get(&card_type)
    }

    /// Supply piles ordered by card type id.
    pub fn supply_piles(&self) -> impl Iterator<Item = (CardTypeId, &Zone)> {
        self.supply.iter().map(|(t, zone)| (*t, zone))
    }

    /// Cards left in a pile (0 for types without a pile).
    #[must_use]
    pub fn supply_count(&self, card_type: CardTypeId) -> usize {
        self.supply.get(&card_type).map_or(0, Zone::len)
    }

    /// Cards removed from play.
    #[must_use]
    pub fn trash(&self) -> &Zone {
        &self.trash
    }

    /// The game's random source, e.g. to capture its state.
    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    /// Where a card is, via the owner index.
    ///
    /// `None` for an id outside the arena.
    #[must_use]
    pub fn locate(&self, card: CardId) -> Option<CardLocation> {
        match self.holders.get(&card)? {
            Holder::Player(player) => self.players[*player]
                .find_card(card)
                .map(|zone| CardLocation::Player {
                    player: *player,
                    zone,
                }),
            Holder::Supply => self.card(card).map(|c| CardLocation::Supply(c.card_type)),
            Holder::Trash => Some(CardLocation::Trash),
        }
    }

    // === Transfers ===

    /// Draw for any player. Returns how many cards were drawn.
    ///
    /// Reshuffles the discard pile into an empty draw pile; drawing fewer
    /// than `count` cards is not an error.
    pub fn draw(&mut self, player: PlayerId, count: usize) -> RulesResult<usize> {
        let Self {
            players,
            catalog,
            rng,
            ..
        } = self;
        players[player].draw(count, catalog, rng)
    }

    /// Move the top card of a supply pile to a player's zone.
    ///
    /// `None` if there is no pile for the type or it is empty. A card
    /// gained into the hand is immediately spendable.
    pub fn gain(
        &mut self,
        player: PlayerId,
        card_type: CardTypeId,
        destination: PlayerZone,
    ) -> RulesResult<Option<CardId>> {
        let Some((card, card_type)) = self.supply.get_mut(&card_type).and_then(Zone::take_top)
        else {
            return Ok(None);
        };
        self.players[player].acquire_card(card, card_type, destination, &self.catalog)?;
        self.set_holder(card, Holder::Player(player))?;
        trace!("{} gained {} into {:?}", player, card, destination);
        Ok(Some(card))
    }

    /// Move a card from whichever player zone holds it to the trash.
    ///
    /// The card loses its owner and is flagged as trashed.
    ///
    /// `false` if no player holds the card.
    pub fn trash_card(&mut self, card: CardId) -> RulesResult<bool> {
        let Some(CardLocation::Player { player, zone }) = self.locate(card) else {
            return Ok(false);
        };
        let card_type = self.players[player].release_card(card, zone, &self.catalog)?;
        self.trash.add(card, card_type)?;
        self.set_holder(card, Holder::Trash)?;
        trace!("{} trashed {}", player, card);
        Ok(true)
    }

    /// Move a card between two zones of the same player.
    ///
    /// `false` if the player does not hold the card.
    pub fn move_card_within(
        &mut self,
        player: PlayerId,
        card: CardId,
        to: PlayerZone,
    ) -> RulesResult<bool> {
        let Some(from) = self.players[player].find_card(card) else {
            return Ok(false);
        };
        if from != to {
            self.players[player].move_card(card, from, to, &self.catalog)?;
        }
        Ok(true)
    }

    /// Record a new holder in the owner index and on the card itself.
    fn set_holder(&mut self, card: CardId, holder: Holder) -> RulesResult<()> {
        let entry = self
            .cards
            .get_mut(card.index())
            .ok_or(RulesError::UnknownCard(card))?;
        entry.owner = match holder {
            Holder::Player(player) => Some(player),
            Holder::Supply | Holder::Trash => None,
        };
        entry.trashed = holder == Holder::Trash;
        self.holders.insert(card, holder);
        Ok(())
    }

    // === Owner index ===

    /// Recompute the owner index and card owners from the zones.
    ///
    /// The zones are the source of truth; the index and the per-card owner
    /// fields are derived from them.
    pub fn rebuild_index(&mut self) {
        let mut holders = ImHashMap::new();
        for (id, player) in self.players.iter() {
            for (card, _) in player.all_cards() {
                holders.insert(card, Holder::Player(id));
            }
        }
        for pile in self.supply.values() {
            for card in pile.iter() {
                holders.insert(card, Holder::Supply);
            }
        }
        for card in self.trash.iter() {
            holders.insert(card, Holder::Trash);
        }

        for card in self.cards.iter_mut() {
            match holders.get(&card.id) {
                Some(Holder::Player(player)) => {
                    card.owner = Some(*player);
                    card.trashed = false;
                }
                Some(Holder::Trash) => {
                    card.owner = None;
                    card.trashed = true;
                }
                Some(Holder::Supply) | None => {
                    card.owner = None;
                    card.trashed = false;
                }
            }
        }
        self.holders = holders;
    }

    /// Every card sits in exactly one zone, and the index agrees.
    #[must_use]
    pub fn check_ownership(&self) -> bool {
        let mut seen: FxHashMap<CardId, Holder> = FxHashMap::default();
        let mut record = |card: CardId, holder: Holder| seen.insert(card, holder).is_none();

        for (id, player) in self.players.iter() {
            if !player
                .all_cards()
                .all(|(card, _)| record(card, Holder::Player(id)))
            {
                return false;
            }
        }
        for pile in self.supply.values() {
            if !pile.iter().all(|card| record(card, Holder::Supply)) {
                return false;
            }
        }
        if !self.trash.iter().all(|card| record(card, Holder::Trash)) {
            return false;
        }

        seen.len() == self.cards.len()
            && self.cards.iter().all(|card| {
                let holder = seen.get(&card.id);
                holder.is_some() && holder == self.holders.get(&card.id)
            })
    }

    // === Test seams ===

    #[cfg(test)]
    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    #[cfg(test)]
    pub(crate) fn push_history_for_test(&mut self, record: ActionRecord) {
        self.history.push(record);
    }
}
