//! A player's zones, counters and the draw/discard/reshuffle protocol.
//!
//! Cards never leave a player through this type directly; cross-holder
//! transfers (gaining from the supply, trashing) go through the `Game`,
//! which uses `acquire_card`/`release_card` for the player side.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, CardId, CardTypeId};
use crate::core::{GameRng, PlayerId, RulesResult};
use crate::zones::{Zone, ZonePosition};

/// One of the four zones every player owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerZone {
    Hand,
    DrawPile,
    Discard,
    PlayArea,
}

impl PlayerZone {
    pub const ALL: [PlayerZone; 4] = [
        PlayerZone::Hand,
        PlayerZone::DrawPile,
        PlayerZone::Discard,
        PlayerZone::PlayArea,
    ];
}

/// Per-player state.
///
/// `money` is the turn counter driven by card effects and purchases; the
/// money value of treasures currently in hand is tracked separately in
/// `hand_money` and both together are what the player can spend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,

    hand: Zone,
    draw_pile: Zone,
    discard: Zone,
    play_area: Zone,

    /// Action cards that may still be played this turn.
    pub actions: u32,
    /// Purchases left this turn.
    pub buys: u32,
    /// Money from effects minus money spent this turn. May go negative
    /// while treasures in hand cover the difference.
    pub money: i64,

    hand_money: u32,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Zone::new(),
            draw_pile: Zone::new(),
            discard: Zone::new(),
            play_area: Zone::new(),
            actions: 0,
            buys: 0,
            money: 0,
            hand_money: 0,
        }
    }

    // === Zones ===

    #[must_use]
    pub fn zone(&self, zone: PlayerZone) -> &Zone {
        match zone {
            PlayerZone::Hand => &self.hand,
            PlayerZone::DrawPile => &self.draw_pile,
            PlayerZone::Discard => &self.discard,
            PlayerZone::PlayArea => &self.play_area,
        }
    }

    fn zone_mut(&mut self, zone: PlayerZone) -> &mut Zone {
        match zone {
            PlayerZone::Hand => &mut self.hand,
            PlayerZone::DrawPile => &mut self.draw_pile,
            PlayerZone::Discard => &mut self.discard,
            PlayerZone::PlayArea => &mut self.play_area,
        }
    }

    #[must_use]
    pub fn hand(&self) -> &Zone {
        &self.hand
    }

    #[must_use]
    pub fn draw_pile(&self) -> &Zone {
        &self.draw_pile
    }

    #[must_use]
    pub fn discard(&self) -> &Zone {
        &self.discard
    }

    #[must_use]
    pub fn play_area(&self) -> &Zone {
        &self.play_area
    }

    /// Which of this player's zones holds `card`.
    #[must_use]
    pub fn find_card(&self, card: CardId) -> Option<PlayerZone> {
        PlayerZone::ALL
            .into_iter()
            .find(|&z| self.zone(z).contains(card))
    }

    /// Every card the player holds, zone by zone.
    pub fn all_cards(&self) -> impl Iterator<Item = (CardId, CardTypeId)> + '_ {
        PlayerZone::ALL
            .into_iter()
            .flat_map(move |z| self.zone(z).entries())
    }

    #[must_use]
    pub fn card_count(&self) -> usize {
        PlayerZone::ALL.iter().map(|&z| self.zone(z).len()).sum()
    }

    // === Counters ===

    /// Reset counters for a new turn.
    pub fn start_turn(&mut self, actions: u32, buys: u32) {
        self.actions = actions;
        self.buys = buys;
        self.money = 0;
    }

    /// Money available to spend right now.
    #[must_use]
    pub fn spendable_money(&self) -> i64 {
        self.money.saturating_add(i64::from(self.hand_money))
    }

    /// Money value of the treasures in hand.
    #[must_use]
    pub fn hand_money(&self) -> u32 {
        self.hand_money
    }

    /// Total victory points over all zones.
    #[must_use]
    pub fn score(&self, catalog: &CardCatalog) -> i32 {
        self.all_cards()
            .filter_map(|(_, t)| catalog.get(t))
            .fold(0i32, |total, t| total.saturating_add(t.victory_points))
    }

    // === Transfers ===

    /// Put a card into one of this player's zones (on top).
    ///
    /// A card arriving in hand adds its money value to `hand_money`.
    pub fn acquire_card(
        &mut self,
        card: CardId,
        card_type: CardTypeId,
        zone: PlayerZone,
        catalog: &CardCatalog,
    ) -> RulesResult<()> {
        self.acquire_card_at(card, card_type, zone, ZonePosition::Top, catalog)
    }

    pub fn acquire_card_at(
        &mut self,
        card: CardId,
        card_type: CardTypeId,
        zone: PlayerZone,
        position: ZonePosition,
        catalog: &CardCatalog,
    ) -> RulesResult<()> {
        let money = catalog.try_get(card_type)?.money;
        self.zone_mut(zone).insert(card, card_type, position)?;
        if zone == PlayerZone::Hand {
            self.hand_money = self.hand_money.saturating_add(money);
        }
        Ok(())
    }

    /// Take a card out of one of this player's zones.
    ///
    /// A card leaving the hand takes its money value with it.
    pub fn release_card(
        &mut self,
        card: CardId,
        zone: PlayerZone,
        catalog: &CardCatalog,
    ) -> RulesResult<CardTypeId> {
        let card_type = self.zone_mut(zone).remove(card)?;
        if zone == PlayerZone::Hand {
            let money = catalog.try_get(card_type)?.money;
            self.hand_money = self.hand_money.saturating_sub(money);
        }
        Ok(card_type)
    }

    /// Move a card between two of this player's zones.
    pub fn move_card(
        &mut self,
        card: CardId,
        from: PlayerZone,
        to: PlayerZone,
        catalog: &CardCatalog,
    ) -> RulesResult<()> {
        let card_type = self.release_card(card, from, catalog)?;
        self.acquire_card(card, card_type, to, catalog)
    }

    // === Draw / discard protocol ===

    /// Draw one card, reshuffling the discard pile into an empty draw pile.
    ///
    /// Returns `None` when both piles are empty.
    pub fn draw_one(
        &mut self,
        catalog: &CardCatalog,
        rng: &mut GameRng,
    ) -> RulesResult<Option<CardId>> {
        if self.draw_pile.is_empty() {
            self.reshuffle(rng)?;
        }
        let Some((card, card_type)) = self.draw_pile.take_top() else {
            return Ok(None);
        };
        self.acquire_card(card, card_type, PlayerZone::Hand, catalog)?;
        Ok(Some(card))
    }

    /// Draw up to `count` cards. Returns how many were actually drawn.
    pub fn draw(
        &mut self,
        count: usize,
        catalog: &CardCatalog,
        rng: &mut GameRng,
    ) -> RulesResult<usize> {
        let mut drawn = 0;
        while drawn < count {
            if self.draw_one(catalog, rng)?.is_none() {
                break;
            }
            drawn += 1;
        }
        trace!("{} drew {}/{} cards", self.id, drawn, count);
        Ok(drawn)
    }

    /// Shuffle the draw pile in place.
    pub fn shuffle_draw_pile(&mut self, rng: &mut GameRng) {
        self.draw_pile.shuffle(rng);
    }

    fn reshuffle(&mut self, rng: &mut GameRng) -> RulesResult<()> {
        if self.discard.is_empty() {
            return Ok(());
        }
        for (card, card_type) in self.discard.take_all() {
            self.draw_pile.add(card, card_type)?;
        }
        self.draw_pile.shuffle(rng);
        trace!("{} reshuffled {} cards", self.id, self.draw_pile.len());
        Ok(())
    }

    /// Move a card from hand to the play area.
    ///
    /// Returns `false` (and does nothing) if the card is not in hand.
    /// Spending an action is the caller's job.
    pub fn play_card(&mut self, card: CardId, catalog: &CardCatalog) -> RulesResult<bool> {
        if !self.hand.contains(card) {
            return Ok(false);
        }
        self.move_card(card, PlayerZone::Hand, PlayerZone::PlayArea, catalog)?;
        Ok(true)
    }

    /// Move a card from hand to discard. `false` if it is not in hand.
    pub fn discard_card(&mut self, card: CardId, catalog: &CardCatalog) -> RulesResult<bool> {
        if !self.hand.contains(card) {
            return Ok(false);
        }
        self.move_card(card, PlayerZone::Hand, PlayerZone::Discard, catalog)?;
        Ok(true)
    }

    /// Discard the whole hand one random card at a time.
    pub fn discard_all(&mut self, catalog: &CardCatalog, rng: &mut GameRng) -> RulesResult<usize> {
        let mut discarded = 0;
        while !self.hand.is_empty() {
            let index = rng.index(self.hand.len());
            let (card, card_type) = self.hand.remove_at(index)?;
            self.hand_money = self
                .hand_money
                .saturating_sub(catalog.try_get(card_type)?.money);
            self.discard.add(card, card_type)?;
            discarded += 1;
        }
        Ok(discarded)
    }

    /// Clean up: discard hand and play area, zero counters, draw a new hand.
    ///
    /// Returns the size of the new hand.
    pub fn end_turn(
        &mut self,
        hand_size: usize,
        catalog: &CardCatalog,
        rng: &mut GameRng,
    ) -> RulesResult<usize> {
        self.discard_all(catalog, rng)?;
        for (card, card_type) in self.play_area.take_all() {
            self.discard.add(card, card_type)?;
        }
        self.actions = 0;
        self.buys = 0;
        self.money = 0;
        self.draw(hand_size, catalog, rng)
    }
}
