//! Game configuration.
//!
//! The engine hardcodes no card names. A `GameConfig` says which catalog
//! entries make up the starting decks and the supply, and how large a hand
//! is; `GameBuilder` resolves the names against a `CardCatalog`.

use serde::{Deserialize, Serialize};

/// `(card type name, number of copies)`.
pub type CardCount = (String, u32);

/// Setup parameters for a game.
///
/// Deserializable so an external loader can supply it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cards drawn at the end of each turn.
    #[serde(default = "default_hand_size")]
    pub hand_size: usize,

    /// Actions a player starts each turn with.
    #[serde(default = "default_allowance")]
    pub actions_per_turn: u32,

    /// Buys a player starts each turn with.
    #[serde(default = "default_allowance")]
    pub buys_per_turn: u32,

    /// Composition of every player's starting deck.
    pub starting_deck: Vec<CardCount>,

    /// Supply piles, in the order they are listed for buying.
    pub supply: Vec<CardCount>,

    /// Seed for the game's `GameRng`.
    #[serde(default)]
    pub seed: u64,
}

fn default_hand_size() -> usize {
    5
}

fn default_allowance() -> u32 {
    1
}

/// Kingdom used when no explicit selection is given.
pub const DEFAULT_KINGDOM: [&str; 10] = [
    "Cellar", "Moat", "Village", "Workshop", "Woodcutter", "Militia", "Smithy", "Remodel",
    "Market", "Mine",
];

impl GameConfig {
    /// An empty configuration with the default hand size.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            hand_size: default_hand_size(),
            actions_per_turn: default_allowance(),
            buys_per_turn: default_allowance(),
            starting_deck: Vec::new(),
            supply: Vec::new(),
            seed,
        }
    }

    /// Base-set setup for `player_count` players with the given kingdom.
    ///
    /// Victory piles hold 8 cards with two players and 12 otherwise; the
    /// Curse pile holds 10 per opponent. The Copper pile starts at 60 less
    /// the starting Coppers and never goes below zero.
    #[must_use]
    pub fn base<S: AsRef<str>>(player_count: usize, kingdom: &[S], seed: u64) -> Self {
        let seats = u32::try_from(player_count).unwrap_or(u32::MAX);
        let victory = if seats <= 2 { 8 } else { 12 };
        let curses = seats.saturating_sub(1).max(1).saturating_mul(10);
        let coppers = 60u32.saturating_sub(seats.saturating_mul(7));

        let mut config = Self::new(seed)
            .with_starting_cards("Copper", 7)
            .with_starting_cards("Estate", 3)
            .with_supply("Copper", coppers)
            .with_supply("Silver", 40)
            .with_supply("Gold", 30)
            .with_supply("Estate", victory)
            .with_supply("Duchy", victory)
            .with_supply("Province", victory)
            .with_supply("Curse", curses);

        for name in kingdom {
            config = config.with_supply(name.as_ref(), 10);
        }
        config
    }

    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    #[must_use]
    pub fn with_turn_allowance(mut self, actions: u32, buys: u32) -> Self {
        self.actions_per_turn = actions;
        self.buys_per_turn = buys;
        self
    }

    #[must_use]
    pub fn with_starting_cards(mut self, name: impl Into<String>, count: u32) -> Self {
        self.starting_deck.push((name.into(), count));
        self
    }

    #[must_use]
    pub fn with_supply(mut self, name: impl Into<String>, count: u32) -> Self {
        self.supply.push((name.into(), count));
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Total cards in one starting deck.
    #[must_use]
    pub fn starting_deck_size(&self) -> u32 {
        self.starting_deck.iter().map(|(_, n)| n).sum()
    }
}
