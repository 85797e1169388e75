//! Turn phases.
//!
//! ```text
//! PLAY ──card──▶ ACTION ──stack empty, actions left──▶ PLAY
//!  │               │
//!  │ no card       │ stack empty, no actions
//!  ▼               ▼
//! BUY ◀────────────┘
//!  │  buys left: stay in BUY
//!  ├─ game over ─▶ END
//!  ▼
//! ADVANCE ──next player──▶ PLAY
//! ```

use serde::{Deserialize, Serialize};

/// One state of the per-turn state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Choose an action card to play (or stop playing).
    #[default]
    Play,
    /// Resolve the pending micro-actions of the selected card.
    Action,
    /// Purchase card types from the supply.
    Buy,
    /// Clean up the current player and hand the turn to the next one.
    Advance,
    /// The game is over. Absorbing.
    End,
}

impl Phase {
    /// Check if the game has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::End)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_play() {
        assert_eq!(Phase::default(), Phase::Play);
    }

    #[test]
    fn test_only_end_is_terminal() {
        assert!(Phase::End.is_terminal());
        for phase in [Phase::Play, Phase::Action, Phase::Buy, Phase::Advance] {
            assert!(!phase.is_terminal());
        }
    }

    #[test]
    fn test_phase_serialization() {
        let json = serde_json::to_string(&Phase::Advance).unwrap();
        let deserialized: Phase = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, Phase::Advance);
    }
}
