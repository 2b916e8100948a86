//! Enumeration types used throughout the agent.

use serde::{Deserialize, Serialize};

/// Combat mode, decided each tick from the number of surviving opponents.
/// Segments both the learned statistics and the movement planner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatMode {
    /// More than one opponent remains.
    #[default]
    Melee,
    /// Exactly one opponent remains.
    Duel,
}

impl CombatMode {
    /// Mode for a given surviving-opponent count.
    pub fn from_opponent_count(count: u32) -> Self {
        if count > 1 {
            CombatMode::Melee
        } else {
            CombatMode::Duel
        }
    }

    /// Histogram table index for this mode.
    pub fn index(self) -> usize {
        match self {
            CombatMode::Melee => 0,
            CombatMode::Duel => 1,
        }
    }
}
