//! Data-driven fighter balance
//!
//! AI strength comes entirely from the difficulty tier; the human fighter uses
//! fixed parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ArenaError;

/// AI difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// Per-fighter balance values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FighterParams {
    /// Horizontal step per tick
    pub speed: u32,
    pub max_health: u32,
    /// Minimum milliseconds between two shots
    pub shoot_cooldown_ms: u64,
}

/// Human fighter balance (independent of the selected tier)
pub const HUMAN_PARAMS: FighterParams = FighterParams {
    speed: 5,
    max_health: 100,
    shoot_cooldown_ms: 500,
};

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// AI balance for this tier
    pub fn params(&self) -> FighterParams {
        match self {
            Difficulty::Easy => FighterParams {
                speed: 2,
                max_health: 100,
                shoot_cooldown_ms: 800,
            },
            Difficulty::Medium => FighterParams {
                speed: 4,
                max_health: 125,
                shoot_cooldown_ms: 600,
            },
            Difficulty::Hard => FighterParams {
                speed: 6,
                max_health: 150,
                shoot_cooldown_ms: 400,
            },
        }
    }

    /// Whether the random policy may pick a jump at this tier
    pub fn can_jump(&self) -> bool {
        !matches!(self, Difficulty::Easy)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ArenaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "med" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ArenaError::UnknownDifficulty(s.to_string())),
        }
    }
}
