//! Player preferences and round options
//!
//! Stored as JSON. Player name and mute flag live here and are passed
//! explicitly to whoever needs them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::AI_FIRE_CHANCE;
use crate::error::ArenaError;
use crate::sim::{AiStrategy, MovementModel, Precision};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name shown on the health bar and the outcome banner
    pub player_name: String,
    /// Silence music and effects (read by the audio collaborator)
    pub muted: bool,

    // === Simulation ===
    /// Hit-test precision (fine falls back to coarse without a mask)
    pub collision: Precision,
    /// AI movement policy
    pub ai_strategy: AiStrategy,
    /// How up/down move the human fighter
    pub movement: MovementModel,
    /// Per-tick chance that the AI tries to fire
    pub ai_fire_chance: f32,
    /// Fixed seed for reproducible rounds (None = caller picks)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: "Player".to_string(),
            muted: false,
            collision: Precision::Fine,
            ai_strategy: AiStrategy::Random,
            movement: MovementModel::Jump,
            ai_fire_chance: AI_FIRE_CHANCE,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ArenaError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ArenaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ArenaError> {
        let json = fs::read_to_string(path).map_err(|source| ArenaError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings: {e}");
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), ArenaError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| ArenaError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Name for display, never empty
    pub fn display_name(&self) -> &str {
        let name = self.player_name.trim();
        if name.is_empty() { "Player" } else { name }
    }
}
