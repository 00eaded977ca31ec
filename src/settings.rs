//! Settings file for the terminal front end
//!
//! A JSON document with optional `game` and `swipe` sections. Missing
//! fields keep their defaults.
//!
//! ```json
//! { "game": { "grid_size": 10, "tick_interval_ms": 300 } }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::game::GameConfig;
use crate::input::SwipeConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub game: GameConfig,
    pub swipe: SwipeConfig,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        let settings: Settings = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse settings in {:?}", path))?;
        Ok(settings)
    }

    /// Check the merged settings, after any command-line overrides
    pub fn validate(&self) -> Result<()> {
        self.game.validate().context("Invalid game settings")?;
        self.swipe.validate().context("Invalid swipe settings")
    }
}
