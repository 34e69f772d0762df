//! Startup preferences for a new game store.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::{Difficulty, GameMode, GameState};

/// Initial preferences, loaded from TOML.
///
/// ```toml
/// game_mode = "pvp"
/// difficulty = "hard"
/// ```
///
/// Both keys are optional and fall back to `pvc` and `medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Game mode selected at startup.
    #[serde(default)]
    game_mode: GameMode,

    /// Computer difficulty selected at startup.
    #[serde(default)]
    difficulty: Difficulty,
}

impl StoreConfig {
    /// Creates a configuration with explicit preferences.
    #[instrument]
    pub fn new(game_mode: GameMode, difficulty: Difficulty) -> Self {
        Self {
            game_mode,
            difficulty,
        }
    }

    /// Parses configuration from a TOML document.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        debug!(game_mode = %config.game_mode, difficulty = %config.difficulty, "Config parsed");
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(game_mode = %config.game_mode, difficulty = %config.difficulty, "Config loaded successfully");
        Ok(config)
    }

    /// Zero scores with the configured preferences.
    #[instrument]
    pub fn initial_state(&self) -> GameState {
        GameState::new()
            .with_game_mode(self.game_mode)
            .with_difficulty(self.difficulty)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
