//! Session configuration.

use crate::agent::SearchMode;
use crate::game::GameMode;
use crate::types::Player;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Defaults a [`Game`](crate::Game) starts from, and returns to on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Human vs human, or human vs agent.
    #[serde(default = "default_mode")]
    mode: GameMode,

    /// How the agent picks moves.
    #[serde(default = "default_search")]
    search: SearchMode,

    /// Side the agent plays.
    #[serde(default = "default_agent_player")]
    agent_player: Player,
}

fn default_mode() -> GameMode {
    GameMode::PlayerVsAgent
}

fn default_search() -> SearchMode {
    SearchMode::Minimax
}

fn default_agent_player() -> Player {
    Player::O
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(default_mode(), default_search(), default_agent_player())
    }
}

impl GameConfig {
    /// Creates a configuration.
    #[instrument]
    pub fn new(mode: GameMode, search: SearchMode, agent_player: Player) -> Self {
        Self {
            mode,
            search,
            agent_player,
        }
    }

    /// Returns a copy with the game mode replaced.
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns a copy with the search mode replaced.
    pub fn with_search(mut self, search: SearchMode) -> Self {
        self.search = search;
        self
    }

    /// Returns a copy with the agent's side replaced.
    pub fn with_agent_player(mut self, agent_player: Player) -> Self {
        self.agent_player = agent_player;
        self
    }

    /// Parses configuration from TOML text. Missing keys take defaults.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            mode = %config.mode,
            search = %config.search,
            agent_player = %config.agent_player,
            "Config loaded successfully"
        );
        Ok(config)
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
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
