// Wargame.toml settings
//
// [search] holds per-algorithm depth limits and the state mode, [players]
// names both seats and picks each one's algorithm, [strategy] controls the
// parallel root split and [game_log] the JSONL move record.

use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, WargameError};
use crate::search::{Algorithm, SearchConfig, StateMode};
use crate::types::Player;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub search: SearchSection,
    pub players: PlayersConfig,
    pub strategy: StrategyConfig,
    pub game_log: GameLogConfig,
}

/// Search depth limits, as written in the file.
///
/// Depths are signed here so that a negative value is reported as
/// `InvalidDepth` instead of a TOML type error.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SearchSection {
    pub minimax_depth: i64,
    pub alpha_beta_depth: i64,
    pub state_mode: StateMode,
}

impl SearchSection {
    /// Validated form consumed by the search engine
    pub fn to_search_config(&self) -> Result<SearchConfig> {
        SearchConfig::new(self.minimax_depth, self.alpha_beta_depth, self.state_mode)
    }
}

/// Player identities and which algorithm each one searches with
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PlayersConfig {
    pub player_one_id: String,
    pub player_two_id: String,
    pub player_one_alpha_beta: bool,
    pub player_two_alpha_beta: bool,
}

impl PlayersConfig {
    pub fn players(&self) -> (Player, Player) {
        (Player::new(self.player_one_id.as_str()), Player::new(self.player_two_id.as_str()))
    }

    /// Algorithms for the first and second seat
    pub fn algorithms(&self) -> [Algorithm; 2] {
        [
            Algorithm::from_alpha_beta_flag(self.player_one_alpha_beta),
            Algorithm::from_alpha_beta_flag(self.player_two_alpha_beta),
        ]
    }
}

/// Root-level execution strategy selection
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StrategyConfig {
    pub parallel_root: bool,
    pub min_cpus_for_parallel: usize,
}

/// Per-move JSONL game record
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GameLogConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads and validates configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Wargame.toml configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| WargameError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| WargameError::Config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Loads default configuration from Wargame.toml in the project root
    pub fn load_default() -> Result<Self> {
        Self::from_file("Wargame.toml")
    }

    /// Rejects settings no game can be played with
    pub fn validate(&self) -> Result<()> {
        self.search.to_search_config()?;

        if self.players.player_one_id.is_empty() || self.players.player_two_id.is_empty() {
            return Err(WargameError::Config("Player ids must not be empty".to_string()));
        }
        if self.players.player_one_id == self.players.player_two_id {
            return Err(WargameError::DuplicatePlayerId(self.players.player_one_id.clone()));
        }
        if self.game_log.enabled && self.game_log.log_file_path.is_empty() {
            return Err(WargameError::Config(
                "game_log.log_file_path must be set when logging is enabled".to_string(),
            ));
        }
        Ok(())
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Wargame.toml
    pub fn default_hardcoded() -> Self {
        Config {
            search: SearchSection {
                minimax_depth: 2,
                alpha_beta_depth: 3,
                state_mode: StateMode::Copy,
            },
            players: PlayersConfig {
                player_one_id: "player1".to_string(),
                player_two_id: "player2".to_string(),
                player_one_alpha_beta: true,
                player_two_alpha_beta: false,
            },
            strategy: StrategyConfig {
                parallel_root: true,
                min_cpus_for_parallel: 2,
            },
            game_log: GameLogConfig {
                enabled: false,
                log_file_path: "wargame_moves.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            warn!("Could not load Wargame.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}
