//! Configuration types for the game core

use serde::{Deserialize, Serialize};

use crate::clock::{DEFAULT_ANCHOR_EPOCH_MS, DEFAULT_ANCHOR_INDEX};
use crate::stats::MAX_GUESSES;

/// Main game configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    /// Puzzle clock anchor
    #[serde(default)]
    pub anchor: AnchorConfig,

    /// Stats persistence backend
    #[serde(default)]
    pub stats_store: StatsStoreConfig,

    /// Engine settings
    #[serde(default)]
    pub engine: EngineConfig,
}

impl GameConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.engine.max_guesses == 0 || self.engine.max_guesses > MAX_GUESSES {
            return Err(crate::Error::config(format!(
                "max_guesses must be between 1 and {}, got {}",
                MAX_GUESSES, self.engine.max_guesses
            )));
        }

        if self.anchor.epoch_ms < 0 {
            return Err(crate::Error::config("anchor epoch must not be negative"));
        }

        if let StatsStoreConfig::File { path } = &self.stats_store {
            if path.is_empty() {
                return Err(crate::Error::config(
                    "file stats store requires a non-empty path",
                ));
            }
        }

        Ok(())
    }
}

/// The fixed (index, timestamp) pair the puzzle clock counts from
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnchorConfig {
    /// Puzzle index active at the anchor timestamp
    #[serde(default = "default_anchor_index")]
    pub index: u32,

    /// Anchor timestamp in Unix milliseconds
    #[serde(default = "default_anchor_epoch_ms")]
    pub epoch_ms: i64,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            index: default_anchor_index(),
            epoch_ms: default_anchor_epoch_ms(),
        }
    }
}

/// Stats store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatsStoreConfig {
    /// JSON file with atomic writes and backup recovery
    File {
        /// Path to the stats file
        path: String,
    },

    /// In-memory store, lost on restart
    #[default]
    Memory,
}

/// Engine settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Guesses a session may use before it is lost (1..=6)
    #[serde(default = "default_max_guesses")]
    pub max_guesses: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_guesses: default_max_guesses(),
        }
    }
}

fn default_anchor_index() -> u32 {
    DEFAULT_ANCHOR_INDEX
}

fn default_anchor_epoch_ms() -> i64 {
    DEFAULT_ANCHOR_EPOCH_MS
}

fn default_max_guesses() -> u8 {
    MAX_GUESSES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_or_oversized_max_guesses_rejected() {
        let mut config = GameConfig::default();
        config.engine.max_guesses = 0;
        assert!(config.validate().is_err());
        config.engine.max_guesses = 7;
        assert!(config.validate().is_err());
        config.engine.max_guesses = 6;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_file_path_rejected() {
        let config = GameConfig {
            stats_store: StatsStoreConfig::File {
                path: String::new(),
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn store_config_round_trips_through_json() {
        let config = StatsStoreConfig::File {
            path: "/var/lib/wordle/stats.json".into(),
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"type\":\"file\""));
        let back: StatsStoreConfig = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, StatsStoreConfig::File { .. }));
    }
}
