//! Server settings, read from an optional TOML file.

use std::path::{Path, PathBuf};

use chess_core::Color;
use serde::Deserialize;

use crate::record::GameId;
use crate::store::{MemoryStore, StorageError};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const CONFIG_ENV: &str = "GAME_SERVER_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// `tracing_subscriber` filter directive, used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub seed: SeedConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            log_filter: "info".to_string(),
            seed: SeedConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read `path`, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

/// Demo users and games loaded into the in-memory store at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub users: Vec<SeedUser>,
    pub games: Vec<SeedGame>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedUser {
    pub username: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedGame {
    pub name: String,
    #[serde(default)]
    pub white: Option<String>,
    #[serde(default)]
    pub black: Option<String>,
}

impl SeedConfig {
    /// Populate `store`, returning the ids of the created games in order.
    pub fn apply(&self, store: &MemoryStore) -> Result<Vec<GameId>, StorageError> {
        for user in &self.users {
            store.add_token(&user.token, &user.username);
        }
        let mut ids = Vec::with_capacity(self.games.len());
        for game in &self.games {
            let id = store.create_game(&game.name);
            for (color, player) in [(Color::White, &game.white), (Color::Black, &game.black)] {
                if let Some(name) = player {
                    store.join_game(id, color, name)?;
                }
            }
            ids.push(id);
        }
        Ok(ids)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
