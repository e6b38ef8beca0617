//! Collaborator interfaces the server consumes, and an in-memory
//! implementation of both for tests and the standalone binary.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chess_core::Color;

use crate::record::{GameId, GameRecord};

/// Persistence failure reported by a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct StorageError(pub String);

impl StorageError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Resolves an opaque auth token to the username it was issued for.
#[async_trait]
pub trait TokenLookup: Send + Sync {
    async fn resolve_token(&self, token: &str) -> Result<Option<String>, StorageError>;
}

/// Durable home of game records, keyed by game id.
#[async_trait]
pub trait GameStore: Send + Sync {
    async fn load_game(&self, id: GameId) -> Result<Option<GameRecord>, StorageError>;
    async fn save_game(&self, game: &GameRecord) -> Result<(), StorageError>;
}

/// In-memory users, tokens and games.
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

struct Inner {
    tokens: HashMap<String, String>,
    games: BTreeMap<GameId, GameRecord>,
    next_game_id: GameId,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                tokens: HashMap::new(),
                games: BTreeMap::new(),
                next_game_id: 1,
            }),
        }
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issue a fresh token for `username`.
    pub fn issue_token(&self, username: &str) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.add_token(&token, username);
        token
    }

    /// Register a caller-chosen token, replacing any previous owner.
    pub fn add_token(&self, token: &str, username: &str) {
        self.inner()
            .tokens
            .insert(token.to_string(), username.to_string());
    }

    pub fn revoke_token(&self, token: &str) {
        self.inner().tokens.remove(token);
    }

    /// Create a game with a fresh board and WHITE to move. Ids start at 1.
    pub fn create_game(&self, name: &str) -> GameId {
        let mut inner = self.inner();
        let id = inner.next_game_id;
        inner.next_game_id += 1;
        inner.games.insert(id, GameRecord::new(id, name));
        id
    }

    /// Seat `username` as `color`. Fails if the game is unknown or the seat
    /// is already held by someone else.
    pub fn join_game(&self, id: GameId, color: Color, username: &str) -> Result<(), StorageError> {
        let mut inner = self.inner();
        let record = inner
            .games
            .get_mut(&id)
            .ok_or_else(|| StorageError::new(format!("game {id} does not exist")))?;
        match record.player(color) {
            Some(current) if current != username => Err(StorageError::new(format!(
                "{color} seat of game {id} is already taken"
            ))),
            _ => {
                record.seat(color, username);
                Ok(())
            }
        }
    }

    pub fn list_games(&self) -> Vec<GameRecord> {
        self.inner().games.values().cloned().collect()
    }

    pub fn game(&self, id: GameId) -> Option<GameRecord> {
        self.inner().games.get(&id).cloned()
    }
}

#[async_trait]
impl TokenLookup for MemoryStore {
    async fn resolve_token(&self, token: &str) -> Result<Option<String>, StorageError> {
        Ok(self.inner().tokens.get(token).cloned())
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn load_game(&self, id: GameId) -> Result<Option<GameRecord>, StorageError> {
        Ok(self.game(id))
    }

    async fn save_game(&self, game: &GameRecord) -> Result<(), StorageError> {
        let mut inner = self.inner();
        match inner.games.get_mut(&game.id) {
            Some(slot) => {
                *slot = game.clone();
                Ok(())
            }
            None => Err(StorageError::new(format!("game {} does not exist", game.id))),
        }
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
