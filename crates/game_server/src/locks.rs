//! One async mutex per game id, so commands on the same game run one at a
//! time while different games proceed in parallel.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::record::GameId;

#[derive(Default)]
pub struct GameLocks {
    locks: DashMap<GameId, Arc<Mutex<()>>>,
}

/// Exclusive access to one game. Dropping it releases the game and removes
/// the map entry when nobody else holds or waits on it.
pub struct GameGuard<'a> {
    guard: Option<OwnedMutexGuard<()>>,
    locks: &'a GameLocks,
    id: GameId,
}

impl Drop for GameGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.locks
            .locks
            .remove_if(&self.id, |_, lock| Arc::strong_count(lock) == 1);
    }
}

impl GameLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `id`.
    pub async fn lock(&self, id: GameId) -> GameGuard<'_> {
        let lock = self.locks.entry(id).or_default().clone();
        let guard = lock.lock_owned().await;
        GameGuard {
            guard: Some(guard),
            locks: self,
            id,
        }
    }

    /// Number of games with a live lock entry.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
#[path = "locks_tests.rs"]
mod locks_tests;
