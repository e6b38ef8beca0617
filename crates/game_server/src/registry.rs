//! Which connections watch which game, and best-effort delivery to them.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::protocol::ServerMessage;
use crate::record::{GameId, GameRecord};

/// Identity of one live connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("transport closed")]
pub struct TransportClosed;

/// Hands a serialized message to one connected peer without blocking.
pub trait Transport: Send + Sync {
    fn send(&self, text: String) -> Result<(), TransportClosed>;
    fn is_open(&self) -> bool;
}

/// Transport backed by an unbounded channel; whoever owns the receiver
/// does the actual network write.
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelTransport {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Transport for ChannelTransport {
    fn send(&self, text: String) -> Result<(), TransportClosed> {
        self.tx.send(text).map_err(|_| TransportClosed)
    }

    fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }
}

/// Serialize and send `msg`, skipping closed transports.
pub fn deliver(transport: &dyn Transport, msg: &ServerMessage) {
    let text = match msg.to_json() {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize server message");
            return;
        }
    };
    deliver_text(transport, text);
}

fn deliver_text(transport: &dyn Transport, text: String) {
    if !transport.is_open() {
        tracing::debug!("skipping send to closed transport");
        return;
    }
    if transport.send(text).is_err() {
        tracing::debug!("transport closed during send");
    }
}

struct SessionEntry {
    transport: Arc<dyn Transport>,
    username: String,
    game_id: GameId,
}

#[derive(Default)]
struct Inner {
    games: HashMap<GameId, HashSet<SessionId>>,
    sessions: HashMap<SessionId, SessionEntry>,
}

impl Inner {
    fn detach(&mut self, session: SessionId, game_id: GameId) {
        if let Some(set) = self.games.get_mut(&game_id) {
            set.remove(&session);
            if set.is_empty() {
                self.games.remove(&game_id);
            }
        }
    }
}

/// Session bookkeeping for one server instance.
#[derive(Default)]
pub struct Registry {
    inner: Mutex<Inner>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attach `session` to `game_id`. Registering again replaces the previous
    /// entry, moving the session if it pointed at another game.
    pub fn register(
        &self,
        game_id: GameId,
        session: SessionId,
        username: &str,
        transport: Arc<dyn Transport>,
    ) {
        let mut inner = self.inner();
        match inner.sessions.get(&session).map(|e| e.game_id) {
            Some(old) if old != game_id => inner.detach(session, old),
            _ => {}
        }
        inner.games.entry(game_id).or_default().insert(session);
        inner.sessions.insert(
            session,
            SessionEntry {
                transport,
                username: username.to_string(),
                game_id,
            },
        );
    }

    /// Detach `session`, returning the username and game it was bound to.
    pub fn unregister(&self, session: SessionId) -> Option<(String, GameId)> {
        let mut inner = self.inner();
        let entry = inner.sessions.remove(&session)?;
        inner.detach(session, entry.game_id);
        Some((entry.username, entry.game_id))
    }

    pub fn game_of(&self, session: SessionId) -> Option<GameId> {
        self.inner().sessions.get(&session).map(|e| e.game_id)
    }

    pub fn username_of(&self, session: SessionId) -> Option<String> {
        self.inner()
            .sessions
            .get(&session)
            .map(|e| e.username.clone())
    }

    pub fn sessions_in(&self, game_id: GameId) -> Vec<SessionId> {
        self.inner()
            .games
            .get(&game_id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        let inner = self.inner();
        inner.games.is_empty() && inner.sessions.is_empty()
    }

    pub fn send_to(&self, session: SessionId, msg: &ServerMessage) {
        let transport = self
            .inner()
            .sessions
            .get(&session)
            .map(|e| Arc::clone(&e.transport));
        match transport {
            Some(t) => deliver(t.as_ref(), msg),
            None => tracing::debug!(%session, "send to unknown session skipped"),
        }
    }

    pub fn broadcast_state(&self, game_id: GameId, game: &GameRecord) {
        self.broadcast(game_id, &ServerMessage::load_game(game.clone()), None);
    }

    pub fn broadcast_notice(&self, game_id: GameId, message: &str, except: Option<SessionId>) {
        self.broadcast(game_id, &ServerMessage::notification(message), except);
    }

    fn broadcast(&self, game_id: GameId, msg: &ServerMessage, except: Option<SessionId>) {
        // Snapshot the targets so no send happens under the lock.
        let targets: Vec<Arc<dyn Transport>> = {
            let inner = self.inner();
            let Some(set) = inner.games.get(&game_id) else {
                return;
            };
            set.iter()
                .filter(|s| Some(**s) != except)
                .filter_map(|s| inner.sessions.get(s))
                .map(|e| Arc::clone(&e.transport))
                .collect()
        };
        if targets.is_empty() {
            return;
        }

        let text = match msg.to_json() {
            Ok(t) => t,
            Err(e) => {
                tracing::error!(game_id, error = %e, "failed to serialize broadcast");
                return;
            }
        };
        for t in targets {
            deliver_text(t.as_ref(), text.clone());
        }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod registry_tests;
