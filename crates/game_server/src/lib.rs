//! Live game synchronization on top of `chess_core`.
//!
//! Clients send JSON commands over a WebSocket. The [`Dispatcher`]
//! authenticates them, applies them to the game under a per-game lock,
//! persists the result through a [`GameStore`], and fans out state and
//! notices to every session the [`Registry`] has attached to that game.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod locks;
pub mod protocol;
pub mod record;
pub mod registry;
pub mod store;
pub mod ws;

pub use config::{ConfigError, ServerConfig};
pub use dispatcher::Dispatcher;
pub use error::GameError;
pub use protocol::{Command, CommandType, ServerMessage};
pub use record::{GameId, GameRecord, Outcome, Role};
pub use registry::{ChannelTransport, Registry, SessionId, Transport, TransportClosed};
pub use store::{GameStore, MemoryStore, StorageError, TokenLookup};
