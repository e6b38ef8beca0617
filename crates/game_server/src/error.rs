use chess_core::IllegalMove;

use crate::protocol::ServerMessage;
use crate::record::GameId;
use crate::store::StorageError;

/// Everything a command can fail with. Each variant is reported to the
/// offending connection only; none of them end the connection.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("invalid auth token")]
    Auth,

    #[error("game {0} not found")]
    NotFound(GameId),

    #[error("only players can {0}")]
    Role(&'static str),

    #[error("invalid move: {0}")]
    IllegalMove(#[from] IllegalMove),

    #[error("not your turn")]
    NotYourTurn,

    #[error("missing move")]
    MissingMove,

    #[error("not connected to game {0}")]
    NotConnected(GameId),

    #[error("game is over")]
    GameOver,

    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),

    #[error("unsupported command")]
    Unsupported,

    #[error("malformed command: {0}")]
    Malformed(String),
}

impl GameError {
    pub fn to_message(&self) -> ServerMessage {
        ServerMessage::error(&self.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
