//! JSON wire messages exchanged over a game connection.

use chess_core::Move;
use serde::{Deserialize, Serialize};

use crate::record::{GameId, GameRecord};

const ERROR_MARKER: &str = "Error:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandType {
    Connect,
    MakeMove,
    Leave,
    Resign,
    /// Anything this server does not understand.
    #[serde(other)]
    Unknown,
}

/// Client to server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    pub command_type: CommandType,
    #[serde(default)]
    pub auth_token: String,
    #[serde(rename = "gameID")]
    pub game_id: GameId,
    #[serde(rename = "move", default, skip_serializing_if = "Option::is_none")]
    pub mv: Option<Move>,
}

impl Command {
    fn new(command_type: CommandType, token: &str, game_id: GameId) -> Self {
        Self {
            command_type,
            auth_token: token.to_string(),
            game_id,
            mv: None,
        }
    }

    pub fn connect(token: &str, game_id: GameId) -> Self {
        Self::new(CommandType::Connect, token, game_id)
    }

    pub fn make_move(token: &str, game_id: GameId, mv: Move) -> Self {
        Self {
            mv: Some(mv),
            ..Self::new(CommandType::MakeMove, token, game_id)
        }
    }

    pub fn leave(token: &str, game_id: GameId) -> Self {
        Self::new(CommandType::Leave, token, game_id)
    }

    pub fn resign(token: &str, game_id: GameId) -> Self {
        Self::new(CommandType::Resign, token, game_id)
    }

    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Server to client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "serverMessageType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerMessage {
    LoadGame {
        game: GameRecord,
    },
    Notification {
        message: String,
    },
    Error {
        #[serde(rename = "errorMessage")]
        error_message: String,
    },
}

impl ServerMessage {
    pub fn load_game(game: GameRecord) -> Self {
        ServerMessage::LoadGame { game }
    }

    pub fn notification(message: impl Into<String>) -> Self {
        ServerMessage::Notification {
            message: message.into(),
        }
    }

    /// Error text always starts with the `Error:` marker.
    pub fn error(text: &str) -> Self {
        ServerMessage::Error {
            error_message: normalize_error(text),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Prefix `text` with the `Error: ` marker unless it already carries it.
pub fn normalize_error(text: &str) -> String {
    if text.starts_with(ERROR_MARKER) {
        text.to_string()
    } else {
        format!("{ERROR_MARKER} {text}")
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod protocol_tests;
