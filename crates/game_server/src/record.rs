//! The persisted shape of one game: players, name and engine state.

use std::fmt;

use chess_core::{ChessGame, Color, GameStatus};
use serde::{Deserialize, Serialize};

pub type GameId = u32;

/// How a connection participates in a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    White,
    Black,
    Observer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::White => "WHITE",
            Role::Black => "BLACK",
            Role::Observer => "OBSERVER",
        })
    }
}

/// Why a game no longer accepts moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    /// This color's seat is empty: resigned, left, or never filled.
    Abandoned(Color),
    Checkmate(Color),
    Stalemate(Color),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    #[serde(rename = "gameID")]
    pub id: GameId,
    pub white_username: Option<String>,
    pub black_username: Option<String>,
    pub game_name: String,
    pub game: ChessGame,
}

impl GameRecord {
    pub fn new(id: GameId, name: impl Into<String>) -> Self {
        Self {
            id,
            white_username: None,
            black_username: None,
            game_name: name.into(),
            game: ChessGame::new(),
        }
    }

    pub fn player(&self, c: Color) -> Option<&str> {
        match c {
            Color::White => self.white_username.as_deref(),
            Color::Black => self.black_username.as_deref(),
        }
    }

    fn seat_mut(&mut self, c: Color) -> &mut Option<String> {
        match c {
            Color::White => &mut self.white_username,
            Color::Black => &mut self.black_username,
        }
    }

    pub fn seat(&mut self, c: Color, username: impl Into<String>) {
        *self.seat_mut(c) = Some(username.into());
    }

    pub fn vacate(&mut self, c: Color) {
        *self.seat_mut(c) = None;
    }

    /// Colors `username` currently plays. Usually zero or one, two when the
    /// same account holds both seats.
    pub fn seats_of(&self, username: &str) -> Vec<Color> {
        [Color::White, Color::Black]
            .into_iter()
            .filter(|&c| self.player(c) == Some(username))
            .collect()
    }

    pub fn role_of(&self, username: &str) -> Role {
        match self.seats_of(username).first() {
            Some(Color::White) => Role::White,
            Some(Color::Black) => Role::Black,
            None => Role::Observer,
        }
    }

    /// Display name for a side: the seated player, or the color when empty.
    pub fn name_of(&self, c: Color) -> String {
        self.player(c)
            .map(str::to_string)
            .unwrap_or_else(|| c.to_string())
    }

    /// `Some` once the game accepts no more moves. Derived on every call.
    pub fn outcome(&self) -> Option<Outcome> {
        for c in [Color::White, Color::Black] {
            if self.player(c).is_none() {
                return Some(Outcome::Abandoned(c));
            }
        }
        match self.game.status() {
            GameStatus::Ongoing => None,
            GameStatus::Checkmate(c) => Some(Outcome::Checkmate(c)),
            GameStatus::Stalemate(c) => Some(Outcome::Stalemate(c)),
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod record_tests;
