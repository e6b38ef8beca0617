//! Chess rules engine used by the live game server.
//!
//! The model is deliberately small: no castling, no en passant, no draw
//! clocks. A [`ChessGame`] owns a [`Board`] and the side to move, answers
//! legality and check/mate/stalemate queries, and applies moves through the
//! single mutating entry point [`ChessGame::make_move`].

pub mod board;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod types;

pub use board::{Board, FenError};
pub use game::{ChessGame, GameStatus, IllegalMove};
pub use movegen::{pseudo_moves, pseudo_moves_into};
pub use notation::{NotationError, pos};
pub use perft::{divide, perft};
pub use types::*;
