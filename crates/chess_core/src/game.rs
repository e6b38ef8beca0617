//! Turn-based game state: legality filtering, check/mate/stalemate detection
//! and the single move-applying entry point.

use serde::{Deserialize, Serialize};

use crate::board::{Board, FenError};
use crate::movegen::{pseudo_moves, pseudo_moves_into};
use crate::types::*;

/// Why [`ChessGame::make_move`] refused a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMove {
    #[error("no piece at {0}")]
    NoPiece(Position),
    #[error("it is {0}'s turn")]
    WrongTurn(Color),
    #[error("{0} is not a legal move")]
    NotLegal(Move),
}

/// Board-derived state of play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    Ongoing,
    /// The given side is checkmated.
    Checkmate(Color),
    /// The given side has no legal move and is not in check.
    Stalemate(Color),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChessGame {
    pub board: Board,
    pub turn: Color,
}

impl Default for ChessGame {
    fn default() -> Self {
        Self::new()
    }
}

/// What a move overwrote, enough to put the board back.
struct Undo {
    moved: Piece,
    captured: Option<Piece>,
}

fn apply(board: &mut Board, mv: Move) -> Undo {
    let moved = board
        .piece_at(mv.start)
        .expect("apply called on an empty start square");
    let captured = board.piece_at(mv.end);
    let placed = match mv.promotion {
        Some(kind) => Piece::new(moved.color, kind),
        None => moved,
    };
    board.place(mv.end, placed);
    board.clear(mv.start);
    Undo { moved, captured }
}

fn revert(board: &mut Board, mv: Move, undo: Undo) {
    board.place(mv.start, undo.moved);
    board.set(mv.end, undo.captured);
}

fn attacked_by(board: &Board, target: Position, by: Color, buf: &mut Vec<Move>) -> bool {
    for (from, _) in board.pieces_of(by) {
        buf.clear();
        pseudo_moves_into(board, from, buf);
        if buf.iter().any(|m| m.end == target) {
            return true;
        }
    }
    false
}

fn in_check(board: &Board, c: Color, buf: &mut Vec<Move>) -> bool {
    match board.king_of(c) {
        Some(k) => attacked_by(board, k, c.other(), buf),
        None => false,
    }
}

impl ChessGame {
    pub fn new() -> Self {
        Self {
            board: Board::startpos(),
            turn: Color::White,
        }
    }

    pub fn with_board(board: Board, turn: Color) -> Self {
        Self { board, turn }
    }

    /// Build a game from the first two FEN fields (placement and side to
    /// move). Remaining fields are accepted and ignored.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut parts = fen.split_whitespace();
        let placement = parts.next().ok_or(FenError::Empty)?;
        let board = Board::from_fen_placement(placement)?;
        let turn = match parts.next().unwrap_or("w") {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::BadSideToMove(other.to_string())),
        };
        Ok(Self { board, turn })
    }

    /// Legal moves for the piece on `start`: its pseudo-legal moves minus any
    /// that leave its own king attacked. Empty for an empty square.
    pub fn valid_moves(&self, start: Position) -> Vec<Move> {
        let piece = match self.board.piece_at(start) {
            Some(p) => p,
            None => return Vec::new(),
        };
        let mut candidates = pseudo_moves(&self.board, start);

        // Filter on a scratch copy so the live board is never touched.
        let mut scratch = self.board;
        let mut buf = Vec::with_capacity(32);
        candidates.retain(|&mv| {
            let undo = apply(&mut scratch, mv);
            let exposed = in_check(&scratch, piece.color, &mut buf);
            revert(&mut scratch, mv, undo);
            !exposed
        });
        debug_assert_eq!(scratch, self.board);
        candidates
    }

    /// Every legal move for `c`, regardless of whose turn it is.
    pub fn all_valid_moves(&self, c: Color) -> Vec<Move> {
        self.board
            .pieces_of(c)
            .flat_map(|(p, _)| self.valid_moves(p))
            .collect()
    }

    pub fn is_in_check(&self, c: Color) -> bool {
        in_check(&self.board, c, &mut Vec::with_capacity(32))
    }

    fn has_no_moves(&self, c: Color) -> bool {
        self.board
            .pieces_of(c)
            .all(|(p, _)| self.valid_moves(p).is_empty())
    }

    pub fn is_in_checkmate(&self, c: Color) -> bool {
        self.is_in_check(c) && self.has_no_moves(c)
    }

    pub fn is_in_stalemate(&self, c: Color) -> bool {
        !self.is_in_check(c) && self.has_no_moves(c)
    }

    pub fn status(&self) -> GameStatus {
        for c in [Color::White, Color::Black] {
            if self.is_in_checkmate(c) {
                return GameStatus::Checkmate(c);
            }
        }
        for c in [Color::White, Color::Black] {
            if self.is_in_stalemate(c) {
                return GameStatus::Stalemate(c);
            }
        }
        GameStatus::Ongoing
    }

    /// Apply `mv` for the side to move and pass the turn. A rejected move
    /// leaves the game untouched.
    pub fn make_move(&mut self, mv: Move) -> Result<(), IllegalMove> {
        let piece = self
            .board
            .piece_at(mv.start)
            .ok_or(IllegalMove::NoPiece(mv.start))?;
        if piece.color != self.turn {
            return Err(IllegalMove::WrongTurn(self.turn));
        }
        if !self.valid_moves(mv.start).contains(&mv) {
            return Err(IllegalMove::NotLegal(mv));
        }

        self.apply_unchecked(mv);
        Ok(())
    }

    /// Apply an already-validated move and pass the turn.
    pub(crate) fn apply_unchecked(&mut self, mv: Move) {
        apply(&mut self.board, mv);
        self.turn = self.turn.other();
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
