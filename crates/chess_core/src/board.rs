use serde::{Deserialize, Serialize};

use crate::types::*;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} does not describe exactly 8 squares")]
    RankWidth { rank: u8 },
    #[error("invalid piece char '{0}'")]
    BadPiece(char),
    #[error("invalid side to move '{0}'")]
    BadSideToMove(String),
    #[error("empty FEN string")]
    Empty,
}

/// 8x8 grid of cells, indexed `[row - 1][col - 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    pub fn startpos() -> Self {
        let mut b = Board::empty();

        for col in 1..=8u8 {
            b.squares[1][(col - 1) as usize] = Some(Piece::new(Color::White, PieceKind::Pawn));
            b.squares[6][(col - 1) as usize] = Some(Piece::new(Color::Black, PieceKind::Pawn));
        }
        // Back ranks
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (c, &kind) in back.iter().enumerate() {
            b.squares[0][c] = Some(Piece::new(Color::White, kind));
            b.squares[7][c] = Some(Piece::new(Color::Black, kind));
        }
        b
    }

    /// Parse the piece-placement field of a FEN string (ranks 8 down to 1).
    pub fn from_fen_placement(placement: &str) -> Result<Self, FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }

        let mut b = Board::empty();
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let row = 8 - rank_idx as u8;
            let mut col: u8 = 1;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    col += d as u8;
                } else {
                    let color = if ch.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind = match ch.to_ascii_lowercase() {
                        'p' => PieceKind::Pawn,
                        'n' => PieceKind::Knight,
                        'b' => PieceKind::Bishop,
                        'r' => PieceKind::Rook,
                        'q' => PieceKind::Queen,
                        'k' => PieceKind::King,
                        _ => return Err(FenError::BadPiece(ch)),
                    };
                    let at = Position::new(row, col).ok_or(FenError::RankWidth { rank: row })?;
                    b.place(at, Piece::new(color, kind));
                    col += 1;
                }
                if col > 9 {
                    return Err(FenError::RankWidth { rank: row });
                }
            }
            if col != 9 {
                return Err(FenError::RankWidth { rank: row });
            }
        }
        Ok(b)
    }

    pub fn piece_at(&self, at: Position) -> Option<Piece> {
        self.squares[(at.row() - 1) as usize][(at.col() - 1) as usize]
    }

    pub fn place(&mut self, at: Position, pc: Piece) {
        self.set(at, Some(pc));
    }

    pub fn clear(&mut self, at: Position) {
        self.set(at, None);
    }

    pub(crate) fn set(&mut self, at: Position, pc: Option<Piece>) {
        self.squares[(at.row() - 1) as usize][(at.col() - 1) as usize] = pc;
    }

    pub fn is_empty_at(&self, at: Position) -> bool {
        self.piece_at(at).is_none()
    }

    /// Occupied squares with their pieces, row by row from a1.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |p| self.piece_at(p).map(|pc| (p, pc)))
    }

    pub fn pieces_of(&self, c: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, pc)| pc.color == c)
    }

    pub fn king_of(&self, c: Color) -> Option<Position> {
        self.pieces_of(c)
            .find(|(_, pc)| pc.kind == PieceKind::King)
            .map(|(p, _)| p)
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
