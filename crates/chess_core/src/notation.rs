//! Coordinate notation: `e2` for squares, `e2e4` / `e7e8q` for moves.

use std::fmt;
use std::str::FromStr;

use crate::types::*;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("invalid square '{0}'")]
    BadSquare(String),
    #[error("invalid move '{0}'")]
    BadMove(String),
    #[error("invalid promotion piece '{0}'")]
    BadPromotion(char),
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col() - 1) as char;
        let rank = (b'0' + self.row()) as char;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Position {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let b = s.as_bytes();
        if b.len() != 2 {
            return Err(NotationError::BadSquare(s.to_string()));
        }
        let f = b[0].to_ascii_lowercase();
        let r = b[1];
        if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
            return Err(NotationError::BadSquare(s.to_string()));
        }
        Position::new(r - b'0', f - b'a' + 1).ok_or_else(|| NotationError::BadSquare(s.to_string()))
    }
}

pub fn promotion_char(kind: PieceKind) -> Option<char> {
    match kind {
        PieceKind::Queen => Some('q'),
        PieceKind::Rook => Some('r'),
        PieceKind::Bishop => Some('b'),
        PieceKind::Knight => Some('n'),
        PieceKind::King | PieceKind::Pawn => None,
    }
}

fn promotion_from_char(c: char) -> Result<PieceKind, NotationError> {
    match c.to_ascii_lowercase() {
        'q' => Ok(PieceKind::Queen),
        'r' => Ok(PieceKind::Rook),
        'b' => Ok(PieceKind::Bishop),
        'n' => Ok(PieceKind::Knight),
        _ => Err(NotationError::BadPromotion(c)),
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.start, self.end)?;
        if let Some(c) = self.promotion.and_then(promotion_char) {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let txt = s.trim();
        if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
            return Err(NotationError::BadMove(s.to_string()));
        }
        let start: Position = txt[0..2].parse()?;
        let end: Position = txt[2..4].parse()?;
        let promotion = match txt[4..].chars().next() {
            Some(c) => Some(promotion_from_char(c)?),
            None => None,
        };
        Ok(Move {
            start,
            end,
            promotion,
        })
    }
}

/// Shorthand for building squares in tests and fixtures. Panics on bad input.
pub fn pos(coord: &str) -> Position {
    coord
        .parse()
        .unwrap_or_else(|e| panic!("bad square literal: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_roundtrip_corners() {
        assert_eq!(pos("a1"), Position::new(1, 1).unwrap());
        assert_eq!(pos("h8"), Position::new(8, 8).unwrap());
        assert_eq!(pos("e2").to_string(), "e2");
    }

    #[test]
    fn test_bad_squares() {
        assert!("i1".parse::<Position>().is_err());
        assert!("a9".parse::<Position>().is_err());
        assert!("a".parse::<Position>().is_err());
    }

    #[test]
    fn test_move_text() {
        let mv: Move = "e7e8q".parse().unwrap();
        assert_eq!(mv.start, pos("e7"));
        assert_eq!(mv.end, pos("e8"));
        assert_eq!(mv.promotion, Some(PieceKind::Queen));
        assert_eq!(mv.to_string(), "e7e8q");

        let mv: Move = "g1f3".parse().unwrap();
        assert_eq!(mv.promotion, None);
        assert_eq!(mv.to_string(), "g1f3");
    }

    #[test]
    fn test_bad_promotion() {
        assert_eq!(
            "e7e8k".parse::<Move>(),
            Err(NotationError::BadPromotion('k'))
        );
    }
}
