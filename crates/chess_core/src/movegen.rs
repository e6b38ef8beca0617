use crate::{board::Board, types::*};

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Pseudo-legal moves for the piece on `from`, ignoring whether they expose
/// the mover's own king. Empty if the square is empty.
pub fn pseudo_moves(board: &Board, from: Position) -> Vec<Move> {
    let mut out = Vec::with_capacity(28);
    pseudo_moves_into(board, from, &mut out);
    out
}

/// Same as [`pseudo_moves`], appending into a reusable buffer.
pub fn pseudo_moves_into(board: &Board, from: Position, out: &mut Vec<Move>) {
    let pc = match board.piece_at(from) {
        Some(p) => p,
        None => return,
    };
    match pc.kind {
        PieceKind::Pawn => gen_pawn(board, from, pc.color, out),
        PieceKind::Knight => gen_step(board, from, pc.color, out, &KNIGHT_DELTAS),
        PieceKind::King => gen_step(board, from, pc.color, out, &KING_DELTAS),
        PieceKind::Bishop => gen_slider(board, from, pc.color, out, &DIAGONALS),
        PieceKind::Rook => gen_slider(board, from, pc.color, out, &ORTHOGONALS),
        PieceKind::Queen => {
            gen_slider(board, from, pc.color, out, &DIAGONALS);
            gen_slider(board, from, pc.color, out, &ORTHOGONALS);
        }
    }
}

fn push_pawn_move(from: Position, to: Position, c: Color, out: &mut Vec<Move>) {
    if to.row() == c.promotion_row() {
        for pk in PieceKind::PROMOTIONS {
            out.push(Move::promoting(from, to, pk));
        }
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(board: &Board, from: Position, c: Color, out: &mut Vec<Move>) {
    let dir = c.forward();

    // forward 1
    if let Some(to) = from.offset(dir, 0)
        && board.is_empty_at(to)
    {
        push_pawn_move(from, to, c, out);

        // forward 2 from start
        if from.row() == c.pawn_row()
            && let Some(to2) = from.offset(2 * dir, 0)
            && board.is_empty_at(to2)
        {
            out.push(Move::new(from, to2));
        }
    }

    // captures
    for dc in [-1, 1] {
        if let Some(to) = from.offset(dir, dc)
            && let Some(tpc) = board.piece_at(to)
            && tpc.color != c
        {
            push_pawn_move(from, to, c, out);
        }
    }
}

fn gen_step(board: &Board, from: Position, c: Color, out: &mut Vec<Move>, deltas: &[(i8, i8)]) {
    for &(dr, dc) in deltas {
        if let Some(to) = from.offset(dr, dc) {
            match board.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => out.push(Move::new(from, to)),
                _ => {}
            }
        }
    }
}

fn gen_slider(board: &Board, from: Position, c: Color, out: &mut Vec<Move>, dirs: &[(i8, i8)]) {
    for &(dr, dc) in dirs {
        let mut cur = from;
        while let Some(to) = cur.offset(dr, dc) {
            match board.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => {
                    out.push(Move::new(from, to));
                    break;
                }
                _ => break,
            }
            cur = to;
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
