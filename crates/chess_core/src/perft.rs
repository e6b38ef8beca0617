use crate::game::ChessGame;

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft(game: &ChessGame, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = game.all_valid_moves(game.turn);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in moves {
        let mut next = game.clone();
        next.apply_unchecked(mv);
        nodes += perft(&next, depth - 1);
    }
    nodes
}

/// Per-move node counts at `depth`, sorted by move text.
pub fn divide(game: &ChessGame, depth: u8) -> Vec<(String, u64)> {
    let mut out: Vec<(String, u64)> = game
        .all_valid_moves(game.turn)
        .into_iter()
        .map(|mv| {
            let mut next = game.clone();
            next.apply_unchecked(mv);
            (mv.to_string(), perft(&next, depth.saturating_sub(1)))
        })
        .collect();
    out.sort();
    out
}
