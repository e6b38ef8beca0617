use std::time::Instant;

use rayon::prelude::*;

use chess_core::{ChessGame, divide, perft};

const FULL_PERFT_ENV: &str = "FULL_PERFT";
const NODE_LIMIT: u64 = 100_000;

// Positions and counts where castling and en passant cannot occur within the
// listed depths, so the reduced rule set must agree with standard perft.
const CASES: &[(&str, &[(u8, u64)])] = &[
    (
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w",
        &[(1, 20), (2, 400), (3, 8_902), (4, 197_281)],
    ),
    // Kings and rooks only; this rule set never castles
    ("4k3/8/8/8/8/8/8/R3K2R w", &[(1, 24)]),
    // Promotion-heavy: both sides one step from queening
    ("n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b", &[(1, 24), (2, 496), (3, 9_483)]),
];

#[test]
fn perft_known_counts() {
    let full = std::env::var(FULL_PERFT_ENV).is_ok();

    CASES.par_iter().enumerate().for_each(|(idx, (fen, depths))| {
        let game = ChessGame::from_fen(fen).unwrap();
        let case_start = Instant::now();
        let mut ran_depths = Vec::new();

        for &(depth, expected) in depths.iter() {
            if !full && expected > NODE_LIMIT {
                eprintln!(
                    "Skipping depth {} for case {} (expected {} nodes) - set {}=1 to run all.",
                    depth,
                    idx + 1,
                    expected,
                    FULL_PERFT_ENV
                );
                continue;
            }
            let got = perft(&game, depth);
            assert!(
                got == expected,
                "Perft mismatch for FEN '{}' at depth {}: expected {}, got {}",
                fen,
                depth,
                expected,
                got
            );
            ran_depths.push(depth);
        }

        println!(
            "Case {:03} done: depths {:?}, elapsed {:.3?}",
            idx + 1,
            ran_depths,
            case_start.elapsed()
        );
    });
}

#[test]
fn divide_sums_to_perft() {
    let game = ChessGame::new();
    let parts = divide(&game, 2);
    assert_eq!(parts.len(), 20);
    assert!(parts.iter().all(|(_, n)| *n == 20));
    assert_eq!(parts.iter().map(|(_, n)| n).sum::<u64>(), perft(&game, 2));
}
