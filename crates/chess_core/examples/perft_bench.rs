//! Perft timing over a few fixed positions, handy under cargo-flamegraph.
//!
//! Usage:
//!   cargo run --release --example perft_bench -p chess_core -- [depth] [fen]
//!   cargo flamegraph --example perft_bench -p chess_core -- 4
//!
//! With a FEN the per-move breakdown from `divide` is printed as well.

use std::time::{Duration, Instant};

use chess_core::{ChessGame, divide, perft};

const SUITE: &[(&str, &str)] = &[
    ("start", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"),
    ("promotions", "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b"),
    ("rooks", "4k3/8/8/8/8/8/8/R3K2R w"),
];

fn main() {
    let mut args = std::env::args().skip(1);
    let depth: u8 = args.next().and_then(|s| s.parse().ok()).unwrap_or(4);

    match args.next() {
        Some(fen) => {
            let game = match ChessGame::from_fen(&fen) {
                Ok(g) => g,
                Err(e) => {
                    eprintln!("bad FEN {fen:?}: {e}");
                    std::process::exit(1);
                }
            };
            for (mv, n) in divide(&game, depth) {
                println!("{mv}: {n}");
            }
            println!();
            bench(&fen, &game, depth);
        }
        None => {
            let (mut nodes, mut time) = (0u64, Duration::ZERO);
            for (name, fen) in SUITE {
                let Ok(game) = ChessGame::from_fen(fen) else {
                    continue;
                };
                let (n, t) = bench(name, &game, depth);
                nodes += n;
                time += t;
            }
            println!("{:-<64}", "");
            println!("{:<12} {nodes:>12} {time:>10.3?} {:>12.0} nps", "total", rate(nodes, time));
        }
    }
}

fn bench(label: &str, game: &ChessGame, depth: u8) -> (u64, Duration) {
    let t0 = Instant::now();
    let nodes = perft(game, depth);
    let took = t0.elapsed();
    println!("{label:<12} {nodes:>12} {took:>10.3?} {:>12.0} nps", rate(nodes, took));
    (nodes, took)
}

fn rate(nodes: u64, took: Duration) -> f64 {
    let secs = took.as_secs_f64();
    if secs > 0.0 { nodes as f64 / secs } else { 0.0 }
}
