use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mineprobe_core::*;

/// A mid-game board: first click plus every tile the estimator already knows is empty.
fn midgame(difficulty: Difficulty, seed: u64) -> Board {
    let config = difficulty.config();
    let first = (config.size.0 / 2, config.size.1 / 2);
    let mut board = generate(config, first, seed, Turn::At(1)).unwrap();
    loop {
        let safe: Vec<Coord2> = board
            .iter()
            .filter(|(_, tile)| tile.mine_probability == Some(0))
            .map(|(coords, _)| coords)
            .collect();
        if safe.is_empty() {
            return board;
        }
        for coords in safe {
            board = board.open(coords).unwrap();
        }
        board = infer(&board, Turn::At(2)).unwrap();
    }
}

fn bench_infer(c: &mut Criterion) {
    let mut group = c.benchmark_group("infer");
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let board = midgame(difficulty, 42);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{:?}", difficulty)),
            &board,
            |b, board| b.iter(|| infer(black_box(board), Turn::Fresh).unwrap()),
        );
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let link = encode(&midgame(Difficulty::Hard, 42), 120);
    c.bench_function("decode/Hard", |b| b.iter(|| decode(black_box(&link)).unwrap()));
}

criterion_group!(benches, bench_infer, bench_decode);
criterion_main!(benches);
