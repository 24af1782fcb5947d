use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mineprobe_core::*;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let config = difficulty.config();
        let first = (config.size.0 / 2, config.size.1 / 2);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{:?}", difficulty)),
            &config,
            |b, &config| {
                let mut seed = 0;
                b.iter(|| {
                    seed += 1;
                    generate(black_box(config), first, seed, Turn::At(1)).unwrap()
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
