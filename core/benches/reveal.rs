use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use minesweep_core::*;
use std::hint::black_box;

const TIERS: [(Coord, Coord, CellCount); 3] = [(9, 9, 10), (16, 16, 40), (16, 30, 99)];

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (rows, cols, mines) in TIERS {
        let config = BoardConfig::new_unchecked(rows, cols, mines);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{rows}x{cols}/{mines}")),
            &config,
            |b, &config| {
                let mut seed = 0;
                b.iter(|| {
                    seed += 1;
                    black_box(RandomMineGenerator::new(seed).generate(config).unwrap())
                })
            },
        );
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");
    for (rows, cols, _) in TIERS {
        // one corner mine leaves a single region covering the rest of the board
        let config = BoardConfig::new_unchecked(rows, cols, 0);
        let board = FixedMineGenerator::new(vec![0]).generate(config).unwrap();
        let far_corner = usize::from(board.total_cells()) - 1;
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{rows}x{cols}")),
            &board,
            |b, board| {
                b.iter(|| {
                    let mut board = board.clone();
                    black_box(board.reveal(far_corner, &mut ()).unwrap())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_flood_fill);
criterion_main!(benches);
