use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use gridlines_lib::{PathFinder, Position};
use once_cell::sync::Lazy;
use std::hint::black_box;

/// A 256x256 canvas with a handful of committed lines to route around.
static CLUTTERED: Lazy<PathFinder> = Lazy::new(|| {
    let mut finder = PathFinder::new(256, 256).expect("valid grid");
    for row in [40, 100, 160, 220] {
        finder
            .find_path(Position::new(0, row), Position::new(200, row))
            .expect("wall drawn");
    }
    finder
});

fn benchmark_pathfinding(c: &mut Criterion) {
    c.bench_function("astar_empty_diagonal_256", |b| {
        b.iter_batched(
            || PathFinder::new(256, 256).expect("valid grid"),
            |mut finder| {
                let path = finder
                    .find_path(Position::new(0, 0), Position::new(255, 255))
                    .expect("path exists");
                black_box(path.len())
            },
            BatchSize::SmallInput,
        );
    });

    c.bench_function("astar_cluttered_detour_256", |b| {
        b.iter_batched(
            || CLUTTERED.clone(),
            |mut finder| {
                let path = finder
                    .find_path(Position::new(10, 10), Position::new(10, 250))
                    .expect("path exists");
                black_box(path.len())
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
