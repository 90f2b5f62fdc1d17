//! Criterion micro-benchmarks for puzzle-wide operations.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use jigsnap_bench::{connected_profile, reference_profile};
use jigsnap_engine::shuffler::{Grid, Noop};
use jigsnap_engine::PieceId;

/// Benchmark: autoconnect a 400-piece grid from scratch.
fn bench_autoconnect_400(c: &mut Criterion) {
    c.bench_function("autoconnect_400", |b| {
        b.iter_batched(
            || reference_profile(42),
            |mut puzzle| {
                puzzle.autoconnect();
                black_box(puzzle.connected());
            },
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark: push the head of a fully connected 400-piece grid.
///
/// Every piece moves exactly once per push.
fn bench_push_connected_400(c: &mut Criterion) {
    let mut puzzle = connected_profile(20, 20, 42);

    c.bench_function("push_connected_400", |b| {
        b.iter(|| {
            puzzle.push(PieceId(0), black_box(1.0), black_box(-1.0), false);
        });
    });
}

/// Benchmark: drag a corner of a connected grid back and forth.
fn bench_drag_connected_400(c: &mut Criterion) {
    let mut puzzle = connected_profile(20, 20, 42);
    puzzle.force_connection_while_dragging();

    c.bench_function("drag_connected_400", |b| {
        b.iter(|| {
            puzzle.drag(PieceId(0), 1.0, 0.0, false);
            puzzle.drag(PieceId(0), -1.0, 0.0, false);
        });
    });
}

/// Benchmark: grid shuffle followed by reconnection.
fn bench_shuffle_grid_400(c: &mut Criterion) {
    let mut shuffler = Grid::seeded(7);

    c.bench_function("shuffle_grid_400", |b| {
        b.iter_batched(
            || connected_profile(20, 20, 42),
            |mut puzzle| {
                puzzle.shuffle_with(&mut shuffler);
                black_box(puzzle.connected());
            },
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark: noop shuffle, which disconnects and reconnects everything.
fn bench_shuffle_noop_400(c: &mut Criterion) {
    let mut puzzle = connected_profile(20, 20, 42);

    c.bench_function("shuffle_noop_400", |b| {
        b.iter(|| {
            puzzle.shuffle_with(&mut Noop);
            black_box(puzzle.connected());
        });
    });
}

criterion_group!(
    benches,
    bench_autoconnect_400,
    bench_push_connected_400,
    bench_drag_connected_400,
    bench_shuffle_grid_400,
    bench_shuffle_noop_400,
);
criterion_main!(benches);
