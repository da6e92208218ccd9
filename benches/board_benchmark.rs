//! Benchmarks for the board hot paths.
//!
//! Blocking is recomputed after every placement-changing move, so it
//! dominates a round; the autoplay bench covers a whole round end to end.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use linguamatch::board::{find_hint, refresh_blocked};
use linguamatch::{AutoplayConfig, Layout, LevelPlan, PairSelection, Round, RoundOptions, play_round};

fn deal(level: u32, seed: u64) -> Round {
    let plan = LevelPlan::for_level(level);
    let options = RoundOptions {
        seed: Some(seed),
        ..RoundOptions::default()
    };
    Round::new(&plan, PairSelection::placeholders(plan.pair_count), options)
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_generate");
    for pairs in [8, 30, 60, 140] {
        group.bench_with_input(BenchmarkId::from_parameter(pairs), &pairs, |b, &pairs| {
            b.iter(|| black_box(Layout::generate(black_box(pairs))));
        });
    }
    group.finish();
}

fn bench_blocking(c: &mut Criterion) {
    let mut group = c.benchmark_group("refresh_blocked");
    for level in [6, 26] {
        let round = deal(level, 42);
        let tiles = round.tiles().to_vec();
        group.bench_with_input(BenchmarkId::from_parameter(tiles.len()), &tiles, |b, tiles| {
            b.iter_batched(
                || tiles.clone(),
                |mut tiles| {
                    refresh_blocked(&mut tiles);
                    black_box(tiles)
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_hint(c: &mut Criterion) {
    let round = deal(26, 42);
    c.bench_function("find_hint_120_tiles", |b| {
        b.iter(|| black_box(find_hint(black_box(round.tiles()))));
    });
}

fn bench_autoplay(c: &mut Criterion) {
    let config = AutoplayConfig::default();
    c.bench_function("autoplay_level_10", |b| {
        b.iter_batched(
            || deal(10, 7),
            |mut round| black_box(play_round(&mut round, &config)),
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_layout, bench_blocking, bench_hint, bench_autoplay);
criterion_main!(benches);
