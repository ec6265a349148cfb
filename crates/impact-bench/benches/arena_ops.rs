//! Criterion micro-benchmarks for transform slot acquire/release.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use impact_arena::{ArenaConfig, TransformArena};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn bench_acquire_release_pair(c: &mut Criterion) {
    let mut arena = TransformArena::new(ArenaConfig::default()).unwrap();
    c.bench_function("arena_acquire_release", |b| {
        b.iter(|| {
            let slot = arena.acquire().unwrap();
            black_box(slot.offset());
            arena.release(slot);
        });
    });
}

fn bench_fill_10k(c: &mut Criterion) {
    c.bench_function("arena_fill_10k", |b| {
        b.iter(|| {
            let mut arena = TransformArena::new(ArenaConfig::default()).unwrap();
            for _ in 0..10_000 {
                black_box(arena.acquire().unwrap());
            }
            black_box(arena.unit_count())
        });
    });
}

fn bench_random_churn(c: &mut Criterion) {
    let mut arena = TransformArena::new(ArenaConfig::default()).unwrap();
    let mut live: Vec<_> = (0..4096).map(|_| arena.acquire().unwrap()).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    c.bench_function("arena_random_churn_4k", |b| {
        b.iter(|| {
            let i = rng.next_u32() as usize % live.len();
            let slot = live.swap_remove(i);
            arena.release(slot);
            let fresh = arena.acquire().unwrap();
            arena.node_mut(&fresh).set_position([1.0, 2.0, 3.0]);
            live.push(fresh);
        });
    });
}

criterion_group!(
    benches,
    bench_acquire_release_pair,
    bench_fill_10k,
    bench_random_churn
);
criterion_main!(benches);
