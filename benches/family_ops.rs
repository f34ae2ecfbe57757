//! Family operation benchmarks.
//!
//! These benchmarks measure family construction and the set-algebra operations,
//! including the effect of the per-operation memo caches.
//!
//! Run with:
//! ```bash
//! cargo bench --bench family_ops
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use zdd_rs::factory::Factory;
use zdd_rs::node::Zdd;

// ============================================================================
// Helper: Random families
// ============================================================================

/// Builds a family of `num_sets` random sets over keys `0..universe`.
fn build_random_family(
    factory: &Factory<u32>,
    universe: u32,
    num_sets: usize,
    seed: u64,
) -> Zdd<u32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut result = factory.zero();
    for _ in 0..num_sets {
        let set: Vec<u32> = (0..universe).filter(|_| rng.random_bool(0.3)).collect();
        let singleton = factory.singleton(set);
        result = factory.union(&result, &singleton);
    }
    result
}

// ============================================================================
// Benchmark: Building families set by set
// ============================================================================

fn bench_family_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("family/build");
    group.sample_size(20);

    for num_sets in [10usize, 100, 1000] {
        group.throughput(Throughput::Elements(num_sets as u64));
        group.bench_with_input(
            BenchmarkId::new("random_sets", num_sets),
            &num_sets,
            |b, &num_sets| {
                b.iter(|| {
                    let factory: Factory<u32> = Factory::default();
                    build_random_family(&factory, 24, num_sets, 42)
                });
            },
        );
    }

    group.finish();
}

// ============================================================================
// Benchmark: Singleton construction
// ============================================================================

fn bench_singleton(c: &mut Criterion) {
    let mut group = c.benchmark_group("family/singleton");

    for len in [8usize, 64, 512] {
        let factory: Factory<u32> = Factory::default();
        let keys: Vec<u32> = (0..len as u32).rev().collect();

        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("keys", len), &len, |b, _| {
            b.iter(|| factory.singleton(keys.iter().copied()));
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Binary operations, warm and cold caches
// ============================================================================

fn bench_binary_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("family/binary_ops");

    let factory: Factory<u32> = Factory::default();
    let f = build_random_family(&factory, 24, 200, 1);
    let g = build_random_family(&factory, 24, 200, 2);

    // Warm: every iteration after the first answers from the cache.
    group.bench_function("union_warm", |b| {
        b.iter(|| factory.union(&f, &g));
    });
    group.bench_function("intersection_warm", |b| {
        b.iter(|| factory.intersection(&f, &g));
    });
    group.bench_function("symmetric_difference_warm", |b| {
        b.iter(|| factory.symmetric_difference(&f, &g));
    });
    group.bench_function("subtraction_warm", |b| {
        b.iter(|| factory.subtraction(&f, &g));
    });

    // Cold: the full recursion runs every iteration.
    group.bench_function("union_cold", |b| {
        b.iter(|| {
            factory.clear_caches();
            factory.union(&f, &g)
        });
    });
    group.bench_function("symmetric_difference_cold", |b| {
        b.iter(|| {
            factory.clear_caches();
            factory.symmetric_difference(&f, &g)
        });
    });

    group.finish();
}

// ============================================================================
// Benchmark: Counting without enumeration
// ============================================================================

fn bench_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("family/count");

    for depth in [16u32, 32, 64] {
        group.bench_with_input(BenchmarkId::new("powerset", depth), &depth, |b, &depth| {
            b.iter(|| {
                let factory: Factory<u32> = Factory::default();
                let mut cur = factory.one();
                for key in (1..=depth).rev() {
                    cur = factory.make_node(key, &cur, &cur);
                }
                factory.count(&cur)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_family_build,
    bench_singleton,
    bench_binary_ops,
    bench_count,
);

criterion_main!(benches);
