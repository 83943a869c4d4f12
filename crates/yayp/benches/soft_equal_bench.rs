//! Criterion benchmarks for soft equality and the mismatch table.
//! Focus sizes: n in {16, 256, 4096}; mismatch counts in {1, 10, 29}.
//! Results: by default under target/criterion.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use yayp::report::write_unequal_values;
use yayp::{soft_container_equal, SoftEqual, SoftEqualFor};

fn random_values(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(-1.0e3..1.0e3)).collect()
}

/// Copy of `values` perturbed well inside the default relative tolerance.
fn jittered(values: &[f64], seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    values
        .iter()
        .map(|&x| x * (1.0 + rng.gen_range(-1.0e-14..1.0e-14)))
        .collect()
}

fn bench_scalar(c: &mut Criterion) {
    let mut group = c.benchmark_group("soft_equal");
    let se = SoftEqual::<f64>::default();
    group.bench_function("f64_relative", |b| {
        b.iter(|| se.approx_eq(black_box(1.0_f64), black_box(1.0_f64 + 1.0e-13)))
    });
    group.bench_function("f64_near_zero", |b| {
        b.iter(|| se.approx_eq(black_box(1.0e-15_f64), black_box(1.0e-13_f64)))
    });
    let mixed = SoftEqualFor::<f32, f64>::default();
    group.bench_function("f32_f64_mixed", |b| {
        b.iter(|| mixed.approx_eq(black_box(2.5_f32), black_box(2.5_f64)))
    });
    group.finish();
}

fn bench_slices(c: &mut Criterion) {
    let mut group = c.benchmark_group("soft_container_equal");
    for &n in &[16usize, 256, 4096] {
        let expected = random_values(n, 42);
        let actual = jittered(&expected, 43);
        group.bench_with_input(BenchmarkId::new("f64_equal", n), &n, |b, _| {
            b.iter(|| soft_container_equal(black_box(&expected), black_box(&actual)))
        });

        let narrow: Vec<f32> = expected.iter().map(|&x| x as f32).collect();
        group.bench_with_input(BenchmarkId::new("f64_f32_mismatch", n), &n, |b, _| {
            b.iter(|| soft_container_equal(black_box(&expected), black_box(&narrow)))
        });
    }
    group.finish();
}

fn bench_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("write_unequal_values");
    let expected = random_values(1024, 7);
    for &k in &[1usize, 10, 29] {
        group.bench_with_input(BenchmarkId::new("f64", k), &k, |b, &k| {
            b.iter_batched(
                || {
                    let mut rng = StdRng::seed_from_u64(k as u64);
                    let mut actual = expected.clone();
                    let mut bad: Vec<usize> = (0..k).map(|_| rng.gen_range(0..1024)).collect();
                    bad.sort_unstable();
                    bad.dedup();
                    for &i in &bad {
                        actual[i] += 1.0;
                    }
                    (actual, bad)
                },
                |(actual, bad)| {
                    let _table = write_unequal_values(&bad, "expected", "actual", &expected, &actual);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scalar, bench_slices, bench_report);
criterion_main!(benches);
