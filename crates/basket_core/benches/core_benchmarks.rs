//! Criterion benchmarks for basket_core linear algebra.
//!
//! Measures Cholesky factorisation and factor application across the
//! dimensions used by the experiment (up to ~30 assets).

use basket_core::math::linalg::Matrix;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Builds a well-conditioned `n x n` correlation matrix with constant correlation.
fn constant_correlation(n: usize, rho: f64) -> Matrix {
    Matrix::from_fn(n, n, |i, j| if i == j { 1.0 } else { rho })
}

/// Benchmark Cholesky factorisation.
fn bench_cholesky(c: &mut Criterion) {
    let mut group = c.benchmark_group("cholesky");

    for dim in [2, 5, 10, 30] {
        let corr = constant_correlation(dim, 0.3);
        group.bench_with_input(BenchmarkId::new("factorise", dim), &corr, |b, corr| {
            b.iter(|| black_box(corr).cholesky().unwrap());
        });
    }

    group.finish();
}

/// Benchmark applying the factor to a batch of normal vectors.
fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("cholesky_transform");

    for dim in [2, 5, 10, 30] {
        let chol = constant_correlation(dim, 0.3).cholesky().unwrap();
        let z: Vec<f64> = (0..dim).map(|i| (i as f64 * 0.37).sin()).collect();
        let mut out = vec![0.0; dim];

        group.bench_with_input(BenchmarkId::new("transform_into", dim), &z, |b, z| {
            b.iter(|| {
                chol.transform_into(black_box(z), &mut out);
                black_box(&out);
            });
        });
    }

    group.finish();
}

/// Benchmark the Gram product used for random correlation generation.
fn bench_gram(c: &mut Criterion) {
    let mut group = c.benchmark_group("gram");

    for dim in [5, 10, 30] {
        let r = Matrix::from_fn(2 * dim, dim, |i, j| ((i * dim + j) as f64).cos());
        group.bench_with_input(BenchmarkId::new("gram", dim), &r, |b, r| {
            b.iter(|| black_box(r).gram());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_cholesky, bench_transform, bench_gram);
criterion_main!(benches);
