use criterion::{black_box, criterion_group, criterion_main, Criterion};
use linear::{Cramer, Dense, LSolver};
use matrix::{DenseMatrix, Fill};
use nalgebra::DVector;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_system(n: usize) -> (DenseMatrix, DVector<f64>) {
    let mut rng = StdRng::seed_from_u64(n as u64);
    // Random integer entries; retry until the draw is non-singular
    let mat_a = loop {
        let candidate = DenseMatrix::with_fill_rng(n, n, Fill::RandomInteger, &mut rng)
            .expect("dimension within limits");
        if candidate.rank() == n {
            break candidate;
        }
    };
    let b = DVector::from_fn(n, |_, _| rng.gen_range(-100.0..100.0));
    (mat_a, b)
}

fn bench_solver<S: LSolver>(solver: &S, mat_a: &DenseMatrix, b: &DVector<f64>) {
    let x = solver.solve(mat_a, b).unwrap();

    let residual = mat_a.to_dmatrix() * &x - b;
    assert!(residual.norm() / (b.len() as f64).sqrt() < 1e-6);
}

fn criterion_benchmark(c: &mut Criterion) {
    for n in [5, 10, 20] {
        let (mat_a, b) = random_system(n);
        c.bench_function(&format!("Cramer solver {}", n), |bench| {
            bench.iter(|| bench_solver(&Cramer, black_box(&mat_a), black_box(&b)))
        });
        c.bench_function(&format!("Dense solver {}", n), |bench| {
            bench.iter(|| bench_solver(&Dense, black_box(&mat_a), black_box(&b)))
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
