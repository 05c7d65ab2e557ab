use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hinge_svm::{HingeLossEvaluator, Matrix};

fn pseudo_random_matrix(rows: usize, cols: usize, seed: u64) -> Matrix {
    let mut state = seed;
    let data = (0..rows * cols)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 33) as f64 / (1u64 << 31) as f64) - 0.5
        })
        .collect();
    Matrix::new(rows, cols, data).unwrap()
}

fn bench_hinge_loss(c: &mut Criterion) {
    let mut group = c.benchmark_group("hinge_loss");
    let n_classes = 10;
    let dim = 3073;

    for &n in &[100usize, 1000] {
        let x = pseudo_random_matrix(n, dim, 42);
        let w = pseudo_random_matrix(n_classes, dim, 7);
        let y: Vec<usize> = (0..n).map(|i| i % n_classes).collect();
        let evaluator = HingeLossEvaluator::default();

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| evaluator.loss(black_box(&x), black_box(&y), black_box(&w)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hinge_loss);
criterion_main!(benches);
