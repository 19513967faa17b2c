use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use targeted_quantiles::estimator::Estimator;
use targeted_quantiles::quantile::Quantile;

struct SplitMix64 {
    seed: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> SplitMix64 {
        SplitMix64 { seed }
    }

    fn next(&mut self) -> u64 {
        self.seed = self.seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.seed;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

fn accuracy_targets() -> Vec<Quantile> {
    vec![
        Quantile::new(0.5, 0.05),
        Quantile::new(0.9, 0.01),
        Quantile::new(0.95, 0.005),
        Quantile::new(0.99, 0.001),
    ]
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for size in [1_000usize, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("insert_{}", size), |b| {
            let mut rng = SplitMix64::new(1972);
            b.iter(|| {
                let mut estimator = Estimator::with_targets(accuracy_targets());
                for _ in 0..size {
                    estimator.insert(rng.next());
                }
                estimator
            });
        });
    }

    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    let mut estimator = Estimator::with_targets(accuracy_targets());
    let mut rng = SplitMix64::new(1972);
    for _ in 0..100_000 {
        estimator.insert(rng.next());
    }
    // Settle the buffer so each iteration measures the walk alone.
    let _ = estimator.query(0.5);

    group.bench_function("query_after_100k", |b| {
        b.iter(|| black_box(estimator.query(black_box(0.99))));
    });

    group.finish();
}

criterion_group!(benches, bench_insert, bench_query);
criterion_main!(benches);
