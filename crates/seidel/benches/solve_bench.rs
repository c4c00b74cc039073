//! Criterion benchmarks for the incremental solver.
//! Focus sizes: n in {2, 3, 4}, m in {10, 100, 1000} random half-spaces.
//! Results: by default under target/criterion.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use seidel::gen::{random_bounded_problem, GenCfg, ReplayToken};
use seidel::geom::GeomCfg;
use seidel::solve;

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    for &dim in &[2usize, 3, 4] {
        for &m in &[10usize, 100, 1000] {
            let cfg = GenCfg {
                dim,
                count: m,
                ..GenCfg::default()
            };
            group.bench_with_input(
                BenchmarkId::new(format!("dim{dim}"), m),
                &cfg,
                |b, &cfg| {
                    let mut rng = StdRng::seed_from_u64(43);
                    b.iter_batched(
                        || random_bounded_problem(cfg, ReplayToken { seed: 42, index: 0 }).unwrap(),
                        |p| {
                            let _sol = solve(p.half_spaces, p.direction, GeomCfg::default(), &mut rng)
                                .unwrap();
                        },
                        BatchSize::SmallInput,
                    )
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_solve);
criterion_main!(benches);
