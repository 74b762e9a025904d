//! Criterion benchmarks for the ordering strategies.
//!
//! Uses synthetic items (points in the plane, Euclidean cost) so only
//! algorithm overhead is measured, not alignment cost.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use u_stackorder::anneal::{AnnealConfig, AnnealingTourSolver};
use u_stackorder::greedy::{GreedyChainBuilder, GreedyConfig};
use u_stackorder::pairwise::{
    AlignmentEngine, CompareMode, Comparison, CostMatrixBuilder, CostMatrixConfig, CostTable,
};
use u_stackorder::random::create_rng;
use u_stackorder::AlignmentFailed;

// ===========================================================================
// Points in the unit square
// ===========================================================================

struct PlaneEngine;

impl AlignmentEngine for PlaneEngine {
    type Item = (f64, f64);

    fn compare(
        &self,
        a: &(f64, f64),
        b: &(f64, f64),
        _mode: CompareMode,
    ) -> Result<Comparison, AlignmentFailed> {
        Ok(Comparison::cost_only(((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()))
    }
}

fn points(n: usize) -> Vec<(f64, f64)> {
    let mut rng = create_rng(42);
    (0..n)
        .map(|_| (rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)))
        .collect()
}

fn table(n: usize) -> CostTable {
    CostMatrixBuilder::new(&PlaneEngine)
        .build(&points(n))
        .expect("plane comparisons never fail")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_cost_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("cost_table");
    group.sample_size(10);

    for &n in &[50usize, 200] {
        let items = points(n);
        for parallel in [false, true] {
            let config = CostMatrixConfig::default().with_parallel(parallel);
            group.bench_with_input(
                BenchmarkId::new(if parallel { "parallel" } else { "serial" }, n),
                &items,
                |b, items| {
                    let builder = CostMatrixBuilder::new(&PlaneEngine).with_config(config.clone());
                    b.iter(|| black_box(builder.build(black_box(items))))
                },
            );
        }
    }
    group.finish();
}

fn bench_greedy(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy");
    group.sample_size(10);

    for &n in &[20usize, 100] {
        let costs = table(n);
        for (name, config) in [
            ("open_seeded", GreedyConfig::open().with_seed(0)),
            ("open_search", GreedyConfig::open()),
            ("circular", GreedyConfig::circular()),
        ] {
            group.bench_with_input(BenchmarkId::new(name, n), &costs, |b, costs| {
                let builder = GreedyChainBuilder::new(config.clone());
                b.iter(|| {
                    let mut costs = costs.clone();
                    black_box(builder.run(&mut costs))
                })
            });
        }
    }
    group.finish();
}

fn bench_anneal(c: &mut Criterion) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let mut group = c.benchmark_group("anneal");
    group.sample_size(10);

    for &n in &[20usize, 60] {
        let costs = table(n);
        let solver = AnnealingTourSolver::new(
            AnnealConfig::default()
                .with_max_temperature_steps(30)
                .with_seed(42),
        );
        group.bench_with_input(BenchmarkId::from_parameter(n), &costs, |b, costs| {
            b.iter(|| black_box(solver.solve(black_box(costs))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_cost_table, bench_greedy, bench_anneal);
criterion_main!(benches);
