//! Criterion benches for the pipeline stages on seeded random station layouts.
//!
//! - triangulation + adjacency graph (n = 500, 5000)
//! - distribution index over a prebuilt graph
//! - spanning forest, uniform and Euclidean weighting
//! - Voronoi partition
//!
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use stationgraph::prelude::*;
use stationgraph::spanning::weighted_spanning_forest;

fn random_stations(n: usize, seed: u64) -> Vec<Station> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n as u64)
        .map(|k| {
            Station::new(
                k,
                48.80 + rng.gen::<f64>() * 0.1,
                2.25 + rng.gen::<f64>() * 0.2,
                rng.gen_range(8..60),
            )
        })
        .collect()
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    for n in [500usize, 5000] {
        let stations = random_stations(n, 2024);
        let points = PointSet::from_stations(&stations);
        let graph = build_delaunay_graph(&points).unwrap().graph;
        let caps = CapacityTable::from_stations(&stations);

        group.bench_function(BenchmarkId::new("delaunay_graph", n), |b| {
            b.iter(|| build_delaunay_graph(&points).unwrap())
        });
        group.bench_function(BenchmarkId::new("distribution_index", n), |b| {
            b.iter(|| distribution_index(&graph, &caps, IndexCfg::default()).unwrap())
        });
        group.bench_function(BenchmarkId::new("mst_uniform", n), |b| {
            b.iter(|| minimum_spanning_forest(&graph))
        });
        group.bench_function(BenchmarkId::new("mst_euclidean", n), |b| {
            b.iter(|| weighted_spanning_forest(&graph, &points).unwrap())
        });
        group.bench_function(BenchmarkId::new("voronoi", n), |b| {
            b.iter(|| voronoi_partition(&points).unwrap())
        });
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let snapshot = StationSnapshot::new(random_stations(1500, 7));
    let cfg = AnalysisCfg::default();
    c.bench_function("analyze_1500", |b| {
        b.iter(|| analyze(&snapshot, None, &cfg).unwrap())
    });
}

criterion_group!(benches, bench_stages, bench_analyze);
criterion_main!(benches);
