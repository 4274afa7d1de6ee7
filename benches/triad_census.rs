//! Performance benchmarks for the triadic census
//!
//! Measures the edge-driven census and its sign-resolved variant on sparse random graphs
//! with a degree profile comparable to trust networks.
//!
//! Run with: cargo bench --bench triad_census

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use signed_balance::{
    census::{SignedTriadCensus, TriadCensus},
    graph::SignedGraph,
};

fn sparse_graph(nodes: u64, edges_per_node: u64, seed: u64) -> SignedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = SignedGraph::new();
    for source in 0..nodes {
        graph.add_node(source);
        for _ in 0..edges_per_node {
            let target = rng.gen_range(0..nodes);
            if target != source {
                let sign = if rng.gen_bool(0.85) { 1 } else { -1 };
                graph.add_edge(source, target, sign);
            }
        }
    }
    graph
}

fn bench_census(c: &mut Criterion) {
    let mut group = c.benchmark_group("triad_census");
    for nodes in [1_000u64, 10_000] {
        let graph = sparse_graph(nodes, 8, 17);
        group.bench_with_input(BenchmarkId::new("structural", nodes), &graph, |b, g| {
            b.iter(|| TriadCensus::compute(g).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("signed", nodes), &graph, |b, g| {
            b.iter(|| SignedTriadCensus::compute(g).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_census);
criterion_main!(benches);
