//! Shared test utilities for graph analysis testing

use crate::{
    census::{TriadType, MAX_TRIAD_EDGES, TRIAD_TYPE_COUNT},
    graph::{NodeId, Sign, SignedGraph},
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Initialize logging for tests
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// Complete directed graph on nodes `1..=n` with every edge carrying `sign`
pub fn complete_graph(n: u64, sign: Sign) -> SignedGraph {
    let mut graph = SignedGraph::new();
    for source in 1..=n {
        for target in (1..=n).filter(|t| *t != source) {
            graph.add_signed_edge(source, target, sign);
        }
    }
    graph
}

/// Random directed graph on nodes `0..n`. Each ordered pair gets an edge with probability
/// `density`, positive with probability `positive`.
pub fn random_graph(n: u64, density: f64, positive: f64, seed: u64) -> SignedGraph {
    init_logging();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = SignedGraph::new();
    for node in 0..n {
        graph.add_node(node);
    }
    for source in 0..n {
        for target in (0..n).filter(|t| *t != source) {
            if rng.gen_bool(density) {
                graph.add_signed_edge(source, target, Sign::from(rng.gen_bool(positive)));
            }
        }
    }
    graph
}

/// Census by checking every triple, for comparison against the edge-driven enumeration
pub fn brute_force_census(graph: &SignedGraph) -> [u64; TRIAD_TYPE_COUNT] {
    let mut nodes: Vec<NodeId> = graph.nodes().collect();
    nodes.sort_unstable();
    let mut counts = [0u64; TRIAD_TYPE_COUNT];
    for (i, a) in nodes.iter().enumerate() {
        for (j, b) in nodes.iter().enumerate().skip(i + 1) {
            for c in nodes.iter().skip(j + 1) {
                let triad = TriadType::classify(graph, *a, *b, *c);
                if triad != TriadType::T003 {
                    counts[triad.index()] += 1;
                }
            }
        }
    }
    counts
}

/// Sign-resolved census by checking every triple: positives are counted over all six ordered
/// pairs of the triple
pub fn brute_force_signed_census(
    graph: &SignedGraph,
) -> [[u64; MAX_TRIAD_EDGES + 1]; TRIAD_TYPE_COUNT] {
    let mut nodes: Vec<NodeId> = graph.nodes().collect();
    nodes.sort_unstable();
    let mut counts = [[0u64; MAX_TRIAD_EDGES + 1]; TRIAD_TYPE_COUNT];
    for (i, a) in nodes.iter().enumerate() {
        for (j, b) in nodes.iter().enumerate().skip(i + 1) {
            for c in nodes.iter().skip(j + 1) {
                let triad = TriadType::classify(graph, *a, *b, *c);
                if triad == TriadType::T003 {
                    continue;
                }
                let positives = [(a, b), (b, a), (a, c), (c, a), (b, c), (c, b)]
                    .into_iter()
                    .filter(|(x, y)| graph.sign(**x, **y) == Some(Sign::Positive))
                    .count();
                counts[triad.index()][positives] += 1;
            }
        }
    }
    counts
}
