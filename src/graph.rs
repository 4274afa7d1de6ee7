//! Directed, edge-signed graph storage.
//!
//! [`SignedGraph`] wraps a petgraph [`DiGraphMap`] keyed by integer node identifiers. Edge
//! weights hold the raw sign value as read from input, so that a sign outside `{+1, -1}` survives
//! graph construction and is reported by the analysis that needs it (see
//! [`crate::statistics::EdgeSignStatistics`]).

use petgraph::{graphmap::DiGraphMap, Direction};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt};

pub type NodeId = u64;

/// Sign carried by a trust (+1) or distrust (-1) edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn value(self) -> i64 {
        match self {
            Sign::Positive => 1,
            Sign::Negative => -1,
        }
    }

    pub fn is_positive(self) -> bool {
        self == Sign::Positive
    }
}

impl TryFrom<i64> for Sign {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Sign::Positive),
            -1 => Ok(Sign::Negative),
            other => Err(other),
        }
    }
}

impl From<bool> for Sign {
    fn from(positive: bool) -> Self {
        if positive {
            Sign::Positive
        } else {
            Sign::Negative
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Positive => write!(f, "+1"),
            Sign::Negative => write!(f, "-1"),
        }
    }
}

/// Node and edge totals, as reported after loading a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub nodes: usize,
    pub edges: usize,
    pub self_loops: usize,
    pub reciprocated_pairs: usize,
}

#[derive(Debug, Clone)]
pub struct SignedGraph(pub DiGraphMap<NodeId, i64>);

impl Default for SignedGraph {
    fn default() -> Self {
        SignedGraph(DiGraphMap::new())
    }
}

impl SignedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(source, target, sign)` triples. A repeated ordered pair keeps the
    /// last sign seen.
    pub fn from_edges<I>(iterable: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId, i64)>,
    {
        let mut graph = SignedGraph::new();
        for (source, target, sign) in iterable {
            graph.add_edge(source, target, sign);
        }
        graph
    }

    pub fn add_node(&mut self, node: NodeId) {
        self.0.add_node(node);
    }

    /// Insert or replace the edge `source -> target`, returning the previous raw sign if the
    /// ordered pair was already present. Endpoints are added as nodes when missing.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, sign: i64) -> Option<i64> {
        self.0.add_edge(source, target, sign)
    }

    pub fn add_signed_edge(&mut self, source: NodeId, target: NodeId, sign: Sign) -> Option<i64> {
        self.add_edge(source, target, sign.value())
    }

    pub fn node_count(&self) -> usize {
        self.0.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.0.edge_count()
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.0.contains_node(node)
    }

    pub fn contains_edge(&self, source: NodeId, target: NodeId) -> bool {
        self.0.contains_edge(source, target)
    }

    /// Raw sign value stored on `source -> target`.
    pub fn raw_sign(&self, source: NodeId, target: NodeId) -> Option<i64> {
        self.0.edge_weight(source, target).copied()
    }

    /// Sign of `source -> target`, or `None` when the edge is absent or its value is not ±1.
    pub fn sign(&self, source: NodeId, target: NodeId) -> Option<Sign> {
        self.raw_sign(source, target)
            .and_then(|raw| Sign::try_from(raw).ok())
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.0.nodes()
    }

    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, i64)> + '_ {
        self.0
            .all_edges()
            .map(|(source, target, sign)| (source, target, *sign))
    }

    /// Nodes joined to `node` by an edge in either direction, excluding `node` itself.
    pub fn adjacent(&self, node: NodeId) -> BTreeSet<NodeId> {
        self.0
            .neighbors_directed(node, Direction::Outgoing)
            .chain(self.0.neighbors_directed(node, Direction::Incoming))
            .filter(|other| *other != node)
            .collect()
    }

    pub fn is_reciprocated(&self, a: NodeId, b: NodeId) -> bool {
        self.contains_edge(a, b) && self.contains_edge(b, a)
    }

    pub fn summary(&self) -> GraphSummary {
        let mut self_loops = 0;
        let mut reciprocated = 0;
        for (source, target, _) in self.edges() {
            if source == target {
                self_loops += 1;
            } else if source < target && self.contains_edge(target, source) {
                reciprocated += 1;
            }
        }
        GraphSummary {
            nodes: self.node_count(),
            edges: self.edge_count(),
            self_loops,
            reciprocated_pairs: reciprocated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_sign_conversion() {
        assert_eq!(Sign::try_from(1), Ok(Sign::Positive));
        assert_eq!(Sign::try_from(-1), Ok(Sign::Negative));
        assert_eq!(Sign::try_from(0), Err(0));
        assert_eq!(Sign::try_from(2), Err(2));
        assert_eq!(Sign::Negative.value(), -1);
        assert_eq!(Sign::from(false), Sign::Negative);
    }

    #[test]
    fn test_directed_pairs_are_distinct() {
        let graph = SignedGraph::from_edges(vec![(1, 2, 1), (2, 1, -1)]);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.sign(1, 2), Some(Sign::Positive));
        assert_eq!(graph.sign(2, 1), Some(Sign::Negative));
        assert!(graph.is_reciprocated(1, 2));
    }

    #[test]
    fn test_repeated_pair_replaces_sign() {
        let mut graph = SignedGraph::new();
        assert_eq!(graph.add_edge(5, 6, 1), None);
        assert_eq!(graph.add_edge(5, 6, -1), Some(1));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.sign(5, 6), Some(Sign::Negative));
    }

    #[test]
    fn test_raw_sign_survives_construction() {
        let graph = SignedGraph::from_edges(vec![(1, 2, 7)]);
        assert_eq!(graph.raw_sign(1, 2), Some(7));
        assert_eq!(graph.sign(1, 2), None);
    }

    #[test]
    fn test_adjacent_ignores_self_loops_and_direction() {
        let graph = SignedGraph::from_edges(vec![(1, 1, 1), (1, 2, 1), (3, 1, -1), (2, 3, 1)]);
        let adjacent: Vec<NodeId> = graph.adjacent(1).into_iter().collect();
        assert_eq!(adjacent, vec![2, 3]);

        let summary = graph.summary();
        assert_eq!(summary.nodes, 3);
        assert_eq!(summary.edges, 4);
        assert_eq!(summary.self_loops, 1);
        assert_eq!(summary.reciprocated_pairs, 0);
    }
}
