//! Triadic census over a directed graph.
//!
//! Every unordered triple of nodes joined by at least one edge is classified by the pattern of
//! directed edges among its three pairs into one of the sixteen MAN classes (`003` .. `300`).
//! The name encodes the number of Mutual, Asymmetric and Null dyads, with a suffix (`D`own,
//! `U`p, `C`yclic, `T`ransitive) separating classes that share the same dyad counts.
//!
//! Enumeration is edge-driven: for every adjacent pair `(v, u)` with `v < u`, triples whose third
//! node touches neither endpoint are counted in bulk as `012`/`102`, and only the union of the
//! two neighborhoods is visited node by node. Each qualifying triple is reached exactly once, so
//! the cost is bounded by the sum of squared degrees rather than `n³`.
//!
//! Empty triples (`003`) are not part of the census. Their number is reported separately by
//! [`TriadCensus::unconnected_triples`].

use crate::{
    error::BalanceError,
    graph::{NodeId, Sign, SignedGraph},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const TRIAD_TYPE_COUNT: usize = 16;

/// Largest number of directed edge positions in a triad.
pub const MAX_TRIAD_EDGES: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TriadType {
    #[serde(rename = "003")]
    T003,
    #[serde(rename = "012")]
    T012,
    #[serde(rename = "102")]
    T102,
    #[serde(rename = "021D")]
    T021D,
    #[serde(rename = "021U")]
    T021U,
    #[serde(rename = "021C")]
    T021C,
    #[serde(rename = "111D")]
    T111D,
    #[serde(rename = "111U")]
    T111U,
    #[serde(rename = "030T")]
    T030T,
    #[serde(rename = "030C")]
    T030C,
    #[serde(rename = "201")]
    T201,
    #[serde(rename = "120D")]
    T120D,
    #[serde(rename = "120U")]
    T120U,
    #[serde(rename = "120C")]
    T120C,
    #[serde(rename = "210")]
    T210,
    #[serde(rename = "300")]
    T300,
}

use TriadType::*;

/// Edge pattern bits for an ordered triple `(v, u, w)`:
/// `v→u = 1, u→v = 2, v→w = 4, w→v = 8, u→w = 16, w→u = 32`.
#[rustfmt::skip]
const PATTERN_TO_TRIAD: [TriadType; 64] = [
    T003, T012, T012, T102,
    T012, T021D, T021C, T111U,
    T012, T021C, T021U, T111D,
    T102, T111U, T111D, T201,
    T012, T021C, T021D, T111U,
    T021U, T030T, T030T, T120U,
    T021C, T030C, T030T, T120C,
    T111D, T120C, T120D, T210,
    T012, T021U, T021C, T111D,
    T021C, T030T, T030C, T120C,
    T021D, T030T, T030T, T120D,
    T111U, T120U, T120C, T210,
    T102, T111D, T111U, T201,
    T111D, T120D, T120C, T210,
    T111U, T120C, T120U, T210,
    T201, T210, T210, T300,
];

impl TriadType {
    pub const ALL: [TriadType; TRIAD_TYPE_COUNT] = [
        T003, T012, T102, T021D, T021U, T021C, T111D, T111U, T030T, T030C, T201, T120D, T120U,
        T120C, T210, T300,
    ];

    pub fn name(self) -> &'static str {
        match self {
            T003 => "003",
            T012 => "012",
            T102 => "102",
            T021D => "021D",
            T021U => "021U",
            T021C => "021C",
            T111D => "111D",
            T111U => "111U",
            T030T => "030T",
            T030C => "030C",
            T201 => "201",
            T120D => "120D",
            T120U => "120U",
            T120C => "120C",
            T210 => "210",
            T300 => "300",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Number of directed edge positions present in every triad of this class.
    pub fn edge_count(self) -> usize {
        match self {
            T003 => 0,
            T012 => 1,
            T102 | T021D | T021U | T021C => 2,
            T111D | T111U | T030T | T030C => 3,
            T201 | T120D | T120U | T120C => 4,
            T210 => 5,
            T300 => 6,
        }
    }

    /// Number of directed edge positions absent in every triad of this class.
    pub fn absent_count(self) -> usize {
        MAX_TRIAD_EDGES - self.edge_count()
    }

    /// Classify a 6-bit edge pattern (see `PATTERN_TO_TRIAD` for the bit layout).
    pub fn from_pattern(pattern: u8) -> TriadType {
        PATTERN_TO_TRIAD[(pattern & 0b11_1111) as usize]
    }

    /// Classify the triple `{v, u, w}` by the edges present among its nodes in `graph`.
    pub fn classify(graph: &SignedGraph, v: NodeId, u: NodeId, w: NodeId) -> TriadType {
        Self::from_pattern(edge_pattern(graph, v, u, w))
    }
}

impl fmt::Display for TriadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TriadType {
    type Err = BalanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TriadType::ALL
            .into_iter()
            .find(|triad| triad.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| BalanceError::InvalidConfiguration(format!("unknown triad type '{s}'")))
    }
}

fn edge_pattern(graph: &SignedGraph, v: NodeId, u: NodeId, w: NodeId) -> u8 {
    [(v, u), (u, v), (v, w), (w, v), (u, w), (w, u)]
        .into_iter()
        .enumerate()
        .filter(|(_, (a, b))| graph.contains_edge(*a, *b))
        .fold(0u8, |pattern, (bit, _)| pattern | (1u8 << bit))
}

/// Visit every connected triple of `graph` once.
///
/// `visit` receives the class, the nodes that carry edges (two for a bulk-counted dyad, three
/// for an individually classified triple), and how many triples the call stands for.
fn enumerate_triads<F>(graph: &SignedGraph, mut visit: F)
where
    F: FnMut(TriadType, &[NodeId], u64),
{
    let n = graph.node_count() as u64;
    for v in graph.nodes() {
        let v_adjacent = graph.adjacent(v);
        for &u in v_adjacent.iter().filter(|u| **u > v) {
            let mut neighborhood = v_adjacent.clone();
            neighborhood.extend(graph.adjacent(u));
            neighborhood.remove(&u);
            neighborhood.remove(&v);

            let dyad = if graph.is_reciprocated(v, u) {
                T102
            } else {
                T012
            };
            let isolated = n - neighborhood.len() as u64 - 2;
            if isolated > 0 {
                visit(dyad, &[v, u], isolated);
            }

            for &w in neighborhood.iter() {
                if u < w || (v < w && w < u && !v_adjacent.contains(&w)) {
                    visit(TriadType::classify(graph, v, u, w), &[v, u, w], 1);
                }
            }
        }
    }
}

fn require_edges(graph: &SignedGraph) -> Result<(), BalanceError> {
    if graph.edge_count() == 0 {
        return Err(BalanceError::EmptyGraph(format!(
            "triad census needs at least one edge ({} nodes, 0 edges)",
            graph.node_count()
        )));
    }
    Ok(())
}

fn choose3(n: u64) -> u128 {
    let n = n as u128;
    if n < 3 {
        0
    } else {
        n * (n - 1) * (n - 2) / 6
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriadRecord {
    pub triad: TriadType,
    pub count: u64,
    pub fraction: f64,
}

/// Count of connected triples per [`TriadType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriadCensus {
    counts: [u64; TRIAD_TYPE_COUNT],
    node_count: usize,
    unconnected_triples: u64,
}

impl TriadCensus {
    /// Run the census. Fails with [`BalanceError::EmptyGraph`] when `graph` has no edges.
    pub fn compute(graph: &SignedGraph) -> Result<TriadCensus, BalanceError> {
        require_edges(graph)?;
        let mut counts = [0u64; TRIAD_TYPE_COUNT];
        enumerate_triads(graph, |triad, _, multiplicity| {
            counts[triad.index()] += multiplicity;
        });
        Ok(TriadCensus::from_counts(graph, counts))
    }

    fn from_counts(graph: &SignedGraph, counts: [u64; TRIAD_TYPE_COUNT]) -> TriadCensus {
        let connected: u64 = counts.iter().sum();
        let unconnected = choose3(graph.node_count() as u64).saturating_sub(connected as u128);
        tracing::debug!(
            "Triad census over {} nodes: {} connected triples, {} unconnected",
            graph.node_count(),
            connected,
            unconnected
        );

        TriadCensus {
            counts,
            node_count: graph.node_count(),
            unconnected_triples: u64::try_from(unconnected).unwrap_or(u64::MAX),
        }
    }

    pub fn count(&self, triad: TriadType) -> u64 {
        self.counts[triad.index()]
    }

    /// Number of triples with at least one edge.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Share of connected triples in class `triad`. A graph with edges but fewer than three
    /// nodes has no triples, in which case every fraction is 0.
    pub fn fraction(&self, triad: TriadType) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.count(triad) as f64 / total as f64
        }
    }

    /// Triples with no edge among their nodes, i.e. the classic `003` count.
    pub fn unconnected_triples(&self) -> u64 {
        self.unconnected_triples
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn records(&self) -> Vec<TriadRecord> {
        TriadType::ALL
            .into_iter()
            .map(|triad| TriadRecord {
                triad,
                count: self.count(triad),
                fraction: self.fraction(triad),
            })
            .collect()
    }
}

/// Census resolved by sign: for every class, how many triads carry `j` positive edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTriadCensus {
    census: TriadCensus,
    positives: [[u64; MAX_TRIAD_EDGES + 1]; TRIAD_TYPE_COUNT],
}

impl SignedTriadCensus {
    /// Run the sign-resolved census. Fails with [`BalanceError::EmptyGraph`] when `graph` has no
    /// edges and with [`BalanceError::MalformedEdge`] on the first edge whose sign is not ±1.
    pub fn compute(graph: &SignedGraph) -> Result<SignedTriadCensus, BalanceError> {
        if let Some((from, to, sign)) = graph
            .edges()
            .find(|(_, _, sign)| Sign::try_from(*sign).is_err())
        {
            return Err(BalanceError::MalformedEdge { from, to, sign });
        }
        require_edges(graph)?;

        let mut counts = [0u64; TRIAD_TYPE_COUNT];
        let mut positives = [[0u64; MAX_TRIAD_EDGES + 1]; TRIAD_TYPE_COUNT];
        enumerate_triads(graph, |triad, nodes, multiplicity| {
            counts[triad.index()] += multiplicity;
            let positive_edges = nodes
                .iter()
                .flat_map(|a| nodes.iter().map(move |b| (*a, *b)))
                .filter(|(a, b)| a != b && graph.sign(*a, *b) == Some(Sign::Positive))
                .count();
            positives[triad.index()][positive_edges] += multiplicity;
        });

        Ok(SignedTriadCensus {
            census: TriadCensus::from_counts(graph, counts),
            positives,
        })
    }

    pub fn census(&self) -> &TriadCensus {
        &self.census
    }

    /// Triads of class `triad` with exactly `positive_edges` positive edges.
    pub fn count(&self, triad: TriadType, positive_edges: usize) -> u64 {
        self.positives[triad.index()]
            .get(positive_edges)
            .copied()
            .unwrap_or(0)
    }

    /// Share of class-`triad` triads that carry exactly `positive_edges` positive edges.
    pub fn fraction_within(&self, triad: TriadType, positive_edges: usize) -> f64 {
        let of_type = self.census.count(triad);
        if of_type == 0 {
            0.0
        } else {
            self.count(triad, positive_edges) as f64 / of_type as f64
        }
    }
}
