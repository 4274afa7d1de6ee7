use crate::{
    error::BalanceError,
    graph::{Sign, SignedGraph},
};
use serde::{Deserialize, Serialize};

/// Positive and negative edge totals of a [`SignedGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeSignStatistics {
    pub positive_count: u64,
    pub negative_count: u64,
    pub positive_fraction: f64,
    pub negative_fraction: f64,
}

impl EdgeSignStatistics {
    /// Partition the edges of `graph` by sign.
    ///
    /// Fails with [`BalanceError::EmptyGraph`] when there are no edges, and with
    /// [`BalanceError::MalformedEdge`] on the first edge whose sign is neither +1 nor -1.
    pub fn compute(graph: &SignedGraph) -> Result<EdgeSignStatistics, BalanceError> {
        if graph.edge_count() == 0 {
            return Err(BalanceError::EmptyGraph(
                "sign fractions are undefined for a graph without edges".to_string(),
            ));
        }

        let mut positive_count = 0u64;
        let mut negative_count = 0u64;
        for (from, to, raw) in graph.edges() {
            match Sign::try_from(raw) {
                Ok(Sign::Positive) => positive_count += 1,
                Ok(Sign::Negative) => negative_count += 1,
                Err(sign) => {
                    tracing::warn!("Edge {from} -> {to} carries sign {sign}, aborting statistics");
                    return Err(BalanceError::MalformedEdge { from, to, sign });
                }
            }
        }

        let total = (positive_count + negative_count) as f64;
        Ok(EdgeSignStatistics {
            positive_count,
            negative_count,
            positive_fraction: positive_count as f64 / total,
            negative_fraction: negative_count as f64 / total,
        })
    }

    pub fn total(&self) -> u64 {
        self.positive_count + self.negative_count
    }
}
