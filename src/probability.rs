//! Triad probabilities under independent edge signs.
//!
//! Each present edge position of a triad is taken to be positive with probability `p` and
//! negative with probability `1 - p`, independently of every other edge. A specific sign
//! assignment with `j` positives out of `k` present edges then has probability
//! `p^j (1 - p)^(k - j)`, and the pattern "exactly `j` positives" collects the `C(k, j)`
//! assignments sharing that count.
//!
//! The model is conditioned on structure: it says nothing about how likely a triad class is,
//! only how its edges are signed once the class is fixed. Summed over all `2^k` assignments
//! the probability for any class is therefore 1, and values are never normalized across
//! classes.

use crate::{
    census::{SignedTriadCensus, TriadType, MAX_TRIAD_EDGES},
    error::BalanceError,
    statistics::EdgeSignStatistics,
};
use serde::{Deserialize, Serialize};

fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1u64, |acc, i| acc * (n - i) as u64 / (i + 1) as u64)
}

/// Probability of every sign assignment of `triad` with `positives` positive edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignPattern {
    pub triad: TriadType,
    pub positives: usize,
    pub negatives: usize,
    /// Number of distinct assignments sharing this sign count, `C(k, positives)`.
    pub assignments: u64,
    /// Probability of any one of those assignments.
    pub assignment_probability: f64,
    /// `assignments * assignment_probability`.
    pub probability: f64,
}

/// Observed against expected share of one `(class, positive count)` pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternComparison {
    pub triad: TriadType,
    pub positives: usize,
    pub observed: u64,
    /// Share of class-`triad` triads carrying exactly `positives` positive edges.
    pub empirical_fraction: f64,
    pub model_probability: f64,
}

impl PatternComparison {
    pub fn deviation(&self) -> f64 {
        self.empirical_fraction - self.model_probability
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriadProbabilityModel {
    positive_fraction: f64,
}

impl TriadProbabilityModel {
    pub fn new(positive_fraction: f64) -> Result<Self, BalanceError> {
        if !positive_fraction.is_finite() || !(0.0..=1.0).contains(&positive_fraction) {
            return Err(BalanceError::InvalidConfiguration(format!(
                "positive edge fraction must lie in [0, 1], got {positive_fraction}"
            )));
        }
        Ok(TriadProbabilityModel { positive_fraction })
    }

    pub fn from_statistics(stats: &EdgeSignStatistics) -> Self {
        TriadProbabilityModel {
            positive_fraction: stats.positive_fraction.clamp(0.0, 1.0),
        }
    }

    pub fn positive_fraction(&self) -> f64 {
        self.positive_fraction
    }

    /// Probability of one specific assignment of `triad` with `positives` positive edges.
    /// Zero when `positives` exceeds the number of edges in the class.
    pub fn assignment_probability(&self, triad: TriadType, positives: usize) -> f64 {
        let k = triad.edge_count();
        if positives > k {
            return 0.0;
        }
        let p = self.positive_fraction;
        // powi(0) is exactly 1, so p = 0 and p = 1 never produce 0^0 = NaN here.
        p.powi(positives as i32) * (1.0 - p).powi((k - positives) as i32)
    }

    /// Probability that a class-`triad` triad has exactly `positives` positive edges.
    pub fn pattern_probability(&self, triad: TriadType, positives: usize) -> f64 {
        binomial(triad.edge_count(), positives) as f64
            * self.assignment_probability(triad, positives)
    }

    /// Sum over all `2^k` sign assignments of `triad`. Conditioned on structure, so 1 up to
    /// rounding.
    pub fn structural_probability(&self, triad: TriadType) -> f64 {
        (0..=triad.edge_count())
            .map(|j| self.pattern_probability(triad, j))
            .sum()
    }

    /// Probability that every edge of `triad` is positive.
    pub fn all_positive_probability(&self, triad: TriadType) -> f64 {
        self.assignment_probability(triad, triad.edge_count())
    }

    pub fn sign_patterns(&self, triad: TriadType) -> Vec<SignPattern> {
        let k = triad.edge_count();
        (0..=k)
            .map(|positives| {
                let assignments = binomial(k, positives);
                let assignment_probability = self.assignment_probability(triad, positives);
                SignPattern {
                    triad,
                    positives,
                    negatives: k - positives,
                    assignments,
                    assignment_probability,
                    probability: assignments as f64 * assignment_probability,
                }
            })
            .collect()
    }

    /// Sign patterns of every class, in [`TriadType::ALL`] order.
    pub fn all_sign_patterns(&self) -> Vec<SignPattern> {
        TriadType::ALL
            .into_iter()
            .flat_map(|triad| self.sign_patterns(triad))
            .collect()
    }

    /// Line up the sign-resolved census against the model, pattern by pattern. The empty
    /// class `003` is skipped since it carries no edges to sign.
    pub fn compare(&self, census: &SignedTriadCensus) -> Vec<PatternComparison> {
        TriadType::ALL
            .into_iter()
            .filter(|triad| triad.edge_count() > 0)
            .flat_map(|triad| {
                (0..=triad.edge_count().min(MAX_TRIAD_EDGES)).map(move |positives| {
                    PatternComparison {
                        triad,
                        positives,
                        observed: census.count(triad, positives),
                        empirical_fraction: census.fraction_within(triad, positives),
                        model_probability: self.pattern_probability(triad, positives),
                    }
                })
            })
            .collect()
    }
}
