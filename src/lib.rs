//! # signed-balance
//!
//! A Rust library for testing structural-balance theory on directed, edge-signed networks.
//!
//! ## Overview
//!
//! Edges of a signed network express trust (+1) or distrust (-1). signed-balance loads such a
//! network into a [`graph::SignedGraph`] and answers three questions about it:
//!
//! - **Triadic census**: how many connected node triples fall into each of the 16 directed
//!   triad classes (`012`, `102`, `021D`, ..., `300`), optionally split by how many of their edges
//!   are positive
//! - **Sign model**: with `p` the observed fraction of positive edges, how likely each signed
//!   triad pattern would be if every edge were signed independently
//! - **Balance dynamics**: starting from random complete signed graphs and repeatedly resampling
//!   reciprocal sign pairs, how often does the network end up locally balanced
//!
//! ## Architecture
//!
//! - **[`graph`]**: `SignedGraph` storage on top of petgraph's `DiGraphMap`
//! - **[`edgelist`]**: loader for `<source> <target> <sign>` text files
//! - **[`census`]**: `TriadType`, `TriadCensus`, `SignedTriadCensus`
//! - **[`statistics`]**: `EdgeSignStatistics`
//! - **[`probability`]**: `TriadProbabilityModel` and census comparison
//! - **[`simulation`]**: `SimulationState`, `BalanceSimulator`
//! - **[`config`]**: simulator configuration and its TOML file
//!
//! ## Quick Start
//!
//! ```rust
//! use signed_balance::{
//!     census::{TriadCensus, TriadType},
//!     edgelist::parse_edge_list,
//!     probability::TriadProbabilityModel,
//!     statistics::EdgeSignStatistics,
//! };
//!
//! # fn main() -> Result<(), signed_balance::BalanceError> {
//! let graph = parse_edge_list("1 2 1\n2 1 1\n2 3 -1\n")?;
//!
//! let census = TriadCensus::compute(&graph)?;
//! assert_eq!(census.count(TriadType::T111U), 1);
//!
//! let stats = EdgeSignStatistics::compute(&graph)?;
//! let model = TriadProbabilityModel::from_statistics(&stats);
//! let p_all_positive = model.all_positive_probability(TriadType::T111U);
//! assert!((p_all_positive - (2.0f64 / 3.0).powi(3)).abs() < 1e-12);
//! # Ok(())
//! # }
//! ```
//!
//! ### Running the Simulator
//!
//! ```rust
//! use signed_balance::{config::SimulationConfig, simulation::BalanceSimulator};
//!
//! # fn main() -> Result<(), signed_balance::BalanceError> {
//! let simulator = BalanceSimulator::new(SimulationConfig {
//!     node_count: 5,
//!     iterations_per_trial: 1_000,
//!     repetitions: 10,
//!     random_seed: Some(42),
//!     ..Default::default()
//! })?;
//! let report = simulator.run()?;
//! assert!((0.0..=1.0).contains(&report.fraction_balanced));
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Triad Classes
//!
//! A triad class is named by its count of Mutual, Asymmetric and Null dyads, plus a letter
//! (`D`own, `U`p, `C`yclic, `T`ransitive) where the counts alone are ambiguous. Classification
//! is a lookup in a fixed 64-entry table indexed by the six directed edge positions of the
//! triple. Triples without any edge (`003`) are excluded from the census and reported separately.
//!
//! ### Local Balance
//!
//! A node is balanced when it has as many positive as negative outgoing edges. The simulator
//! either requires this of every node after every update ([`config::BalanceCheck::EveryStep`],
//! the default) or only once the update budget is spent ([`config::BalanceCheck::FinalState`]).
//!
//! ## Features
//!
//! - **default**: the analysis library
//! - **bin**: the `balance` command-line tool

pub mod census;
pub mod config;
pub mod edgelist;
pub mod error;
pub mod graph;
pub mod probability;
pub mod simulation;
pub mod statistics;
#[cfg(test)]
mod tests;

pub use error::*;
