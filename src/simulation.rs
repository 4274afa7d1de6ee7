//! Stochastic sign dynamics on a complete directed signed graph.
//!
//! A trial starts from a complete graph on `N` nodes in which both directions of every pair carry
//! an independent uniformly random sign. Each update picks one unordered pair uniformly at random
//! and resamples both of its directed signs, independently and uniformly. A node is locally
//! balanced when its positive and negative outgoing edges are equally many; the graph is
//! balanced when every node is.
//!
//! Every node has `N - 1` outgoing edges, so for even `N` no node can ever be balanced.
//!
//! [`SimulationState`] keeps a positive out-degree per node and a count of unbalanced nodes up to
//! date on every sign change. An update and the following balance check are both O(1), which
//! keeps budgets of around a million updates per trial cheap.

use crate::{
    config::{BalanceCheck, SimulationConfig},
    error::BalanceError,
    graph::{NodeId, Sign, SignedGraph},
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationState {
    node_count: usize,
    /// Row-major `node_count x node_count`; the diagonal is unused.
    signs: Vec<Sign>,
    positive_out: Vec<usize>,
    unbalanced_nodes: usize,
}

impl SimulationState {
    /// Build a complete state, asking `sign_of(source, target)` for every ordered pair.
    pub fn from_fn<F>(node_count: usize, mut sign_of: F) -> Result<Self, BalanceError>
    where
        F: FnMut(usize, usize) -> Sign,
    {
        if node_count < 3 {
            return Err(BalanceError::InvalidConfiguration(format!(
                "simulation needs at least 3 nodes, got {node_count}"
            )));
        }
        let mut signs = vec![Sign::Negative; node_count * node_count];
        let mut positive_out = vec![0; node_count];
        for source in 0..node_count {
            for target in (0..node_count).filter(|t| *t != source) {
                let sign = sign_of(source, target);
                signs[source * node_count + target] = sign;
                if sign.is_positive() {
                    positive_out[source] += 1;
                }
            }
        }
        let mut state = SimulationState {
            node_count,
            signs,
            positive_out,
            unbalanced_nodes: 0,
        };
        state.unbalanced_nodes = (0..node_count)
            .filter(|node| !state.is_node_balanced(*node))
            .count();
        Ok(state)
    }

    /// Complete state with every directed sign drawn uniformly from `rng`.
    pub fn random<R: Rng + ?Sized>(node_count: usize, rng: &mut R) -> Result<Self, BalanceError> {
        Self::from_fn(node_count, |_, _| Sign::from(rng.gen::<bool>()))
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of directed edges, `N (N - 1)`.
    pub fn edge_count(&self) -> usize {
        self.node_count * (self.node_count - 1)
    }

    pub fn sign(&self, source: usize, target: usize) -> Option<Sign> {
        if source == target || source >= self.node_count || target >= self.node_count {
            None
        } else {
            Some(self.signs[source * self.node_count + target])
        }
    }

    /// Change one directed sign, keeping the balance bookkeeping current.
    pub fn set_sign(
        &mut self,
        source: usize,
        target: usize,
        sign: Sign,
    ) -> Result<(), BalanceError> {
        if self.sign(source, target).is_none() {
            return Err(BalanceError::InvalidConfiguration(format!(
                "no edge {source} -> {target} in a complete graph on {} nodes",
                self.node_count
            )));
        }
        self.apply(source, target, sign);
        Ok(())
    }

    fn apply(&mut self, source: usize, target: usize, sign: Sign) {
        let slot = &mut self.signs[source * self.node_count + target];
        if *slot == sign {
            return;
        }
        *slot = sign;

        let was_balanced = self.is_node_balanced(source);
        if sign.is_positive() {
            self.positive_out[source] += 1;
        } else {
            self.positive_out[source] -= 1;
        }
        match (was_balanced, self.is_node_balanced(source)) {
            (true, false) => self.unbalanced_nodes += 1,
            (false, true) => self.unbalanced_nodes -= 1,
            _ => {}
        }
    }

    pub fn positive_out_degree(&self, node: usize) -> usize {
        self.positive_out[node]
    }

    pub fn is_node_balanced(&self, node: usize) -> bool {
        2 * self.positive_out[node] == self.node_count - 1
    }

    pub fn is_balanced(&self) -> bool {
        self.unbalanced_nodes == 0
    }

    /// Balance computed from scratch over all edges, without the cached counters.
    pub fn recount_balanced(&self) -> bool {
        (0..self.node_count).all(|source| {
            let (positive, negative) = (0..self.node_count)
                .filter_map(|target| self.sign(source, target))
                .fold((0usize, 0usize), |(p, n), sign| {
                    if sign.is_positive() {
                        (p + 1, n)
                    } else {
                        (p, n + 1)
                    }
                });
            positive == negative
        })
    }

    /// One update: choose an unordered pair uniformly and resample both directed signs.
    ///
    /// Pairs whose signs agree and pairs whose signs differ are resampled the same way.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> (usize, usize) {
        let u = rng.gen_range(0..self.node_count);
        let mut v = rng.gen_range(0..self.node_count - 1);
        if v >= u {
            v += 1;
        }
        let forward = Sign::from(rng.gen::<bool>());
        let backward = Sign::from(rng.gen::<bool>());
        self.apply(u, v, forward);
        self.apply(v, u, backward);
        (u, v)
    }

    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, Sign)> + '_ {
        (0..self.node_count).flat_map(move |source| {
            (0..self.node_count)
                .filter(move |target| *target != source)
                .map(move |target| (source, target, self.signs[source * self.node_count + target]))
        })
    }

    /// Copy the state into a [`SignedGraph`] so it can be run through the census.
    pub fn to_signed_graph(&self) -> SignedGraph {
        SignedGraph::from_edges(
            self.edges()
                .map(|(source, target, sign)| (source as NodeId, target as NodeId, sign.value())),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialOutcome {
    pub balanced: bool,
    /// Updates performed before the trial ended.
    pub updates: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub node_count: usize,
    pub iterations_per_trial: u64,
    pub repetitions: usize,
    pub balance_check: BalanceCheck,
    pub balanced: usize,
    pub fraction_balanced: f64,
    pub trials: Vec<TrialOutcome>,
}

#[derive(Debug, Clone)]
pub struct BalanceSimulator {
    config: SimulationConfig,
}

impl BalanceSimulator {
    pub fn new(config: SimulationConfig) -> Result<Self, BalanceError> {
        config.validate()?;
        if config.node_count % 2 == 0 {
            tracing::warn!(
                "Every node has {} outgoing edges; local balance is unreachable with {} nodes",
                config.node_count - 1,
                config.node_count
            );
        }
        Ok(BalanceSimulator { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Generator seeded from `random_seed`, or from OS entropy when no seed is configured.
    pub fn rng(&self) -> StdRng {
        match self.config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Run every repetition from a fresh random state, using the configured seed.
    pub fn run(&self) -> Result<SimulationReport, BalanceError> {
        let mut rng = self.rng();
        self.run_with(&mut rng)
    }

    /// Run every repetition from a fresh random state drawn from `rng`.
    pub fn run_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<SimulationReport, BalanceError> {
        self.run_repetitions(rng, |trial_rng| {
            SimulationState::random(self.config.node_count, trial_rng)
        })
    }

    /// Run every repetition from a copy of `initial`.
    pub fn run_from<R: Rng + ?Sized>(
        &self,
        initial: &SimulationState,
        rng: &mut R,
    ) -> Result<SimulationReport, BalanceError> {
        if initial.node_count() != self.config.node_count {
            return Err(BalanceError::InvalidConfiguration(format!(
                "initial state has {} nodes, configuration expects {}",
                initial.node_count(),
                self.config.node_count
            )));
        }
        self.run_repetitions(rng, |_| Ok(initial.clone()))
    }

    fn run_repetitions<R, F>(
        &self,
        rng: &mut R,
        mut initial: F,
    ) -> Result<SimulationReport, BalanceError>
    where
        R: Rng + ?Sized,
        F: FnMut(&mut StdRng) -> Result<SimulationState, BalanceError>,
    {
        let mut trials = Vec::with_capacity(self.config.repetitions);
        for repetition in 0..self.config.repetitions {
            // Each repetition owns its generator, derived from the caller's.
            let mut trial_rng = StdRng::seed_from_u64(rng.gen());
            let state = initial(&mut trial_rng)?;
            let outcome = self.run_trial(state, &mut trial_rng);
            tracing::debug!(
                "Repetition {}: balanced = {}, updates = {}",
                repetition,
                outcome.balanced,
                outcome.updates
            );
            trials.push(outcome);
        }

        let balanced = trials.iter().filter(|trial| trial.balanced).count();
        let fraction_balanced = balanced as f64 / self.config.repetitions as f64;
        tracing::info!(
            "{} of {} repetitions balanced ({:.4})",
            balanced,
            self.config.repetitions,
            fraction_balanced
        );

        Ok(SimulationReport {
            node_count: self.config.node_count,
            iterations_per_trial: self.config.iterations_per_trial,
            repetitions: self.config.repetitions,
            balance_check: self.config.balance_check,
            balanced,
            fraction_balanced,
            trials,
        })
    }

    /// Drive one trial to completion from `state`.
    pub fn run_trial<R: Rng + ?Sized>(
        &self,
        mut state: SimulationState,
        rng: &mut R,
    ) -> TrialOutcome {
        let budget = self.config.iterations_per_trial;
        if self.config.balance_check == BalanceCheck::EveryStep {
            for update in 1..=budget {
                state.step(rng);
                if !state.is_balanced() {
                    return TrialOutcome {
                        balanced: false,
                        updates: update,
                    };
                }
            }
        } else {
            for _ in 0..budget {
                state.step(rng);
            }
        }
        TrialOutcome {
            balanced: state.is_balanced(),
            updates: budget,
        }
    }
}
