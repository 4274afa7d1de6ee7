//! Balance dynamics driven through the public configuration surface.

mod common;

use common::init_logging;
use rand::{rngs::StdRng, SeedableRng};
use signed_balance::{
    census::{TriadCensus, TriadType},
    config::{AnalysisConfig, BalanceCheck, SimulationConfig, TomlConfigProvider},
    graph::Sign,
    simulation::{BalanceSimulator, SimulationState},
    BalanceError,
};
use tempfile::TempDir;

#[test]
fn test_balanced_start_with_no_updates() {
    init_logging();
    let simulator = BalanceSimulator::new(SimulationConfig {
        node_count: 3,
        iterations_per_trial: 0,
        repetitions: 5,
        random_seed: Some(1),
        balance_check: BalanceCheck::EveryStep,
    })
    .unwrap();
    let initial =
        SimulationState::from_fn(3, |source, target| Sign::from(target == (source + 1) % 3))
            .unwrap();
    assert!(initial.is_balanced());

    let mut rng = StdRng::seed_from_u64(5);
    let report = simulator.run_from(&initial, &mut rng).unwrap();
    assert_eq!(report.repetitions, 5);
    assert_eq!(report.fraction_balanced, 1.0);
}

#[test]
fn test_default_network_size() {
    init_logging();
    let config = SimulationConfig::default();
    assert_eq!(config.node_count, 10);

    let mut rng = StdRng::seed_from_u64(2024);
    let state = SimulationState::random(config.node_count, &mut rng).unwrap();
    assert_eq!(state.edge_count(), 90);

    let census = TriadCensus::compute(&state.to_signed_graph()).unwrap();
    assert_eq!(census.total(), 120);
    assert_eq!(census.count(TriadType::T300), 120);
}

#[test]
fn test_config_file_drives_simulation() {
    init_logging();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("balance.toml");
    std::fs::write(
        &path,
        r#"
[simulation]
node_count = 5
iterations_per_trial = 500
repetitions = 12
random_seed = 314
balance_check = "final_state"
"#,
    )
    .unwrap();

    let config = TomlConfigProvider::new(path).load().unwrap();
    let simulator = BalanceSimulator::new(config.simulation.clone()).unwrap();
    let report = simulator.run().unwrap();
    assert_eq!(report.trials.len(), 12);
    assert_eq!(report.balance_check, BalanceCheck::FinalState);
    assert_eq!(
        report.fraction_balanced,
        report.balanced as f64 / report.repetitions as f64
    );
    assert_eq!(simulator.run().unwrap(), report);
}

#[test]
fn test_invalid_configuration() {
    let config = AnalysisConfig::from_toml_str("[simulation]\nnode_count = 1\n");
    assert!(matches!(config, Err(BalanceError::InvalidConfiguration(_))));
    assert!(BalanceSimulator::new(SimulationConfig {
        repetitions: 0,
        ..Default::default()
    })
    .is_err());
}

#[test]
fn test_balanced_runs_after_many_updates() {
    init_logging();
    let simulator = BalanceSimulator::new(SimulationConfig {
        node_count: 3,
        iterations_per_trial: 64,
        repetitions: 5_000,
        random_seed: Some(77),
        balance_check: BalanceCheck::FinalState,
    })
    .unwrap();
    let report = simulator.run().unwrap();
    assert!(report.balanced > 0);
    assert!(
        (report.fraction_balanced - 0.125).abs() < 0.03,
        "fraction_balanced = {}",
        report.fraction_balanced
    );
}
