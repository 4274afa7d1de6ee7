use crate::error::BalanceError;
use serde::{Deserialize, Serialize};
use std::{
    fs::{read_to_string, write},
    path::{Path, PathBuf},
};

pub const DEFAULT_NODE_COUNT: usize = 10;
pub const DEFAULT_ITERATIONS_PER_TRIAL: u64 = 1_000_000;
pub const DEFAULT_REPETITIONS: usize = 20;

/// When the local-balance predicate is evaluated during a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceCheck {
    /// After every update. The first imbalance ends the trial as unbalanced.
    #[default]
    EveryStep,
    /// Once, after the whole update budget has been spent.
    FinalState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub node_count: usize,
    /// Updates per trial. Zero is allowed: the initial state then decides the outcome.
    pub iterations_per_trial: u64,
    pub repetitions: usize,
    pub random_seed: Option<u64>,
    pub balance_check: BalanceCheck,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            node_count: DEFAULT_NODE_COUNT,
            iterations_per_trial: DEFAULT_ITERATIONS_PER_TRIAL,
            repetitions: DEFAULT_REPETITIONS,
            random_seed: None,
            balance_check: BalanceCheck::default(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), BalanceError> {
        if self.node_count < 3 {
            return Err(BalanceError::InvalidConfiguration(format!(
                "node_count must be at least 3, got {}",
                self.node_count
            )));
        }
        if self.repetitions < 1 {
            return Err(BalanceError::InvalidConfiguration(
                "repetitions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Top level of a configuration file. Only the `[simulation]` table exists today.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub simulation: SimulationConfig,
}

impl AnalysisConfig {
    pub fn from_toml_str(content: &str) -> Result<AnalysisConfig, BalanceError> {
        let config: AnalysisConfig = toml::from_str(content)?;
        config.simulation.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TomlConfigProvider {
    path: PathBuf,
}

impl TomlConfigProvider {
    pub fn new(path: PathBuf) -> Self {
        TomlConfigProvider { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the configuration, falling back to defaults when the file does not exist.
    pub fn load(&self) -> Result<AnalysisConfig, BalanceError> {
        tracing::debug!("Attempting to read configuration from: {:?}", &self.path);
        if !self.path.exists() {
            tracing::debug!("Config file not found, using defaults.");
            return Ok(AnalysisConfig::default());
        }
        let content = read_to_string(&self.path)?;
        AnalysisConfig::from_toml_str(&content)
    }

    pub fn store(&self, config: &AnalysisConfig) -> Result<(), BalanceError> {
        tracing::debug!("Attempting to write configuration to: {:?}", &self.path);
        let toml_string = toml::to_string(config)?;
        write(&self.path, toml_string)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use test_log::test;

    #[test]
    fn test_partial_table_keeps_defaults() {
        let config = AnalysisConfig::from_toml_str(
            r#"
[simulation]
repetitions = 100
random_seed = 7
balance_check = "final_state"
"#,
        )
        .unwrap();
        assert_eq!(config.simulation.node_count, DEFAULT_NODE_COUNT);
        assert_eq!(
            config.simulation.iterations_per_trial,
            DEFAULT_ITERATIONS_PER_TRIAL
        );
        assert_eq!(config.simulation.repetitions, 100);
        assert_eq!(config.simulation.random_seed, Some(7));
        assert_eq!(config.simulation.balance_check, BalanceCheck::FinalState);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let small = AnalysisConfig::from_toml_str("[simulation]\nnode_count = 2\n");
        assert!(matches!(small, Err(BalanceError::InvalidConfiguration(_))));

        let no_trials = AnalysisConfig::from_toml_str("[simulation]\nrepetitions = 0\n");
        assert!(matches!(no_trials, Err(BalanceError::InvalidConfiguration(_))));

        let garbage = AnalysisConfig::from_toml_str("[simulation]\nnode_count = \"ten\"\n");
        assert!(matches!(garbage, Err(BalanceError::Serialization(_))));
    }

    #[test]
    fn test_provider_round_trip() {
        let dir = TempDir::new().unwrap();
        let provider = TomlConfigProvider::new(dir.path().join("balance.toml"));
        assert_eq!(provider.load().unwrap(), AnalysisConfig::default());

        let mut config = AnalysisConfig::default();
        config.simulation.node_count = 11;
        config.simulation.random_seed = Some(99);
        provider.store(&config).unwrap();
        assert_eq!(provider.load().unwrap(), config);
    }
}
