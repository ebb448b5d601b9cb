//! Benchmark configuration, loaded from TOML.
//!
//! ```toml
//! sizes = [1000, 10000, 100000]
//! repetitions = 1
//!
//! [data]
//! path = "market_data.csv"
//! synthetic_ticks = 100000
//! seed = 42
//!
//! [output]
//! dir = "results"
//!
//! [[strategy]]
//! kind = "full_history"
//!
//! [[strategy]]
//! kind = "fixed_window"
//! window = 50
//! ```
//!
//! Every section is optional; missing values take the defaults shown above
//! and the five-variant benchmark line-up.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use signalbench_core::{ConfigurationError, StrategySpec};

/// Errors from loading or validating a config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error("invalid strategy: {0}")]
    Strategy(#[from] ConfigurationError),
}

/// Where ticks come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// CSV file with `timestamp,symbol,price`. Synthetic data when absent.
    pub path: Option<PathBuf>,
    /// Number of synthetic ticks to generate when no path is given.
    pub synthetic_ticks: usize,
    /// Seed for synthetic data.
    pub seed: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: None,
            synthetic_ticks: 100_000,
            seed: 42,
        }
    }
}

/// Where artifacts are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("results"),
        }
    }
}

/// Complete benchmark configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    #[serde(default = "default_sizes")]
    pub sizes: Vec<usize>,
    #[serde(default = "default_repetitions")]
    pub repetitions: usize,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(rename = "strategy", default = "StrategySpec::benchmark_lineup")]
    pub strategies: Vec<StrategySpec>,
}

fn default_sizes() -> Vec<usize> {
    vec![1_000, 10_000, 100_000]
}

fn default_repetitions() -> usize {
    1
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            sizes: default_sizes(),
            repetitions: default_repetitions(),
            data: DataConfig::default(),
            output: OutputConfig::default(),
            strategies: StrategySpec::benchmark_lineup(),
        }
    }
}

impl BenchmarkConfig {
    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sizes.is_empty() {
            return Err(ConfigError::Invalid("sizes must not be empty".into()));
        }
        if self.sizes.contains(&0) {
            return Err(ConfigError::Invalid("sizes must be positive".into()));
        }
        if self.repetitions == 0 {
            return Err(ConfigError::Invalid("repetitions must be at least 1".into()));
        }
        if self.strategies.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one [[strategy]] is required".into(),
            ));
        }
        if self.data.path.is_none() && self.data.synthetic_ticks == 0 {
            return Err(ConfigError::Invalid(
                "synthetic_ticks must be positive when no data path is given".into(),
            ));
        }
        for spec in &self.strategies {
            spec.validate()?;
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}
