//! Serializable run configuration.
//!
//! A run is fully described by a TOML file:
//!
//! ```toml
//! [data]
//! path = "data/SP500.csv"
//!
//! [order]
//! size = 100.0
//! direction = "buy"
//! num_slices = 10
//!
//! [execution]
//! strategies = ["twap", "vwap"]
//! start = { from_end = 50 }
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use slicelab_core::{MarketData, Order, Strategy};
use thiserror::Error;

/// Bars before the end of the series where a run starts by default.
pub const DEFAULT_BARS_FROM_END: usize = 50;

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("cannot serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Configuration for a single execution run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    pub data: DataConfig,
    pub order: Order,
    #[serde(default)]
    pub execution: ExecutionSection,
}

/// Where bars come from: a CSV file or a seeded synthetic series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub synthetic: bool,
    #[serde(default = "default_synthetic_bars")]
    pub synthetic_bars: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl DataConfig {
    pub fn csv(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            synthetic: false,
            synthetic_bars: default_synthetic_bars(),
            seed: default_seed(),
        }
    }

    pub fn synthetic(bars: usize, seed: u64) -> Self {
        Self {
            path: None,
            synthetic: true,
            synthetic_bars: bars,
            seed,
        }
    }
}

fn default_synthetic_bars() -> usize {
    252
}

fn default_seed() -> u64 {
    42
}

/// Which strategies to run and where the window starts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionSection {
    #[serde(default = "default_strategies")]
    pub strategies: Vec<Strategy>,
    #[serde(default)]
    pub start: StartPoint,
}

impl Default for ExecutionSection {
    fn default() -> Self {
        Self {
            strategies: default_strategies(),
            start: StartPoint::default(),
        }
    }
}

fn default_strategies() -> Vec<Strategy> {
    Strategy::ALL.to_vec()
}

/// First bar of the execution window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StartPoint {
    /// Zero-based bar index.
    Index(usize),
    /// Bar with this date; it must exist in the series.
    Date(NaiveDate),
    /// `n` bars before the end of the series.
    FromEnd(usize),
}

impl Default for StartPoint {
    fn default() -> Self {
        Self::FromEnd(DEFAULT_BARS_FROM_END)
    }
}

/// Failure to map a [`StartPoint`] onto a series.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartError {
    #[error("start date {0} is not a bar in the data set")]
    DateNotFound(NaiveDate),

    #[error("cannot start {from_end} bars from the end of a {len}-bar series")]
    FromEndOutOfRange { from_end: usize, len: usize },
}

impl StartPoint {
    /// Zero-based start index in `data`.
    ///
    /// Only locates the start; whether the whole window fits is checked by
    /// the engine.
    pub fn resolve(self, data: &MarketData) -> Result<usize, StartError> {
        match self {
            Self::Index(index) => Ok(index),
            Self::Date(date) => data.index_of(date).ok_or(StartError::DateNotFound(date)),
            Self::FromEnd(from_end) => {
                if from_end == 0 || from_end > data.len() {
                    return Err(StartError::FromEndOutOfRange {
                        from_end,
                        len: data.len(),
                    });
                }
                Ok(data.len() - from_end)
            }
        }
    }
}

impl RunConfig {
    /// Parse and validate a TOML configuration.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Check cross-field constraints the types alone cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (&self.data.path, self.data.synthetic) {
            (Some(_), true) => {
                return Err(ConfigError::Invalid(
                    "data.path and data.synthetic are mutually exclusive".into(),
                ))
            }
            (None, false) => {
                return Err(ConfigError::Invalid(
                    "one of data.path or data.synthetic = true is required".into(),
                ))
            }
            _ => {}
        }
        if self.data.synthetic && self.data.synthetic_bars == 0 {
            return Err(ConfigError::Invalid(
                "data.synthetic_bars must be at least 1".into(),
            ));
        }
        if self.execution.strategies.is_empty() {
            return Err(ConfigError::Invalid(
                "execution.strategies must name at least one strategy".into(),
            ));
        }
        let mut seen = Vec::with_capacity(self.execution.strategies.len());
        for strategy in &self.execution.strategies {
            if seen.contains(strategy) {
                return Err(ConfigError::Invalid(format!(
                    "strategy '{strategy}' listed more than once"
                )));
            }
            seen.push(*strategy);
        }
        Ok(())
    }

    /// Deterministic content hash of this configuration.
    ///
    /// Two runs with identical configs have the same id.
    pub fn run_id(&self) -> Result<String, ConfigError> {
        let json = serde_json::to_string(self)?;
        Ok(blake3::hash(json.as_bytes()).to_hex().to_string())
    }
}
