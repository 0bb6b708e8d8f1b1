//! Market data provider trait.
//!
//! The engine never reads files itself: a provider produces a cleaned
//! [`MarketData`] once per run and every execution borrows it.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ingest::read_csv_file;
use super::market_data::{DataError, MarketData};
use super::synthetic::generate_synthetic_bars;

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    CsvFile,
    Synthetic,
}

/// Trait for market data providers.
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Source tag recorded alongside results.
    fn source(&self) -> DataSource;

    /// Load the full bar series.
    fn load(&self) -> Result<MarketData, DataError>;
}

/// Reads a daily OHLCV CSV file.
#[derive(Debug, Clone)]
pub struct CsvProvider {
    path: PathBuf,
}

impl CsvProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MarketDataProvider for CsvProvider {
    fn name(&self) -> &str {
        "csv"
    }

    fn source(&self) -> DataSource {
        DataSource::CsvFile
    }

    fn load(&self) -> Result<MarketData, DataError> {
        log::debug!("loading bars from {}", self.path.display());
        read_csv_file(&self.path)
    }
}

/// Deterministic random-walk bars for development and benchmarks.
#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    pub seed: u64,
    pub start: NaiveDate,
    pub bars: usize,
}

impl MarketDataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn source(&self) -> DataSource {
        DataSource::Synthetic
    }

    fn load(&self) -> Result<MarketData, DataError> {
        MarketData::new(generate_synthetic_bars(self.seed, self.start, self.bars))
    }
}
