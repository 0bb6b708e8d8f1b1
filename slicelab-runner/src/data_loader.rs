//! Bar loading and data provenance for the runner.
//!
//! Resolves the `[data]` section to a provider, loads the series once and
//! fingerprints it so reports can say exactly which bars they were built on.
//! Synthetic data is a developer-only mode; results built on it are tagged.

use chrono::NaiveDate;
use slicelab_core::data::{
    CsvProvider, DataError, DataSource, MarketDataProvider, SyntheticProvider,
};
use slicelab_core::MarketData;
use thiserror::Error;

use crate::config::DataConfig;

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no data source configured (set data.path or data.synthetic = true)")]
    NoDataSource,

    #[error("data error: {0}")]
    Data(#[from] DataError),
}

/// Loaded bars plus provenance.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub data: MarketData,
    pub source: DataSource,
    /// BLAKE3 hash over every date and OHLCV value.
    pub dataset_hash: String,
    pub has_synthetic: bool,
}

impl LoadedData {
    /// Wrap an already-built series (tests, embedding hosts).
    pub fn from_market_data(data: MarketData, source: DataSource) -> Self {
        let dataset_hash = compute_dataset_hash(&data);
        Self {
            data,
            source,
            dataset_hash,
            has_synthetic: source == DataSource::Synthetic,
        }
    }
}

/// Load bars described by a `[data]` section.
pub fn load_market_data(config: &DataConfig) -> Result<LoadedData, LoadError> {
    if config.synthetic {
        let start = synthetic_start();
        log::warn!(
            "generating {} synthetic bars (seed {}); results will be tagged as synthetic",
            config.synthetic_bars,
            config.seed
        );
        let provider = SyntheticProvider {
            seed: config.seed,
            start,
            bars: config.synthetic_bars,
        };
        return load_from(&provider);
    }

    match &config.path {
        Some(path) => load_from(&CsvProvider::new(path)),
        None => Err(LoadError::NoDataSource),
    }
}

/// Load bars from any provider.
pub fn load_from(provider: &dyn MarketDataProvider) -> Result<LoadedData, LoadError> {
    let data = provider.load()?;
    log::info!(
        "loaded {} bars from {} ({} to {})",
        data.len(),
        provider.name(),
        data.first_date(),
        data.last_date()
    );
    Ok(LoadedData::from_market_data(data, provider.source()))
}

/// First calendar day of generated synthetic series.
fn synthetic_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 2).unwrap_or_default()
}

/// Compute a deterministic BLAKE3 hash over all bar data.
pub fn compute_dataset_hash(data: &MarketData) -> String {
    let mut hasher = blake3::Hasher::new();
    for bar in data.bars() {
        hasher.update(bar.date.to_string().as_bytes());
        hasher.update(&bar.open.to_le_bytes());
        hasher.update(&bar.high.to_le_bytes());
        hasher.update(&bar.low.to_le_bytes());
        hasher.update(&bar.close.to_le_bytes());
        hasher.update(&bar.volume.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}
