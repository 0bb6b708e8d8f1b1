//! Execution runner: wires together data loading, start resolution and
//! the engine.
//!
//! Two entry points:
//! - `run_execution()`: loads data described by the config, then runs. Used by the CLI.
//! - `run_on_data()`: takes pre-loaded data. Used by sweeps and tests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use slicelab_core::data::DataSource;
use slicelab_core::{
    ExecutionError, ExecutionObserver, ExecutionResult, LogObserver, Order, Strategy,
};

use crate::config::{ConfigError, RunConfig, StartError};
use crate::data_loader::{load_market_data, LoadError, LoadedData};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("data error: {0}")]
    Data(#[from] LoadError),
    #[error("start error: {0}")]
    Start(#[from] StartError),
    #[error("execution error: {0}")]
    Execution(#[from] ExecutionError),
}

/// Current schema version for persisted reports.
pub const SCHEMA_VERSION: u32 = 1;

/// One strategy's output within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRun {
    pub strategy: Strategy,
    pub result: ExecutionResult,
}

/// Complete result of a single run: every configured strategy over the same window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub run_id: String,
    pub dataset_hash: String,
    pub source: DataSource,
    pub has_synthetic: bool,
    pub bar_count: usize,
    /// Bars whose missing volume was treated as zero.
    pub missing_volume: usize,
    pub order: Order,
    pub start_index: usize,
    pub start_date: NaiveDate,
    pub runs: Vec<StrategyRun>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// TWAP vs VWAP over the same window and benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub benchmark_price: f64,
    pub twap_slippage_bps: f64,
    pub vwap_slippage_bps: f64,
    /// VWAP minus TWAP; negative means VWAP executed cheaper.
    pub slippage_diff_bps: f64,
    pub cost_diff: f64,
}

impl RunReport {
    pub fn result(&self, strategy: Strategy) -> Option<&ExecutionResult> {
        self.runs
            .iter()
            .find(|r| r.strategy == strategy)
            .map(|r| &r.result)
    }

    /// Side-by-side comparison, available when both strategies ran.
    pub fn comparison(&self) -> Option<Comparison> {
        let twap = self.result(Strategy::Twap)?;
        let vwap = self.result(Strategy::Vwap)?;
        Some(Comparison {
            benchmark_price: twap.benchmark_price,
            twap_slippage_bps: twap.slippage_bps,
            vwap_slippage_bps: vwap.slippage_bps,
            slippage_diff_bps: vwap.slippage_bps - twap.slippage_bps,
            cost_diff: vwap.total_cost - twap.total_cost,
        })
    }
}

/// Load data described by `config` and run every configured strategy.
pub fn run_execution(config: &RunConfig) -> Result<RunReport, RunError> {
    config.validate()?;
    let loaded = load_market_data(&config.data)?;
    run_on_data(&loaded, config, &LogObserver)
}

/// Run every configured strategy over pre-loaded data.
///
/// All strategies share one start index, so their benchmark prices are
/// identical and slippage is directly comparable.
pub fn run_on_data(
    loaded: &LoadedData,
    config: &RunConfig,
    observer: &dyn ExecutionObserver,
) -> Result<RunReport, RunError> {
    let data = &loaded.data;
    let start_index = config.execution.start.resolve(data)?;

    let mut runs = Vec::with_capacity(config.execution.strategies.len());
    for &strategy in &config.execution.strategies {
        let result = strategy.execute(data, &config.order, start_index, observer)?;
        log::info!(
            "{strategy}: avg {:.4} vs benchmark {:.4} ({:+.2} bps)",
            result.avg_price,
            result.benchmark_price,
            result.slippage_bps
        );
        runs.push(StrategyRun { strategy, result });
    }

    // The engine has validated the window, so the start bar exists.
    let start_date = data
        .bar(start_index)
        .map(|b| b.date)
        .unwrap_or_else(|| data.first_date());

    Ok(RunReport {
        schema_version: SCHEMA_VERSION,
        run_id: config.run_id()?,
        dataset_hash: loaded.dataset_hash.clone(),
        source: loaded.source,
        has_synthetic: loaded.has_synthetic,
        bar_count: data.len(),
        missing_volume: data.missing_volume_count(),
        order: config.order.clone(),
        start_index,
        start_date,
        runs,
    })
}
