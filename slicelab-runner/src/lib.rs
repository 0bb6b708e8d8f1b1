//! Slicelab Runner: run orchestration, sweeps, summaries, artifacts.
//!
//! This crate builds on `slicelab-core` to provide:
//! - TOML run configuration with content-addressed run ids
//! - Data loading from CSV or seeded synthetic bars
//! - Single runs comparing TWAP and VWAP over one window
//! - Parallel start-index sweeps with slippage statistics
//! - Console summaries and JSON/CSV artifacts

pub mod config;
pub mod data_loader;
pub mod export;
pub mod runner;
pub mod summary;
pub mod sweep;

pub use config::{ConfigError, DataConfig, ExecutionSection, RunConfig, StartError, StartPoint};
pub use data_loader::{load_from, load_market_data, LoadError, LoadedData};
pub use export::{export_json, export_slices_csv, export_sweep_csv, import_json, save_artifacts};
pub use runner::{run_execution, run_on_data, Comparison, RunError, RunReport, StrategyRun};
pub use summary::{render_comparison, render_report, render_sweep, ExecutionSummary};
pub use sweep::{sweep_start_indices, SlippageStats, SweepConfig, SweepPoint, SweepResult};
