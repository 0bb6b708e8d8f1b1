//! Artifact export: JSON report and CSV slice tapes.
//!
//! Persisted reports carry a `schema_version`. Unknown versions are
//! rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use slicelab_core::ExecutionResult;

use crate::runner::{RunReport, SCHEMA_VERSION};
use crate::sweep::SweepResult;

/// Length of the run-id prefix used for artifact directories.
const RUN_DIR_PREFIX_LEN: usize = 12;

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `RunReport` to pretty JSON.
pub fn export_json(report: &RunReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize RunReport to JSON")
}

/// Deserialize a `RunReport` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<RunReport> {
    let report: RunReport =
        serde_json::from_str(json).context("failed to deserialize RunReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export execution slices as CSV.
///
/// Columns: day, date, size, price, cost
pub fn export_slices_csv(result: &ExecutionResult) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["day", "date", "size", "price", "cost"])?;
    for slice in &result.slices {
        wtr.write_record([
            slice.day.to_string(),
            slice.date.to_string(),
            slice.size.to_string(),
            slice.price.to_string(),
            slice.cost.to_string(),
        ])?;
    }
    let bytes = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

/// Export sweep points as CSV.
///
/// Columns: start_index, start_date, strategy, avg_price, benchmark_price, slippage_bps
pub fn export_sweep_csv(result: &SweepResult) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "start_index",
        "start_date",
        "strategy",
        "avg_price",
        "benchmark_price",
        "slippage_bps",
    ])?;
    for p in &result.points {
        wtr.write_record([
            p.start_index.to_string(),
            p.start_date.to_string(),
            p.strategy.to_string(),
            p.avg_price.to_string(),
            p.benchmark_price.to_string(),
            p.slippage_bps.to_string(),
        ])?;
    }
    let bytes = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

// ─── Artifacts on disk ──────────────────────────────────────────────

/// Save the artifact set for a run:
/// - `report.json`: full report
/// - `<strategy>_slices.csv`: slice tape per strategy
///
/// Files go to `<output_dir>/<run id prefix>/`; the directory is returned.
pub fn save_artifacts(report: &RunReport, output_dir: &Path) -> Result<PathBuf> {
    let prefix_len = report.run_id.len().min(RUN_DIR_PREFIX_LEN);
    let run_dir = output_dir.join(&report.run_id[..prefix_len]);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create {}", run_dir.display()))?;

    std::fs::write(run_dir.join("report.json"), export_json(report)?)?;
    for run in &report.runs {
        let csv = export_slices_csv(&run.result)?;
        std::fs::write(run_dir.join(format!("{}_slices.csv", run.strategy)), csv)?;
    }

    log::info!("artifacts written to {}", run_dir.display());
    Ok(run_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DataConfig, ExecutionSection, RunConfig, StartPoint};
    use crate::data_loader::LoadedData;
    use crate::runner::run_on_data;
    use chrono::NaiveDate;
    use slicelab_core::data::DataSource;
    use slicelab_core::{Bar, MarketData, NullObserver, Order, Side, Strategy};

    fn report() -> RunReport {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = [100.0, 101.0, 102.0, 103.0, 104.0]
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(base + chrono::Duration::days(i as i64), c, c, c, c, 10.0))
            .collect();
        let loaded =
            LoadedData::from_market_data(MarketData::new(bars).unwrap(), DataSource::CsvFile);
        let config = RunConfig {
            data: DataConfig::csv("bars.csv"),
            order: Order::new(1000.0, Side::Buy, 5).unwrap(),
            execution: ExecutionSection {
                strategies: Strategy::ALL.to_vec(),
                start: StartPoint::Index(0),
            },
        };
        run_on_data(&loaded, &config, &NullObserver).unwrap()
    }

    #[test]
    fn json_round_trip_preserves_report() {
        let report = report();
        let json = export_json(&report).unwrap();
        let back = import_json(&json).unwrap();
        assert_eq!(report, back);
    }

    #[test]
    fn json_round_trip_is_exact_on_fractional_prices() {
        for seed in 0..20 {
            let config = RunConfig {
                data: DataConfig::synthetic(120, seed),
                order: Order::new(12_345.0, Side::Buy, 10).unwrap(),
                execution: ExecutionSection::default(),
            };
            let report = crate::runner::run_execution(&config).unwrap();

            let back = import_json(&export_json(&report).unwrap()).unwrap();

            assert_eq!(back, report, "seed {seed}");
            for run in &back.runs {
                let sum: f64 = run.result.slices.iter().map(|s| s.cost).sum();
                assert_eq!(run.result.total_cost, sum);
                for slice in &run.result.slices {
                    assert_eq!(slice.cost, slice.size * slice.price);
                }
            }
        }
    }

    #[test]
    fn future_schema_rejected() {
        let mut report = report();
        report.schema_version = SCHEMA_VERSION + 1;
        let json = export_json(&report).unwrap();
        assert!(import_json(&json).is_err());
    }

    #[test]
    fn slices_csv_columns_and_rows() {
        let report = report();
        let csv = export_slices_csv(report.result(Strategy::Twap).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "day,date,size,price,cost");
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "1,2024-01-01,200,100,20000");
        assert_eq!(lines[5], "5,2024-01-05,200,104,20800");
    }

    #[test]
    fn artifacts_written_under_run_dir() {
        let dir = tempfile::tempdir().unwrap();
        let report = report();

        let run_dir = save_artifacts(&report, dir.path()).unwrap();

        assert!(run_dir.starts_with(dir.path()));
        assert!(run_dir.join("report.json").exists());
        assert!(run_dir.join("twap_slices.csv").exists());
        assert!(run_dir.join("vwap_slices.csv").exists());

        let json = std::fs::read_to_string(run_dir.join("report.json")).unwrap();
        assert_eq!(import_json(&json).unwrap(), report);
    }
}
