//! Human-readable execution summaries.

use serde::{Deserialize, Serialize};
use slicelab_core::{ExecutionResult, Order, Side, Strategy};

use crate::runner::{Comparison, RunReport};
use crate::sweep::SweepResult;

const RULE_WIDTH: usize = 60;

/// Headline numbers for one strategy's execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    pub strategy: Strategy,
    pub direction: Side,
    pub order_size: f64,
    pub num_slices: usize,
    pub benchmark_price: f64,
    pub avg_price: f64,
    pub total_cost: f64,
    pub slippage_bps: f64,
    /// Cost paid above executing the whole order at the benchmark.
    pub extra_cost: f64,
}

impl ExecutionSummary {
    pub fn new(strategy: Strategy, order: &Order, result: &ExecutionResult) -> Self {
        Self {
            strategy,
            direction: order.direction(),
            order_size: order.size(),
            num_slices: result.slices.len(),
            benchmark_price: result.benchmark_price,
            avg_price: result.avg_price,
            total_cost: result.total_cost,
            slippage_bps: result.slippage_bps,
            extra_cost: result.cost_vs_benchmark(),
        }
    }

    /// Multi-line console rendering.
    pub fn render(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let mut out = String::new();
        out.push_str(&format!("{rule}\n"));
        out.push_str(&format!(
            "EXECUTION SUMMARY ({})\n",
            self.strategy.to_string().to_uppercase()
        ));
        out.push_str(&format!("{rule}\n"));
        out.push_str(&format!(
            "  Order: {} {} shares in {} slices\n",
            self.direction.to_string().to_uppercase(),
            group_thousands(self.order_size, 0),
            self.num_slices
        ));
        out.push_str(&format!("  Benchmark price: ${:.2}\n", self.benchmark_price));
        out.push_str(&format!("  Average price: ${:.2}\n", self.avg_price));
        out.push_str(&format!(
            "  Total cost: ${}\n",
            group_thousands(self.total_cost, 2)
        ));
        out.push_str(&format!("  Slippage: {:+.2} bps\n", self.slippage_bps));
        if self.slippage_bps > 0.0 {
            out.push_str(&format!(
                "  Extra cost: ${}\n",
                group_thousands(self.extra_cost, 2)
            ));
        }
        out.push_str(&format!("{rule}\n"));
        out
    }
}

/// Summaries for every strategy in a report.
pub fn summarize_report(report: &RunReport) -> Vec<ExecutionSummary> {
    report
        .runs
        .iter()
        .map(|run| ExecutionSummary::new(run.strategy, &report.order, &run.result))
        .collect()
}

/// Full console text for a report: header, per-strategy summaries, comparison.
pub fn render_report(report: &RunReport) -> String {
    let mut out = String::new();
    if report.has_synthetic {
        out.push_str("NOTE: results are based on SYNTHETIC data\n");
    }
    out.push_str(&format!(
        "Window start: {} (index {} of {} bars)\n",
        report.start_date, report.start_index, report.bar_count
    ));
    if report.missing_volume > 0 {
        out.push_str(&format!(
            "Missing volume treated as 0 on {} bars\n",
            report.missing_volume
        ));
    }
    for summary in summarize_report(report) {
        out.push_str(&summary.render());
    }
    if let Some(cmp) = report.comparison() {
        out.push_str(&render_comparison(&cmp));
    }
    out
}

/// One-line TWAP vs VWAP comparison.
pub fn render_comparison(cmp: &Comparison) -> String {
    format!(
        "VWAP vs TWAP: {:+.2} bps ({:+.2} vs {:+.2}), cost difference ${}\n",
        cmp.slippage_diff_bps,
        cmp.vwap_slippage_bps,
        cmp.twap_slippage_bps,
        group_thousands(cmp.cost_diff, 2)
    )
}

/// Console table of per-strategy sweep statistics.
pub fn render_sweep(result: &SweepResult) -> String {
    let mut out = format!(
        "{:<8} {:>8} {:>10} {:>10} {:>10} {:>10}\n",
        "strategy", "starts", "mean bps", "std bps", "min bps", "max bps"
    );
    for entry in &result.stats {
        let s = &entry.stats;
        out.push_str(&format!(
            "{:<8} {:>8} {:>10.2} {:>10.2} {:>10.2} {:>10.2}\n",
            entry.strategy, s.count, s.mean, s.std_dev, s.min, s.max
        ));
    }
    out
}

/// Format with `,` thousands separators and `decimals` fraction digits.
fn group_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
