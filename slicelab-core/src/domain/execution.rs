//! Execution output: per-day slices and the aggregate result.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One scheduled partial execution on a single day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSlice {
    /// 1-based position inside the execution window.
    pub day: usize,
    pub date: NaiveDate,
    pub size: f64,
    /// Closing price of the bar the slice executed on.
    pub price: f64,
    /// `size * price`.
    pub cost: f64,
}

/// Result of executing one order with one allocation policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub slices: Vec<ExecutionSlice>,
    pub total_cost: f64,
    pub avg_price: f64,
    /// Close at the window's first bar, independent of the policy.
    pub benchmark_price: f64,
    /// Positive when execution was more expensive than the benchmark.
    pub slippage_bps: f64,
}

impl ExecutionResult {
    /// Sum of slice sizes. Equals the order size up to rounding.
    pub fn executed_size(&self) -> f64 {
        self.slices.iter().map(|s| s.size).sum()
    }

    /// Cost paid above (or below, when negative) executing everything at the benchmark.
    pub fn cost_vs_benchmark(&self) -> f64 {
        self.total_cost - self.benchmark_price * self.executed_size()
    }

    /// Date of the first executed slice.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.slices.first().map(|s| s.date)
    }
}
