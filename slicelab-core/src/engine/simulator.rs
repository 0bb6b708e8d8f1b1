//! Shared execution routine.
//!
//! Both strategies run through [`execute`]: bounds check, policy weights,
//! close-price fills, cost accumulation, slippage against the close at the
//! window start. Nothing is mutated; concurrent calls over the same
//! `MarketData` need no locking.

use crate::allocation::{AllocationPolicy, Twap, Vwap};
use crate::data::MarketData;
use crate::domain::{ExecutionResult, ExecutionSlice, Order};
use crate::error::ExecutionError;

use super::observer::{ExecutionObserver, LogObserver};

/// Slippage of `avg_price` versus `benchmark_price` in basis points.
///
/// Positive means the execution was more expensive than the benchmark.
pub fn slippage_bps(avg_price: f64, benchmark_price: f64) -> f64 {
    (avg_price - benchmark_price) / benchmark_price * 10_000.0
}

/// Execute `order` over `num_slices` consecutive bars starting at `start_idx`.
///
/// Fails before computing anything if the window runs past the data, if the
/// benchmark close is unusable, or if the policy returns unusable weights.
pub fn execute(
    data: &MarketData,
    order: &Order,
    start_idx: usize,
    policy: &dyn AllocationPolicy,
    observer: &dyn ExecutionObserver,
) -> Result<ExecutionResult, ExecutionError> {
    let requested = order.num_slices();
    let Some(window) = data.window(start_idx, requested) else {
        let available = data.remaining_from(start_idx);
        observer.on_insufficient_data(requested, available);
        return Err(ExecutionError::InsufficientData {
            start_idx,
            requested,
            available,
        });
    };

    let benchmark_price = window[0].close;
    if !(benchmark_price.is_finite() && benchmark_price > 0.0) {
        return Err(ExecutionError::InvalidBenchmarkPrice {
            start_idx,
            price: benchmark_price,
        });
    }

    let weights = policy.weights(window, observer);
    let total_weight: f64 = weights.iter().sum();
    let usable = weights.len() == window.len()
        && weights.iter().all(|w| w.is_finite() && *w >= 0.0)
        && total_weight.is_finite()
        && total_weight > 0.0;
    if !usable {
        return Err(ExecutionError::DegenerateAllocation {
            policy: policy.name().to_string(),
        });
    }

    let slices: Vec<ExecutionSlice> = window
        .iter()
        .zip(&weights)
        .enumerate()
        .map(|(i, (bar, weight))| {
            let size = order.size() * weight / total_weight;
            ExecutionSlice {
                day: i + 1,
                date: bar.date,
                size,
                price: bar.close,
                cost: size * bar.close,
            }
        })
        .collect();

    let total_cost: f64 = slices.iter().map(|s| s.cost).sum();
    let avg_price = total_cost / order.size();

    let result = ExecutionResult {
        slices,
        total_cost,
        avg_price,
        benchmark_price,
        slippage_bps: slippage_bps(avg_price, benchmark_price),
    };
    observer.on_executed(policy.name(), &result);
    Ok(result)
}

/// TWAP execution with diagnostics sent to the `log` facade.
pub fn execute_twap(
    data: &MarketData,
    order: &Order,
    start_idx: usize,
) -> Result<ExecutionResult, ExecutionError> {
    execute(data, order, start_idx, &Twap, &LogObserver)
}

/// VWAP execution with diagnostics sent to the `log` facade.
pub fn execute_vwap(
    data: &MarketData,
    order: &Order,
    start_idx: usize,
) -> Result<ExecutionResult, ExecutionError> {
    execute(data, order, start_idx, &Vwap, &LogObserver)
}
