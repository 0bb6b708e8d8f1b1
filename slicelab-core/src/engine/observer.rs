//! Diagnostic events raised during execution.
//!
//! The engine owns no logging configuration. It reports noteworthy
//! conditions through this trait and the host decides how to surface them.

use crate::domain::ExecutionResult;

/// Callback for execution diagnostics. Every method defaults to a no-op.
pub trait ExecutionObserver: Send + Sync {
    /// The requested window runs past the end of the data. The call fails
    /// with `ExecutionError::InsufficientData` right after this.
    fn on_insufficient_data(&self, _requested: usize, _available: usize) {}

    /// A VWAP window had zero total volume and was allocated uniformly.
    fn on_zero_volume_window(&self, _window_len: usize) {}

    /// An execution completed.
    fn on_executed(&self, _policy: &str, _result: &ExecutionResult) {}
}

/// Ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl ExecutionObserver for NullObserver {}

/// Forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl ExecutionObserver for LogObserver {
    fn on_insufficient_data(&self, requested: usize, available: usize) {
        log::warn!("not enough data: window needs {requested} bars, {available} available");
    }

    fn on_zero_volume_window(&self, window_len: usize) {
        log::warn!("zero total volume over {window_len} bars; allocating uniformly");
    }

    fn on_executed(&self, policy: &str, result: &ExecutionResult) {
        log::debug!(
            "{policy}: {} slices, avg {:.4}, slippage {:+.2} bps",
            result.slices.len(),
            result.avg_price,
            result.slippage_bps
        );
    }
}
