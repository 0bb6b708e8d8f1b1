//! Errors raised by the execution engine.

use thiserror::Error;

/// Validation and data-availability failures.
///
/// All of these are raised before any slice is computed: an execution call
/// either returns a complete result or one of these errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecutionError {
    #[error("order size must be positive (got {size})")]
    InvalidOrderSize { size: f64 },

    #[error("order must have at least one slice (got {num_slices})")]
    InvalidSliceCount { num_slices: usize },

    #[error(
        "insufficient data for requested window: start index {start_idx} needs {requested} bars, {available} available"
    )]
    InsufficientData {
        start_idx: usize,
        requested: usize,
        available: usize,
    },

    #[error("benchmark close at index {start_idx} must be positive and finite (got {price})")]
    InvalidBenchmarkPrice { start_idx: usize, price: f64 },

    #[error("allocation policy '{policy}' produced unusable weights")]
    DegenerateAllocation { policy: String },
}
