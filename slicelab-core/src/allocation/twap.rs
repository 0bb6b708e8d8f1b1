//! TWAP: equal size on every day of the window.

use super::AllocationPolicy;
use crate::domain::Bar;
use crate::engine::ExecutionObserver;

/// Time-weighted allocation: `order.size / num_slices` per day.
#[derive(Debug, Clone, Copy, Default)]
pub struct Twap;

impl AllocationPolicy for Twap {
    fn name(&self) -> &str {
        "twap"
    }

    fn weights(&self, window: &[Bar], _observer: &dyn ExecutionObserver) -> Vec<f64> {
        vec![1.0; window.len()]
    }
}
