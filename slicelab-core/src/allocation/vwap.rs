//! VWAP: size proportional to each day's historical volume.
//!
//! Trading more when liquidity is higher approximates minimizing market
//! impact. Volumes are already cleaned by `MarketData` (missing → 0). A
//! window with no volume at all falls back to uniform weights, which makes
//! the result identical to TWAP.

use super::AllocationPolicy;
use crate::domain::Bar;
use crate::engine::ExecutionObserver;

/// Volume-weighted allocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vwap;

impl AllocationPolicy for Vwap {
    fn name(&self) -> &str {
        "vwap"
    }

    fn weights(&self, window: &[Bar], observer: &dyn ExecutionObserver) -> Vec<f64> {
        let total_volume: f64 = window.iter().map(|b| b.volume).sum();
        if total_volume == 0.0 {
            observer.on_zero_volume_window(window.len());
            return vec![1.0; window.len()];
        }
        if total_volume.is_finite() {
            return window.iter().map(|b| b.volume).collect();
        }
        // Finite volumes whose sum overflows: scale by the largest so the total stays finite.
        let max_volume = window.iter().map(|b| b.volume).fold(0.0_f64, f64::max);
        window.iter().map(|b| b.volume / max_volume).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::NullObserver;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn window(volumes: &[f64]) -> Vec<Bar> {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        volumes
            .iter()
            .map(|&v| Bar::new(date, 1.0, 1.0, 1.0, 1.0, v))
            .collect()
    }

    #[derive(Default)]
    struct CountingObserver {
        zero_volume: AtomicUsize,
    }

    impl ExecutionObserver for CountingObserver {
        fn on_zero_volume_window(&self, _window_len: usize) {
            self.zero_volume.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn weights_follow_volume() {
        let weights = Vwap.weights(&window(&[10.0, 30.0, 0.0]), &NullObserver);
        assert_eq!(weights, vec![10.0, 30.0, 0.0]);
    }

    #[test]
    fn overflowing_volume_sum_is_rescaled() {
        let weights = Vwap.weights(&window(&[1e308, 1e308, 0.0]), &NullObserver);
        assert_eq!(weights, vec![1.0, 1.0, 0.0]);
        assert!(weights.iter().sum::<f64>().is_finite());
    }

    #[test]
    fn zero_volume_falls_back_to_uniform() {
        let observer = CountingObserver::default();
        let weights = Vwap.weights(&window(&[0.0, 0.0, 0.0, 0.0]), &observer);
        assert_eq!(weights, vec![1.0; 4]);
        assert_eq!(observer.zero_volume.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn nonzero_volume_does_not_notify() {
        let observer = CountingObserver::default();
        Vwap.weights(&window(&[0.0, 5.0]), &observer);
        assert_eq!(observer.zero_volume.load(Ordering::Relaxed), 0);
    }
}
