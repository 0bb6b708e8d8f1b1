//! Start-index sweeps: how does slippage vary with when the order starts?
//!
//! Every valid start index (optionally strided) is executed with each
//! strategy. Executions are independent and only borrow the series, so they
//! run in parallel with rayon.

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use slicelab_core::{ExecutionError, MarketData, NullObserver, Order, Strategy};

use crate::config::ConfigError;
use crate::runner::RunError;

/// Sweep parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub strategies: Vec<Strategy>,
    /// Evaluate every `stride`-th start index (1 = every index).
    pub stride: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            strategies: Strategy::ALL.to_vec(),
            stride: 1,
        }
    }
}

/// One execution within a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub start_index: usize,
    pub start_date: NaiveDate,
    pub strategy: Strategy,
    pub avg_price: f64,
    pub benchmark_price: f64,
    pub slippage_bps: f64,
}

/// Summary statistics of slippage samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlippageStats {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl SlippageStats {
    /// `None` for an empty sample.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
        Some(Self {
            count: samples.len(),
            mean,
            std_dev: variance.sqrt(),
            min: samples.iter().copied().fold(f64::INFINITY, f64::min),
            max: samples.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }
}

/// Per-strategy statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyStats {
    pub strategy: Strategy,
    pub stats: SlippageStats,
}

/// Full sweep output, points ordered by start index then strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    pub order: Order,
    pub points: Vec<SweepPoint>,
    pub stats: Vec<StrategyStats>,
}

impl SweepResult {
    pub fn stats_for(&self, strategy: Strategy) -> Option<&SlippageStats> {
        self.stats
            .iter()
            .find(|s| s.strategy == strategy)
            .map(|s| &s.stats)
    }
}

/// Start indices whose full window fits inside `data`.
pub fn valid_start_indices(data: &MarketData, num_slices: usize, stride: usize) -> Vec<usize> {
    if num_slices > data.len() {
        return Vec::new();
    }
    let last = data.len() - num_slices;
    (0..=last).step_by(stride.max(1)).collect()
}

/// Execute `order` at every valid start index with every configured strategy.
pub fn sweep_start_indices(
    data: &MarketData,
    order: &Order,
    config: &SweepConfig,
) -> Result<SweepResult, RunError> {
    if config.stride == 0 {
        return Err(ConfigError::Invalid("sweep stride must be at least 1".into()).into());
    }
    if order.num_slices() > data.len() {
        return Err(ExecutionError::InsufficientData {
            start_idx: 0,
            requested: order.num_slices(),
            available: data.len(),
        }
        .into());
    }

    let starts = valid_start_indices(data, order.num_slices(), config.stride);
    log::info!(
        "sweeping {} start indices x {} strategies",
        starts.len(),
        config.strategies.len()
    );

    let per_start: Vec<Vec<SweepPoint>> = starts
        .par_iter()
        .map(|&start| {
            config
                .strategies
                .iter()
                .map(|&strategy| -> Result<SweepPoint, ExecutionError> {
                    let result = strategy.execute(data, order, start, &NullObserver)?;
                    Ok(SweepPoint {
                        start_index: start,
                        start_date: result.start_date().unwrap_or_else(|| data.first_date()),
                        strategy,
                        avg_price: result.avg_price,
                        benchmark_price: result.benchmark_price,
                        slippage_bps: result.slippage_bps,
                    })
                })
                .collect::<Result<Vec<_>, ExecutionError>>()
        })
        .collect::<Result<Vec<_>, ExecutionError>>()?;

    let points: Vec<SweepPoint> = per_start.into_iter().flatten().collect();

    let stats = config
        .strategies
        .iter()
        .filter_map(|&strategy| {
            let samples: Vec<f64> = points
                .iter()
                .filter(|p| p.strategy == strategy)
                .map(|p| p.slippage_bps)
                .collect();
            SlippageStats::from_samples(&samples).map(|stats| StrategyStats { strategy, stats })
        })
        .collect();

    Ok(SweepResult {
        order: order.clone(),
        points,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use slicelab_core::{Bar, Side};

    fn market(closes: &[f64]) -> MarketData {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        MarketData::new(
            closes
                .iter()
                .enumerate()
                .map(|(i, &c)| Bar::new(base + chrono::Duration::days(i as i64), c, c, c, c, 1.0))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn stats_from_samples() {
        let stats = SlippageStats::from_samples(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert!((stats.std_dev - 1.25_f64.sqrt()).abs() < 1e-12);
        assert!(SlippageStats::from_samples(&[]).is_none());
    }

    #[test]
    fn valid_starts_respect_window_and_stride() {
        let data = market(&[1.0; 10]);
        assert_eq!(valid_start_indices(&data, 4, 1), (0..=6).collect::<Vec<_>>());
        assert_eq!(valid_start_indices(&data, 4, 3), vec![0, 3, 6]);
        assert_eq!(valid_start_indices(&data, 10, 1), vec![0]);
        assert!(valid_start_indices(&data, 11, 1).is_empty());
    }

    #[test]
    fn sweep_covers_every_start_in_order() {
        let data = market(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        let order = Order::new(100.0, Side::Buy, 2).unwrap();

        let result = sweep_start_indices(&data, &order, &SweepConfig::default()).unwrap();

        assert_eq!(result.points.len(), 5 * 2);
        let starts: Vec<usize> = result.points.iter().map(|p| p.start_index).collect();
        assert_eq!(starts, vec![0, 0, 1, 1, 2, 2, 3, 3, 4, 4]);
        assert_eq!(result.points[0].strategy, Strategy::Twap);
        assert_eq!(result.points[1].strategy, Strategy::Vwap);

        // Uniform volume: both strategies agree at every start.
        let twap = result.stats_for(Strategy::Twap).unwrap();
        let vwap = result.stats_for(Strategy::Vwap).unwrap();
        assert_eq!(twap.count, 5);
        assert_eq!(twap, vwap);
        assert!(twap.min > 0.0);
    }

    #[test]
    fn zero_stride_rejected() {
        let data = market(&[1.0; 5]);
        let order = Order::new(1.0, Side::Buy, 2).unwrap();
        let config = SweepConfig {
            strategies: vec![Strategy::Twap],
            stride: 0,
        };
        assert!(matches!(
            sweep_start_indices(&data, &order, &config),
            Err(RunError::Config(_))
        ));
    }

    #[test]
    fn order_longer_than_data_rejected() {
        let data = market(&[1.0; 3]);
        let order = Order::new(1.0, Side::Buy, 4).unwrap();
        assert!(matches!(
            sweep_start_indices(&data, &order, &SweepConfig::default()),
            Err(RunError::Execution(ExecutionError::InsufficientData { .. }))
        ));
    }
}
