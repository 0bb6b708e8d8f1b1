//! Property tests for start-index sweeps.
//!
//! 1. One point per valid start and strategy
//! 2. Stats bracket the mean: min <= mean <= max, std >= 0
//! 3. Parallel sweep points match individual executions

use chrono::NaiveDate;
use proptest::prelude::*;
use slicelab_core::{Bar, MarketData, NullObserver, Order, Side, Strategy as SliceStrategy};
use slicelab_runner::{sweep_start_indices, SlippageStats, SweepConfig};

fn arb_market() -> impl Strategy<Value = MarketData> {
    prop::collection::vec((10.0..500.0_f64, 0.0..1_000_000.0_f64), 2..40).prop_map(|fields| {
        let base = NaiveDate::from_ymd_opt(2022, 3, 1).unwrap();
        let bars = fields
            .into_iter()
            .enumerate()
            .map(|(i, (c, v))| Bar::new(base + chrono::Duration::days(i as i64), c, c, c, c, v))
            .collect();
        MarketData::new(bars).unwrap()
    })
}

fn arb_case() -> impl Strategy<Value = (MarketData, usize, usize)> {
    arb_market().prop_flat_map(|data| {
        let len = data.len();
        (Just(data), 1..=len, 1usize..4)
    })
}

proptest! {
    #[test]
    fn one_point_per_start_and_strategy((data, slices, stride) in arb_case()) {
        let order = Order::new(1_000.0, Side::Buy, slices).unwrap();
        let config = SweepConfig { strategies: SliceStrategy::ALL.to_vec(), stride };

        let result = sweep_start_indices(&data, &order, &config).unwrap();

        let starts = (data.len() - slices) / stride + 1;
        prop_assert_eq!(result.points.len(), starts * 2);
        for strategy in SliceStrategy::ALL {
            prop_assert_eq!(result.stats_for(strategy).unwrap().count, starts);
        }
    }

    #[test]
    fn stats_bracket_the_mean(samples in prop::collection::vec(-500.0..500.0_f64, 1..100)) {
        let stats = SlippageStats::from_samples(&samples).unwrap();
        prop_assert!(stats.min <= stats.mean + 1e-9);
        prop_assert!(stats.mean <= stats.max + 1e-9);
        prop_assert!(stats.std_dev >= 0.0);
        prop_assert_eq!(stats.count, samples.len());
    }

    #[test]
    fn sweep_matches_individual_runs((data, slices, stride) in arb_case()) {
        let order = Order::new(2_500.0, Side::Sell, slices).unwrap();
        let config = SweepConfig { strategies: vec![SliceStrategy::Vwap], stride };

        let result = sweep_start_indices(&data, &order, &config).unwrap();

        for point in &result.points {
            let single = SliceStrategy::Vwap
                .execute(&data, &order, point.start_index, &NullObserver)
                .unwrap();
            prop_assert_eq!(point.slippage_bps, single.slippage_bps);
            prop_assert_eq!(point.benchmark_price, single.benchmark_price);
            prop_assert_eq!(point.start_date, data.bars()[point.start_index].date);
        }
    }
}
