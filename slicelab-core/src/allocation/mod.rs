//! Allocation policies: how a parent order is spread across the window.
//!
//! A policy only decides relative weights per bar. Sizing, pricing, cost and
//! slippage are shared by every policy and live in [`crate::engine`].

pub mod twap;
pub mod vwap;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::MarketData;
use crate::domain::{Bar, ExecutionResult, Order};
use crate::engine::{execute, ExecutionObserver};
use crate::error::ExecutionError;

pub use twap::Twap;
pub use vwap::Vwap;

/// Trait for allocation policies.
///
/// `weights` receives exactly `order.num_slices` bars and must return one
/// finite, non-negative weight per bar with a positive sum. The simulator
/// scales them so slice sizes add up to the order size.
pub trait AllocationPolicy: Send + Sync {
    /// Human-readable name (e.g., "twap", "vwap").
    fn name(&self) -> &str;

    /// Relative weight of each bar in the window.
    fn weights(&self, window: &[Bar], observer: &dyn ExecutionObserver) -> Vec<f64>;
}

static TWAP: Twap = Twap;
static VWAP: Vwap = Vwap;

/// Named slicing strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Twap,
    Vwap,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Twap, Strategy::Vwap];

    pub fn policy(self) -> &'static dyn AllocationPolicy {
        match self {
            Self::Twap => &TWAP,
            Self::Vwap => &VWAP,
        }
    }

    /// Execute `order` over `data` starting at `start_idx` with this strategy.
    pub fn execute(
        self,
        data: &MarketData,
        order: &Order,
        start_idx: usize,
        observer: &dyn ExecutionObserver,
    ) -> Result<ExecutionResult, ExecutionError> {
        execute(data, order, start_idx, self.policy(), observer)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.policy().name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "twap" => Ok(Self::Twap),
            "vwap" => Ok(Self::Vwap),
            other => Err(format!("unknown strategy '{other}' (expected twap or vwap)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_names_round_trip() {
        for strategy in Strategy::ALL {
            let parsed: Strategy = strategy.to_string().parse().unwrap();
            assert_eq!(parsed, strategy);
        }
        assert_eq!("VWAP".parse::<Strategy>().unwrap(), Strategy::Vwap);
        assert!("pov".parse::<Strategy>().is_err());
    }

    #[test]
    fn strategy_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Strategy::Twap).unwrap(), "\"twap\"");
        let s: Strategy = serde_json::from_str("\"vwap\"").unwrap();
        assert_eq!(s, Strategy::Vwap);
    }
}
