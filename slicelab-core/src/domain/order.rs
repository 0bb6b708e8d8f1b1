//! Parent order: how much to trade, which way, and in how many slices.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExecutionError;

/// Slice count used when the caller does not choose one.
pub const DEFAULT_NUM_SLICES: usize = 10;

/// Order direction.
///
/// Carried for reporting only: neither allocation nor cost accounting
/// depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            other => Err(format!("unknown order direction '{other}' (expected buy or sell)")),
        }
    }
}

/// Immutable parent order.
///
/// Construction validates the size and slice count, so every `Order` value
/// is executable. Deserialization goes through the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OrderParams")]
pub struct Order {
    size: f64,
    direction: Side,
    num_slices: usize,
}

impl Order {
    /// Create an order, rejecting a non-positive size or a zero slice count.
    pub fn new(size: f64, direction: Side, num_slices: usize) -> Result<Self, ExecutionError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(ExecutionError::InvalidOrderSize { size });
        }
        if num_slices == 0 {
            return Err(ExecutionError::InvalidSliceCount { num_slices });
        }
        Ok(Self {
            size,
            direction,
            num_slices,
        })
    }

    /// Create an order split into [`DEFAULT_NUM_SLICES`] slices.
    pub fn with_default_slices(size: f64, direction: Side) -> Result<Self, ExecutionError> {
        Self::new(size, direction, DEFAULT_NUM_SLICES)
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn direction(&self) -> Side {
        self.direction
    }

    pub fn num_slices(&self) -> usize {
        self.num_slices
    }
}

/// Unvalidated order fields as they appear in config files.
#[derive(Debug, Clone, Deserialize)]
struct OrderParams {
    size: f64,
    direction: Side,
    #[serde(default = "default_num_slices")]
    num_slices: usize,
}

fn default_num_slices() -> usize {
    DEFAULT_NUM_SLICES
}

impl TryFrom<OrderParams> for Order {
    type Error = ExecutionError;

    fn try_from(params: OrderParams) -> Result<Self, Self::Error> {
        Order::new(params.size, params.direction, params.num_slices)
    }
}
