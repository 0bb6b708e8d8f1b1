//! Bar: the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily OHLCV bar.
///
/// `volume` is a float because upstream sources report it that way and may
/// leave it missing. Missing values are cleaned to zero once, when a
/// [`MarketData`](crate::data::MarketData) series is built; strategies never
/// see a NaN volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Returns true if any price field is NaN.
    pub fn is_void(&self) -> bool {
        self.open.is_nan() || self.high.is_nan() || self.low.is_nan() || self.close.is_nan()
    }

    /// Whether the volume field needs cleaning (NaN, infinite or negative).
    pub fn has_missing_volume(&self) -> bool {
        !self.volume.is_finite() || self.volume < 0.0
    }
}
