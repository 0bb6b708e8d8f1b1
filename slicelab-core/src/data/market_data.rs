//! Validated, read-only daily bar series.
//!
//! `MarketData` is the single place where raw bars are cleaned. Every
//! consumer downstream (allocation policies, the simulator, sweeps) can
//! rely on:
//! - at least one bar
//! - strictly ascending dates (no duplicates)
//! - no NaN prices
//! - finite, non-negative volume (missing values replaced by 0 and counted)

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::Bar;

/// Structured error types for data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("line {line}: cannot parse date '{value}'")]
    InvalidDate { line: usize, value: String },

    #[error("line {line}: cannot parse {column} value '{value}'")]
    InvalidNumber {
        line: usize,
        column: String,
        value: String,
    },

    #[error("bar on {date} has a NaN price")]
    VoidBar { date: NaiveDate },

    #[error("duplicate bar date {date}")]
    DuplicateDate { date: NaiveDate },

    #[error("bars out of order: {date} follows {previous}")]
    NotChronological {
        previous: NaiveDate,
        date: NaiveDate,
    },

    #[error("no bars in data set")]
    Empty,
}

/// Chronological, cleaned bar series shared read-only by every execution.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketData {
    bars: Vec<Bar>,
    missing_volume: usize,
}

impl MarketData {
    /// Validate ordering and clean missing volume.
    pub fn new(mut bars: Vec<Bar>) -> Result<Self, DataError> {
        if bars.is_empty() {
            return Err(DataError::Empty);
        }

        for pair in bars.windows(2) {
            let (previous, date) = (pair[0].date, pair[1].date);
            if date == previous {
                return Err(DataError::DuplicateDate { date });
            }
            if date < previous {
                return Err(DataError::NotChronological { previous, date });
            }
        }

        let mut missing_volume = 0;
        for bar in &mut bars {
            if bar.is_void() {
                return Err(DataError::VoidBar { date: bar.date });
            }
            if bar.has_missing_volume() {
                bar.volume = 0.0;
                missing_volume += 1;
            }
        }

        Ok(Self {
            bars,
            missing_volume,
        })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false: construction rejects empty series.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn bar(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    /// `len` bars starting at `start`, or `None` if the range runs past the end.
    pub fn window(&self, start: usize, len: usize) -> Option<&[Bar]> {
        let end = start.checked_add(len)?;
        self.bars.get(start..end)
    }

    /// Bars available from `start` to the end of the series.
    pub fn remaining_from(&self, start: usize) -> usize {
        self.bars.len().saturating_sub(start)
    }

    /// Zero-based index of the bar dated `date`.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.bars.binary_search_by_key(&date, |b| b.date).ok()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.bars[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.bars[self.bars.len() - 1].date
    }

    /// Number of bars whose volume was missing (NaN, empty, negative) and set to 0.
    pub fn missing_volume_count(&self) -> usize {
        self.missing_volume
    }
}
