//! CSV ingestion for daily OHLCV files.
//!
//! Expected columns (header names matched case-insensitively, extra columns
//! ignored): `Date, Open, High, Low, Close, Volume`. Rows are taken in file
//! order and must be chronological. Price fields are required; an empty or
//! `NaN` volume is a missing value and is cleaned to zero by
//! [`MarketData::new`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use super::market_data::{DataError, MarketData};
use crate::domain::Bar;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Column positions resolved from the header row.
struct Columns {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: usize,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, DataError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| DataError::MissingColumn {
                    column: name.to_string(),
                })
        };
        Ok(Self {
            date: find("Date")?,
            open: find("Open")?,
            high: find("High")?,
            low: find("Low")?,
            close: find("Close")?,
            volume: find("Volume")?,
        })
    }
}

/// Read bars from any CSV source and build a cleaned [`MarketData`].
pub fn read_csv<R: Read>(reader: R) -> Result<MarketData, DataError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?)?;

    let mut bars = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        // Header is line 1.
        let line = i + 2;
        let field = |idx: usize| record.get(idx).unwrap_or("");

        bars.push(Bar {
            date: parse_date(field(columns.date), line)?,
            open: parse_price(field(columns.open), "Open", line)?,
            high: parse_price(field(columns.high), "High", line)?,
            low: parse_price(field(columns.low), "Low", line)?,
            close: parse_price(field(columns.close), "Close", line)?,
            volume: parse_volume(field(columns.volume), line)?,
        });
    }

    let data = MarketData::new(bars)?;
    if data.missing_volume_count() > 0 {
        log::warn!(
            "{} of {} bars had missing volume; treated as 0",
            data.missing_volume_count(),
            data.len()
        );
    }
    Ok(data)
}

/// Read bars from a CSV file on disk.
pub fn read_csv_file(path: &Path) -> Result<MarketData, DataError> {
    let file = File::open(path)?;
    read_csv(file)
}

fn parse_date(value: &str, line: usize) -> Result<NaiveDate, DataError> {
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return Ok(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(dt.date());
        }
    }
    Err(DataError::InvalidDate {
        line,
        value: value.to_string(),
    })
}

fn parse_number(value: &str) -> Option<f64> {
    value.replace(',', "").parse::<f64>().ok()
}

fn parse_price(value: &str, column: &str, line: usize) -> Result<f64, DataError> {
    parse_number(value).ok_or_else(|| DataError::InvalidNumber {
        line,
        column: column.to_string(),
        value: value.to_string(),
    })
}

/// Missing markers map to NaN so `MarketData` counts and cleans them in one place.
fn parse_volume(value: &str, line: usize) -> Result<f64, DataError> {
    if value.is_empty() || matches!(value.to_ascii_lowercase().as_str(), "nan" | "na" | "null") {
        return Ok(f64::NAN);
    }
    parse_price(value, "Volume", line)
}
