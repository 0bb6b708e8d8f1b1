//! Market data: validated bar series, CSV ingestion, synthetic bars.

pub mod ingest;
pub mod market_data;
pub mod provider;
pub mod synthetic;

pub use ingest::{read_csv, read_csv_file};
pub use market_data::{DataError, MarketData};
pub use provider::{CsvProvider, DataSource, MarketDataProvider, SyntheticProvider};
pub use synthetic::generate_synthetic_bars;
