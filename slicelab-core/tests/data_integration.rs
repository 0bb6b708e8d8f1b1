//! Integration tests for the CSV → MarketData → execution pipeline.

use std::io::Write;

use slicelab_core::data::{read_csv, CsvProvider, DataError, DataSource, MarketDataProvider};
use slicelab_core::{execute_twap, execute_vwap, Order, Side};

const SAMPLE: &str = "\
Date,Open,High,Low,Close,Adj Close,Volume
2024-01-02,99.5,100.5,99.0,100.0,100.0,1000
2024-01-03,100.0,101.5,99.5,101.0,101.0,
2024-01-04,101.0,102.5,100.5,102.0,102.0,3000
2024-01-05,102.0,103.5,101.5,103.0,103.0,NaN
2024-01-08,103.0,104.5,102.5,104.0,104.0,1000
";

#[test]
fn csv_to_twap_scenario() {
    let data = read_csv(SAMPLE.as_bytes()).unwrap();
    assert_eq!(data.len(), 5);
    assert_eq!(data.missing_volume_count(), 2);

    let order = Order::new(1000.0, Side::Buy, 5).unwrap();
    let result = execute_twap(&data, &order, 0).unwrap();
    assert_eq!(result.total_cost, 102_000.0);
    assert_eq!(result.avg_price, 102.0);
}

#[test]
fn csv_missing_volume_excluded_from_vwap() {
    let data = read_csv(SAMPLE.as_bytes()).unwrap();
    let order = Order::new(500.0, Side::Buy, 5).unwrap();

    let result = execute_vwap(&data, &order, 0).unwrap();

    // 1000 + 0 + 3000 + 0 + 1000 = 5000
    let sizes: Vec<f64> = result.slices.iter().map(|s| s.size).collect();
    assert_eq!(sizes, vec![100.0, 0.0, 300.0, 0.0, 100.0]);
    assert_eq!(result.total_cost, 100.0 * 100.0 + 300.0 * 102.0 + 100.0 * 104.0);
}

#[test]
fn provider_reads_file_from_disk() {
    let path = std::env::temp_dir().join(format!("slicelab_core_{}.csv", std::process::id()));
    {
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
    }

    let provider = CsvProvider::new(&path);
    let data = provider.load().unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(provider.source(), DataSource::CsvFile);
    assert_eq!(data.len(), 5);
}

#[test]
fn unordered_rows_are_rejected() {
    let csv = "Date,Open,High,Low,Close,Volume\n\
               2024-01-03,1,1,1,1,1\n\
               2024-01-02,1,1,1,1,1\n";
    let err = read_csv(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, DataError::NotChronological { .. }));
}

#[test]
fn header_only_file_is_empty() {
    let csv = "Date,Open,High,Low,Close,Volume\n";
    assert!(matches!(read_csv(csv.as_bytes()), Err(DataError::Empty)));
}
