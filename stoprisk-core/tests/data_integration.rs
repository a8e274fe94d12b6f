//! Integration tests for file feeds and TOML request files.
//!
//! Each test writes its fixtures into a fresh temporary directory, loads them
//! through the public API and runs the engine on the result.

use std::fs;
use std::path::Path;
use stoprisk_core::config::{ConfigError, RequestConfig};
use stoprisk_core::data::{open_feed, CandleFeed, CsvFeed, FeedError, JsonFeed};
use stoprisk_core::domain::BarInterval;
use stoprisk_core::risk::calculate;
use stoprisk_core::RiskError;
use tempfile::TempDir;

/// 15 hourly candles, close 100, high/low ±0.5 (every True Range is 1).
fn unit_range_csv() -> String {
    let mut out = String::from("timestamp,open,high,low,close,volume\n");
    for h in 0..15 {
        out.push_str(&format!(
            "2024-05-01T{h:02}:00:00Z,100.0,100.5,99.5,100.0,12.5\n"
        ));
    }
    out
}

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn csv_feed_loads_and_ignores_extra_columns() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "btc.csv", &unit_range_csv());

    let series = CsvFeed::new(&path)
        .series(BarInterval::OneHour, None)
        .unwrap();
    assert_eq!(series.len(), 15);
    assert_eq!(series.last_close(), Some(100.0));
    assert!(series.is_chronological());
}

#[test]
fn json_feed_loads_candle_objects() {
    let dir = TempDir::new().unwrap();
    let json = r#"[
        {"timestamp": "2024-05-01T00:00:00Z", "open": 10.0, "high": 11.0, "low": 9.0, "close": 10.5},
        {"timestamp": "2024-05-01T04:00:00Z", "open": 10.5, "high": 12.0, "low": 10.0, "close": 11.5}
    ]"#;
    let path = write(dir.path(), "eth.json", json);

    let series = JsonFeed::new(&path)
        .series(BarInterval::FourHours, None)
        .unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series.last_close(), Some(11.5));
}

#[test]
fn newest_first_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let csv = "timestamp,open,high,low,close\n\
               2024-05-01T01:00:00Z,100,101,99,100\n\
               2024-05-01T00:00:00Z,100,101,99,100\n";
    let path = write(dir.path(), "rev.csv", csv);

    let err = open_feed(&path)
        .unwrap()
        .series(BarInterval::OneHour, None)
        .unwrap_err();
    assert!(matches!(err, FeedError::OutOfOrder { index: 1 }));
}

#[test]
fn malformed_csv_is_a_csv_error() {
    let dir = TempDir::new().unwrap();
    let csv = "timestamp,open,high,low,close\nyesterday,1,2,0.5,1\n";
    let path = write(dir.path(), "bad.csv", csv);

    let err = CsvFeed::new(&path).load().unwrap_err();
    assert!(matches!(err, FeedError::Csv(_)));
}

#[test]
fn config_file_end_to_end() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "btc.csv", &unit_range_csv());
    let config_path = write(
        dir.path(),
        "request.toml",
        r#"
[market]
candles = "btc.csv"
interval = "1H"

[volatility]
period = 14

[position]
side = "long"
notional = 100.0

[stop]
percent = 5.0
"#,
    );

    let config = RequestConfig::from_file(&config_path).unwrap();
    let request = config.build_request().unwrap();
    let result = calculate(&request).unwrap();

    assert!((result.atr_value - 1.0).abs() < 1e-9);
    assert!((result.loss_amount - 5.0).abs() < 1e-9);
    assert!((result.median_hitting_hours() - 12.5).abs() < 1e-9);
}

#[test]
fn config_limit_can_starve_atr() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "btc.csv", &unit_range_csv());
    let config_path = write(
        dir.path(),
        "request.toml",
        r#"
[market]
candles = "btc.csv"
limit = 10

[position]
side = "short"
notional = 100.0

[stop]
level = 101.0
"#,
    );

    let request = RequestConfig::from_file(&config_path)
        .unwrap()
        .build_request()
        .unwrap();
    assert_eq!(request.series.len(), 10);
    assert_eq!(
        calculate(&request),
        Err(RiskError::InsufficientData {
            needed: 15,
            available: 10
        })
    );
}

#[test]
fn config_with_missing_candle_file() {
    let dir = TempDir::new().unwrap();
    let config_path = write(
        dir.path(),
        "request.toml",
        r#"
[market]
candles = "missing.csv"

[position]
side = "long"
notional = 100.0

[stop]
percent = 1.0
"#,
    );

    let err = RequestConfig::from_file(&config_path)
        .unwrap()
        .build_request()
        .unwrap_err();
    assert!(matches!(err, ConfigError::Feed(FeedError::Csv(_))));
}

#[test]
fn missing_config_file() {
    let dir = TempDir::new().unwrap();
    let err = RequestConfig::from_file(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}
