//! File-backed candle feeds.
//!
//! CSV files need a header row with `timestamp,open,high,low,close`; extra
//! columns such as volume are ignored. JSON files hold an array of objects
//! with the same fields. Timestamps are RFC 3339 (`2024-05-01T13:00:00Z`).

use std::path::{Path, PathBuf};

use super::feed::{CandleFeed, FeedError};
use crate::domain::Candle;

/// Candles from a CSV file.
#[derive(Debug, Clone)]
pub struct CsvFeed {
    path: PathBuf,
    name: String,
}

impl CsvFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("csv:{}", path.display());
        Self { path, name }
    }
}

impl CandleFeed for CsvFeed {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Vec<Candle>, FeedError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)?;
        let candles = reader
            .deserialize::<Candle>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(candles)
    }
}

/// Candles from a JSON array.
#[derive(Debug, Clone)]
pub struct JsonFeed {
    path: PathBuf,
    name: String,
}

impl JsonFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("json:{}", path.display());
        Self { path, name }
    }
}

impl CandleFeed for JsonFeed {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Vec<Candle>, FeedError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| FeedError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Pick a feed by file extension (`.csv` or `.json`, case-insensitive).
pub fn open_feed(path: &Path) -> Result<Box<dyn CandleFeed>, FeedError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("csv") => Ok(Box::new(CsvFeed::new(path))),
        Some("json") => Ok(Box::new(JsonFeed::new(path))),
        _ => Err(FeedError::UnsupportedFormat(path.to_path_buf())),
    }
}
