//! Candle feed trait and structured error types.
//!
//! A feed supplies candles from somewhere outside the engine. The engine
//! itself never touches a feed; callers turn a feed into a
//! [`PriceSeries`](crate::domain::PriceSeries) and hand that over.

use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{BarInterval, Candle, PriceSeries};

/// Structured error types for feed operations.
///
/// These are designed to be displayable in CLI output.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported candle file '{}' (expected .csv or .json)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("feed '{feed}' returned no candles")]
    Empty { feed: String },

    #[error("candle {index} is not after the previous candle (timestamps must strictly increase)")]
    OutOfOrder { index: usize },

    #[error("candle {index} has inconsistent OHLC values")]
    InsaneCandle { index: usize },
}

/// Trait for candle sources.
///
/// Implementations only fetch; ordering and sanity checks live in
/// [`CandleFeed::series`] so every feed is held to the same rules.
pub trait CandleFeed: Send + Sync {
    /// Human-readable name of this feed.
    fn name(&self) -> &str;

    /// Fetch all candles the feed has, oldest first.
    fn load(&self) -> Result<Vec<Candle>, FeedError>;

    /// Load, validate and wrap the candles in a series.
    ///
    /// Candles are never sorted: out-of-order input is rejected. With
    /// `limit`, only the most recent `limit` candles are kept.
    fn series(&self, interval: BarInterval, limit: Option<usize>) -> Result<PriceSeries, FeedError> {
        let candles = self.load()?;
        if candles.is_empty() {
            return Err(FeedError::Empty {
                feed: self.name().to_string(),
            });
        }
        validate_candles(&candles)?;
        info!(feed = self.name(), candles = candles.len(), %interval, "loaded candles");

        let series = PriceSeries::new(candles, interval);
        Ok(match limit {
            Some(limit) => {
                debug!(limit, "trimming series to most recent candles");
                series.tail(limit)
            }
            None => series,
        })
    }
}

/// Check OHLC sanity of every candle and strict timestamp ordering.
pub fn validate_candles(candles: &[Candle]) -> Result<(), FeedError> {
    for (index, candle) in candles.iter().enumerate() {
        if !candle.is_sane() {
            return Err(FeedError::InsaneCandle { index });
        }
        if index > 0 && candles[index - 1].timestamp >= candle.timestamp {
            return Err(FeedError::OutOfOrder { index });
        }
    }
    Ok(())
}

/// In-memory feed, for callers that already hold candles.
#[derive(Debug, Clone)]
pub struct StaticFeed {
    name: String,
    candles: Vec<Candle>,
}

impl StaticFeed {
    pub fn new(name: impl Into<String>, candles: Vec<Candle>) -> Self {
        Self {
            name: name.into(),
            candles,
        }
    }
}

impl CandleFeed for StaticFeed {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Vec<Candle>, FeedError> {
        Ok(self.candles.clone())
    }
}
