//! Candle feeds: where price series come from.

pub mod feed;
pub mod file;

pub use feed::{validate_candles, CandleFeed, FeedError, StaticFeed};
pub use file::{open_feed, CsvFeed, JsonFeed};
