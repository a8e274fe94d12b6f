//! PriceSeries: candles at a fixed sampling interval.

use super::{BarInterval, Candle};

/// Candles ordered ascending by timestamp, plus their sampling interval.
///
/// Built once per calculation and never reordered. Ordering is the feed's
/// responsibility; [`PriceSeries::is_chronological`] lets callers check it.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    candles: Vec<Candle>,
    interval: BarInterval,
}

impl PriceSeries {
    pub fn new(candles: Vec<Candle>, interval: BarInterval) -> Self {
        Self { candles, interval }
    }

    /// A series with no history, for requests that carry a custom ATR and an
    /// external quote.
    pub fn empty(interval: BarInterval) -> Self {
        Self::new(Vec::new(), interval)
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn interval(&self) -> BarInterval {
        self.interval
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Close of the most recent candle.
    pub fn last_close(&self) -> Option<f64> {
        self.candles.last().map(|c| c.close)
    }

    /// True if timestamps strictly increase.
    pub fn is_chronological(&self) -> bool {
        self.candles
            .windows(2)
            .all(|w| w[0].timestamp < w[1].timestamp)
    }

    /// Keep only the most recent `limit` candles.
    pub fn tail(mut self, limit: usize) -> Self {
        if self.candles.len() > limit {
            self.candles.drain(..self.candles.len() - limit);
        }
        self
    }
}
