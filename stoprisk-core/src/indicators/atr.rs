//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|)
//! ATR is a simple moving average of True Range (not Wilder smoothing).
//! Lookback: period (TR needs a previous close, then `period` samples).

use super::sma::rolling_mean;
use super::Indicator;
use crate::domain::Candle;
use crate::error::RiskError;

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    name: String,
}

impl Atr {
    /// # Panics
    /// If `period` is zero. Callers validate the period at the boundary.
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self {
            period,
            name: format!("atr_{period}"),
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

/// True Range of one candle against the previous close.
pub fn true_range(prev_close: f64, high: f64, low: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}

/// Compute the True Range series from candles.
/// TR[0] = NaN (no previous close).
/// TR[t] = max(high[t]-low[t], |high[t]-close[t-1]|, |low[t]-close[t-1]|).
pub fn true_range_series(candles: &[Candle]) -> Vec<f64> {
    let mut tr = vec![f64::NAN; candles.len()];
    for (i, pair) in candles.windows(2).enumerate() {
        tr[i + 1] = true_range(pair[0].close, pair[1].high, pair[1].low);
    }
    tr
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        rolling_mean(&true_range_series(candles), self.period)
    }
}

/// ATR at the most recent candle.
///
/// Candles must be in chronological order; nothing is reordered here.
///
/// # Errors
/// [`RiskError::InsufficientData`] when fewer than `period + 1` candles are
/// given.
///
/// # Panics
/// If `period` is zero.
pub fn compute_atr(candles: &[Candle], period: usize) -> Result<f64, RiskError> {
    let atr = Atr::new(period);
    let needed = period + 1;
    if candles.len() < needed {
        return Err(RiskError::InsufficientData {
            needed,
            available: candles.len(),
        });
    }

    let series = atr.compute(candles);
    Ok(series.last().copied().unwrap_or(f64::NAN))
}
