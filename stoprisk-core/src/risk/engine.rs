//! The calculation entry point.
//!
//! One request in, one result or one error out. Volatility and stop distance
//! are derived independently from the same series, then feed loss sizing and
//! the hitting-time estimate.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::hitting_time::{median_hitting_time, SECONDS_PER_HOUR};
use super::sizing::size_loss;
use super::stop::{resolve_stop, StopInput, StopRule};
use crate::domain::{PriceSeries, Side};
use crate::error::RiskError;
use crate::indicators::compute_atr;

/// Where the volatility proxy comes from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum VolatilitySource {
    /// Simple-average ATR over the last `period` bars of the series.
    History { period: usize },
    /// A caller-supplied ATR in price units; the series is only used for the
    /// last price.
    Custom { atr: f64 },
}

impl VolatilitySource {
    /// Candles a request needs when it has no independent quote.
    pub fn min_candles(&self) -> usize {
        match self {
            VolatilitySource::History { period } => period + 1,
            VolatilitySource::Custom { .. } => 1,
        }
    }
}

/// A fully-formed calculation request.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskRequest {
    pub series: PriceSeries,
    pub volatility: VolatilitySource,
    pub stop: StopRule,
    pub side: Side,
    /// Position size in quote currency.
    pub notional: f64,
    /// Independent quote. When `None`, the last close of `series` is used.
    pub last_price: Option<f64>,
}

/// Output of one calculation.
///
/// `median_hitting_seconds` is `f64::INFINITY` when the volatility proxy is
/// not positive; JSON encodes that as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskResult {
    pub last_price: f64,
    pub atr_value: f64,
    pub stop_distance_abs: f64,
    pub stop_pct: f64,
    pub position_size: f64,
    pub loss_amount: f64,
    pub median_hitting_seconds: f64,
}

impl RiskResult {
    pub fn median_hitting_hours(&self) -> f64 {
        self.median_hitting_seconds / SECONDS_PER_HOUR
    }

    /// False when the model says the stop is never reached.
    pub fn stop_reachable(&self) -> bool {
        self.median_hitting_seconds.is_finite()
    }
}

/// Run the full risk calculation.
///
/// # Errors
/// - [`RiskError::InvalidNotional`] if `notional <= 0`
/// - [`RiskError::InsufficientData`] if ATR needs more history than the series
///   holds, or there is neither a quote nor any candle to price from
/// - [`RiskError::InvalidStop`] if the stop is on the wrong side or non-positive
pub fn calculate(request: &RiskRequest) -> Result<RiskResult, RiskError> {
    if request.notional.is_nan() || request.notional <= 0.0 {
        return Err(RiskError::InvalidNotional(request.notional));
    }

    let last_price = request
        .last_price
        .or_else(|| request.series.last_close())
        .ok_or(RiskError::InsufficientData {
            needed: request.volatility.min_candles(),
            available: 0,
        })?;

    let atr_value = match request.volatility {
        VolatilitySource::History { period } => compute_atr(request.series.candles(), period)?,
        VolatilitySource::Custom { atr } => atr,
    };
    debug!(
        last_price,
        atr_value,
        candles = request.series.len(),
        "volatility resolved"
    );

    let stop = resolve_stop(&request.stop, last_price, request.side)?;
    debug!(
        side = %request.side,
        distance = stop.distance_abs,
        pct = stop.percentage,
        "stop resolved"
    );

    let sizing = size_loss(request.notional, last_price, stop.distance_abs)?;

    let dt_seconds = request.series.interval().seconds() as f64;
    let median_hitting_seconds = median_hitting_time(atr_value, stop.distance_abs, dt_seconds);
    debug!(
        position_size = sizing.position_size,
        loss = sizing.loss_amount,
        median_hitting_seconds,
        "risk computed"
    );

    Ok(RiskResult {
        last_price,
        atr_value,
        stop_distance_abs: stop.distance_abs,
        stop_pct: stop.percentage,
        position_size: sizing.position_size,
        loss_amount: sizing.loss_amount,
        median_hitting_seconds,
    })
}

/// Flat-argument form of [`calculate`].
///
/// `stop` is the raw user input: a percentage wins over a level, and neither
/// fails with [`RiskError::MissingStopInput`]. A `custom_atr` bypasses ATR
/// computation; `period` is then ignored.
pub fn calculate_parts(
    series: PriceSeries,
    period: usize,
    stop: StopInput,
    side: Side,
    notional: f64,
    custom_atr: Option<f64>,
) -> Result<RiskResult, RiskError> {
    let volatility = match custom_atr {
        Some(atr) => VolatilitySource::Custom { atr },
        None => VolatilitySource::History { period },
    };
    let request = RiskRequest {
        series,
        volatility,
        stop: stop.into_rule()?,
        side,
        notional,
        last_price: None,
    };
    calculate(&request)
}
