//! Human-readable and JSON renderings of a calculation.

use serde::Serialize;
use std::fmt;

use crate::domain::{BarInterval, Instrument, Side};
use crate::risk::{RiskRequest, RiskResult, VolatilitySource};

/// A result together with the request context needed to read it.
#[derive(Debug, Clone, Serialize)]
pub struct RiskReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument: Option<Instrument>,
    /// Currency of the position size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_currency: Option<String>,
    /// Currency of notional and loss.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_currency: Option<String>,
    pub side: Side,
    pub interval: BarInterval,
    pub volatility: VolatilitySource,
    pub candles: usize,
    pub notional: f64,
    #[serde(flatten)]
    pub result: RiskResult,
    /// `None` when the stop is never reached under the model.
    pub median_hitting_hours: Option<f64>,
}

impl RiskReport {
    pub fn new(request: &RiskRequest, result: RiskResult) -> Self {
        Self {
            instrument: None,
            base_currency: None,
            quote_currency: None,
            side: request.side,
            interval: request.series.interval(),
            volatility: request.volatility,
            candles: request.series.len(),
            notional: request.notional,
            result,
            median_hitting_hours: result
                .stop_reachable()
                .then(|| result.median_hitting_hours()),
        }
    }

    /// Label the report with the traded pair and its currencies.
    pub fn with_instrument(mut self, instrument: Option<Instrument>) -> Self {
        self.base_currency = instrument.as_ref().map(|i| i.base().to_string());
        self.quote_currency = instrument.as_ref().map(|i| i.quote().to_string());
        self.instrument = instrument;
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for RiskReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.result;
        let atr_label = match self.volatility {
            VolatilitySource::History { period } => format!("ATR({period})"),
            VolatilitySource::Custom { .. } => "ATR (custom)".to_string(),
        };

        let base = unit(&self.base_currency);
        let quote = unit(&self.quote_currency);

        if let Some(inst) = &self.instrument {
            writeln!(
                f,
                "Instrument: {inst}  (base {}, quote {})",
                inst.base(),
                inst.quote()
            )?;
        }
        writeln!(
            f,
            "Side: {}  Interval: {}  Candles: {}",
            self.side, self.interval, self.candles
        )?;
        writeln!(f, "Last price:            {:.6}", r.last_price)?;
        writeln!(f, "{atr_label:<22} {:.6}", r.atr_value)?;
        writeln!(
            f,
            "Stop:                  {:.2}%  (distance {:.6})",
            r.stop_pct, r.stop_distance_abs
        )?;
        writeln!(f, "Notional:              {:.4}{quote}", self.notional)?;
        writeln!(f, "Position size:         {:.8}{base}", r.position_size)?;
        writeln!(f, "Loss at stop:          {:.4}{quote}", r.loss_amount)?;
        match self.median_hitting_hours {
            Some(hours) => write!(f, "Median time to stop:   {hours:.2} h"),
            None => write!(f, "Median time to stop:   ∞ (no volatility)"),
        }
    }
}

/// " CODE" suffix for an amount, empty when the currency is unknown.
fn unit(currency: &Option<String>) -> String {
    currency
        .as_deref()
        .map(|c| format!(" {c}"))
        .unwrap_or_default()
}
