//! TOML request files.
//!
//! ```toml
//! [market]
//! instrument = "BTC-USDT"  # optional; labels the report
//! candles = "btc_1h.csv"   # relative to the config file
//! interval = "1H"
//! limit = 100
//! last_price = 64000.0
//!
//! [volatility]
//! period = 14              # or: atr = 350.0
//!
//! [position]
//! side = "long"
//! notional = 1000.0
//!
//! [stop]
//! percent = 2.0            # and/or: level = 62000.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use crate::data::{open_feed, FeedError};
use crate::domain::{BarInterval, Instrument, PriceSeries, Side};
use crate::error::RiskError;
use crate::risk::{RiskRequest, StopInput, VolatilitySource};

pub const DEFAULT_ATR_PERIOD: usize = 14;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Risk(#[from] RiskError),
}

/// A calculation request as written in a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RequestConfig {
    pub market: MarketConfig,
    #[serde(default)]
    pub volatility: VolatilityConfig,
    pub position: PositionConfig,
    #[serde(default)]
    pub stop: StopInput,

    /// Directory relative candle paths resolve against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MarketConfig {
    /// Pair the candles belong to. Only used to label the report.
    pub instrument: Option<Instrument>,
    /// CSV or JSON candle file. May be omitted with a custom ATR and a quote.
    pub candles: Option<PathBuf>,
    #[serde(default)]
    pub interval: BarInterval,
    /// Keep only the most recent `limit` candles.
    pub limit: Option<usize>,
    /// Independent quote overriding the last close.
    pub last_price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct VolatilityConfig {
    #[serde(default = "default_period")]
    pub period: usize,
    /// Custom ATR in price units. Bypasses the candle history.
    pub atr: Option<f64>,
}

fn default_period() -> usize {
    DEFAULT_ATR_PERIOD
}

impl Default for VolatilityConfig {
    fn default() -> Self {
        Self {
            period: DEFAULT_ATR_PERIOD,
            atr: None,
        }
    }
}

impl VolatilityConfig {
    pub fn source(&self) -> VolatilitySource {
        match self.atr {
            Some(atr) => VolatilitySource::Custom { atr },
            None => VolatilitySource::History {
                period: self.period,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PositionConfig {
    pub side: Side,
    pub notional: f64,
}

impl RequestConfig {
    /// Load a request from a TOML file. Relative candle paths resolve against
    /// the file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Parse and validate a request from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no request can use.
    ///
    /// Stop checks and the sign of the notional are left to the engine so they
    /// surface as [`RiskError`]s.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.volatility.atr {
            Some(atr) if !atr.is_finite() => {
                return Err(ConfigError::Invalid(format!(
                    "volatility.atr must be finite, got {atr}"
                )));
            }
            Some(_) => {}
            None if self.volatility.period == 0 => {
                return Err(ConfigError::Invalid(
                    "volatility.period must be at least 1".into(),
                ));
            }
            None => {}
        }

        if let Some(price) = self.market.last_price {
            if !price.is_finite() || price <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "market.last_price must be positive, got {price}"
                )));
            }
        }

        if !self.position.notional.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "position.notional must be finite, got {}",
                self.position.notional
            )));
        }

        if self.market.limit == Some(0) {
            return Err(ConfigError::Invalid(
                "market.limit must be at least 1".into(),
            ));
        }

        if self.market.candles.is_none()
            && (self.volatility.atr.is_none() || self.market.last_price.is_none())
        {
            return Err(ConfigError::Invalid(
                "market.candles is required unless both volatility.atr and market.last_price are set"
                    .into(),
            ));
        }

        if let (Some(limit), VolatilitySource::History { period }) =
            (self.market.limit, self.volatility.source())
        {
            if limit < period + 1 {
                warn!(limit, period, "market.limit leaves fewer candles than ATR needs");
            }
        }

        Ok(())
    }

    /// Candle file path after resolving against `base_dir`.
    pub fn candles_path(&self) -> Option<PathBuf> {
        let path = self.market.candles.as_ref()?;
        Some(match &self.base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.clone(),
        })
    }

    /// Load the price series this request points at.
    pub fn load_series(&self) -> Result<PriceSeries, ConfigError> {
        match self.candles_path() {
            Some(path) => {
                let feed = open_feed(&path)?;
                Ok(feed.series(self.market.interval, self.market.limit)?)
            }
            None => Ok(PriceSeries::empty(self.market.interval)),
        }
    }

    /// Combine this config with a loaded series into an engine request.
    pub fn to_request(&self, series: PriceSeries) -> Result<RiskRequest, ConfigError> {
        Ok(RiskRequest {
            series,
            volatility: self.volatility.source(),
            stop: self.stop.into_rule()?,
            side: self.position.side,
            notional: self.position.notional,
            last_price: self.market.last_price,
        })
    }

    /// [`load_series`](Self::load_series) then [`to_request`](Self::to_request).
    pub fn build_request(&self) -> Result<RiskRequest, ConfigError> {
        let series = self.load_series()?;
        self.to_request(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::StopRule;

    const MINIMAL: &str = r#"
[market]
candles = "btc.csv"

[position]
side = "short"
notional = 500.0

[stop]
level = 70000.0
"#;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = RequestConfig::from_toml(MINIMAL).unwrap();
        assert_eq!(config.market.interval, BarInterval::OneHour);
        assert_eq!(config.volatility.period, DEFAULT_ATR_PERIOD);
        assert_eq!(
            config.volatility.source(),
            VolatilitySource::History { period: 14 }
        );
        assert_eq!(config.position.side, Side::Short);
        assert_eq!(config.stop.into_rule().unwrap(), StopRule::Level { price: 70000.0 });
    }

    #[test]
    fn custom_atr_without_candles() {
        let toml = r#"
[market]
interval = "4H"
last_price = 1.25

[volatility]
atr = 0.04

[position]
side = "long"
notional = 100.0

[stop]
percent = 8.0
"#;
        let config = RequestConfig::from_toml(toml).unwrap();
        let request = config.build_request().unwrap();
        assert!(request.series.is_empty());
        assert_eq!(request.series.interval(), BarInterval::FourHours);
        assert_eq!(request.volatility, VolatilitySource::Custom { atr: 0.04 });
        assert_eq!(request.last_price, Some(1.25));
    }

    #[test]
    fn candles_required_without_custom_atr() {
        let toml = r#"
[market]
last_price = 1.25

[position]
side = "long"
notional = 100.0
"#;
        let err = RequestConfig::from_toml(toml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_period_rejected() {
        let toml = MINIMAL.replace("[position]", "[volatility]\nperiod = 0\n\n[position]");
        let err = RequestConfig::from_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("period"));
    }

    #[test]
    fn non_positive_quote_rejected() {
        let toml = MINIMAL.replace("candles = \"btc.csv\"", "candles = \"btc.csv\"\nlast_price = 0.0");
        assert!(matches!(
            RequestConfig::from_toml(&toml),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn infinite_notional_rejected() {
        let toml = MINIMAL.replace("notional = 500.0", "notional = inf");
        let err = RequestConfig::from_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("notional"));
    }

    #[test]
    fn unknown_interval_rejected() {
        let toml = MINIMAL.replace("candles = \"btc.csv\"", "candles = \"btc.csv\"\ninterval = \"3W\"");
        assert!(matches!(
            RequestConfig::from_toml(&toml),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn unknown_field_rejected() {
        let toml = MINIMAL.replace("notional = 500.0", "notional = 500.0\nleverage = 10");
        assert!(matches!(
            RequestConfig::from_toml(&toml),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn instrument_labels_market() {
        let toml = MINIMAL.replace("[market]", "[market]\ninstrument = \"ETH-USDC\"");
        let config = RequestConfig::from_toml(&toml).unwrap();
        let inst = config.market.instrument.unwrap();
        assert_eq!(inst.base(), "ETH");
        assert_eq!(inst.quote(), "USDC");

        let bad = MINIMAL.replace("[market]", "[market]\ninstrument = \"-USDT\"");
        assert!(matches!(
            RequestConfig::from_toml(&bad),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn misspelled_stop_key_rejected() {
        let toml = MINIMAL.replace("level = 70000.0", "percentage = 2.0\nlevel = 70000.0");
        assert!(matches!(
            RequestConfig::from_toml(&toml),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_stop_surfaces_as_risk_error() {
        let toml = MINIMAL.replace("[stop]\nlevel = 70000.0\n", "");
        let config = RequestConfig::from_toml(&toml).unwrap();
        let err = config
            .to_request(PriceSeries::empty(BarInterval::OneHour))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Risk(RiskError::MissingStopInput)));
    }

    #[test]
    fn relative_candles_resolve_against_base_dir() {
        let mut config = RequestConfig::from_toml(MINIMAL).unwrap();
        assert_eq!(config.candles_path(), Some(PathBuf::from("btc.csv")));
        config.base_dir = Some(PathBuf::from("/data/requests"));
        assert_eq!(
            config.candles_path(),
            Some(PathBuf::from("/data/requests/btc.csv"))
        );
    }
}
