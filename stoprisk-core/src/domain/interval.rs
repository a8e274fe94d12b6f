//! Sampling interval of a price series.
//!
//! Labels follow exchange bar notation (`1m`, `5m`, `15m`, `1H`, `4H`, `1D`).
//! Any other spacing can be given in raw seconds as `<n>s`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntervalError {
    #[error("unknown bar interval '{0}' (expected one of 1m, 5m, 15m, 1H, 4H, 1D or <n>s)")]
    Unknown(String),

    #[error("bar interval must be at least one second")]
    Zero,
}

/// Fixed spacing between consecutive candles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BarInterval {
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    #[default]
    OneHour,
    FourHours,
    OneDay,
    Seconds(u64),
}

impl BarInterval {
    /// Every labelled interval, shortest first.
    pub const KNOWN: [BarInterval; 6] = [
        BarInterval::OneMinute,
        BarInterval::FiveMinutes,
        BarInterval::FifteenMinutes,
        BarInterval::OneHour,
        BarInterval::FourHours,
        BarInterval::OneDay,
    ];

    /// Build an interval from a raw number of seconds.
    pub fn from_seconds(seconds: u64) -> Result<Self, IntervalError> {
        if seconds == 0 {
            return Err(IntervalError::Zero);
        }
        Ok(BarInterval::Seconds(seconds))
    }

    pub fn seconds(&self) -> u64 {
        match self {
            BarInterval::OneMinute => 60,
            BarInterval::FiveMinutes => 5 * 60,
            BarInterval::FifteenMinutes => 15 * 60,
            BarInterval::OneHour => 60 * 60,
            BarInterval::FourHours => 4 * 60 * 60,
            BarInterval::OneDay => 24 * 60 * 60,
            BarInterval::Seconds(s) => *s,
        }
    }

    pub fn label(&self) -> String {
        match self {
            BarInterval::OneMinute => "1m".into(),
            BarInterval::FiveMinutes => "5m".into(),
            BarInterval::FifteenMinutes => "15m".into(),
            BarInterval::OneHour => "1H".into(),
            BarInterval::FourHours => "4H".into(),
            BarInterval::OneDay => "1D".into(),
            BarInterval::Seconds(s) => format!("{s}s"),
        }
    }
}

impl FromStr for BarInterval {
    type Err = IntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "1m" => Ok(BarInterval::OneMinute),
            "5m" => Ok(BarInterval::FiveMinutes),
            "15m" => Ok(BarInterval::FifteenMinutes),
            "1H" | "1h" => Ok(BarInterval::OneHour),
            "4H" | "4h" => Ok(BarInterval::FourHours),
            "1D" | "1d" => Ok(BarInterval::OneDay),
            _ => {
                let secs = s
                    .strip_suffix('s')
                    .and_then(|n| n.parse::<u64>().ok())
                    .ok_or_else(|| IntervalError::Unknown(s.to_string()))?;
                BarInterval::from_seconds(secs)
            }
        }
    }
}

impl TryFrom<String> for BarInterval {
    type Error = IntervalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BarInterval> for String {
    fn from(value: BarInterval) -> Self {
        value.label()
    }
}

impl fmt::Display for BarInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_map_to_seconds() {
        let expected = [60, 300, 900, 3600, 14_400, 86_400];
        for (interval, secs) in BarInterval::KNOWN.iter().zip(expected) {
            assert_eq!(interval.seconds(), secs);
            assert_eq!(interval.label().parse::<BarInterval>().unwrap(), *interval);
        }
    }

    #[test]
    fn lowercase_hour_and_day_aliases() {
        assert_eq!("1h".parse::<BarInterval>().unwrap(), BarInterval::OneHour);
        assert_eq!("4h".parse::<BarInterval>().unwrap(), BarInterval::FourHours);
        assert_eq!("1d".parse::<BarInterval>().unwrap(), BarInterval::OneDay);
    }

    #[test]
    fn minute_label_is_case_sensitive() {
        // "1M" would be a month on most exchanges.
        assert!(matches!(
            "1M".parse::<BarInterval>(),
            Err(IntervalError::Unknown(_))
        ));
    }

    #[test]
    fn raw_seconds() {
        assert_eq!(
            "7200s".parse::<BarInterval>().unwrap(),
            BarInterval::Seconds(7200)
        );
        assert_eq!("0s".parse::<BarInterval>(), Err(IntervalError::Zero));
    }

    #[test]
    fn serde_uses_label() {
        let json = serde_json::to_string(&BarInterval::FourHours).unwrap();
        assert_eq!(json, "\"4H\"");
        let back: BarInterval = serde_json::from_str("\"15m\"").unwrap();
        assert_eq!(back, BarInterval::FifteenMinutes);
        assert!(serde_json::from_str::<BarInterval>("\"2W\"").is_err());
    }
}
