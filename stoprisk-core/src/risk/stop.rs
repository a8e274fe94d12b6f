//! Stop resolution: turn a stop rule into an absolute price distance.

use crate::domain::Side;
use crate::error::RiskError;
use serde::{Deserialize, Serialize};

/// Where the stop sits, chosen once at the request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StopRule {
    /// Stop `percent`% away from the last price.
    Percentage { percent: f64 },
    /// Stop at an absolute price. Which side of price is valid depends on the
    /// position's [`Side`].
    Level { price: f64 },
}

/// Raw stop fields as entered by a user, before a rule is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StopInput {
    pub percent: Option<f64>,
    pub level: Option<f64>,
}

impl StopInput {
    pub fn percent(percent: f64) -> Self {
        Self {
            percent: Some(percent),
            level: None,
        }
    }

    pub fn level(price: f64) -> Self {
        Self {
            percent: None,
            level: Some(price),
        }
    }

    /// Pick the rule. A percentage wins over a level when both are present.
    pub fn into_rule(self) -> Result<StopRule, RiskError> {
        match (self.percent, self.level) {
            (Some(percent), _) => Ok(StopRule::Percentage { percent }),
            (None, Some(price)) => Ok(StopRule::Level { price }),
            (None, None) => Err(RiskError::MissingStopInput),
        }
    }
}

impl From<StopRule> for StopInput {
    fn from(rule: StopRule) -> Self {
        match rule {
            StopRule::Percentage { percent } => StopInput::percent(percent),
            StopRule::Level { price } => StopInput::level(price),
        }
    }
}

/// Stop distance in price units and as a percentage of the last price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StopDistance {
    pub distance_abs: f64,
    pub percentage: f64,
}

/// Resolve a stop rule against the last traded price.
///
/// # Errors
/// [`RiskError::InvalidStop`] for a non-positive percentage, or a level that
/// is on the wrong side of (or equal to) the last price for `side`.
pub fn resolve_stop(rule: &StopRule, last_price: f64, side: Side) -> Result<StopDistance, RiskError> {
    match *rule {
        StopRule::Percentage { percent } => {
            if percent.is_nan() || percent <= 0.0 {
                return Err(RiskError::InvalidStop(format!(
                    "stop percentage must be positive, got {percent}"
                )));
            }
            Ok(StopDistance {
                distance_abs: last_price * percent / 100.0,
                percentage: percent,
            })
        }
        StopRule::Level { price } => {
            let distance_abs = match side {
                Side::Long => (last_price - price).max(0.0),
                Side::Short => (price - last_price).max(0.0),
            };
            if distance_abs <= 0.0 {
                let expected = match side {
                    Side::Long => "below",
                    Side::Short => "above",
                };
                return Err(RiskError::InvalidStop(format!(
                    "{side} stop level {price} must be {expected} last price {last_price}"
                )));
            }
            Ok(StopDistance {
                distance_abs,
                percentage: distance_abs / last_price * 100.0,
            })
        }
    }
}
