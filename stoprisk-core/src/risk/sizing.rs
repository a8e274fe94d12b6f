//! Loss sizing: notional exposure → position size → loss at the stop.

use crate::error::RiskError;
use serde::{Deserialize, Serialize};

/// Position size in base-asset units and the quote-currency loss if the stop
/// triggers. Values are unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossSizing {
    pub position_size: f64,
    pub loss_amount: f64,
}

/// Size a position opened with `notional` quote currency at `last_price`.
///
/// ```text
/// position_size = notional / last_price
/// loss_amount   = position_size * distance_abs
/// ```
///
/// `last_price` is assumed positive.
pub fn size_loss(notional: f64, last_price: f64, distance_abs: f64) -> Result<LossSizing, RiskError> {
    if notional.is_nan() || notional <= 0.0 {
        return Err(RiskError::InvalidNotional(notional));
    }

    let position_size = notional / last_price;
    Ok(LossSizing {
        position_size,
        loss_amount: position_size * distance_abs,
    })
}
