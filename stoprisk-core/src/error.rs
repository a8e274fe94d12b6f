//! Engine error type.
//!
//! Every variant is terminal for the request that raised it. The engine never
//! substitutes defaults; callers decide how to present the failure.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    #[error("insufficient data: need at least {needed} candles, got {available}")]
    InsufficientData { needed: usize, available: usize },

    #[error("invalid stop: {0}")]
    InvalidStop(String),

    #[error("no stop supplied: give a stop percentage or a stop level")]
    MissingStopInput,

    #[error("notional must be positive, got {0}")]
    InvalidNotional(f64),
}
