//! Median first-passage time of a driftless random walk.
//!
//! Price moves per bar are treated as zero-drift Brownian increments with
//! standard deviation `sigma` (ATR stands in for it, in price units). The
//! median number of bars to cover `barrier_abs` is approximated as
//!
//! ```text
//! steps = 0.5 * (barrier_abs / sigma)^2
//! ```
//!
//! This is a rule of thumb, not the exact first-passage quantile.

pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Median number of bars until price travels `barrier_abs`.
///
/// Returns `f64::INFINITY` when `sigma <= 0`: with no volatility the stop is
/// never reached.
pub fn median_hitting_steps(sigma: f64, barrier_abs: f64) -> f64 {
    if sigma <= 0.0 {
        return f64::INFINITY;
    }
    0.5 * (barrier_abs / sigma).powi(2)
}

/// Median time in seconds for price to reach a stop `barrier_abs` away, on a
/// series sampled every `dt_seconds`.
pub fn median_hitting_time(sigma: f64, barrier_abs: f64, dt_seconds: f64) -> f64 {
    median_hitting_steps(sigma, barrier_abs) * dt_seconds
}
