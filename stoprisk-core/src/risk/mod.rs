//! Risk quantification: stop distance, loss at stop, median time to stop.
//!
//! Every function here is pure. Volatility comes from
//! [`crate::indicators::compute_atr`] or from the caller.

pub mod engine;
pub mod hitting_time;
pub mod sizing;
pub mod stop;

pub use engine::{calculate, calculate_parts, RiskRequest, RiskResult, VolatilitySource};
pub use hitting_time::{median_hitting_steps, median_hitting_time, SECONDS_PER_HOUR};
pub use sizing::{size_loss, LossSizing};
pub use stop::{resolve_stop, StopDistance, StopInput, StopRule};
