//! StopRisk Core: volatility, stop distance, loss at stop, time to stop.
//!
//! This crate contains the risk quantification engine:
//! - Domain types (candles, price series, sampling intervals, sides)
//! - Simple-average ATR over True Range
//! - Stop resolution from a percentage or a price level
//! - Loss sizing from notional exposure
//! - Median hitting time under a driftless random-walk approximation
//! - File feeds, TOML request files and report rendering around the engine

pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod report;
pub mod risk;

pub use error::RiskError;
pub use risk::{calculate, RiskRequest, RiskResult};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: all request and result types are Send + Sync.
    ///
    /// Requests are independent, so callers may run them on any thread.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::Candle>();
        require_sync::<domain::Candle>();
        require_send::<domain::PriceSeries>();
        require_sync::<domain::PriceSeries>();
        require_send::<domain::BarInterval>();
        require_sync::<domain::BarInterval>();
        require_send::<domain::Instrument>();
        require_sync::<domain::Instrument>();

        // Engine types
        require_send::<risk::RiskRequest>();
        require_sync::<risk::RiskRequest>();
        require_send::<risk::RiskResult>();
        require_sync::<risk::RiskResult>();
        require_send::<risk::StopRule>();
        require_sync::<risk::StopRule>();
        require_send::<RiskError>();
        require_sync::<RiskError>();

        // Boundary types
        require_send::<config::RequestConfig>();
        require_sync::<config::RequestConfig>();
        require_send::<data::FeedError>();
        require_sync::<data::FeedError>();
        require_send::<report::RiskReport>();
        require_sync::<report::RiskReport>();
    }

    /// Architecture contract: the engine takes a request by reference and
    /// returns a value. No feed, config or logger handle crosses the boundary.
    #[test]
    fn calculate_is_a_pure_function_of_the_request() {
        fn _check(request: &RiskRequest) -> Result<RiskResult, RiskError> {
            calculate(request)
        }
    }
}
