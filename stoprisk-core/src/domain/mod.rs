//! Domain types for StopRisk

pub mod candle;
pub mod instrument;
pub mod interval;
pub mod series;
pub mod side;

pub use candle::Candle;
pub use instrument::{Instrument, InstrumentError, DEFAULT_QUOTE};
pub use interval::{BarInterval, IntervalError};
pub use series::PriceSeries;
pub use side::Side;
