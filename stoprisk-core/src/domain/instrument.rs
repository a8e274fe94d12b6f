//! Instrument identifiers in exchange `BASE-QUOTE` notation.
//!
//! A bare symbol such as `BTC` is quoted in [`DEFAULT_QUOTE`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Quote currency assumed when a symbol has no `-QUOTE` part.
pub const DEFAULT_QUOTE: &str = "USDT";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InstrumentError {
    #[error("instrument symbol is empty")]
    Empty,

    #[error("malformed instrument '{0}' (expected BASE-QUOTE or BASE)")]
    Malformed(String),
}

/// A traded pair. Notional and loss are denominated in `quote`, position
/// size in `base`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Instrument {
    symbol: String,
    base: String,
    quote: String,
}

impl Instrument {
    /// The symbol as given, e.g. `BTC-USDT`.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn quote(&self) -> &str {
        &self.quote
    }
}

impl FromStr for Instrument {
    type Err = InstrumentError;

    /// Splits on the first `-`; anything after it, dashes included, is the
    /// quote currency.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbol = s.trim();
        if symbol.is_empty() {
            return Err(InstrumentError::Empty);
        }
        let (base, quote) = symbol.split_once('-').unwrap_or((symbol, DEFAULT_QUOTE));
        if base.is_empty() || quote.is_empty() {
            return Err(InstrumentError::Malformed(symbol.to_string()));
        }
        Ok(Instrument {
            symbol: symbol.to_string(),
            base: base.to_string(),
            quote: quote.to_string(),
        })
    }
}

impl TryFrom<String> for Instrument {
    type Error = InstrumentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Instrument> for String {
    fn from(value: Instrument) -> Self {
        value.symbol
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}
