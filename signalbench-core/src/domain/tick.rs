//! Tick: one timestamped price observation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Symbol;

/// A single price observation for one symbol.
///
/// Fields are private: a tick is immutable once built. Arrival order is the
/// only processing order; ticks are never re-sorted by timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    timestamp: NaiveDateTime,
    symbol: Symbol,
    price: f64,
}

impl Tick {
    pub fn new(timestamp: NaiveDateTime, symbol: impl Into<Symbol>, price: f64) -> Self {
        Self {
            timestamp,
            symbol: symbol.into(),
            price,
        }
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Returns true if the price is neither NaN nor infinite.
    pub fn is_finite(&self) -> bool {
        self.price.is_finite()
    }
}
