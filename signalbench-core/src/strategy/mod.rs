//! Signal strategies: five interchangeable moving-average variants.
//!
//! Every variant consumes ticks one at a time, updates its own moving
//! average, and hands `(price, ma)` to the shared [`PositionBook`]. They
//! differ only in how `ma` is computed and what history is retained:
//!
//! | Variant | Per tick | Memory |
//! |---|---|---|
//! | [`FullHistory`] | O(t) | O(n) |
//! | [`FixedWindow`] | O(1) | O(k) |
//! | [`BoundedDeque`] | O(k) | O(k) |
//! | [`CircularArray`] | O(1) | O(k), preallocated |
//! | [`ExponentialSmoothing`] | O(1) | O(1) |
//!
//! The first tick only seeds the average; it never produces a signal.

pub mod book;
pub mod bounded_deque;
pub mod circular_array;
pub mod exponential;
pub mod factory;
pub mod fixed_window;
pub mod full_history;

pub use book::PositionBook;
pub use bounded_deque::BoundedDeque;
pub use circular_array::CircularArray;
pub use exponential::ExponentialSmoothing;
pub use factory::{build_strategy, StrategySpec};
pub use fixed_window::FixedWindow;
pub use full_history::FullHistory;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{Position, Signal, Tick};
use crate::error::DataError;

/// Common contract for all strategy variants.
///
/// Implementers supply the moving-average update and own a [`PositionBook`];
/// validation and the crossing rule are shared through [`process`].
/// Instances own all their state; nothing is shared between instances, so
/// separate instances may run on separate threads.
///
/// [`process`]: SignalStrategy::process
pub trait SignalStrategy: Send + fmt::Debug {
    /// Stable identifier (e.g., "fixed_window").
    fn name(&self) -> &str;

    fn kind(&self) -> StrategyKind;

    /// Fold a finite price into the average.
    ///
    /// Returns the average the price is compared against, or `None` on the
    /// tick that seeds it. Callers must have validated the price; use
    /// [`process`](SignalStrategy::process) unless timing the stages apart.
    fn update_average(&mut self, price: f64) -> Option<f64>;

    fn book(&self) -> &PositionBook;

    fn book_mut(&mut self) -> &mut PositionBook;

    /// Current moving-average estimate; `None` before the first tick.
    fn moving_average(&self) -> Option<f64>;

    /// Number of prices currently held in memory.
    fn retained_len(&self) -> usize;

    /// Consume one tick and return the signal it triggers, if any.
    ///
    /// A tick with a non-finite price is rejected with [`DataError`] and
    /// leaves the strategy unchanged.
    fn process(&mut self, tick: &Tick) -> Result<Option<Signal>, DataError> {
        validate_tick(tick)?;
        let price = tick.price();
        Ok(self
            .update_average(price)
            .and_then(|ma| self.book_mut().on_price(price, ma)))
    }

    /// Realized PnL so far. O(1) and idempotent.
    fn total_return(&self) -> f64 {
        self.book().realized_pnl()
    }

    fn position(&self) -> Position {
        self.book().position()
    }
}

/// Reject a tick before any state is touched.
pub fn validate_tick(tick: &Tick) -> Result<(), DataError> {
    if tick.is_finite() {
        Ok(())
    } else {
        Err(DataError::NonFinitePrice {
            symbol: tick.symbol().to_string(),
            price: tick.price(),
        })
    }
}

/// The five strategy variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    FullHistory,
    FixedWindow,
    BoundedDeque,
    CircularArray,
    Exponential,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::FullHistory,
        StrategyKind::FixedWindow,
        StrategyKind::BoundedDeque,
        StrategyKind::CircularArray,
        StrategyKind::Exponential,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::FullHistory => "full_history",
            StrategyKind::FixedWindow => "fixed_window",
            StrategyKind::BoundedDeque => "bounded_deque",
            StrategyKind::CircularArray => "circular_array",
            StrategyKind::Exponential => "exponential",
        }
    }

    /// Short label for tables and plots.
    pub fn label(&self) -> &'static str {
        match self {
            StrategyKind::FullHistory => "Full-History",
            StrategyKind::FixedWindow => "Fixed-Window",
            StrategyKind::BoundedDeque => "Bounded-Deque",
            StrategyKind::CircularArray => "Circular-Array",
            StrategyKind::Exponential => "Exponential",
        }
    }

    /// Per-tick time complexity.
    pub fn time_per_tick(&self) -> &'static str {
        match self {
            StrategyKind::FullHistory => "O(t)",
            StrategyKind::BoundedDeque => "O(k)",
            StrategyKind::FixedWindow | StrategyKind::CircularArray | StrategyKind::Exponential => {
                "O(1)"
            }
        }
    }

    /// Total time over a run of n ticks.
    pub fn time_total(&self) -> &'static str {
        match self {
            StrategyKind::FullHistory => "O(n²)",
            StrategyKind::BoundedDeque => "O(n·k)",
            StrategyKind::FixedWindow | StrategyKind::CircularArray | StrategyKind::Exponential => {
                "O(n)"
            }
        }
    }

    /// Retained memory after n ticks.
    pub fn space(&self) -> &'static str {
        match self {
            StrategyKind::FullHistory => "O(n)",
            StrategyKind::FixedWindow | StrategyKind::BoundedDeque => "O(k)",
            StrategyKind::CircularArray => "O(k), fixed at construction",
            StrategyKind::Exponential => "O(1)",
        }
    }

    /// True when retained memory does not grow with the stream.
    pub fn is_memory_bounded(&self) -> bool {
        !matches!(self, StrategyKind::FullHistory)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Create ticks from prices for testing, one second apart.
#[cfg(test)]
pub fn make_ticks(prices: &[f64]) -> Vec<Tick> {
    let base = chrono::NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    prices
        .iter()
        .enumerate()
        .map(|(i, &p)| Tick::new(base + chrono::Duration::seconds(i as i64), "TEST", p))
        .collect()
}
