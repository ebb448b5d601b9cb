//! Position book: the trading rule shared by every strategy.

use serde::{Deserialize, Serialize};

use crate::domain::{Position, Signal};

/// Position and realized PnL for one strategy instance.
///
/// Strategies compute their own moving average and hand it to
/// [`PositionBook::on_price`]; the crossing rule and the FLAT/LONG toggle
/// live only here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PositionBook {
    position: Position,
    realized_pnl: f64,
}

impl PositionBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the crossing rule for `price` against the current `ma`.
    ///
    /// - price above ma while flat: go long at `price`, emit BUY
    /// - price below ma while long: book `price - entry`, go flat, emit SELL
    /// - otherwise (including price == ma): nothing
    pub fn on_price(&mut self, price: f64, ma: f64) -> Option<Signal> {
        match self.position {
            Position::Flat if price > ma => {
                self.position = Position::Long { entry_price: price };
                Some(Signal::Buy)
            }
            Position::Long { entry_price } if price < ma => {
                self.realized_pnl += price - entry_price;
                self.position = Position::Flat;
                Some(Signal::Sell)
            }
            _ => None,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Cumulative PnL over closed BUY→SELL pairs. An open position
    /// contributes nothing.
    pub fn realized_pnl(&self) -> f64 {
        self.realized_pnl
    }
}
