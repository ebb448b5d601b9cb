//! Full-history moving average: recomputes the mean over every price seen.
//!
//! O(t) per tick at tick t, O(n²) over a run, O(n) memory.

use crate::stats::arithmetic_mean;

use super::{PositionBook, SignalStrategy, StrategyKind};

#[derive(Debug, Clone, Default)]
pub struct FullHistory {
    prices: Vec<f64>,
    ma: Option<f64>,
    book: PositionBook,
}

impl FullHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SignalStrategy for FullHistory {
    fn name(&self) -> &str {
        "full_history"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::FullHistory
    }

    fn update_average(&mut self, price: f64) -> Option<f64> {
        self.prices.push(price);

        if self.ma.is_none() {
            self.ma = Some(price);
            return None;
        }

        // Full rescan on purpose: this is the quadratic baseline.
        let ma = arithmetic_mean(&self.prices).unwrap_or(price);
        self.ma = Some(ma);
        Some(ma)
    }

    fn book(&self) -> &PositionBook {
        &self.book
    }

    fn book_mut(&mut self) -> &mut PositionBook {
        &mut self.book
    }

    fn moving_average(&self) -> Option<f64> {
        self.ma
    }

    fn retained_len(&self) -> usize {
        self.prices.len()
    }
}
