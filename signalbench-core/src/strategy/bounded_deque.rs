//! Bounded-deque moving average.
//!
//! Retains only the last k prices but rescans them on every tick: O(k) per
//! tick, O(k) memory. Bounding memory alone does not bound time.

use crate::error::{check_capacity, ConfigurationError};
use crate::stats::BoundedBuffer;

use super::{PositionBook, SignalStrategy, StrategyKind};

/// Buffer length used when none is given.
pub const DEFAULT_MAX_LEN: usize = 1000;

#[derive(Debug, Clone)]
pub struct BoundedDeque {
    buffer: BoundedBuffer,
    ma: Option<f64>,
    book: PositionBook,
}

impl BoundedDeque {
    pub fn new(max_len: usize) -> Result<Self, ConfigurationError> {
        let max_len = check_capacity(max_len)?;
        Ok(Self {
            buffer: BoundedBuffer::new(max_len),
            ma: None,
            book: PositionBook::new(),
        })
    }

    pub fn max_len(&self) -> usize {
        self.buffer.max_len()
    }
}

impl Default for BoundedDeque {
    fn default() -> Self {
        Self {
            buffer: BoundedBuffer::new(DEFAULT_MAX_LEN),
            ma: None,
            book: PositionBook::new(),
        }
    }
}

impl SignalStrategy for BoundedDeque {
    fn name(&self) -> &str {
        "bounded_deque"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::BoundedDeque
    }

    fn update_average(&mut self, price: f64) -> Option<f64> {
        self.buffer.push(price);

        if self.ma.is_none() {
            self.ma = Some(price);
            return None;
        }

        let ma = self.buffer.mean().unwrap_or(price);
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
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::make_ticks;

    #[test]
    fn rejects_zero_length() {
        assert!(BoundedDeque::new(0).is_err());
    }

    #[test]
    fn default_max_len() {
        assert_eq!(BoundedDeque::default().max_len(), 1000);
    }

    #[test]
    fn mean_over_retained_prices_only() {
        let mut s = BoundedDeque::new(2).unwrap();
        for tick in make_ticks(&[100.0, 200.0, 300.0]) {
            s.process(&tick).unwrap();
        }
        assert_eq!(s.retained_len(), 2);
        assert_eq!(s.moving_average(), Some(250.0));
    }
}
