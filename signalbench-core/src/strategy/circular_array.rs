//! Circular-array moving average.
//!
//! Slots are preallocated at construction; O(1) per tick, O(k) memory fixed
//! up front.

use crate::error::{check_capacity, ConfigurationError};
use crate::stats::CircularBuffer;

use super::{PositionBook, SignalStrategy, StrategyKind};

/// Window used when none is given.
pub const DEFAULT_WINDOW: usize = 1000;

#[derive(Debug, Clone)]
pub struct CircularArray {
    buffer: CircularBuffer,
    ma: Option<f64>,
    book: PositionBook,
}

impl CircularArray {
    pub fn new(window: usize) -> Result<Self, ConfigurationError> {
        let window = check_capacity(window)?;
        Ok(Self {
            buffer: CircularBuffer::new(window),
            ma: None,
            book: PositionBook::new(),
        })
    }

    pub fn window(&self) -> usize {
        self.buffer.capacity()
    }
}

impl Default for CircularArray {
    fn default() -> Self {
        Self {
            buffer: CircularBuffer::new(DEFAULT_WINDOW),
            ma: None,
            book: PositionBook::new(),
        }
    }
}

impl SignalStrategy for CircularArray {
    fn name(&self) -> &str {
        "circular_array"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::CircularArray
    }

    fn update_average(&mut self, price: f64) -> Option<f64> {
        self.buffer.push(price);

        if self.buffer.count() == 1 {
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
    fn rejects_zero_window() {
        assert!(CircularArray::new(0).is_err());
    }

    #[test]
    fn divisor_is_min_of_count_and_window() {
        let mut s = CircularArray::new(3).unwrap();
        for tick in make_ticks(&[3.0, 6.0]) {
            s.process(&tick).unwrap();
        }
        assert_eq!(s.moving_average(), Some(4.5));
        for tick in make_ticks(&[9.0, 12.0]) {
            s.process(&tick).unwrap();
        }
        // live slots [12, 6, 9]
        assert_eq!(s.moving_average(), Some(9.0));
        assert_eq!(s.retained_len(), 3);
    }

    #[test]
    fn matches_fixed_window_signals() {
        use crate::strategy::FixedWindow;
        let prices = [100.0, 101.0, 99.5, 102.0, 98.0, 97.0, 103.0, 104.0, 96.0];
        let mut circ = CircularArray::new(3).unwrap();
        let mut fixed = FixedWindow::new(3).unwrap();
        for tick in make_ticks(&prices) {
            assert_eq!(circ.process(&tick).unwrap(), fixed.process(&tick).unwrap());
        }
        assert!((circ.total_return() - fixed.total_return()).abs() < 1e-9);
    }
}
