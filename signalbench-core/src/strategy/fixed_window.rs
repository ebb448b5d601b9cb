//! Fixed-window moving average with a running sum.
//!
//! O(1) per tick, O(k) memory.

use crate::error::{check_capacity, ConfigurationError};
use crate::stats::RollingWindow;

use super::{PositionBook, SignalStrategy, StrategyKind};

/// Window used when none is given.
pub const DEFAULT_WINDOW: usize = 10;

#[derive(Debug, Clone)]
pub struct FixedWindow {
    window: RollingWindow,
    ma: Option<f64>,
    book: PositionBook,
}

impl FixedWindow {
    pub fn new(window: usize) -> Result<Self, ConfigurationError> {
        let window = check_capacity(window)?;
        Ok(Self {
            window: RollingWindow::new(window),
            ma: None,
            book: PositionBook::new(),
        })
    }

    pub fn window(&self) -> usize {
        self.window.capacity()
    }
}

impl Default for FixedWindow {
    fn default() -> Self {
        Self {
            window: RollingWindow::new(DEFAULT_WINDOW),
            ma: None,
            book: PositionBook::new(),
        }
    }
}

impl SignalStrategy for FixedWindow {
    fn name(&self) -> &str {
        "fixed_window"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::FixedWindow
    }

    fn update_average(&mut self, price: f64) -> Option<f64> {
        self.window.push(price);

        if self.ma.is_none() {
            self.ma = Some(price);
            return None;
        }

        let ma = self.window.mean().unwrap_or(price);
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
        self.window.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::make_ticks;

    #[test]
    fn rejects_zero_window() {
        assert_eq!(
            FixedWindow::new(0).unwrap_err(),
            ConfigurationError::InvalidWindow { window: 0 }
        );
    }

    #[test]
    fn default_window_is_ten() {
        assert_eq!(FixedWindow::default().window(), 10);
    }

    #[test]
    fn divides_by_count_until_full() {
        let mut s = FixedWindow::new(4).unwrap();
        for tick in make_ticks(&[10.0, 20.0]) {
            s.process(&tick).unwrap();
        }
        assert_eq!(s.moving_average(), Some(15.0));
        for tick in make_ticks(&[30.0, 40.0, 50.0]) {
            s.process(&tick).unwrap();
        }
        // window [20, 30, 40, 50]
        assert_eq!(s.moving_average(), Some(35.0));
        assert_eq!(s.retained_len(), 4);
    }

    #[test]
    fn window_of_one_never_signals() {
        let mut s = FixedWindow::new(1).unwrap();
        for tick in make_ticks(&[1.0, 5.0, 2.0, 9.0, 3.0]) {
            assert_eq!(s.process(&tick).unwrap(), None);
        }
        assert_eq!(s.total_return(), 0.0);
    }
}
