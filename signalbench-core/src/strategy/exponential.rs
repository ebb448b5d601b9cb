//! Exponential-smoothing moving average. O(1) time and space.

use crate::error::{check_decay, ConfigurationError};
use crate::stats::ema_step;

use super::{PositionBook, SignalStrategy, StrategyKind};

/// Decay used when none is given.
pub const DEFAULT_DECAY: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct ExponentialSmoothing {
    alpha: f64,
    ma: Option<f64>,
    book: PositionBook,
}

impl ExponentialSmoothing {
    pub fn new(decay: f64) -> Result<Self, ConfigurationError> {
        let alpha = check_decay(decay)?;
        Ok(Self {
            alpha,
            ma: None,
            book: PositionBook::new(),
        })
    }

    pub fn decay(&self) -> f64 {
        self.alpha
    }
}

impl Default for ExponentialSmoothing {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_DECAY,
            ma: None,
            book: PositionBook::new(),
        }
    }
}

impl SignalStrategy for ExponentialSmoothing {
    fn name(&self) -> &str {
        "exponential"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Exponential
    }

    fn update_average(&mut self, price: f64) -> Option<f64> {
        let first = self.ma.is_none();
        let ma = ema_step(self.alpha, price, self.ma);
        self.ma = Some(ma);
        if first {
            None
        } else {
            Some(ma)
        }
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
        0
    }
}
