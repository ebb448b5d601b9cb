use serde::{Deserialize, Serialize};

/// Two-state position: flat, or long from a recorded entry price.
///
/// The entry price lives inside `Long`, so it exists exactly when the
/// position is long.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Position {
    #[default]
    Flat,
    Long {
        entry_price: f64,
    },
}

impl Position {
    pub fn is_flat(&self) -> bool {
        matches!(self, Position::Flat)
    }

    pub fn is_long(&self) -> bool {
        matches!(self, Position::Long { .. })
    }

    pub fn entry_price(&self) -> Option<f64> {
        match self {
            Position::Flat => None,
            Position::Long { entry_price } => Some(*entry_price),
        }
    }

    pub fn unrealized_pnl(&self, current_price: f64) -> f64 {
        self.entry_price()
            .map(|entry| current_price - entry)
            .unwrap_or(0.0)
    }
}
