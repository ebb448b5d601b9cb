//! Factory: converts a `StrategySpec` into a boxed strategy.

use serde::{Deserialize, Serialize};

use crate::error::{check_decay, check_window, ConfigurationError};

use super::{
    BoundedDeque, CircularArray, ExponentialSmoothing, FixedWindow, FullHistory, SignalStrategy,
    StrategyKind,
};

/// Construction parameters for one strategy variant.
///
/// Windows are signed so that a negative value in a config file is reported
/// as a [`ConfigurationError`] rather than a parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StrategySpec {
    FullHistory,
    FixedWindow { window: i64 },
    BoundedDeque { window: i64 },
    CircularArray { window: i64 },
    Exponential { decay: f64 },
}

impl StrategySpec {
    pub fn kind(&self) -> StrategyKind {
        match self {
            StrategySpec::FullHistory => StrategyKind::FullHistory,
            StrategySpec::FixedWindow { .. } => StrategyKind::FixedWindow,
            StrategySpec::BoundedDeque { .. } => StrategyKind::BoundedDeque,
            StrategySpec::CircularArray { .. } => StrategyKind::CircularArray,
            StrategySpec::Exponential { .. } => StrategyKind::Exponential,
        }
    }

    /// Human-readable label including parameters, e.g. "Fixed-Window(k=50)".
    pub fn label(&self) -> String {
        let base = self.kind().label();
        match self {
            StrategySpec::FullHistory => base.to_string(),
            StrategySpec::FixedWindow { window }
            | StrategySpec::BoundedDeque { window }
            | StrategySpec::CircularArray { window } => format!("{base}(k={window})"),
            StrategySpec::Exponential { decay } => format!("{base}(α={decay})"),
        }
    }

    /// The five variants as benchmarked: window 50 for the bounded variants,
    /// decay 0.1 for exponential smoothing.
    pub fn benchmark_lineup() -> Vec<StrategySpec> {
        vec![
            StrategySpec::FullHistory,
            StrategySpec::FixedWindow { window: 50 },
            StrategySpec::BoundedDeque { window: 50 },
            StrategySpec::CircularArray { window: 50 },
            StrategySpec::Exponential { decay: 0.1 },
        ]
    }

    /// Check parameters without building anything.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        match self {
            StrategySpec::FullHistory => Ok(()),
            StrategySpec::FixedWindow { window }
            | StrategySpec::BoundedDeque { window }
            | StrategySpec::CircularArray { window } => check_window(*window).map(|_| ()),
            StrategySpec::Exponential { decay } => check_decay(*decay).map(|_| ()),
        }
    }
}

/// Build a fresh strategy instance from its spec.
pub fn build_strategy(spec: &StrategySpec) -> Result<Box<dyn SignalStrategy>, ConfigurationError> {
    match spec {
        StrategySpec::FullHistory => Ok(Box::new(FullHistory::new())),
        StrategySpec::FixedWindow { window } => {
            Ok(Box::new(FixedWindow::new(check_window(*window)?)?))
        }
        StrategySpec::BoundedDeque { window } => {
            Ok(Box::new(BoundedDeque::new(check_window(*window)?)?))
        }
        StrategySpec::CircularArray { window } => {
            Ok(Box::new(CircularArray::new(check_window(*window)?)?))
        }
        StrategySpec::Exponential { decay } => Ok(Box::new(ExponentialSmoothing::new(*decay)?)),
    }
}
