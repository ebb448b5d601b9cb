//! signalbench core: the tick-driven signal engine.
//!
//! This crate contains:
//! - Domain types (ticks, signals, positions)
//! - Incremental statistics (rolling window, bounded buffer, circular buffer, EMA step)
//! - Five moving-average strategies sharing one crossing rule
//! - A factory building strategies from serializable specs
//!
//! No I/O and no process-wide state: everything lives in per-strategy instances.

pub mod domain;
pub mod error;
pub mod stats;
pub mod strategy;

pub use domain::{Position, Signal, Tick};
pub use error::{ConfigurationError, DataError};
pub use strategy::{build_strategy, SignalStrategy, StrategyKind, StrategySpec};
