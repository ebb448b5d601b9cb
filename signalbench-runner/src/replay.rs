//! Replay: runs strategies over a tick sequence and records what they did.
//!
//! Two entry points:
//! - `replay()`: one strategy instance, full signal trace and round trips.
//! - `replay_lineup()`: a fresh instance per spec, variants run in parallel.
//!   Ticks within one variant are always processed in order.

use chrono::NaiveDateTime;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use signalbench_core::strategy::{build_strategy, SignalStrategy, StrategyKind, StrategySpec};
use signalbench_core::{ConfigurationError, DataError, Position, Signal, Tick};

/// Errors from replaying a line-up.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("data error at tick {index}: {source}")]
    Data {
        index: usize,
        #[source]
        source: DataError,
    },
}

/// One emitted signal with the tick that triggered it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub index: usize,
    pub timestamp: NaiveDateTime,
    pub signal: Signal,
    pub price: f64,
}

/// A completed BUY→SELL pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundTrip {
    pub entry_index: usize,
    pub exit_index: usize,
    pub entry_price: f64,
    pub exit_price: f64,
    pub pnl: f64,
}

/// Everything a single replay produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayOutcome {
    pub label: String,
    pub kind: StrategyKind,
    pub tick_count: usize,
    pub signals: Vec<SignalRecord>,
    pub round_trips: Vec<RoundTrip>,
    pub total_return: f64,
    pub final_position: Position,
    pub final_moving_average: Option<f64>,
}

impl ReplayOutcome {
    pub fn signal_count(&self) -> usize {
        self.signals.len()
    }

    /// Round trips with positive PnL over all completed round trips.
    pub fn win_rate(&self) -> Option<f64> {
        if self.round_trips.is_empty() {
            return None;
        }
        let wins = self.round_trips.iter().filter(|t| t.pnl > 0.0).count();
        Some(wins as f64 / self.round_trips.len() as f64)
    }
}

/// Feed `ticks` to `strategy` in order, stopping at the first rejected tick.
pub fn replay(
    strategy: &mut dyn SignalStrategy,
    ticks: &[Tick],
) -> Result<ReplayOutcome, ReplayError> {
    let mut signals = Vec::new();
    let mut round_trips = Vec::new();
    let mut open: Option<(usize, f64)> = None;

    for (index, tick) in ticks.iter().enumerate() {
        let emitted = strategy
            .process(tick)
            .map_err(|source| ReplayError::Data { index, source })?;
        let Some(signal) = emitted else {
            continue;
        };

        match signal {
            Signal::Buy => open = Some((index, tick.price())),
            Signal::Sell => {
                if let Some((entry_index, entry_price)) = open.take() {
                    round_trips.push(RoundTrip {
                        entry_index,
                        exit_index: index,
                        entry_price,
                        exit_price: tick.price(),
                        pnl: tick.price() - entry_price,
                    });
                }
            }
        }
        signals.push(SignalRecord {
            index,
            timestamp: tick.timestamp(),
            signal,
            price: tick.price(),
        });
    }

    Ok(ReplayOutcome {
        label: strategy.name().to_string(),
        kind: strategy.kind(),
        tick_count: ticks.len(),
        signals,
        round_trips,
        total_return: strategy.total_return(),
        final_position: strategy.position(),
        final_moving_average: strategy.moving_average(),
    })
}

/// Replay every spec on its own fresh instance, in parallel across specs.
///
/// Every spec is validated before any replay starts. Outcomes are returned
/// in spec order.
pub fn replay_lineup(
    specs: &[StrategySpec],
    ticks: &[Tick],
) -> Result<Vec<ReplayOutcome>, ReplayError> {
    for spec in specs {
        spec.validate()?;
    }

    specs
        .par_iter()
        .map(|spec| {
            let mut strategy = build_strategy(spec)?;
            let mut outcome = replay(strategy.as_mut(), ticks)?;
            outcome.label = spec.label();
            tracing::debug!(
                strategy = %outcome.label,
                signals = outcome.signal_count(),
                total_return = outcome.total_return,
                "replay complete"
            );
            Ok(outcome)
        })
        .collect()
}
