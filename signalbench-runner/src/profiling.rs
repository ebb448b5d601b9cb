//! Hotspot profiling: where a strategy spends its time per tick.
//!
//! Two tools live here:
//! - Timing scopes (`ProfileScope`, `profile`) that log through `tracing`
//!   when profiling is enabled.
//! - Phase profiling (`profile_phases`), which drives a strategy through its
//!   stages one tick at a time and accumulates the time spent in each:
//!   tick validation, moving-average update and the crossing rule.
//!
//! # Environment Variables
//!
//! - `SIGNALBENCH_PROFILE=1`: log every timing scope on drop

use std::fmt::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;
use signalbench_core::strategy::validate_tick;
use signalbench_core::{build_strategy, SignalStrategy, StrategyKind, StrategySpec, Tick};

use crate::replay::ReplayError;

static PROFILING_ENABLED: AtomicBool = AtomicBool::new(false);

/// Read `SIGNALBENCH_PROFILE` and enable scope logging accordingly.
pub fn init() {
    let enabled = std::env::var("SIGNALBENCH_PROFILE")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    set_enabled(enabled);
    if enabled {
        tracing::info!("profiling enabled (SIGNALBENCH_PROFILE=1)");
    }
}

pub fn set_enabled(enabled: bool) {
    PROFILING_ENABLED.store(enabled, Ordering::Relaxed);
}

#[inline]
pub fn is_enabled() -> bool {
    PROFILING_ENABLED.load(Ordering::Relaxed)
}

/// Measures the time until it is dropped, logging it when profiling is on.
pub struct ProfileScope {
    name: &'static str,
    start: Instant,
}

impl ProfileScope {
    #[inline]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for ProfileScope {
    fn drop(&mut self) {
        if is_enabled() {
            tracing::info!(
                scope = self.name,
                elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0,
                "profile"
            );
        }
    }
}

/// Run `f`, returning its result and how long it took.
pub fn profile<F, R>(name: &'static str, f: F) -> (R, Duration)
where
    F: FnOnce() -> R,
{
    let scope = ProfileScope::new(name);
    let result = f();
    (result, scope.elapsed())
}

/// The stages of one `process` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Validation,
    AverageUpdate,
    CrossingRule,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Validation, Phase::AverageUpdate, Phase::CrossingRule];

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Validation => "validation",
            Phase::AverageUpdate => "MA update",
            Phase::CrossingRule => "crossing rule",
        }
    }
}

/// Accumulated per-phase time for one strategy over one tick stream.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseProfile {
    pub label: String,
    pub kind: StrategyKind,
    pub tick_count: usize,
    pub validation_secs: f64,
    pub average_update_secs: f64,
    pub crossing_rule_secs: f64,
    pub signal_count: usize,
    pub total_return: f64,
}

impl PhaseProfile {
    pub fn secs(&self, phase: Phase) -> f64 {
        match phase {
            Phase::Validation => self.validation_secs,
            Phase::AverageUpdate => self.average_update_secs,
            Phase::CrossingRule => self.crossing_rule_secs,
        }
    }

    pub fn total_secs(&self) -> f64 {
        self.validation_secs + self.average_update_secs + self.crossing_rule_secs
    }

    /// Fraction of the measured time spent in `phase`; 0 when nothing was measured.
    pub fn share(&self, phase: Phase) -> f64 {
        let total = self.total_secs();
        if total > 0.0 {
            self.secs(phase) / total
        } else {
            0.0
        }
    }

    /// The phase with the most accumulated time.
    pub fn hotspot(&self) -> Phase {
        Phase::ALL
            .into_iter()
            .max_by(|a, b| self.secs(*a).total_cmp(&self.secs(*b)))
            .unwrap_or(Phase::AverageUpdate)
    }
}

/// Drive `strategy` over `ticks` stage by stage, timing each stage.
///
/// Produces the same signals and PnL as calling `process` per tick.
pub fn profile_phases(
    strategy: &mut dyn SignalStrategy,
    ticks: &[Tick],
) -> Result<PhaseProfile, ReplayError> {
    let mut validation = Duration::ZERO;
    let mut average_update = Duration::ZERO;
    let mut crossing_rule = Duration::ZERO;
    let mut signal_count = 0usize;

    for (index, tick) in ticks.iter().enumerate() {
        let t0 = Instant::now();
        validate_tick(tick).map_err(|source| ReplayError::Data { index, source })?;
        let price = tick.price();
        let t1 = Instant::now();
        let ma = strategy.update_average(price);
        let t2 = Instant::now();
        let signal = ma.and_then(|ma| strategy.book_mut().on_price(price, ma));
        let t3 = Instant::now();

        validation += t1 - t0;
        average_update += t2 - t1;
        crossing_rule += t3 - t2;
        if signal.is_some() {
            signal_count += 1;
        }
    }

    Ok(PhaseProfile {
        label: strategy.kind().label().to_string(),
        kind: strategy.kind(),
        tick_count: ticks.len(),
        validation_secs: validation.as_secs_f64(),
        average_update_secs: average_update.as_secs_f64(),
        crossing_rule_secs: crossing_rule.as_secs_f64(),
        signal_count,
        total_return: strategy.total_return(),
    })
}

/// The two variants profiled by default: the quadratic baseline and a
/// ten-tick running-sum window.
pub fn hotspot_lineup() -> Vec<StrategySpec> {
    vec![
        StrategySpec::FullHistory,
        StrategySpec::FixedWindow { window: 10 },
    ]
}

/// Profile each spec on a fresh instance, sequentially.
pub fn profile_hotspots(
    specs: &[StrategySpec],
    ticks: &[Tick],
) -> Result<Vec<PhaseProfile>, ReplayError> {
    for spec in specs {
        spec.validate()?;
    }
    specs
        .iter()
        .map(|spec| {
            let _scope = ProfileScope::new("profile_phases");
            let mut strategy = build_strategy(spec)?;
            let mut profile = profile_phases(strategy.as_mut(), ticks)?;
            profile.label = spec.label();
            tracing::info!(
                strategy = %profile.label,
                hotspot = profile.hotspot().label(),
                total_secs = profile.total_secs(),
                "phase profile complete"
            );
            Ok(profile)
        })
        .collect()
}

/// Markdown table of per-phase time and share.
pub fn render_phase_table(profiles: &[PhaseProfile]) -> String {
    let mut out = String::from("| Strategy | Ticks |");
    for phase in Phase::ALL {
        let _ = write!(out, " {} |", phase.label());
    }
    out.push_str(" Hotspot |\n|------|------|");
    for _ in Phase::ALL {
        out.push_str("------|");
    }
    out.push_str("------|\n");

    for p in profiles {
        let _ = write!(out, "| {} | {} |", p.label, p.tick_count);
        for phase in Phase::ALL {
            let _ = write!(
                out,
                " {:.4}s ({:.0}%) |",
                p.secs(phase),
                p.share(phase) * 100.0
            );
        }
        let _ = writeln!(out, " {} |", p.hotspot().label());
    }
    out
}
