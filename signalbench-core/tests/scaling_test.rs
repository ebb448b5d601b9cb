//! Empirical scaling: full history is superlinear, fixed window near-linear.
//!
//! Uses monotonic synthetic prices `100 + i/1000`. Each measurement takes the
//! fastest of several passes to damp scheduler noise.

use std::time::{Duration, Instant};

use chrono::{Duration as ChronoDuration, NaiveDate};
use signalbench_core::strategy::{FixedWindow, FullHistory, SignalStrategy};
use signalbench_core::Tick;

fn monotonic_ticks(n: usize) -> Vec<Tick> {
    let base = NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    (0..n)
        .map(|i| {
            Tick::new(
                base + ChronoDuration::seconds(i as i64),
                "TEST",
                100.0 + i as f64 / 1000.0,
            )
        })
        .collect()
}

fn fastest_pass<S, F>(ticks: &[Tick], passes: usize, make: F) -> Duration
where
    S: SignalStrategy,
    F: Fn() -> S,
{
    (0..passes)
        .map(|_| {
            let mut strategy = make();
            let start = Instant::now();
            for tick in ticks {
                std::hint::black_box(strategy.process(tick).unwrap());
            }
            std::hint::black_box(strategy.total_return());
            start.elapsed()
        })
        .min()
        .unwrap_or_default()
}

#[test]
fn full_history_scales_superlinearly() {
    let small = monotonic_ticks(1_000);
    let large = monotonic_ticks(10_000);

    let t_small = fastest_pass(&small, 7, FullHistory::new);
    let t_large = fastest_pass(&large, 3, FullHistory::new);
    let ratio = t_large.as_secs_f64() / t_small.as_secs_f64().max(1e-9);

    assert!(
        ratio >= 50.0,
        "full history not superlinear enough: {ratio:.1}x ({t_small:?} -> {t_large:?})"
    );
}

#[test]
fn fixed_window_scales_near_linearly() {
    let small = monotonic_ticks(1_000);
    let large = monotonic_ticks(10_000);

    let make = || FixedWindow::new(50).unwrap();
    let t_small = fastest_pass(&small, 25, make);
    let t_large = fastest_pass(&large, 25, make);
    let ratio = t_large.as_secs_f64() / t_small.as_secs_f64().max(1e-9);

    assert!(
        ratio < 15.0,
        "fixed window not near-linear: {ratio:.1}x ({t_small:?} -> {t_large:?})"
    );
}
