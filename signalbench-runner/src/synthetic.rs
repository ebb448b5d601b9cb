//! Synthetic tick streams for tests, benchmarks and the `generate` command.
//!
//! Timestamps start at 2025-01-01T00:00:00 and advance one second per tick.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use signalbench_core::Tick;

/// Symbol used for generated ticks unless one is given.
pub const DEFAULT_SYMBOL: &str = "TEST";

fn start_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

fn tick_at(i: usize, symbol: &str, price: f64) -> Tick {
    Tick::new(start_time() + Duration::seconds(i as i64), symbol, price)
}

/// Strictly rising prices: `100 + i / 1000`.
pub fn monotonic_ticks(n: usize) -> Vec<Tick> {
    (0..n)
        .map(|i| tick_at(i, DEFAULT_SYMBOL, 100.0 + i as f64 / 1000.0))
        .collect()
}

/// A slow sine wave with Gaussian noise: `100 + 5·sin(i/100) + N(0, 0.1)`.
///
/// Deterministic for a given seed.
pub fn sine_ticks(n: usize, seed: u64) -> Vec<Tick> {
    sine_ticks_for(n, seed, DEFAULT_SYMBOL)
}

pub fn sine_ticks_for(n: usize, seed: u64, symbol: &str) -> Vec<Tick> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let price = 100.0 + (i as f64 / 100.0).sin() * 5.0 + standard_normal(&mut rng) * 0.1;
            tick_at(i, symbol, price)
        })
        .collect()
}

/// Box-Muller transform over two uniform draws.
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    // gen::<f64>() is in [0, 1); shift away from zero before the log.
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}
