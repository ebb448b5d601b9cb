//! Benchmark harness: times full passes of each variant over tick prefixes.
//!
//! For every requested size and every strategy spec, a fresh instance
//! consumes `ticks[..size]` in order. Wall-clock time comes from `Instant`,
//! peak heap from [`MemoryProbe`]. Passes run one at a time so the
//! process-wide allocation peak belongs to a single pass.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use signalbench_core::strategy::{build_strategy, StrategyKind, StrategySpec};
use signalbench_core::{ConfigurationError, DataError, Tick};

use crate::config::BenchmarkConfig;
use crate::data_loader::dataset_hash;
use crate::memory::MemoryProbe;
use crate::profiling::ProfileScope;

/// Current schema version for persisted reports.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors from the harness.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("data error: {0}")]
    Data(#[from] DataError),
    #[error("no benchmark sizes fit the {available} available ticks")]
    NoUsableSizes { available: usize },
}

/// One timed pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub size: usize,
    pub elapsed_secs: f64,
    /// Peak heap bytes above the pre-pass baseline; `None` when allocation
    /// tracking is not installed.
    pub peak_bytes: Option<u64>,
    pub total_return: f64,
    pub signal_count: usize,
}

/// All samples for one strategy spec, in size order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantSeries {
    pub label: String,
    pub kind: StrategyKind,
    pub spec: StrategySpec,
    pub samples: Vec<Sample>,
}

impl VariantSeries {
    pub fn sample_at(&self, size: usize) -> Option<&Sample> {
        self.samples.iter().find(|s| s.size == size)
    }

    pub fn largest(&self) -> Option<&Sample> {
        self.samples.iter().max_by_key(|s| s.size)
    }
}

/// Complete harness output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub dataset_hash: String,
    pub tick_count: usize,
    /// Sizes actually measured, ascending.
    pub sizes: Vec<usize>,
    /// Requested sizes larger than the data.
    #[serde(default)]
    pub skipped_sizes: Vec<usize>,
    pub repetitions: usize,
    pub series: Vec<VariantSeries>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl BenchmarkReport {
    pub fn series_for(&self, kind: StrategyKind) -> Option<&VariantSeries> {
        self.series.iter().find(|s| s.kind == kind)
    }

    pub fn largest_size(&self) -> Option<usize> {
        self.sizes.iter().copied().max()
    }
}

/// Outcome of a single pass.
#[derive(Debug, Clone)]
struct PassMeasurement {
    elapsed_secs: f64,
    peak_bytes: Option<u64>,
    total_return: f64,
    signal_count: usize,
}

/// Run one fresh instance over `ticks`, timing the tick loop and tracking
/// the allocation peak from construction onward.
fn measure_pass(spec: &StrategySpec, ticks: &[Tick]) -> Result<PassMeasurement, HarnessError> {
    let probe = MemoryProbe::start();
    let mut strategy = build_strategy(spec)?;
    let mut signal_count = 0usize;

    let start = Instant::now();
    for tick in ticks {
        if strategy.process(tick)?.is_some() {
            signal_count += 1;
        }
    }
    let elapsed_secs = start.elapsed().as_secs_f64();
    let peak_bytes = probe.peak_bytes();

    Ok(PassMeasurement {
        elapsed_secs,
        peak_bytes,
        total_return: strategy.total_return(),
        signal_count,
    })
}

/// Split requested sizes into usable (ascending, deduplicated) and skipped.
fn partition_sizes(requested: &[usize], available: usize) -> (Vec<usize>, Vec<usize>) {
    let mut usable: Vec<usize> = Vec::new();
    let mut skipped: Vec<usize> = Vec::new();
    for &size in requested {
        if size > available {
            tracing::warn!(size, available, "skipping size larger than the data");
            skipped.push(size);
        } else {
            usable.push(size);
        }
    }
    usable.sort_unstable();
    usable.dedup();
    skipped.sort_unstable();
    skipped.dedup();
    (usable, skipped)
}

/// Benchmark every configured strategy at every configured size.
///
/// Each size is a prefix of `ticks`, never a resample. With more than one
/// repetition the fastest time is kept; memory comes from the first pass.
pub fn run_benchmark(
    config: &BenchmarkConfig,
    ticks: &[Tick],
) -> Result<BenchmarkReport, HarnessError> {
    let _scope = ProfileScope::new("run_benchmark");
    for spec in &config.strategies {
        spec.validate()?;
    }

    let (sizes, skipped_sizes) = partition_sizes(&config.sizes, ticks.len());
    if sizes.is_empty() {
        return Err(HarnessError::NoUsableSizes {
            available: ticks.len(),
        });
    }
    let repetitions = config.repetitions.max(1);

    let mut series: Vec<VariantSeries> = config
        .strategies
        .iter()
        .map(|spec| VariantSeries {
            label: spec.label(),
            kind: spec.kind(),
            spec: spec.clone(),
            samples: Vec::with_capacity(sizes.len()),
        })
        .collect();

    for &size in &sizes {
        let prefix = &ticks[..size];
        tracing::info!(size, "benchmarking prefix");

        for variant in series.iter_mut() {
            let first = measure_pass(&variant.spec, prefix)?;
            let mut best = first.elapsed_secs;
            for _ in 1..repetitions {
                best = best.min(measure_pass(&variant.spec, prefix)?.elapsed_secs);
            }

            tracing::info!(
                strategy = %variant.label,
                size,
                elapsed_secs = best,
                peak_bytes = ?first.peak_bytes,
                signals = first.signal_count,
                "pass complete"
            );

            variant.samples.push(Sample {
                size,
                elapsed_secs: best,
                peak_bytes: first.peak_bytes,
                total_return: first.total_return,
                signal_count: first.signal_count,
            });
        }
    }

    Ok(BenchmarkReport {
        schema_version: SCHEMA_VERSION,
        dataset_hash: dataset_hash(ticks),
        tick_count: ticks.len(),
        sizes,
        skipped_sizes,
        repetitions,
        series,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::sine_ticks;

    fn small_config() -> BenchmarkConfig {
        BenchmarkConfig {
            sizes: vec![500, 100, 5_000, 100],
            repetitions: 2,
            ..BenchmarkConfig::default()
        }
    }

    #[test]
    fn sizes_are_sorted_deduped_and_skipped() {
        let (usable, skipped) = partition_sizes(&[500, 100, 5_000, 100], 1_000);
        assert_eq!(usable, vec![100, 500]);
        assert_eq!(skipped, vec![5_000]);
    }

    #[test]
    fn report_covers_every_variant_and_size() {
        let ticks = sine_ticks(1_000, 11);
        let report = run_benchmark(&small_config(), &ticks).unwrap();

        assert_eq!(report.sizes, vec![100, 500]);
        assert_eq!(report.skipped_sizes, vec![5_000]);
        assert_eq!(report.tick_count, 1_000);
        assert_eq!(report.series.len(), 5);
        for variant in &report.series {
            let sizes: Vec<usize> = variant.samples.iter().map(|s| s.size).collect();
            assert_eq!(sizes, vec![100, 500]);
            assert!(variant.samples.iter().all(|s| s.elapsed_secs >= 0.0));
            // Unit tests run on the system allocator.
            assert!(variant.samples.iter().all(|s| s.peak_bytes.is_none()));
        }
    }

    #[test]
    fn samples_match_a_direct_replay_of_the_prefix() {
        let ticks = sine_ticks(1_000, 5);
        let report = run_benchmark(&small_config(), &ticks).unwrap();
        for variant in &report.series {
            let mut strategy = build_strategy(&variant.spec).unwrap();
            for tick in &ticks[..500] {
                strategy.process(tick).unwrap();
            }
            let sample = variant.sample_at(500).unwrap();
            assert_eq!(sample.total_return, strategy.total_return());
        }
    }

    #[test]
    fn no_usable_sizes_is_an_error() {
        let config = BenchmarkConfig {
            sizes: vec![10_000],
            ..BenchmarkConfig::default()
        };
        let err = run_benchmark(&config, &sine_ticks(10, 1)).unwrap_err();
        assert!(matches!(err, HarnessError::NoUsableSizes { available: 10 }));
    }

    #[test]
    fn invalid_spec_fails_before_any_pass() {
        let config = BenchmarkConfig {
            sizes: vec![10],
            strategies: vec![StrategySpec::Exponential { decay: 0.0 }],
            ..BenchmarkConfig::default()
        };
        let err = run_benchmark(&config, &sine_ticks(10, 1)).unwrap_err();
        assert!(matches!(err, HarnessError::Configuration(_)));
    }
}
