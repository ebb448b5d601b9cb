//! signalbench runner: replay, measurement and reporting.
//!
//! This crate builds on `signalbench-core` to provide:
//! - CSV tick loading and writing with dataset fingerprinting
//! - Seeded synthetic tick generation
//! - Replay of one or more strategies with signal and round-trip capture
//! - A heap-tracking global allocator for peak-memory measurement
//! - The benchmark harness, scaling analysis and report rendering
//! - Per-phase hotspot profiling

pub mod config;
pub mod data_loader;
pub mod harness;
pub mod memory;
pub mod profiling;
pub mod replay;
pub mod reporting;
pub mod scaling;
pub mod synthetic;

pub use config::{BenchmarkConfig, ConfigError, DataConfig, OutputConfig};
pub use data_loader::{dataset_hash, load_ticks, write_ticks, LoadError, LoadedTicks};
pub use harness::{run_benchmark, BenchmarkReport, HarnessError, Sample, VariantSeries};
pub use memory::{MemoryProbe, TrackingAllocator};
pub use profiling::{profile_hotspots, PhaseProfile, ProfileScope};
pub use replay::{replay, replay_lineup, ReplayError, ReplayOutcome, RoundTrip, SignalRecord};
pub use reporting::{render_complexity_report, ExportError};
pub use scaling::{classify, growth_exponent, ScalingClass};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<BenchmarkConfig>();
        assert_sync::<BenchmarkConfig>();
        assert_send::<DataConfig>();
        assert_sync::<DataConfig>();
    }

    #[test]
    fn report_types_are_send_sync() {
        assert_send::<BenchmarkReport>();
        assert_sync::<BenchmarkReport>();
        assert_send::<VariantSeries>();
        assert_sync::<VariantSeries>();
        assert_send::<Sample>();
        assert_sync::<Sample>();
    }

    #[test]
    fn phase_profile_is_send_sync() {
        assert_send::<PhaseProfile>();
        assert_sync::<PhaseProfile>();
    }

    #[test]
    fn replay_outcome_is_send_sync() {
        assert_send::<ReplayOutcome>();
        assert_sync::<ReplayOutcome>();
        assert_send::<RoundTrip>();
        assert_sync::<RoundTrip>();
    }

    #[test]
    fn errors_are_send_sync() {
        assert_send::<LoadError>();
        assert_sync::<LoadError>();
        assert_send::<HarnessError>();
        assert_sync::<HarnessError>();
        assert_send::<ReplayError>();
        assert_sync::<ReplayError>();
    }
}
