//! Peak-memory measurement with the tracking allocator installed.
//!
//! The allocator counters are process-wide, so everything lives in one test
//! function to keep passes from overlapping.

use signalbench_core::StrategySpec;
use signalbench_runner::memory::{self, MemoryProbe, TrackingAllocator};
use signalbench_runner::synthetic::monotonic_ticks;
use signalbench_runner::{run_benchmark, BenchmarkConfig};

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator;

#[test]
fn full_history_grows_while_bounded_variants_stay_flat() {
    // Probe basics.
    let probe = MemoryProbe::start();
    let buffer: Vec<u64> = std::hint::black_box(Vec::with_capacity(100_000));
    let peak = probe.peak_bytes().unwrap();
    assert!(memory::is_installed());
    assert!(peak >= 800_000, "peak {peak}");
    drop(buffer);

    let ticks = monotonic_ticks(100_000);
    let config = BenchmarkConfig {
        sizes: vec![1_000, 100_000],
        strategies: vec![
            StrategySpec::FullHistory,
            StrategySpec::FixedWindow { window: 50 },
            StrategySpec::CircularArray { window: 50 },
            StrategySpec::Exponential { decay: 0.1 },
        ],
        ..BenchmarkConfig::default()
    };
    let report = run_benchmark(&config, &ticks).unwrap();

    let peak_at = |label: &str, size: usize| -> u64 {
        report
            .series
            .iter()
            .find(|s| s.label == label)
            .and_then(|s| s.sample_at(size))
            .and_then(|s| s.peak_bytes)
            .unwrap()
    };

    // Full history stores every price: at least 8 bytes per tick.
    let full = peak_at("Full-History", 100_000);
    assert!(full >= 800_000, "full-history peak {full}");
    assert!(full > 10 * peak_at("Full-History", 1_000));

    // Bounded variants retain at most 50 prices regardless of stream length.
    for label in ["Fixed-Window(k=50)", "Circular-Array(k=50)", "Exponential(α=0.1)"] {
        let small = peak_at(label, 1_000);
        let large = peak_at(label, 100_000);
        assert!(large < 16 * 1024, "{label} peak {large}");
        assert!(
            large.abs_diff(small) < 1024,
            "{label} memory changed with stream length: {small} -> {large}"
        );
    }
}
