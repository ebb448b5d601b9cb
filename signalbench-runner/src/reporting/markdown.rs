//! Markdown complexity report.

use std::fmt::Write;

use signalbench_core::{Position, StrategyKind};

use crate::harness::{BenchmarkReport, VariantSeries};
use crate::replay::ReplayOutcome;
use crate::memory::bytes_to_mb;
use crate::scaling::{classify, growth_exponent, time_ratio};

/// Render the full complexity report. `plot` is a relative path to an image
/// to embed, if one was produced.
pub fn render_complexity_report(report: &BenchmarkReport, plot: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str("# Complexity Analysis Results\n\n");
    let _ = writeln!(
        out,
        "Dataset: {} ticks (hash `{}`), {} repetition(s) per pass.\n",
        report.tick_count,
        short_hash(&report.dataset_hash),
        report.repetitions
    );
    if !report.skipped_sizes.is_empty() {
        let skipped: Vec<String> = report.skipped_sizes.iter().map(|s| group(*s)).collect();
        let _ = writeln!(
            out,
            "Skipped sizes larger than the dataset: {}.\n",
            skipped.join(", ")
        );
    }

    out.push_str("## Results Summary\n\n");
    out.push_str("### Runtime (seconds)\n\n");
    out.push_str(&table(report, |series, size| {
        series
            .sample_at(size)
            .map(|s| format!("{:.4}s", s.elapsed_secs))
    }));

    out.push_str("\n### Memory Usage (peak MB)\n\n");
    out.push_str(&table(report, |series, size| {
        series
            .sample_at(size)
            .and_then(|s| s.peak_bytes)
            .map(|b| format!("{:.2}MB", bytes_to_mb(b)))
    }));

    if let Some(path) = plot {
        let _ = writeln!(out, "\n![Plots]({path})");
    }

    out.push_str("\n## Detailed Analysis\n");
    for series in &report.series {
        out.push_str(&variant_section(series));
    }

    out.push_str(&insights(report));
    out.push_str(&recommendation(report));
    out
}

fn table<F>(report: &BenchmarkReport, cell: F) -> String
where
    F: Fn(&VariantSeries, usize) -> Option<String>,
{
    let mut out = String::from("| Size |");
    for series in &report.series {
        let _ = write!(out, " {} |", series.label);
    }
    out.push_str("\n|------|");
    for _ in &report.series {
        out.push_str("------|");
    }
    out.push('\n');

    for &size in &report.sizes {
        let _ = write!(out, "| {} |", group(size));
        for series in &report.series {
            let value = cell(series, size).unwrap_or_else(|| "n/a".to_string());
            let _ = write!(out, " {value} |");
        }
        out.push('\n');
    }
    out
}

fn variant_section(series: &VariantSeries) -> String {
    let kind = series.kind;
    let mut out = String::new();
    let _ = writeln!(out, "\n### {}\n", series.label);
    let _ = writeln!(
        out,
        "**Time Complexity: {} per tick, {} total**",
        kind.time_per_tick(),
        kind.time_total()
    );
    let _ = writeln!(out, "- {}", time_note(kind));
    if let Some(exp) = growth_exponent(&series.samples) {
        let class = classify(&series.samples).map(|c| c.to_string());
        let _ = writeln!(
            out,
            "- Measured growth exponent: {:.2} ({})",
            exp,
            class.unwrap_or_default()
        );
    }
    let _ = writeln!(out, "\n**Space Complexity: {}**", kind.space());
    let _ = writeln!(out, "- {}", space_note(kind));
    if let Some(peak) = series.largest().and_then(|s| s.peak_bytes.map(|b| (s.size, b))) {
        let _ = writeln!(
            out,
            "- Peak heap at {} ticks: {:.3}MB",
            group(peak.0),
            bytes_to_mb(peak.1)
        );
    }
    out
}

fn time_note(kind: StrategyKind) -> &'static str {
    match kind {
        StrategyKind::FullHistory => {
            "Appends each price, then rescans the whole history: 1 + 2 + ... + n = O(n²)"
        }
        StrategyKind::FixedWindow => {
            "Evicts the oldest price and adjusts a running sum: constant work per tick"
        }
        StrategyKind::BoundedDeque => {
            "Keeps k prices but rescans them every tick: bounded memory, O(k) time"
        }
        StrategyKind::CircularArray => {
            "Overwrites one preallocated slot and adjusts a running sum: constant work per tick"
        }
        StrategyKind::Exponential => {
            "One multiply-add against the previous average: constant work per tick"
        }
    }
}

fn space_note(kind: StrategyKind) -> &'static str {
    match kind {
        StrategyKind::FullHistory => "Stores every price, so memory grows linearly with the stream",
        StrategyKind::FixedWindow | StrategyKind::BoundedDeque => {
            "Stores at most k prices, independent of stream length"
        }
        StrategyKind::CircularArray => "Allocates k slots once at construction and never grows",
        StrategyKind::Exponential => "Stores a single smoothed value",
    }
}

fn insights(report: &BenchmarkReport) -> String {
    let mut out = String::from("\n## Key Insights\n\n");
    let (Some(&smallest), Some(&largest)) = (report.sizes.first(), report.sizes.last()) else {
        return out;
    };
    let mut n = 1;

    if smallest < largest {
        for series in &report.series {
            if let Some(ratio) = time_ratio(&series.samples, smallest, largest) {
                let _ = writeln!(
                    out,
                    "{n}. **{}**: {:.1}x more ticks took {:.1}x longer",
                    series.label,
                    largest as f64 / smallest.max(1) as f64,
                    ratio
                );
                n += 1;
            }
        }
    }

    let at_largest: Vec<(&VariantSeries, f64)> = report
        .series
        .iter()
        .filter_map(|s| s.sample_at(largest).map(|x| (s, x.elapsed_secs)))
        .collect();
    let slowest = at_largest
        .iter()
        .max_by(|a, b| a.1.total_cmp(&b.1));
    let fastest = at_largest
        .iter()
        .min_by(|a, b| a.1.total_cmp(&b.1));
    if let (Some(slow), Some(fast)) = (slowest, fastest) {
        if fast.1 > 0.0 && slow.0.label != fast.0.label {
            let _ = writeln!(
                out,
                "{n}. At {} ticks, {} is {:.1}x slower than {}",
                group(largest),
                slow.0.label,
                slow.1 / fast.1,
                fast.0.label
            );
        }
    }
    out
}

fn recommendation(report: &BenchmarkReport) -> String {
    let Some(largest) = report.largest_size() else {
        return String::new();
    };
    let best = report
        .series
        .iter()
        .filter(|s| s.kind.is_memory_bounded())
        .filter_map(|s| s.sample_at(largest).map(|x| (s, x.elapsed_secs)))
        .min_by(|a, b| a.1.total_cmp(&b.1));

    let mut out = String::from("\n## Recommendation\n\n");
    match best {
        Some((series, _)) => {
            let _ = writeln!(
                out,
                "Deploy **{}**: {} total time with {} memory, independent of how long the stream runs.",
                series.label,
                series.kind.time_total(),
                series.kind.space()
            );
        }
        None => out.push_str("No memory-bounded variant was measured.\n"),
    }
    out
}

/// Per-variant replay summary. `last_price` marks any open position to market.
pub fn render_replay_table(outcomes: &[ReplayOutcome], last_price: f64) -> String {
    let mut out = String::from(
        "| Strategy | Total Return | Open PnL | Signals | Trades | Win Rate | Position |\n\
         |------|------|------|------|------|------|------|\n",
    );
    for o in outcomes {
        let win_rate = o
            .win_rate()
            .map(|w| format!("{:.1}%", w * 100.0))
            .unwrap_or_else(|| "n/a".to_string());
        let position = match o.final_position {
            Position::Flat => "flat",
            Position::Long { .. } => "long",
        };
        let _ = writeln!(
            out,
            "| {} | {:.4} | {:.4} | {} | {} | {} | {} |",
            o.label,
            o.total_return,
            o.final_position.unrealized_pnl(last_price),
            o.signal_count(),
            o.round_trips.len(),
            win_rate,
            position
        );
    }
    out
}

/// Format an integer with thousands separators.
fn group(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn short_hash(hash: &str) -> &str {
    hash.get(..12).unwrap_or(hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::Sample;
    use signalbench_core::StrategySpec;

    fn series(spec: StrategySpec, points: &[(usize, f64, Option<u64>)]) -> VariantSeries {
        VariantSeries {
            label: spec.label(),
            kind: spec.kind(),
            spec,
            samples: points
                .iter()
                .map(|&(size, elapsed_secs, peak_bytes)| Sample {
                    size,
                    elapsed_secs,
                    peak_bytes,
                    total_return: 0.0,
                    signal_count: 0,
                })
                .collect(),
        }
    }

    fn sample_report() -> BenchmarkReport {
        BenchmarkReport {
            schema_version: 1,
            dataset_hash: "abcdef0123456789".into(),
            tick_count: 100_000,
            sizes: vec![1_000, 100_000],
            skipped_sizes: vec![1_000_000],
            repetitions: 1,
            series: vec![
                series(
                    StrategySpec::FullHistory,
                    &[(1_000, 0.001, Some(8_000)), (100_000, 10.0, Some(800_000))],
                ),
                series(
                    StrategySpec::FixedWindow { window: 50 },
                    &[(1_000, 0.0001, Some(400)), (100_000, 0.01, Some(400))],
                ),
                series(
                    StrategySpec::Exponential { decay: 0.1 },
                    &[(1_000, 0.00002, None), (100_000, 0.005, None)],
                ),
            ],
        }
    }

    #[test]
    fn fractional_size_multiplier() {
        let mut report = sample_report();
        report.sizes = vec![1_000, 2_500];
        report.series = vec![series(
            StrategySpec::FullHistory,
            &[(1_000, 0.1, None), (2_500, 0.625, None)],
        )];
        let md = render_complexity_report(&report, None);
        assert!(md.contains("**Full-History**: 2.5x more ticks took 6.2x longer"), "{md}");
    }

    #[test]
    fn replay_table_marks_open_position() {
        use crate::replay::replay;
        use crate::synthetic::monotonic_ticks;
        use signalbench_core::build_strategy;

        let ticks = monotonic_ticks(1_001);
        let mut strategy = build_strategy(&StrategySpec::FixedWindow { window: 5 }).unwrap();
        let mut outcome = replay(strategy.as_mut(), &ticks).unwrap();
        outcome.label = "Fixed-Window(k=5)".into();
        let last = ticks[1_000].price();

        let table = render_replay_table(&[outcome], last);
        // Bought at tick 1 (100.001) and held to 101.0.
        assert!(
            table.contains("| Fixed-Window(k=5) | 0.0000 | 0.9990 | 1 | 0 | n/a | long |"),
            "{table}"
        );
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group(0), "0");
        assert_eq!(group(999), "999");
        assert_eq!(group(1_000), "1,000");
        assert_eq!(group(100_000), "100,000");
        assert_eq!(group(1_234_567), "1,234,567");
    }

    #[test]
    fn tables_have_a_row_per_size() {
        let md = render_complexity_report(&sample_report(), None);
        assert!(md.contains("| Size | Full-History | Fixed-Window(k=50) | Exponential(α=0.1) |"));
        assert!(md.contains("| 1,000 | 0.0010s | 0.0001s | 0.0000s |"));
        assert!(md.contains("| 100,000 | 0.76MB | 0.00MB | n/a |"));
        assert!(md.contains("Skipped sizes larger than the dataset: 1,000,000."));
        assert!(!md.contains("![Plots]"));
    }

    #[test]
    fn analysis_reports_growth_and_recommends_bounded_variant() {
        let md = render_complexity_report(&sample_report(), Some("complexity_plots.svg"));
        assert!(md.contains("![Plots](complexity_plots.svg)"));
        assert!(md.contains("**Time Complexity: O(t) per tick, O(n²) total**"));
        assert!(md.contains("Measured growth exponent: 2.00 (quadratic)"));
        assert!(md.contains("Measured growth exponent: 1.00 (near-linear)"));
        assert!(md.contains("Deploy **Exponential(α=0.1)**"));
        assert!(md.contains("100.0x more ticks took 10000.0x longer"));
    }
}
