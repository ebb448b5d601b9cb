//! SVG scaling plots: runtime and peak memory against input size, both on
//! log10 axes so linear and quadratic growth separate into distinct slopes.

use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;
use thiserror::Error;

use crate::harness::{BenchmarkReport, Sample};
use crate::memory::bytes_to_mb;

const SIZE: (u32, u32) = (1400, 540);

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("drawing failed: {0}")]
    Draw(String),
    #[error("no samples to plot")]
    Empty,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn draw_err<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Draw(e.to_string())
}

type Points = Vec<(f64, f64)>;

/// Render the two-panel plot to an SVG document.
pub fn render_svg(report: &BenchmarkReport) -> Result<String, PlotError> {
    let runtime: Vec<(String, Points)> = report
        .series
        .iter()
        .map(|s| (s.label.clone(), points(&s.samples, |x| Some(x.elapsed_secs))))
        .collect();
    let memory: Vec<(String, Points)> = report
        .series
        .iter()
        .map(|s| {
            let pts = points(&s.samples, |x| x.peak_bytes.map(bytes_to_mb));
            (s.label.clone(), pts)
        })
        .collect();

    if runtime.iter().all(|(_, pts)| pts.is_empty()) {
        return Err(PlotError::Empty);
    }

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;
        let panels = root.split_evenly((1, 2));
        draw_panel(&panels[0], "Runtime scaling", "log10(seconds)", &runtime)?;
        draw_panel(&panels[1], "Peak memory", "log10(MB)", &memory)?;
        root.present().map_err(draw_err)?;
    }
    Ok(svg)
}

/// Render and write the plot to `path`.
pub fn write_svg(report: &BenchmarkReport, path: &Path) -> Result<(), PlotError> {
    let svg = render_svg(report)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, svg)?;
    Ok(())
}

fn points<F>(samples: &[Sample], value: F) -> Points
where
    F: Fn(&Sample) -> Option<f64>,
{
    let mut pts: Points = samples
        .iter()
        .filter(|s| s.size > 0)
        .filter_map(|s| {
            let v = value(s).filter(|v| *v > 0.0)?;
            Some(((s.size as f64).log10(), v.log10()))
        })
        .collect();
    pts.sort_by(|a, b| a.0.total_cmp(&b.0));
    pts
}

fn span<I: Iterator<Item = f64>>(values: I) -> Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    let pad = ((hi - lo) * 0.05).max(0.25);
    (lo - pad)..(hi + pad)
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    caption: &str,
    y_desc: &str,
    series: &[(String, Points)],
) -> Result<(), PlotError> {
    let x_range = span(series.iter().flat_map(|(_, p)| p.iter().map(|pt| pt.0)));
    let y_range = span(series.iter().flat_map(|(_, p)| p.iter().map(|pt| pt.1)));

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 20).into_font())
        .margin(10)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(draw_err)?;
    chart
        .configure_mesh()
        .x_desc("log10(ticks)")
        .y_desc(y_desc)
        .draw()
        .map_err(draw_err)?;

    for (i, (label, pts)) in series.iter().enumerate() {
        if pts.is_empty() {
            continue;
        }
        let color = Palette99::pick(i).mix(1.0);
        chart
            .draw_series(LineSeries::new(pts.clone(), color))
            .map_err(draw_err)?
            .label(label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        chart
            .draw_series(pts.iter().map(|p| Circle::new(*p, 3, color.filled())))
            .map_err(draw_err)?;
    }
    chart
        .configure_series_labels()
        .border_style(BLACK)
        .draw()
        .map_err(draw_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::VariantSeries;
    use signalbench_core::StrategySpec;

    fn report(samples: Vec<Sample>) -> BenchmarkReport {
        let spec = StrategySpec::FullHistory;
        BenchmarkReport {
            schema_version: 1,
            dataset_hash: String::new(),
            tick_count: 1_000,
            sizes: samples.iter().map(|s| s.size).collect(),
            skipped_sizes: Vec::new(),
            repetitions: 1,
            series: vec![VariantSeries {
                label: spec.label(),
                kind: spec.kind(),
                spec,
                samples,
            }],
        }
    }

    fn sample(size: usize, elapsed_secs: f64) -> Sample {
        Sample {
            size,
            elapsed_secs,
            peak_bytes: Some(size as u64 * 8),
            total_return: 0.0,
            signal_count: 0,
        }
    }

    #[test]
    fn renders_svg_document() {
        let svg = render_svg(&report(vec![sample(100, 0.001), sample(1_000, 0.1)])).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Runtime scaling"));
        assert!(svg.contains("Full-History"));
    }

    #[test]
    fn zero_timings_are_an_error() {
        let err = render_svg(&report(vec![sample(100, 0.0)])).unwrap_err();
        assert!(matches!(err, PlotError::Empty));
    }
}
