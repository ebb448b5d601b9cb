//! Reporting and artifact export.

pub mod export;
pub mod markdown;
#[cfg(feature = "plot")]
pub mod plot;

pub use export::{load_json, write_json, write_markdown, ExportError};
pub use markdown::{render_complexity_report, render_replay_table};
#[cfg(feature = "plot")]
pub use plot::{render_svg, write_svg, PlotError};

/// File names written into the output directory.
pub const REPORT_FILE: &str = "complexity_report.md";
pub const JSON_FILE: &str = "benchmark.json";
pub const PLOT_FILE: &str = "complexity_plots.svg";
