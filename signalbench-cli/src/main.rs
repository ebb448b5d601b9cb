//! signalbench CLI: replay, benchmark and data generation commands.
//!
//! Commands:
//! - `run`: replay the five-variant line-up over a tick file or synthetic data
//! - `bench`: time every variant at several input sizes and write reports
//! - `generate`: write a seeded synthetic tick CSV
//! - `profile`: per-phase hotspot timing for Full-History and Fixed-Window(10)

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use signalbench_core::{StrategySpec, Tick};
use signalbench_runner::reporting::{self, JSON_FILE, REPORT_FILE};
use signalbench_runner::synthetic::{sine_ticks, sine_ticks_for, DEFAULT_SYMBOL};
use signalbench_runner::profiling::{self, hotspot_lineup, render_phase_table};
use signalbench_runner::{
    load_ticks, profile_hotspots, replay_lineup, run_benchmark, write_ticks, BenchmarkConfig,
    TrackingAllocator,
};

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator;

#[derive(Parser)]
#[command(
    name = "signalbench",
    about = "signalbench: moving-average crossover signals under five memory strategies"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay the benchmark line-up and print each variant's result.
    Run {
        /// CSV with timestamp,symbol,price columns.
        #[arg(long)]
        data: Option<PathBuf>,

        /// Generate this many synthetic ticks instead of reading a file.
        #[arg(long)]
        synthetic: Option<usize>,

        /// Seed for synthetic data.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Time every variant at each input size and write the complexity report.
    Bench {
        /// Path to a TOML benchmark config.
        #[arg(long)]
        config: Option<PathBuf>,

        /// CSV tick file; overrides the config's data section.
        #[arg(long)]
        data: Option<PathBuf>,

        /// Comma-separated input sizes (e.g. 1000,10000,100000).
        #[arg(long, value_delimiter = ',')]
        sizes: Option<Vec<usize>>,

        /// Timed passes per size; the fastest is reported.
        #[arg(long)]
        repetitions: Option<usize>,

        /// Output directory for the report files.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Write a synthetic tick CSV.
    Generate {
        /// Number of ticks.
        #[arg(long)]
        ticks: usize,

        /// RNG seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Symbol written on every row.
        #[arg(long, default_value = DEFAULT_SYMBOL)]
        symbol: String,

        /// Output CSV path.
        #[arg(long)]
        output: PathBuf,
    },
    /// Time validation, MA update and crossing rule separately per variant.
    Profile {
        /// Number of synthetic ticks.
        #[arg(long, default_value_t = 100_000)]
        ticks: usize,

        /// CSV tick file to profile instead of synthetic data.
        #[arg(long)]
        data: Option<PathBuf>,

        /// Seed for synthetic data.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    init_tracing();
    profiling::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data,
            synthetic,
            seed,
        } => run_replay_cmd(data, synthetic, seed),
        Commands::Bench {
            config,
            data,
            sizes,
            repetitions,
            output_dir,
        } => run_bench_cmd(config, data, sizes, repetitions, output_dir),
        Commands::Generate {
            ticks,
            seed,
            symbol,
            output,
        } => run_generate_cmd(ticks, seed, &symbol, &output),
        Commands::Profile { ticks, data, seed } => run_profile_cmd(ticks, data, seed),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_csv(path: &Path) -> Result<Vec<Tick>> {
    let loaded =
        load_ticks(path).with_context(|| format!("loading ticks from {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        ticks = loaded.ticks.len(),
        hash = %loaded.dataset_hash,
        "loaded tick data"
    );
    Ok(loaded.ticks)
}

fn run_replay_cmd(data: Option<PathBuf>, synthetic: Option<usize>, seed: u64) -> Result<()> {
    if data.is_some() && synthetic.is_some() {
        bail!("--data and --synthetic are mutually exclusive");
    }
    let ticks = match (data, synthetic) {
        (Some(path), _) => load_csv(&path)?,
        (None, Some(n)) => sine_ticks(n, seed),
        (None, None) => bail!("one of --data or --synthetic is required"),
    };
    if ticks.is_empty() {
        bail!("no ticks to replay");
    }

    let outcomes = replay_lineup(&StrategySpec::benchmark_lineup(), &ticks)?;
    let last_price = ticks.last().map(|t| t.price()).unwrap_or_default();

    println!("Replayed {} ticks", ticks.len());
    println!();
    print!("{}", reporting::render_replay_table(&outcomes, last_price));
    Ok(())
}

fn run_bench_cmd(
    config_path: Option<PathBuf>,
    data: Option<PathBuf>,
    sizes: Option<Vec<usize>>,
    repetitions: Option<usize>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => BenchmarkConfig::from_file(&path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => BenchmarkConfig::default(),
    };
    if let Some(path) = data {
        config.data.path = Some(path);
    }
    if let Some(sizes) = sizes {
        config.sizes = sizes;
    }
    if let Some(repetitions) = repetitions {
        config.repetitions = repetitions;
    }
    if let Some(dir) = output_dir {
        config.output.dir = dir;
    }
    config.validate()?;

    let ticks = match &config.data.path {
        Some(path) => load_csv(path)?,
        None => {
            let largest = config.sizes.iter().copied().max().unwrap_or_default();
            let n = config.data.synthetic_ticks.max(largest);
            tracing::info!(ticks = n, seed = config.data.seed, "generating synthetic data");
            sine_ticks(n, config.data.seed)
        }
    };

    let report = run_benchmark(&config, &ticks)?;
    let dir = &config.output.dir;

    let plot = write_plot(&report, dir);
    let markdown = reporting::render_complexity_report(&report, plot);
    reporting::write_markdown(&markdown, &dir.join(REPORT_FILE))?;
    reporting::write_json(&report, &dir.join(JSON_FILE))?;

    println!("{markdown}");
    println!("Reports saved to: {}", dir.display());
    Ok(())
}

#[cfg(feature = "plot")]
fn write_plot(
    report: &signalbench_runner::BenchmarkReport,
    dir: &Path,
) -> Option<&'static str> {
    use signalbench_runner::reporting::PLOT_FILE;

    match reporting::write_svg(report, &dir.join(PLOT_FILE)) {
        Ok(()) => Some(PLOT_FILE),
        Err(e) => {
            tracing::warn!(error = %e, "plot not written");
            None
        }
    }
}

#[cfg(not(feature = "plot"))]
fn write_plot(
    _report: &signalbench_runner::BenchmarkReport,
    _dir: &Path,
) -> Option<&'static str> {
    None
}

fn run_generate_cmd(ticks: usize, seed: u64, symbol: &str, output: &Path) -> Result<()> {
    if ticks == 0 {
        bail!("--ticks must be positive");
    }
    let data = sine_ticks_for(ticks, seed, symbol);
    write_ticks(output, &data).with_context(|| format!("writing {}", output.display()))?;
    println!("Wrote {ticks} ticks to {}", output.display());
    Ok(())
}

fn run_profile_cmd(ticks: usize, data: Option<PathBuf>, seed: u64) -> Result<()> {
    let data = match data {
        Some(path) => load_csv(&path)?,
        None => {
            if ticks == 0 {
                bail!("--ticks must be positive");
            }
            sine_ticks(ticks, seed)
        }
    };
    if data.is_empty() {
        bail!("no ticks to profile");
    }

    let (profiles, elapsed) = profiling::profile("profile_hotspots", || {
        profile_hotspots(&hotspot_lineup(), &data)
    });
    let profiles = profiles?;

    println!("Profiled {} ticks in {:.3}s", data.len(), elapsed.as_secs_f64());
    println!();
    print!("{}", render_phase_table(&profiles));
    Ok(())
}
