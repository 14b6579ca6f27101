//! CallCheck CLI — render, report and refresh commands.
//!
//! Commands:
//! - `grid` — print every ticker's state, verdicts and the scorecard
//! - `detail` — print one ticker's banners, projections and notes
//! - `report` — export Markdown, CSV, JSON, or the full artifact set
//! - `update` — refresh the price snapshot from Alpha Vantage
//! - `fingerprint` — print the BLAKE3 fingerprint of the grid view

mod print;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use callcheck_core::data::{
    refresh_snapshot_file, AlphaVantageProvider, DocumentLoader, Inputs, Source,
};
use callcheck_core::{render_detail, render_grid, PredictionConfig, ViewFingerprint};
use callcheck_report::{
    export_json, export_verdicts_csv, generate_report, save_artifacts, ReportBundle,
};

#[derive(Parser)]
#[command(
    name = "callcheck",
    about = "CallCheck CLI — public market calls vs. realized prices"
)]
struct Cli {
    /// Prediction config (path or http(s) URL; .toml for TOML).
    #[arg(long, global = true, default_value = "config/predictions.json")]
    config: String,

    /// Price snapshot (path or http(s) URL).
    #[arg(long, global = true, default_value = "data/prices.json")]
    prices: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the multi-ticker grid view.
    Grid,
    /// Print the detail view for one ticker.
    Detail {
        /// Ticker symbol from the config (e.g., SPY).
        #[arg(long)]
        symbol: String,
    },
    /// Export a report.
    Report {
        #[arg(long, value_enum, default_value_t = ReportFormat::Markdown)]
        format: ReportFormat,

        /// Output file (a directory for `all`). Prints to stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Refresh the price snapshot from the provider (needs ALPHAVANTAGE_API_KEY).
    Update {
        /// Seconds to wait between symbols (free-tier throttle).
        #[arg(long, default_value_t = 13)]
        throttle_secs: u64,
    },
    /// Print the BLAKE3 fingerprint of the grid view.
    Fingerprint,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    Markdown,
    Csv,
    Json,
    /// report.json, verdicts.csv, projections.csv and report.md
    All,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Source::parse(&cli.config);
    let prices = Source::parse(&cli.prices);

    match cli.command {
        Commands::Grid => run_grid(&config, &prices),
        Commands::Detail { symbol } => run_detail(&config, &prices, &symbol),
        Commands::Report { format, out } => run_report(&config, &prices, format, out.as_deref()),
        Commands::Update { throttle_secs } => run_update(&config, &prices, throttle_secs),
        Commands::Fingerprint => run_fingerprint(&config, &prices),
    }
}

fn load(config: &Source, prices: &Source) -> Result<Inputs> {
    DocumentLoader::default()
        .load_inputs(config, prices)
        .context("failed to load inputs")
}

fn run_grid(config: &Source, prices: &Source) -> Result<()> {
    let inputs = load(config, prices)?;
    let grid = render_grid(&inputs.config, &inputs.snapshot);
    print!("{}", print::grid_text(&grid, &inputs.config.event_bindings()));
    Ok(())
}

fn run_detail(config: &Source, prices: &Source, symbol: &str) -> Result<()> {
    let inputs = load(config, prices)?;
    let view = render_detail(&inputs.config, &inputs.snapshot, symbol)?;
    print!("{}", print::detail_text(&view));
    Ok(())
}

fn run_report(
    config: &Source,
    prices: &Source,
    format: ReportFormat,
    out: Option<&Path>,
) -> Result<()> {
    let inputs = load(config, prices)?;
    let bundle = ReportBundle::build(&inputs.config, &inputs.snapshot)?;

    let text = match format {
        ReportFormat::Markdown => generate_report(&bundle),
        ReportFormat::Csv => export_verdicts_csv(&bundle.grid, &bundle.events)?,
        ReportFormat::Json => export_json(&bundle)?,
        ReportFormat::All => {
            let Some(dir) = out else {
                bail!("--format all requires --out <DIR>");
            };
            let dir = save_artifacts(&bundle, dir)?;
            println!("Artifacts saved to: {}", dir.display());
            return Ok(());
        }
    };

    match out {
        Some(path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn run_update(config: &Source, prices: &Source, throttle_secs: u64) -> Result<()> {
    let Source::Path(prices_path) = prices else {
        bail!("update writes the snapshot and needs a local --prices path, got {prices}");
    };
    let config_doc: PredictionConfig = DocumentLoader::default()
        .load_config(config)
        .context("failed to load config")?;
    let provider = AlphaVantageProvider::from_env()?;

    let (summary, wrote) = refresh_snapshot_file(
        prices_path,
        &config_doc,
        &provider,
        Duration::from_secs(throttle_secs),
    )?;

    for s in &summary.symbols {
        let mark = if s.changed { "updated" } else { "unchanged" };
        println!(
            "{:<6} {:>5} -> {:>5} points  {mark}",
            s.symbol, s.points_before, s.points_after
        );
    }
    if wrote {
        println!("Wrote {}", prices_path.display());
    } else {
        println!("No data changes; {} left untouched", prices_path.display());
    }
    Ok(())
}

fn run_fingerprint(config: &Source, prices: &Source) -> Result<()> {
    let inputs = load(config, prices)?;
    let grid = render_grid(&inputs.config, &inputs.snapshot);
    let fp = ViewFingerprint::of(&grid).context("failed to serialize grid view")?;
    println!("{fp}");
    Ok(())
}
