//! Medal CLI
//!
//! Historical results CSV → grey-model forecasts → per-event medal
//! allocation → prediction and medal-table CSVs.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "medal")]
#[command(about = "Forecast medal tiers with GM(1,1) and allocate them per event", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Forecast, allocate and write result tables
    Predict {
        /// Historical results CSV (Name, Event, Team, Year, Medal)
        #[arg(long)]
        records: PathBuf,

        /// Output predictions CSV
        #[arg(long)]
        out: PathBuf,

        /// Output medal table CSV
        #[arg(long)]
        summary: PathBuf,

        /// Predictor config (YAML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,

        /// Number of medal table rows to print
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Print the encoded histories built from a results CSV as JSON
    History {
        /// Historical results CSV
        #[arg(long)]
        records: PathBuf,

        /// Predictor config (YAML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: bool) {
    let rust_log = std::env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(medal_cli::log_filter(verbose, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Predict { records, out, summary, config, metadata, top } => {
            let config = medal_cli::load_config(config.as_deref())?;
            let predictor = medal_core::Predictor::new(config.clone())?;

            tracing::info!(path = %records.display(), "loading records");
            let (rows, parse) = medal_cli::load_records(&records)?;
            tracing::info!(parsed = parse.parsed, failed = parse.failed, "records loaded");

            let report = predictor.run(&rows);

            let predictions_path = medal_cli::write_with_backup(&out, |p| {
                medal_cli::write_predictions(p, &report.assignments)
            })?;
            let summary_path = medal_cli::write_with_backup(&summary, |p| {
                medal_cli::write_summary(p, &report.summaries)
            })?;

            print_medal_table(&report.summaries, top);
            println!("\nPredictions: {}", predictions_path.display());
            println!("Medal table: {}", summary_path.display());

            if let Some(metadata_path) = metadata {
                let mut meta = medal_cli::RunMetadata::new(&config, &report, &parse);
                meta.record_output(&predictions_path)?;
                meta.record_output(&summary_path)?;
                meta.save(&metadata_path)?;
                println!("Metadata:    {}", metadata_path.display());
            }
        }

        Commands::History { records, config } => {
            let config = medal_cli::load_config(config.as_deref())?;
            let predictor = medal_core::Predictor::new(config)?;
            let (rows, _) = medal_cli::load_records(&records)?;
            let histories = predictor.histories(&rows);
            println!("{}", serde_json::to_string_pretty(&histories)?);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_medal_table(summaries: &[medal_core::CollectiveSummary], top: usize) {
    println!("\n{:<8} {:>5} {:>6} {:>6} {:>5}", "NOC", "Gold", "Silver", "Bronze", "Total");
    for row in summaries.iter().take(top) {
        println!(
            "{:<8} {:>5} {:>6} {:>6} {:>5}",
            row.collective, row.gold, row.silver, row.bronze, row.total
        );
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("medal CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
