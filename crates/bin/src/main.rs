//! Quarterly CLI binary.
//!
//! Provides the command-line interface for the quarterly statement pipeline.

mod integration;

use clap::{Args, Parser, Subcommand};
use integration::progress::Progress;
use integration::snapshot::{open_directory, snapshot_path};
use integration::targets::{merge_targets, paired_targets, resolve_names};
use quarterly::data::dart::{DartClient, DartConfig};
use quarterly::data::directory::CompanyDirectory;
use quarterly::metrics::ForecastStrategy;
use quarterly::output::{ExportFormat, Exporter, ReportBuilder, summarize, to_ascii_table};
use quarterly::{ConfigFile, RunConfig, run_with_progress};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "quarterly=info,quarterly_data=info,quarterly_metrics=info";

#[derive(Parser)]
#[command(name = "quarterly")]
#[command(about = "Quarterly financial statements from OpenDART", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, derive, forecast and export quarterly statements
    Run(RunArgs),

    /// Search the company directory by name
    Lookup {
        /// Name or part of a name
        name: String,

        /// CORPCODE.xml snapshot
        #[arg(long)]
        directory: Option<PathBuf>,

        /// Maximum number of matches shown
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

#[derive(Args)]
struct RunArgs {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Corp code of a company (pair with --name)
    #[arg(long = "corp-code")]
    corp_codes: Vec<String>,

    /// Display name for the matching --corp-code
    #[arg(long = "name")]
    names: Vec<String>,

    /// Company name resolved through the directory snapshot
    #[arg(long = "company")]
    companies: Vec<String>,

    /// First fiscal year
    #[arg(long)]
    start_year: Option<i32>,

    /// Last fiscal year
    #[arg(long)]
    end_year: Option<i32>,

    /// Forecast strategy (linear, growth or none)
    #[arg(long)]
    strategy: Option<ForecastStrategy>,

    /// Quarters to forecast
    #[arg(long)]
    horizon: Option<usize>,

    /// Compute growth over forecast rows too
    #[arg(long)]
    growth_over_forecast: bool,

    /// Output format (csv, json or pretty-json)
    #[arg(long)]
    format: Option<ExportFormat>,

    /// Output file
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// OpenDART API key
    #[arg(long, env = "DART_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// OpenDART API base URL
    #[arg(long, env = "DART_BASE_URL", hide = true)]
    base_url: Option<String>,

    /// CORPCODE.xml snapshot
    #[arg(long)]
    directory: Option<PathBuf>,

    /// Write a JSON run report
    #[arg(long)]
    report: Option<PathBuf>,

    /// Skip the summary table
    #[arg(long)]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let progress = Progress::hidden();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(progress.clone())
        .init();

    if let Err(e) = run(progress).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(progress: Progress) -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run_statements(args, progress).await?,
        Commands::Lookup {
            name,
            directory,
            limit,
        } => lookup(&name, directory.as_deref(), limit)?,
    }

    Ok(())
}

async fn run_statements(
    args: RunArgs,
    progress: Progress,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = match &args.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };

    let mut config = file.to_run_config();
    apply_overrides(&mut config, &args);

    merge_targets(
        &mut config.companies,
        paired_targets(&args.corp_codes, &args.names)?,
    );

    let names: Vec<String> = file
        .company_names
        .iter()
        .chain(&args.companies)
        .cloned()
        .collect();
    let mut unresolved = Vec::new();
    if !names.is_empty() {
        let snapshot = snapshot_path(args.directory.as_deref());
        let directory = open_directory(&snapshot)?;
        let resolved = resolve_names(&names, directory.as_ref(), &snapshot)?;
        merge_targets(&mut config.companies, resolved.targets);
        unresolved = resolved.unresolved;
    }

    config.validate()?;

    let output = args
        .output
        .clone()
        .or_else(|| file.output.clone())
        .unwrap_or_else(|| default_output(&config, args.format.or(file.format)));
    let format = args
        .format
        .or(file.format)
        .or_else(|| ExportFormat::from_path(&output))
        .unwrap_or_default();

    let mut dart = DartConfig::new(args.api_key.clone().unwrap_or_default());
    if let Some(url) = &args.base_url {
        dart = dart.with_base_url(url.trim_end_matches('/'));
    }
    let client = DartClient::with_config(dart)?;

    let periods = (config.end_year - config.start_year + 1) as u64 * 4;
    progress.start(periods * config.companies.len() as u64);

    let outcome = match run_with_progress(&client, &config, |event| progress.handle(event)).await {
        Ok(outcome) => outcome,
        Err(e) => {
            progress.abandon();
            return Err(e.into());
        }
    };
    progress.finish(format!(
        "Fetched {} companies ({} rows)",
        config.companies.len() - outcome.dropped_companies.len(),
        outcome.records.len()
    ));

    let mut dropped_companies = unresolved;
    dropped_companies.extend(outcome.dropped_companies);

    outcome.records.export_to_file(&output, format)?;
    tracing::info!(path = %output.display(), %format, rows = outcome.records.len(), "table exported");

    if !args.quiet {
        println!("{}", to_ascii_table(&summarize(&outcome.records)));
        println!("Output: {}", output.display());
    }

    if let Some(path) = &args.report {
        ReportBuilder::new()
            .years(config.start_year, config.end_year)
            .strategy(config.strategy.as_str())
            .records(&outcome.records)
            .skipped_periods(outcome.skipped_periods)
            .dropped_companies(dropped_companies)
            .build()
            .write_to(path)?;
        tracing::info!(path = %path.display(), "report written");
    }

    Ok(())
}

/// Command-line flags win over config file values.
fn apply_overrides(config: &mut RunConfig, args: &RunArgs) {
    if let Some(year) = args.start_year {
        config.start_year = year;
    }
    if let Some(year) = args.end_year {
        config.end_year = year;
    }
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    if args.horizon.is_some() {
        config.horizon = args.horizon;
    }
    if args.growth_over_forecast {
        config.growth_over_forecast = true;
    }
}

fn default_output(config: &RunConfig, format: Option<ExportFormat>) -> PathBuf {
    let extension = format.unwrap_or_default().extension();
    PathBuf::from(format!(
        "quarterly_{}-{}.{}",
        config.start_year, config.end_year, extension
    ))
}

fn lookup(
    name: &str,
    directory: Option<&Path>,
    limit: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = snapshot_path(directory);
    let directory = CompanyDirectory::load(&path)
        .map_err(|e| format!("cannot open directory snapshot {}: {}", path.display(), e))?;

    let hits = directory.search(name);
    if hits.is_empty() {
        println!("No company matches '{}'", name);
        return Ok(());
    }

    println!("{:<10} {:<8} Name", "Corp code", "Stock");
    println!("{}", "-".repeat(40));
    for entry in hits.iter().take(limit) {
        println!(
            "{:<10} {:<8} {}",
            entry.corp_code,
            entry
                .stock_code
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or("-"),
            entry.corp_name
        );
    }
    if hits.len() > limit {
        println!("... {} more", hits.len() - limit);
    }

    Ok(())
}
