//! CLI for the hr-metrics engine.
//!
//! Loads the roster once, then prints the figures the HR dashboard charts:
//! the KPI ticker, the yearly localization series and the per-year
//! breakdowns.

use clap::{Parser, Subcommand};
use hr_metrics::{
    BreakdownRegistry, EngineConfig, GenderNationalityBreakdown, KpiSnapshot, MetricsEngine,
    MetricsError, NationalityBreakdown, YearBreakdown, format_decimal,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

/// Errors surfaced by the CLI.
#[derive(Debug, Error)]
enum CliError {
    /// Engine failure
    #[error(transparent)]
    Metrics(#[from] MetricsError),

    /// Config file could not be read
    #[error("Failed to read config {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for `EngineConfig`
    #[error("Invalid config: {0}")]
    ConfigFormat(#[from] serde_json::Error),
}

#[derive(Parser)]
#[command(name = "hr-metrics")]
#[command(about = "Headcount, gender, localization and tenure metrics from an HR roster", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON file with engine settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Roster CSV to load [default: data/hr_raw_data.csv]
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Nationality counted as local [default: Saudi]
    #[arg(long, global = true)]
    nationality: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show workforce-wide KPIs
    Kpis,
    /// Print the one-line dashboard ticker
    Ticker,
    /// List hiring years
    Years,
    /// Show reference-nationality hires per year
    Localization,
    /// Show gender and nationality headcount for one hiring year
    Breakdown {
        /// Hiring year, defaults to the dashboard's initial year
        #[arg(long)]
        year: Option<i32>,
        /// Show only the named breakdown as a table (see `list`); ignores `--json`
        #[arg(long)]
        name: Option<String>,
    },
    /// List available breakdowns
    List,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = resolve_config(cli.config.as_deref(), cli.data, cli.nationality)?;
    let load = || MetricsEngine::load(config.clone());

    match cli.command {
        Commands::List => list_breakdowns(&BreakdownRegistry::with_defaults()),
        Commands::Kpis => show_kpis(&load()?, cli.json),
        Commands::Ticker => println!("{}", load()?.kpi_snapshot().ticker()),
        Commands::Years => show_years(&load()?, cli.json),
        Commands::Localization => show_localization(&load()?, cli.json),
        Commands::Breakdown { year, name } => {
            let engine = load()?;
            match (year.or_else(|| engine.default_year()), name) {
                (None, _) => println!("No hiring years in the roster"),
                (Some(year), Some(name)) => show_named_breakdown(&engine, &name, year)?,
                (Some(year), None) => show_breakdowns(&engine, year, cli.json)?,
            }
        }
    }

    Ok(())
}

/// Builds the engine config: defaults, then the config file, then flags.
fn resolve_config(
    path: Option<&Path>,
    data: Option<PathBuf>,
    nationality: Option<String>,
) -> Result<EngineConfig, CliError> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| CliError::ConfigIo {
                path: path.display().to_string(),
                source,
            })?;
            parse_config(&text)?
        }
        None => EngineConfig::default(),
    };

    if let Some(data) = data {
        config.data_path = data;
    }
    if let Some(nationality) = nationality {
        config.reference_nationality = nationality;
    }
    Ok(config)
}

/// Parses a JSON config. Missing fields keep their defaults.
fn parse_config(text: &str) -> Result<EngineConfig, CliError> {
    Ok(serde_json::from_str(text)?)
}

/// List all registered breakdowns.
fn list_breakdowns(registry: &BreakdownRegistry) {
    println!("Available Breakdowns ({} total)\n", registry.len());
    for info in registry.all_info() {
        println!("  {} ({}) - {}", info.name, info.chart, info.description);
        println!("    grouped by: {}", info.group_columns.join(", "));
    }
}

fn show_kpis(engine: &MetricsEngine, json: bool) {
    let kpis = engine.kpi_snapshot();
    if json {
        print_json(kpis);
    } else {
        print!("{}", kpi_report(kpis));
    }
}

/// Text rendering of the KPI snapshot, using the dashboard's number format.
fn kpi_report(kpis: &KpiSnapshot) -> String {
    format!(
        "Total employees:       {}\n\
         Female employees:      {}\n\
         Male employees:        {}\n\
         Other/unknown gender:  {}\n\
         Female percentage:     {}%\n\
         Localization rate:     {}% ({})\n\
         Average tenure:        {} days\n\
         Average tenure:        {} years\n",
        kpis.total_employees,
        kpis.female_employees,
        kpis.male_employees,
        kpis.other_gender_employees,
        format_decimal(kpis.female_percentage),
        format_decimal(kpis.localization_rate),
        kpis.reference_nationality,
        format_decimal(kpis.average_tenure_days),
        format_decimal(kpis.average_tenure_years),
    )
}

fn show_years(engine: &MetricsEngine, json: bool) {
    if json {
        print_json(&engine.available_years());
        return;
    }
    for year in engine.available_years() {
        println!("{year}");
    }
}

fn show_localization(engine: &MetricsEngine, json: bool) {
    let series = engine.localization_series();
    if json {
        print_json(&series);
        return;
    }

    println!(
        "Total Employment of {} by hiring year",
        engine.kpi_snapshot().reference_nationality
    );
    for point in series {
        println!("  {}  {}", point.year, point.count);
    }
}

fn show_breakdowns(engine: &MetricsEngine, year: i32, json: bool) -> Result<(), MetricsError> {
    let breakdowns = engine.breakdowns_for_year(year)?;
    if json {
        print_json(&breakdowns);
        return Ok(());
    }

    println!("{}", GenderNationalityBreakdown.title(year));
    for row in &breakdowns.gender_by_nationality {
        println!(
            "  {:<8} {:<20} {:>6}  {}",
            row.gender.as_str(),
            row.nationality,
            row.count,
            GenderNationalityBreakdown::bar_colour(&row.gender)
        );
    }
    println!();
    println!("{}", NationalityBreakdown.title(year));
    for row in &breakdowns.by_nationality {
        println!("  {:<20} {:>6}", row.nationality, row.count);
    }

    Ok(())
}

/// Computes one registered breakdown by name and prints it as a table.
fn show_named_breakdown(
    engine: &MetricsEngine,
    name: &str,
    year: i32,
) -> Result<(), MetricsError> {
    let registry = BreakdownRegistry::with_defaults();
    let frame = registry.compute(name, &engine.dataset().lazy(), year)?;
    if let Some(breakdown) = registry.get(name) {
        println!("{}", breakdown.title(year));
    }
    println!("{frame}");
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("Error: failed to serialize output: {e}"),
    }
}
