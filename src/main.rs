//! CLI entry point for the bikeshare statistics tool.
//!
//! Runs the interactive explorer by default, or prints a one-shot report for a
//! city and month/day selection.

use anyhow::{Context, Result};
use bikeshare_stats::analyzers::analyze;
use bikeshare_stats::config::CityCatalog;
use bikeshare_stats::data::{DayFilter, MonthFilter, TripFilter, load_city_named};
use bikeshare_stats::output::{export_csv, render_json, write_analysis, write_selection};
use bikeshare_stats::prompt::Console;
use bikeshare_stats::session::Session;
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare")]
#[command(about = "Explore US bikeshare trip statistics", long_about = None)]
struct Cli {
    /// Directory containing the city CSV files
    #[arg(long, env = "BIKESHARE_DATA_DIR", default_value = ".", global = true)]
    data_dir: PathBuf,

    /// JSON file mapping city names to CSV files
    #[arg(long, value_name = "FILE", global = true)]
    cities: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactively pick a city and filters (default)
    Explore,
    /// Print statistics for one city and selection, then exit
    Report {
        /// Chicago, New York City or Washington
        #[arg(short, long)]
        city: String,

        /// Month name, or "all"
        #[arg(short, long, default_value = "all")]
        month: MonthFilter,

        /// Day of the week, or "all"
        #[arg(short, long, default_value = "all")]
        day: DayFilter,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Also write the filtered rows to this CSV file
        #[arg(short, long)]
        export: Option<PathBuf>,
    },
    /// List the configured cities and their data files
    Cities,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: quiet stderr (the console is the UI) + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bikeshare.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::builder()
                .with_default_directive("warn".parse()?)
                .from_env_lossy(),
        );

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(
            EnvFilter::builder()
                .with_env_var("RUST_LOG_JSON")
                .with_default_directive("debug".parse()?)
                .from_env_lossy(),
        );

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let catalog = match &cli.cities {
        Some(path) => CityCatalog::load(&cli.data_dir, path)?,
        None => CityCatalog::new(&cli.data_dir),
    };

    match cli.command.unwrap_or(Commands::Explore) {
        Commands::Explore => {
            let stdin = std::io::stdin();
            let console = Console::new(stdin.lock(), std::io::stdout());
            Session::new(&catalog, console).run()?;
        }
        Commands::Report {
            city,
            month,
            day,
            format,
            export,
        } => {
            report(&catalog, &city, TripFilter::new(month, day), format, export.as_deref())?;
        }
        Commands::Cities => {
            let mut out = std::io::stdout().lock();
            for (city, path) in catalog.iter() {
                let status = if path.exists() { "ok" } else { "missing" };
                writeln!(out, "{:<14} {} ({status})", city.name(), path.display())?;
            }
        }
    }

    Ok(())
}

/// Loads, filters and analyzes one city, printing the result to stdout.
#[tracing::instrument(skip_all, fields(city = %city, filter = %filter))]
fn report(
    catalog: &CityCatalog,
    city: &str,
    filter: TripFilter,
    format: Format,
    export: Option<&Path>,
) -> Result<()> {
    let (city, dataset) = load_city_named(catalog, city)
        .with_context(|| format!("loading trip data for `{city}`"))?;

    let filtered = filter.apply(&dataset);
    let analysis = analyze(&filtered);

    let mut out = std::io::stdout().lock();
    match format {
        Format::Text => {
            write_selection(&mut out, city, &filter, filtered.len())?;
            write_analysis(&mut out, &analysis)?;
        }
        Format::Json => {
            writeln!(out, "{}", render_json(city, &filter, &analysis)?)?;
        }
    }

    if let Some(path) = export {
        export_csv(path, &filtered)?;
        info!(path = %path.display(), "Export written");
    }

    Ok(())
}
