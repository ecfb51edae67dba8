use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use covid_stats::cli::{
    handle_import_command, handle_list_zones, handle_report_command, resolve_zones,
    ReportSelection,
};
use covid_stats::config::{CovidPaths, Settings};
use covid_stats::storage::Store;

#[derive(Parser)]
#[command(
    name = "covid-stats",
    version,
    about = "Edmonton COVID Statistical Tool",
    long_about = "Imports the Alberta COVID-19 case export into a local SQLite \
                  database and reports case totals by status, age group, and \
                  week or month of detection."
)]
struct Cli {
    /// CSV file to import
    #[arg(short = 'i', long = "import", value_name = "CSV_FILE")]
    import: Option<PathBuf>,

    /// List known zones
    #[arg(long)]
    list_zones: bool,

    /// Constrain results to zone (ie "Edmonton" or "Edmonton Zone")
    #[arg(long)]
    zone: Vec<String>,

    /// List case totals by status
    #[arg(long)]
    case_status: bool,

    /// List case status by age
    #[arg(long)]
    case_age: bool,

    /// List cases by week detected
    #[arg(long)]
    case_detected_weeks: bool,

    /// List cases by month detected
    #[arg(long)]
    case_detected_months: bool,

    /// Output CSV rather than a table
    #[arg(long)]
    csv: bool,

    /// Configuration file, default is config.json in the data directory
    #[arg(long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let selection = ReportSelection {
        case_status: cli.case_status,
        case_age: cli.case_age,
        detected_weeks: cli.case_detected_weeks,
        detected_months: cli.case_detected_months,
        csv: cli.csv,
    };
    selection.validate(!cli.zone.is_empty())?;

    // Initialize paths and settings
    let paths = CovidPaths::new()?;
    paths.ensure_directories()?;
    let settings = Settings::load(&paths, cli.config.as_deref())?;

    let mut store = Store::open(&settings.database_path(&paths))?;

    if let Some(file) = &cli.import {
        handle_import_command(&mut store, &settings, file)?;
    }

    if cli.list_zones {
        handle_list_zones(&store)?;
    }

    let zones = resolve_zones(&store, &cli.zone, cli.csv)?;
    handle_report_command(&store, &settings, &zones, &selection)?;

    Ok(())
}
