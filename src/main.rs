//! Invoice Validation Dashboard CLI Tool
//!
//! Shows the newest delta report, or sample data when none is available.

use anyhow::{Context, Result};
use chrono::{Days, Local};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::{Path, PathBuf};

use delta_dashboard::export::write_xlsx;
use delta_dashboard::report::archive_old_reports;
use delta_dashboard::reporter;
use delta_dashboard::utils::format_size;
use delta_dashboard::{load_config, DashboardConfig, ReportError, ReportPresenter};

#[derive(Parser)]
#[command(name = "delta-dashboard")]
#[command(author = "Invoice Validator Team")]
#[command(version = "0.1.0")]
#[command(about = "Summarize invoice validation delta reports")]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard for the newest report
    Show {
        /// Directory containing delta_report_<date>.xlsx files
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Output format (text, markdown, json, html)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Ignore local reports and show sample data
        #[arg(long)]
        force_demo: bool,

        /// Preferred sheet name (repeatable)
        #[arg(long)]
        sheet: Vec<String>,
    },

    /// List discovered reports, newest first
    List {
        /// Directory containing delta reports
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Write an Excel copy of the newest report
    Export {
        /// Directory containing delta reports
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Destination .xlsx file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Move old reports into the archive folder
    Archive {
        /// Directory containing delta reports
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Archive reports at least this many days old
        #[arg(long)]
        days: Option<i64>,

        /// Only list what would be moved
        #[arg(long)]
        dry_run: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,delta_dashboard=debug"
    } else {
        "warn,delta_dashboard=info"
    };
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("DELTA_DASHBOARD_LOG", default_filter))
        .init();
}

fn base_config(path: Option<&Path>, dir: Option<PathBuf>) -> Result<DashboardConfig> {
    let mut config = match path {
        Some(p) => load_config(p).with_context(|| format!("Failed to load config: {}", p.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(dir) = dir {
        config.data_dir = dir;
    }
    Ok(config)
}

fn write_output(output: Option<PathBuf>, content: &str) -> Result<()> {
    match output {
        Some(path) => std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", content),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Show {
            dir,
            format,
            output,
            force_demo,
            sheet,
        } => {
            let mut config = base_config(cli.config.as_deref(), dir)?;
            config.force_demo |= force_demo;
            if !sheet.is_empty() {
                config.preferred_sheets = sheet;
            }

            let presentation = ReportPresenter::new(config).refresh();
            let report = reporter::render_or_demo(&format, &presentation)?;

            write_output(output, &report)?;
        }

        Commands::List { dir } => {
            let config = base_config(cli.config.as_deref(), dir)?;
            let presenter = ReportPresenter::new(config);

            match presenter.discover() {
                Ok(reports) => {
                    for report in reports {
                        println!(
                            "{}  {:>9}  {}",
                            report.date.format("%Y-%m-%d"),
                            format_size(report.size_bytes),
                            report.name
                        );
                    }
                }
                Err(e) if e.is_data_unavailable() => println!("No delta reports available: {}", e),
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Export { dir, output } => {
            let config = base_config(cli.config.as_deref(), dir)?;
            let presenter = ReportPresenter::new(config);

            let (file, table) = presenter.latest().context("No report to export")?;
            write_xlsx(&table, &output)?;
            println!("Exported {} ({} rows) to {}", file.name, table.len(), output.display());
        }

        Commands::Archive { dir, days, dry_run } => {
            let mut config = base_config(cli.config.as_deref(), dir)?;
            if let Some(days) = days {
                config.archive_after_days = days;
            }
            config.validate()?;

            let cutoff = Local::now()
                .date_naive()
                .checked_sub_days(Days::new(config.archive_after_days.unsigned_abs()))
                .ok_or_else(|| ReportError::Config("archive cutoff out of range".to_string()))?;

            let moved = archive_old_reports(&config.data_dir, &config, cutoff, dry_run)?;
            let verb = if dry_run { "Would archive" } else { "Archived" };
            for report in &moved {
                println!("{} {}", verb, report.name);
            }
            println!("{} report(s) dated on or before {}", moved.len(), cutoff.format("%Y-%m-%d"));
        }
    }

    Ok(())
}
