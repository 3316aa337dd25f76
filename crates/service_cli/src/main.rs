//! billcycle - Command Line Billing Schedules
//!
//! This is the operational entry point for the billing schedule calculator.
//!
//! # Commands
//!
//! - `billcycle calendar --year <Y> --month <M>` - Billing days per subscription in a month
//! - `billcycle progress [--today <DATE>]` - Progress through the current billing cycles
//! - `billcycle upcoming [--from <DATE>] [--count <N>]` - Agenda of upcoming charges
//! - `billcycle check` - Validate the subscriptions file
//!
//! # Configuration
//!
//! Settings come from, highest priority first: command-line flags, the
//! `BILLCYCLE_*` environment variables, the `--config` TOML file, defaults.

use billing_core::types::CalendarDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod subscriptions;

use config::{build_config, CliArgs};
pub use error::{CliError, Result};

/// Subscription billing schedule calculator
#[derive(Parser, Debug)]
#[command(name = "billcycle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Subscriptions file path
    #[arg(short, long, global = true, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(long, global = true)]
    format: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the billing days of every subscription in a month
    Calendar {
        /// Calendar year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Calendar month, 1-12 (defaults to the current month)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },

    /// Show how far each subscription is through its billing cycle
    Progress {
        /// Reference day (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        today: Option<String>,
    },

    /// List upcoming billing dates
    Upcoming {
        /// First day to include (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        from: Option<String>,

        /// Billing dates per subscription
        #[arg(short = 'n', long, default_value = "3")]
        count: usize,
    },

    /// Validate every record in the subscriptions file
    Check,
}

impl From<&Cli> for CliArgs {
    fn from(cli: &Cli) -> Self {
        CliArgs {
            config_file: cli.config.clone(),
            log_level: cli.log_level.clone(),
            format: cli.format.clone(),
            subscriptions_file: cli.file.clone(),
            verbose: cli.verbose,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Parse an optional `YYYY-MM-DD` argument, falling back to today
fn date_or_today(arg: Option<&str>) -> Result<CalendarDate> {
    match arg {
        Some(text) => Ok(CalendarDate::parse(text)?),
        None => Ok(CalendarDate::today()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&CliArgs::from(&cli))?;

    init_tracing(config.log_level.as_filter_str());
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Calendar { year, month } => {
            let today = CalendarDate::today();
            commands::calendar::run(
                &config,
                year.unwrap_or(today.year()),
                month.unwrap_or(today.month()),
            )
        }
        Commands::Progress { today } => {
            commands::progress::run(&config, date_or_today(today.as_deref())?)
        }
        Commands::Upcoming { from, count } => {
            commands::upcoming::run(&config, date_or_today(from.as_deref())?, count)
        }
        Commands::Check => commands::check::run(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_calendar() {
        let cli = Cli::parse_from([
            "billcycle", "calendar", "--year", "2024", "--month", "2", "--format", "json",
        ]);
        assert!(matches!(
            cli.command,
            Commands::Calendar {
                year: Some(2024),
                month: Some(2)
            }
        ));
        assert_eq!(cli.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_month_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["billcycle", "calendar", "--month", "13"]).is_err());
    }

    #[test]
    fn test_global_args_into_config_args() {
        let cli = Cli::parse_from(["billcycle", "-v", "upcoming", "--file", "subs.toml", "-n", "5"]);
        let args = CliArgs::from(&cli);
        assert!(args.verbose);
        assert_eq!(args.subscriptions_file, Some(PathBuf::from("subs.toml")));
        assert!(matches!(cli.command, Commands::Upcoming { count: 5, .. }));
    }

    #[test]
    fn test_date_or_today() {
        assert_eq!(
            date_or_today(Some("2024-02-29")).unwrap(),
            CalendarDate::from_ymd(2024, 2, 29).unwrap()
        );
        assert!(matches!(
            date_or_today(Some("2023-02-29")),
            Err(CliError::Date(_))
        ));
        assert!(date_or_today(None).is_ok());
    }
}
