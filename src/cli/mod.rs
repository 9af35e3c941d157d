// ABOUTME: CLI argument parsing and command routing for demo-scheduler
//
// Provides command-line interface for:
// - Printing a month of bookable days (calendar)
// - Listing offered times for a date (slots)
// - Launching TUI (tui, default)

pub mod calendar;
pub mod slots;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::AppConfig;

/// Schedule a PatientClick product demo from the terminal
#[derive(Parser)]
#[command(name = "demo-scheduler")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Config file (defaults to ~/.demo-scheduler/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Load the config named by `--config`, or the default one
    pub fn load_config(&self) -> Result<AppConfig> {
        match &self.config {
            Some(path) => AppConfig::load_from(path),
            None => AppConfig::load(),
        }
    }
}

/// Output format for commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI (default if no command given)
    Tui,

    /// Show a month of bookable days
    Calendar(CalendarArgs),

    /// List the times offered on a date
    Slots(SlotsArgs),
}

/// Arguments for the calendar command
#[derive(clap::Args, Debug, Default)]
pub struct CalendarArgs {
    /// Month number, 1-12 (defaults to the configured initial month)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Four-digit year
    #[arg(long)]
    pub year: Option<i32>,
}

/// Arguments for the slots command
#[derive(clap::Args, Debug)]
pub struct SlotsArgs {
    /// Date as YYYY-MM-DD
    #[arg(long)]
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["demo-scheduler"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_calendar_args() {
        let cli = Cli::try_parse_from(["demo-scheduler", "calendar", "--month", "9", "--year", "2025", "--format", "json"])
            .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Some(Commands::Calendar(args)) => {
                assert_eq!(args.month, Some(9));
                assert_eq!(args.year, Some(2025));
            }
            _ => panic!("expected calendar command"),
        }
    }

    #[test]
    fn test_month_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["demo-scheduler", "calendar", "--month", "13"]).is_err());
        assert!(Cli::try_parse_from(["demo-scheduler", "calendar", "--month", "0"]).is_err());
    }

    #[test]
    fn test_slots_requires_valid_date() {
        let cli = Cli::try_parse_from(["demo-scheduler", "slots", "--date", "2025-09-05"]).unwrap();
        match cli.command {
            Some(Commands::Slots(args)) => {
                assert_eq!(args.date, NaiveDate::from_ymd_opt(2025, 9, 5).unwrap());
            }
            _ => panic!("expected slots command"),
        }
        assert!(Cli::try_parse_from(["demo-scheduler", "slots", "--date", "2025-02-30"]).is_err());
    }
}
