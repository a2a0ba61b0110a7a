//! Command-line argument definitions for the charge ledger
//!
//! This module defines the CLI interface using the clap derive API.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::app::models::{RecordKind, TimeWindow};
use crate::{Error, Result};

/// CLI arguments for the charge ledger
///
/// Tracks vehicle charging and parking expenses and summarises them over
/// calendar windows.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "charge-ledger",
    version,
    about = "Track vehicle charging and parking expenses",
    long_about = "Records charging sessions and parking fees, derives consumption per 100 km \
                  between full charges, cost per km and cost per day, and imports or exports \
                  the records as an XLSX workbook or a sectioned CSV file."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    ///
    /// JSON file with store path, export directory and defaults. If not
    /// specified, looks for <config dir>/charge-ledger/config.json
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Ledger document to read and write
    #[arg(
        long = "store",
        value_name = "FILE",
        global = true,
        help = "Ledger JSON document (overrides config and environment)"
    )]
    pub store_path: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress logging except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Show the dashboard for a time window
    Summary(SummaryArgs),
    /// Record a charging session
    AddCharging(AddChargingArgs),
    /// Record a parking fee
    AddParking(AddParkingArgs),
    /// Extract fields from a free-text description
    Parse(ParseArgs),
    /// List stored records
    List(ListArgs),
    /// Delete a record by id
    Delete(DeleteArgs),
    /// Replace records from an XLSX or CSV file
    Import(ImportArgs),
    /// Write all records to an XLSX (or CSV) file
    Export(ExportArgs),
    /// Delete every record
    Clear(ClearArgs),
}

#[derive(Debug, Clone, Parser)]
pub struct SummaryArgs {
    /// Time window: month, year, last-month, last-year or all
    #[arg(short = 'w', long = "window", value_name = "WINDOW")]
    pub window: Option<TimeWindow>,

    /// Evaluate windows as of this date instead of today
    #[arg(long = "as-of", value_name = "YYYY-MM-DD")]
    pub as_of: Option<NaiveDate>,

    /// Print the dashboard as JSON
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Debug, Clone, Parser)]
pub struct AddChargingArgs {
    /// Charging date (defaults to today)
    #[arg(short = 'd', long = "date", value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,

    /// Odometer reading
    #[arg(short = 'm', long = "mileage", value_name = "KM")]
    pub mileage: f64,

    /// Energy charged
    #[arg(short = 'a', long = "amount", value_name = "KWH")]
    pub amount: Option<f64>,

    /// Price per kWh
    #[arg(short = 'p', long = "price", value_name = "PRICE")]
    pub price: Option<f64>,

    /// Total paid for the session
    #[arg(long = "cost", value_name = "COST")]
    pub cost: Option<f64>,

    /// The battery was charged to full
    #[arg(short = 'f', long = "full")]
    pub full: bool,
}

#[derive(Debug, Clone, Parser)]
pub struct AddParkingArgs {
    /// Parking date (defaults to today)
    #[arg(short = 'd', long = "date", value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,

    /// Fee paid
    #[arg(long = "cost", value_name = "COST")]
    pub cost: f64,
}

#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// Record kind: charging or parking
    #[arg(value_name = "KIND")]
    pub kind: RecordKind,

    /// Free-text description, e.g. "2024-03-05 6300km 25度 1.2元/度 未充满"
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Store the parsed record instead of only showing it
    #[arg(long = "save")]
    pub save: bool,

    /// Mark a parsed charge as full (text alone can only say "not full")
    #[arg(short = 'f', long = "full")]
    pub full: bool,
}

#[derive(Debug, Clone, Parser)]
pub struct ListArgs {
    /// Record kind: charging or parking
    #[arg(value_name = "KIND")]
    pub kind: RecordKind,

    /// Only records inside this window
    #[arg(short = 'w', long = "window", value_name = "WINDOW")]
    pub window: Option<TimeWindow>,

    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Debug, Clone, Parser)]
pub struct DeleteArgs {
    #[arg(value_name = "KIND")]
    pub kind: RecordKind,

    #[arg(value_name = "ID")]
    pub id: String,
}

#[derive(Debug, Clone, Parser)]
pub struct ImportArgs {
    /// Workbook (.xlsx, .xls) or CSV file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Debug, Clone, Parser)]
pub struct ExportArgs {
    /// Directory to write into (overrides config)
    #[arg(short = 'o', long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Skip the workbook and write CSV
    #[arg(long = "csv")]
    pub csv: bool,
}

#[derive(Debug, Clone, Parser)]
pub struct ClearArgs {
    /// Confirm deleting every record
    #[arg(long = "yes")]
    pub yes: bool,
}

impl Args {
    /// Log level from the verbosity flags, or `fallback` without any
    pub fn get_log_level(&self, fallback: &str) -> String {
        if self.quiet {
            return "error".to_string();
        }
        match self.verbose {
            0 => fallback.to_string(),
            1 => "info".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    }

    /// Check path arguments before anything is opened
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(Commands::Import(import)) = &self.command {
            if !import.file.exists() {
                return Err(Error::configuration(format!(
                    "Import file does not exist: {}",
                    import.file.display()
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_parsing() {
        let args = Args::try_parse_from([
            "charge-ledger",
            "summary",
            "--window",
            "last-year",
            "--as-of",
            "2024-03-15",
            "--json",
        ])
        .unwrap();

        let Some(Commands::Summary(summary)) = args.command else {
            panic!("expected summary command");
        };
        assert_eq!(summary.window, Some(TimeWindow::LastYear));
        assert_eq!(summary.as_of, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert!(summary.json);
    }

    #[test]
    fn test_add_charging_parsing() {
        let args = Args::try_parse_from([
            "charge-ledger",
            "add-charging",
            "--mileage",
            "6300",
            "--amount",
            "25",
            "--full",
        ])
        .unwrap();

        let Some(Commands::AddCharging(add)) = args.command else {
            panic!("expected add-charging command");
        };
        assert_eq!(add.mileage, 6300.0);
        assert_eq!(add.amount, Some(25.0));
        assert_eq!(add.price, None);
        assert!(add.full);
        assert!(add.date.is_none());
    }

    #[test]
    fn test_kind_and_window_rejections() {
        assert!(Args::try_parse_from(["charge-ledger", "list", "fuel"]).is_err());
        assert!(Args::try_parse_from(["charge-ledger", "summary", "--window", "decade"]).is_err());
        assert!(Args::try_parse_from(["charge-ledger", "add-parking"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args =
            Args::try_parse_from(["charge-ledger", "list", "parking", "-vv", "--store", "x.json"])
                .unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.store_path, Some(PathBuf::from("x.json")));
    }

    #[test]
    fn test_log_level() {
        let mut args = Args::try_parse_from(["charge-ledger"]).unwrap();
        assert_eq!(args.get_log_level("warn"), "warn");

        args.verbose = 1;
        assert_eq!(args.get_log_level("warn"), "info");
        args.verbose = 2;
        assert_eq!(args.get_log_level("warn"), "debug");
        args.verbose = 5;
        assert_eq!(args.get_log_level("warn"), "trace");

        args.verbose = 0;
        args.quiet = true;
        assert_eq!(args.get_log_level("warn"), "error");
    }

    #[test]
    fn test_validate_missing_files() {
        let args = Args::try_parse_from(["charge-ledger", "import", "/nonexistent/file.csv"]).unwrap();
        assert!(args.validate().is_err());

        let args = Args::try_parse_from(["charge-ledger", "--config", "/nonexistent/config.json"])
            .unwrap();
        assert!(args.validate().is_err());
    }
}
