//! Command implementations for the charge ledger CLI
//!
//! This module contains logging setup, layered configuration loading and
//! the handlers behind each subcommand. Handlers take the record book and
//! the reference date explicitly; only [`run`] reads the wall clock.

use chrono::{Local, NaiveDate};
use colored::*;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::app::models::{
    ChargingDraft, ChargingRecord, ParkingDraft, ParkingRecord, RecordKind, TimeWindow,
};
use crate::app::services::interchange::{ExportOutcome, export_records, import_file};
use crate::app::services::metrics::{Dashboard, consumption_series};
use crate::app::services::record_store::{JsonFileStore, RecordBook, RecordStore};
use crate::app::services::temporal::{filter_window, format_date};
use crate::app::services::text_parser::{
    complete_charge_costs, parse_charging_text, parse_parking_text,
};
use crate::cli::args::{
    AddChargingArgs, AddParkingArgs, Args, ClearArgs, Commands, DeleteArgs, ExportArgs,
    ImportArgs, ListArgs, ParseArgs, SummaryArgs,
};
use crate::config::LedgerConfig;
use crate::{Error, Result};

/// Main command runner
///
/// 1. Load configuration (file, environment, flags)
/// 2. Set up logging
/// 3. Open the ledger and dispatch the subcommand
pub async fn run(args: Args) -> Result<()> {
    args.validate()?;

    let config = load_configuration(&args)?;
    setup_logging(&args, &config)?;
    debug!("Loaded configuration: {:?}", config);

    let Some(command) = args.command else {
        return Ok(());
    };

    let today = Local::now().date_naive();
    let mut book = RecordBook::new(JsonFileStore::open(&config.store_path)?);

    match command {
        Commands::Summary(cmd) => run_summary(&book, &cmd, &config, today),
        Commands::AddCharging(cmd) => run_add_charging(&mut book, &cmd, today),
        Commands::AddParking(cmd) => run_add_parking(&mut book, &cmd, today),
        Commands::Parse(cmd) => run_parse(&mut book, &cmd, today),
        Commands::List(cmd) => run_list(&book, &cmd, today),
        Commands::Delete(cmd) => run_delete(&mut book, &cmd),
        Commands::Import(cmd) => run_import(&mut book, &cmd, today).await,
        Commands::Export(cmd) => run_export(&mut book, &cmd, &config, today).await,
        Commands::Clear(cmd) => run_clear(&mut book, &cmd),
    }
}

/// Set up logging based on verbosity flags and configuration
///
/// `RUST_LOG` takes precedence over both.
pub fn setup_logging(args: &Args, config: &LedgerConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level(&config.log_level);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("charge_ledger={}", log_level)));

    let result = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    result.map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using layered approach (file -> env -> args)
pub fn load_configuration(args: &Args) -> Result<LedgerConfig> {
    let config_file = match &args.config_file {
        Some(path) => Some(path.clone()),
        None => LedgerConfig::default_config_path()
            .ok()
            .filter(|path| path.exists()),
    };

    let mut config = match &config_file {
        Some(path) => LedgerConfig::from_file(path)?,
        None => LedgerConfig::default(),
    };
    config.apply_env();
    apply_cli_overrides(&mut config, args);

    config.validate()?;
    Ok(config)
}

fn apply_cli_overrides(config: &mut LedgerConfig, args: &Args) {
    if let Some(store_path) = &args.store_path {
        config.store_path = store_path.clone();
    }
    config.log_level = args.get_log_level(&config.log_level);
}

// =============================================================================
// Summary
// =============================================================================

fn run_summary<S: RecordStore>(
    book: &RecordBook<S>,
    cmd: &SummaryArgs,
    config: &LedgerConfig,
    today: NaiveDate,
) -> Result<()> {
    let window = cmd.window.unwrap_or(config.default_window);
    let as_of = cmd.as_of.unwrap_or(today);
    let dashboard = book.dashboard(window, as_of);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
    } else {
        print_dashboard(&dashboard);
        print_export_status(book, as_of);
    }
    Ok(())
}

fn print_dashboard(dashboard: &Dashboard) {
    println!(
        "\n{} ({} as of {})",
        "Vehicle Expense Summary".bright_green().bold(),
        dashboard.window,
        dashboard.as_of
    );
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   • Days tracked: {}", dashboard.total_days.to_string().bright_white().bold());
    println!("   • Consumption: {:.2} kWh/100km", dashboard.electricity_per_100km);
    println!("   • Charging fee: {:.2}", dashboard.charging_fee);
    println!("   • Parking fee: {:.2}", dashboard.parking_fee);
    println!("   • Full charges: {}", dashboard.full_charge_count);
    println!("   • Energy charged: {:.2} kWh", dashboard.total_electricity);
    println!("   • Cost per km: {:.2}", dashboard.cost_per_km);
    println!("   • Cost per day: {}", dashboard.cost_per_day.bright_white().bold());

    let overview = &dashboard.overview;
    println!("\n{} ({:?})", "Period Overview".bright_green().bold(), overview.period);
    println!("   • Distance: {:.0} km", overview.mileage);
    println!("   • Energy: {:.2} kWh", overview.electricity);
    println!("   • Charging: {:.2}", overview.charging_fee);
    println!("   • Parking: {:.2}", overview.parking_fee);

    if !dashboard.consumption_trend.is_empty() {
        println!("\n{}", "Consumption Trend".bright_green().bold());
        for point in &dashboard.consumption_trend {
            println!("   • {}: {:.2} kWh/100km", format_date(point.date), point.per_100km);
        }
    }
    println!();
}

fn print_export_status<S: RecordStore>(book: &RecordBook<S>, as_of: NaiveDate) {
    match (book.store().last_export(), book.days_since_export(as_of)) {
        (Some(exported), Some(days)) => {
            println!("Last export: {} ({} days ago)", format_date(exported), days)
        }
        _ => println!("Last export: {}", "never".yellow()),
    }
}

// =============================================================================
// Record entry
// =============================================================================

fn run_add_charging<S: RecordStore>(
    book: &mut RecordBook<S>,
    cmd: &AddChargingArgs,
    today: NaiveDate,
) -> Result<()> {
    let mut draft = ChargingDraft {
        mileage: Some(cmd.mileage),
        amount: cmd.amount,
        price: cmd.price,
        cost: cmd.cost,
        is_full: Some(cmd.full),
        ..ChargingDraft::new(cmd.date.unwrap_or(today))
    };
    complete_charge_costs(&mut draft);

    let record = book.add_charging(draft)?;
    println!("{} {}", "Added".bright_green().bold(), record.id);
    Ok(())
}

fn run_add_parking<S: RecordStore>(
    book: &mut RecordBook<S>,
    cmd: &AddParkingArgs,
    today: NaiveDate,
) -> Result<()> {
    let draft = ParkingDraft {
        cost: Some(cmd.cost),
        ..ParkingDraft::new(cmd.date.unwrap_or(today))
    };

    let record = book.add_parking(draft)?;
    println!("{} {}", "Added".bright_green().bold(), record.id);
    Ok(())
}

fn show_field(name: &str, value: Option<f64>) {
    match value {
        Some(value) => println!("   • {}: {}", name, value),
        None => println!("   • {}: {}", name, "-".dimmed()),
    }
}

fn run_parse<S: RecordStore>(
    book: &mut RecordBook<S>,
    cmd: &ParseArgs,
    today: NaiveDate,
) -> Result<()> {
    match cmd.kind {
        RecordKind::Charging => {
            let mut draft = parse_charging_text(&cmd.text, today);
            complete_charge_costs(&mut draft);
            if cmd.full && draft.is_full.is_none() {
                draft.is_full = Some(true);
            }

            println!("{}", "Parsed charging entry".bright_green().bold());
            println!("   • date: {}", draft.date);
            show_field("mileage", draft.mileage);
            show_field("amount", draft.amount);
            show_field("price", draft.price);
            show_field("cost", draft.cost);
            println!("   • full: {}", draft.is_full.unwrap_or(false));

            if cmd.save {
                let record = book.add_charging(draft)?;
                println!("{} {}", "Saved".bright_green().bold(), record.id);
            }
        }
        RecordKind::Parking => {
            let draft = parse_parking_text(&cmd.text, today);

            println!("{}", "Parsed parking entry".bright_green().bold());
            println!("   • date: {}", draft.date);
            show_field("cost", draft.cost);

            if cmd.save {
                let record = book.add_parking(draft)?;
                println!("{} {}", "Saved".bright_green().bold(), record.id);
            }
        }
    }
    Ok(())
}

// =============================================================================
// Listing and deletion
// =============================================================================

fn run_list<S: RecordStore>(book: &RecordBook<S>, cmd: &ListArgs, today: NaiveDate) -> Result<()> {
    let window = cmd.window.unwrap_or(TimeWindow::All);

    match cmd.kind {
        RecordKind::Charging => {
            let records = book.charging();
            let shown = filter_window(&records, window, today);
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else {
                print_charging_table(&records, &shown);
            }
        }
        RecordKind::Parking => {
            let records = book.parking();
            let shown = filter_window(&records, window, today);
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else {
                print_parking_table(&shown);
            }
        }
    }
    Ok(())
}

fn print_charging_table(all: &[ChargingRecord], shown: &[&ChargingRecord]) {
    let consumption: std::collections::HashMap<String, f64> = consumption_series(all)
        .into_iter()
        .map(|point| (point.checkpoint_id, point.per_100km))
        .collect();

    println!(
        "{:<16} {:>9} {:>8} {:>7} {:>8} {:>5} {:>10}  id",
        "date", "mileage", "kWh", "price", "cost", "full", "kWh/100km"
    );
    for record in shown {
        let per_100km = consumption
            .get(&record.id)
            .map(|value| format!("{:.2}", value))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<16} {:>9.0} {:>8.2} {:>7.2} {:>8.2} {:>5} {:>10}  {}",
            format_date(record.date),
            record.mileage,
            record.amount,
            record.price,
            record.cost,
            if record.is_full { "yes" } else { "no" },
            per_100km,
            record.id.dimmed()
        );
    }
    println!("{} records", shown.len());
}

fn print_parking_table(shown: &[&ParkingRecord]) {
    println!("{:<16} {:>8}  id", "date", "cost");
    for record in shown {
        println!(
            "{:<16} {:>8.2}  {}",
            format_date(record.date),
            record.cost,
            record.id.dimmed()
        );
    }
    println!("{} records", shown.len());
}

fn run_delete<S: RecordStore>(book: &mut RecordBook<S>, cmd: &DeleteArgs) -> Result<()> {
    if book.delete(cmd.kind, &cmd.id)? {
        println!("{} {} record {}", "Deleted".bright_green().bold(), cmd.kind, cmd.id);
    } else {
        println!("{} no {} record {}", "Skipped:".yellow(), cmd.kind, cmd.id);
    }
    Ok(())
}

fn run_clear<S: RecordStore>(book: &mut RecordBook<S>, cmd: &ClearArgs) -> Result<()> {
    if !cmd.yes {
        return Err(Error::validation(
            "Refusing to delete every record without --yes",
        ));
    }
    book.clear_all()?;
    println!("{}", "All records deleted".bright_green().bold());
    Ok(())
}

// =============================================================================
// Interchange
// =============================================================================

async fn run_import<S: RecordStore>(
    book: &mut RecordBook<S>,
    cmd: &ImportArgs,
    today: NaiveDate,
) -> Result<()> {
    let result = import_file(&cmd.file, today).await?;
    let (charging, parking) = (result.charging.len(), result.parking.len());
    let skipped = result.stats.rows_skipped;

    if result.is_empty() {
        warn!("{} contained no valid records", cmd.file.display());
        println!("{} no valid records found, nothing replaced", "Skipped:".yellow());
        return Ok(());
    }

    let replaced = book.apply_import(result)?;
    info!("Replaced collections: {:?}", replaced);

    println!(
        "{} {} charging and {} parking records ({} rows skipped)",
        "Imported".bright_green().bold(),
        charging,
        parking,
        skipped
    );
    Ok(())
}

async fn run_export<S: RecordStore>(
    book: &mut RecordBook<S>,
    cmd: &ExportArgs,
    config: &LedgerConfig,
    today: NaiveDate,
) -> Result<()> {
    let dir: &Path = cmd.dir.as_deref().unwrap_or(config.export_dir.as_path());
    let prefer_workbook = config.prefer_workbook && !cmd.csv;

    let outcome = export_records(&book.charging(), &book.parking(), dir, today, prefer_workbook).await;

    match outcome {
        ExportOutcome::Workbook(path) | ExportOutcome::Delimited(path) => {
            book.mark_exported(today)?;
            println!("{} {}", "Exported to".bright_green().bold(), path.display());
            Ok(())
        }
        ExportOutcome::NothingToExport => {
            println!("{} no records to export", "Skipped:".yellow());
            Ok(())
        }
        ExportOutcome::Failed(message) => Err(Error::export(format!(
            "Export to {} failed: {}",
            dir.display(),
            message
        ))),
    }
}
