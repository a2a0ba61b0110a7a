use anyhow::anyhow;
use charge_ledger::cli::{args::Args, commands};
use clap::Parser;
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result: anyhow::Result<()> = runtime.block_on(async {
        let shutdown_signal = async {
            if tokio::signal::ctrl_c().await.is_err() {
                // no signal handler; never resolve
                std::future::pending::<()>().await;
            }
        };

        // A write in flight either completes or leaves the previous document,
        // so stopping between awaits is safe.
        tokio::select! {
            result = commands::run(args) => result.map_err(anyhow::Error::from),
            _ = shutdown_signal => Err(anyhow!("interrupted by user")),
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Charge Ledger - Vehicle Charging and Parking Expenses");
    println!("=====================================================");
    println!();
    println!("Record charging sessions and parking fees, see consumption per 100 km,");
    println!("cost per km and cost per day, and move records in and out of XLSX or CSV.");
    println!();
    println!("USAGE:");
    println!("    charge-ledger <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    summary        Show the dashboard for a time window");
    println!("    add-charging   Record a charging session");
    println!("    add-parking    Record a parking fee");
    println!("    parse          Extract a record from free text (--save to store, --full)");
    println!("    list           List charging or parking records");
    println!("    delete         Delete a record by id");
    println!("    import         Replace records from an .xlsx/.xls/.csv file");
    println!("    export         Write all records to an .xlsx (or .csv) file");
    println!("    clear          Delete every record (requires --yes)");
    println!("    help           Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <FILE>  Configuration file (JSON)");
    println!("        --store <FILE>   Ledger document to use");
    println!("    -v, --verbose        Increase logging verbosity");
    println!("    -q, --quiet          Only log errors");
    println!("    -h, --help           Show help information");
    println!("    -V, --version        Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    charge-ledger add-charging --mileage 12345 --amount 25.5 --price 1.2 --full");
    println!("    charge-ledger parse charging \"2024-03-05 12345km 25度 30元 未充满\" --save");
    println!("    charge-ledger summary --window last-month");
    println!("    charge-ledger export --dir ~/Documents");
    println!();
    println!("For more detailed help on any command, use:");
    println!("    charge-ledger <COMMAND> --help");
}
