//! Kiosk CLI

use std::{
    io::{self, Write},
    process::ExitCode,
};

use clap::{Args, Parser, Subcommand};
use kiosk::{
    catalog::{Catalog, CatalogError},
    config::KioskConfig,
    kiosk::Kiosk,
    observability::{LoggingConfig, ObservabilityError, init_logging},
    payment::PaymentMethod,
    receipt::ReceiptError,
    simulation::{self, Script, SimulationError},
};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "kiosk", about = "Self-checkout kiosk simulator", long_about = None)]
struct Cli {
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the product catalog
    Catalog,

    /// Run a scripted checkout and print the receipt
    Simulate(SimulateArgs),
}

#[derive(Debug, Args)]
struct SimulateArgs {
    /// Seed for reproducible runs; random when omitted
    #[arg(long, env = "KIOSK_SEED")]
    seed: Option<u64>,

    /// Number of camera scans
    #[arg(long, default_value_t = 3)]
    scans: u32,

    /// Barcode to type into the reader (repeatable)
    #[arg(long = "barcode")]
    barcodes: Vec<String>,

    /// Produce SKU to weigh (repeatable)
    #[arg(long = "weigh")]
    weigh: Vec<String>,

    /// Payment method
    #[arg(long, value_enum, default_value_t = PaymentMethod::Qris)]
    pay: PaymentMethod,

    /// Card attempts before giving up
    #[arg(long, default_value_t = 3)]
    card_attempts: u32,

    #[command(flatten)]
    kiosk: KioskConfig,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    #[error(transparent)]
    Logging(#[from] ObservabilityError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = init_logging(&cli.logging) {
        _ = writeln!(io::stderr(), "{error}");

        return ExitCode::FAILURE;
    }

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "kiosk failed");
            _ = writeln!(io::stderr(), "error: {err}");

            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    let catalog = Catalog::bundled()?;

    match command {
        Commands::Catalog => catalog.write_to(io::stdout().lock())?,
        Commands::Simulate(args) => {
            let mut kiosk = match args.seed {
                Some(seed) => Kiosk::seeded(args.kiosk, catalog, seed),
                None => Kiosk::new(args.kiosk, catalog),
            };

            let script = Script {
                barcodes: args.barcodes,
                scans: args.scans,
                weigh: args.weigh,
                method: args.pay,
                card_attempts: args.card_attempts,
            };

            let receipt = simulation::run(&mut kiosk, &script)?;

            receipt.write_to(io::stdout().lock())?;
        }
    }

    Ok(())
}
