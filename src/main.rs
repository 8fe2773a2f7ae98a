//! vitalsgen - synthetic vital-sign generator
//!
//! Generates a batch of synthetic biomedical records, validates their
//! format, exports the valid ones to TXT, CSV and JSON, and optionally
//! stores them in MongoDB.
//!
//! # Usage
//!
//! ```bash
//! # Interactive: asks whether to store in MongoDB
//! vitalsgen
//!
//! # Reproducible run without the store
//! vitalsgen --seed 42 --no-store
//!
//! # Store without asking
//! vitalsgen --store --uri mongodb://localhost:27017
//! ```

use std::io;

use tracing::info;

use vitalsgen::cli::CliInterface;
use vitalsgen::error::Result;
use vitalsgen::export::OutputLayout;
use vitalsgen::formatter::Formatter;
use vitalsgen::logging;
use vitalsgen::pipeline::Pipeline;
use vitalsgen::store::{StoreAdapter, StoreCapability};

/// Application entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments and load configuration
/// 2. Handle subcommands
/// 3. Create the output directories and initialize logging
/// 4. Resolve the store decision
/// 5. Run the pipeline and print the summary
async fn run() -> Result<()> {
    let mut cli = CliInterface::new()?;

    if cli.handle_subcommand()? {
        return Ok(());
    }

    let layout = OutputLayout::from_config(&cli.config().output);
    layout.ensure()?;
    logging::init(&cli.config().logging, Some(&layout.log_path()))?;
    info!("vitalsgen {} starting", vitalsgen::VERSION);

    let quiet = cli.args().quiet;
    if !quiet {
        println!("Generating biomedical records...");
    }

    cli.resolve_store_choice(
        StoreCapability::detect(),
        &mut io::stdin().lock(),
        &mut io::stdout(),
    )?;

    let config = cli.config().clone();
    let store = StoreAdapter::from_config(&config.store).with_progress(!quiet);
    let report = Pipeline::new(config).with_store_adapter(store).run().await?;

    if !quiet {
        let formatter = Formatter::new(cli.use_colors(), cli.show_table());
        println!("{}", formatter.format_report(&report));
    }

    println!("Process finished.");
    Ok(())
}
