//! Library Inventory - command-line front end
//!
//! Opens the configured catalog, runs one command and prints the result.

use std::{env, process::ExitCode};

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use library_inventory::{
    cli::{self, Command, USAGE},
    config::{AppConfig, LoggingConfig},
    AppError, LibraryInventory,
};

fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(&config.logging);

    let command = match Command::parse(env::args().skip(1)) {
        Ok(command) => command,
        Err(e @ AppError::BadRequest(_)) => {
            // Usage errors are reported here, not through anyhow
            eprintln!("{}\n\n{}", e, USAGE);
            return Ok(ExitCode::from(2));
        }
        Err(e) => return Err(e.into()),
    };

    // Help does not need a catalog, and must not create one
    if command == Command::Help {
        println!("{}", USAGE);
        return Ok(ExitCode::SUCCESS);
    }

    let mut inventory = LibraryInventory::open(&config.catalog.path)
        .with_context(|| format!("Failed to open catalog {}", config.catalog.path))?;

    for line in cli::execute(&mut inventory, command)? {
        println!("{}", line);
    }

    Ok(ExitCode::SUCCESS)
}

/// Install the global subscriber. Logs go to stderr so stdout only carries results.
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("library_inventory={}", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
