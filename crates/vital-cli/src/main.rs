//! VitalStream CLI - daily well-being ledger
//!
//! Usage:
//!   vital add --work 6.5 --water 2 --steps 9000   Commit today's entry
//!   vital status                                  Status, deltas and insights
//!   vital log --limit 7                           Recent entries
//!   vital export --output vitals.csv              CSV export

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vital_core::{Config, LedgerStore};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so --json output stays clean
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let config = Config::load(cli.config.as_deref())?.with_ledger_override(cli.ledger.clone());
    let store = LedgerStore::new(&config.ledger_path);
    tracing::debug!(
        ledger = %config.ledger_path.display(),
        source = %config.ledger_source,
        "Using ledger"
    );

    match cli.command {
        Commands::Add {
            date,
            work,
            water,
            steps,
        } => commands::cmd_add(&store, date.as_deref(), work, water, steps, cli.json),
        Commands::Status => commands::cmd_status(&store, cli.json),
        Commands::Log { limit } => commands::cmd_log(&store, limit, cli.json),
        Commands::Series { metric } => commands::cmd_series(&store, &metric, cli.json),
        Commands::Export { output } => commands::cmd_export(&store, output.as_deref()),
        Commands::Config => commands::cmd_config(&config, cli.json),
    }
}
