//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use vital_core::models::{DEFAULT_HYDRATION_L, DEFAULT_STEPS, DEFAULT_WORK_HOURS};

/// VitalStream - daily well-being ledger and insight engine
#[derive(Parser)]
#[command(name = "vital")]
#[command(about = "Personal well-being ledger with status and trend insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Ledger CSV path (overrides the config file and VITAL_LEDGER)
    #[arg(long, global = true)]
    pub ledger: Option<PathBuf>,

    /// Config file path (defaults to ~/.config/vitalstream/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Commit a daily entry to the ledger
    Add {
        /// Entry date, YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Deep work hours (0-16)
        #[arg(short, long, default_value_t = DEFAULT_WORK_HOURS)]
        work: f64,

        /// Water intake in liters (0-5)
        #[arg(long, default_value_t = DEFAULT_HYDRATION_L)]
        water: f64,

        /// Step count (0-30000)
        #[arg(short, long, default_value_t = DEFAULT_STEPS)]
        steps: u32,
    },

    /// Show status, trend deltas, efficiency and insights for the latest entry
    Status,

    /// List ledger entries, newest date first
    Log {
        /// Maximum number of entries to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Print one metric over time (ledger order)
    Series {
        /// Metric: work, water, steps
        #[arg(short, long, default_value = "work")]
        metric: String,
    },

    /// Export the ledger as CSV
    Export {
        /// Output file, or "-" for stdout (defaults to vital_intel_export.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the resolved configuration
    Config,
}
