//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `ledger` - Ledger commands (add, log, series)
//! - `status` - Insight dashboard for the latest entry
//! - `export` - CSV export
//! - `config` - Resolved configuration

pub mod config;
pub mod export;
pub mod ledger;
pub mod status;

// Re-export command functions for main.rs
pub use config::*;
pub use export::*;
pub use ledger::*;
pub use status::*;

use anyhow::{Context, Result};
use vital_core::{Ledger, LedgerStore};

/// Load the ledger, naming the file on failure
pub fn load_ledger(store: &LedgerStore) -> Result<Ledger> {
    store
        .load()
        .with_context(|| format!("Failed to load ledger: {}", store.path().display()))
}

/// Group an integer with thousands separators ("12,345")
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if value < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

/// Signed one-decimal delta with unit ("+0.5h", "-1.2L")
pub fn format_delta(value: f64, unit: &str) -> String {
    format!("{:+.1}{}", value, unit)
}

/// Signed integer delta ("+2,000")
pub fn format_step_delta(value: i64) -> String {
    if value > 0 {
        format!("+{}", format_thousands(value))
    } else {
        format_thousands(value)
    }
}
