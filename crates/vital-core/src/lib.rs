//! VitalStream Core Library
//!
//! Shared functionality for the VitalStream well-being ledger:
//! - Typed daily records and the append-only ledger
//! - CSV ledger store with atomic persistence
//! - Insight engine (status score, trend deltas, advisories, efficiency)
//! - CSV export for downloads
//! - Layered configuration (defaults, config file, environment)

pub mod config;
pub mod error;
pub mod export;
pub mod insights;
pub mod models;
pub mod store;

pub use config::{Config, ConfigSource};
pub use error::{Error, Result};
pub use export::{export_csv, LedgerExport, CSV_CONTENT_TYPE, EXPORT_FILENAME};
pub use insights::{
    Advisory, AdvisoryKind, Deltas, InsightEngine, Severity, Snapshot, Status, StatusLabel,
};
pub use models::{Ledger, Metric, Record, LEDGER_HEADERS};
pub use store::LedgerStore;
