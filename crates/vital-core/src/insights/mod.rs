//! Insight Engine - turns the ledger into actionable signals
//!
//! The engine reads the latest record (and the one before it) and derives:
//!
//! - **Deltas** - latest minus previous per metric
//! - **Status** - a 3-criterion score mapped to a label and severity
//! - **Efficiency** - steps as a percentage of the daily target
//! - **Advisories** - one independent hydration and mobility signal each
//!
//! None of it fails: an empty ledger yields the "awaiting signal" status,
//! zero deltas and `NoSignal` advisories.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vital_core::insights::InsightEngine;
//!
//! let snapshot = InsightEngine::new().analyze(&ledger);
//! println!("{}", snapshot.status.label.headline());
//! ```

pub mod advisories;
pub mod engine;
pub mod types;

pub use advisories::{AdvisoryRule, HydrationRule, MobilityRule};
pub use engine::{
    deltas, efficiency, latest, previous, score, status, InsightEngine, EFFICIENCY_TARGET_STEPS,
    HYDRATION_THRESHOLD, STEPS_THRESHOLD, WORK_THRESHOLD,
};
pub use types::{Advisory, AdvisoryKind, Deltas, Severity, Snapshot, Status, StatusLabel};
