//! Insight Engine - status score, trend deltas, efficiency and advisories
//!
//! Everything here is a pure function of the ledger it is given. Latest and
//! previous are picked by position (append order), never by date.

use tracing::debug;

use crate::models::{Ledger, Record};

use super::advisories::{AdvisoryRule, HydrationRule, MobilityRule};
use super::types::{Advisory, Deltas, Severity, Snapshot, Status, StatusLabel};

/// Work hours needed for the work criterion
pub const WORK_THRESHOLD: f64 = 6.0;
/// Liters needed for the hydration criterion
pub const HYDRATION_THRESHOLD: f64 = 2.0;
/// Steps needed for the movement criterion
pub const STEPS_THRESHOLD: u32 = 8000;
/// Daily step target behind the efficiency percentage
pub const EFFICIENCY_TARGET_STEPS: u32 = 10_000;

/// Last-positioned record
pub fn latest(ledger: &Ledger) -> Option<&Record> {
    ledger.records().last()
}

/// Second-to-last-positioned record
pub fn previous(ledger: &Ledger) -> Option<&Record> {
    let records = ledger.records();
    if records.len() < 2 {
        return None;
    }
    records.get(records.len() - 2)
}

/// `latest - previous` per metric, zero when either side is missing
///
/// Hours and litres round to one decimal, halves away from zero
/// (`2.25 - 2.0` is `0.3`).
pub fn deltas(latest: Option<&Record>, previous: Option<&Record>) -> Deltas {
    match (latest, previous) {
        (Some(latest), Some(previous)) => Deltas {
            work_hours: round1(latest.work_hours - previous.work_hours),
            hydration_l: round1(latest.hydration_l - previous.hydration_l),
            steps: i64::from(latest.steps) - i64::from(previous.steps),
        },
        _ => Deltas::zero(),
    }
}

/// Number of criteria (0-3) the record meets
///
/// Equality at a threshold counts as meeting it.
pub fn score(latest: &Record) -> u8 {
    let mut score = 0;
    if latest.work_hours >= WORK_THRESHOLD {
        score += 1;
    }
    if latest.hydration_l >= HYDRATION_THRESHOLD {
        score += 1;
    }
    if latest.steps >= STEPS_THRESHOLD {
        score += 1;
    }
    score
}

/// Status label and severity for the latest record
pub fn status(latest: Option<&Record>) -> Status {
    let Some(latest) = latest else {
        return Status::awaiting_signal();
    };

    match score(latest) {
        3 => Status::new(StatusLabel::Optimized, Severity::Success),
        2 => Status::new(StatusLabel::Stable, Severity::Info),
        _ => Status::new(StatusLabel::MaintenanceRequired, Severity::Alert),
    }
}

/// Percentage of the daily step target, not capped at 100
///
/// Halves round up, so 8050 steps is 81%. Computed in integers to keep
/// ties exact.
pub fn efficiency(latest: Option<&Record>) -> u32 {
    match latest {
        Some(record) if record.steps > 0 => {
            let target = u64::from(EFFICIENCY_TARGET_STEPS);
            let pct = (u64::from(record.steps) * 100 + target / 2) / target;
            u32::try_from(pct).unwrap_or(u32::MAX)
        }
        _ => 0,
    }
}

/// Hydration and mobility advisories for the latest record
pub fn advisories(latest: Option<&Record>) -> Vec<Advisory> {
    InsightEngine::new().advisories(latest)
}

/// Round to one decimal place, without producing negative zero
fn round1(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// The insight engine: fixed scoring plus a list of advisory rules
pub struct InsightEngine {
    rules: Vec<Box<dyn AdvisoryRule>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in hydration and mobility rules
    pub fn new() -> Self {
        let mut engine = Self { rules: vec![] };

        // Order here is the order advisories are reported in
        engine.register(Box::new(HydrationRule));
        engine.register(Box::new(MobilityRule));

        engine
    }

    /// Register an advisory rule
    pub fn register(&mut self, rule: Box<dyn AdvisoryRule>) {
        self.rules.push(rule);
    }

    /// One advisory per rule, in registration order
    pub fn advisories(&self, latest: Option<&Record>) -> Vec<Advisory> {
        self.rules
            .iter()
            .map(|rule| match latest {
                Some(record) => rule.evaluate(record),
                None => Advisory::no_signal(rule.metric()),
            })
            .collect()
    }

    /// Compute every insight for a ledger
    pub fn analyze(&self, ledger: &Ledger) -> Snapshot {
        let latest = latest(ledger);
        let previous = previous(ledger);

        let snapshot = Snapshot {
            records: ledger.len(),
            latest: latest.cloned(),
            deltas: deltas(latest, previous),
            status: status(latest),
            score: latest.map(score),
            efficiency: efficiency(latest),
            advisories: self.advisories(latest),
        };

        debug!(
            records = snapshot.records,
            status = snapshot.status.label.as_str(),
            efficiency = snapshot.efficiency,
            "Insight analysis complete"
        );

        snapshot
    }
}
