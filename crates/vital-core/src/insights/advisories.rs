//! Per-metric advisory rules
//!
//! Each rule reads one metric of the latest record and always yields exactly
//! one advisory. Rules do not look at each other or at the status score.

use crate::models::{Metric, Record};

use super::types::{Advisory, AdvisoryKind, Severity};

/// Hydration below this many liters is a deficit
pub const HYDRATION_ADVISORY_THRESHOLD: f64 = 2.0;

/// Fewer steps than this is low mobility
pub const MOBILITY_THRESHOLD: u32 = 5000;

/// Suggested top-up when hydration is in deficit (liters)
pub const HYDRATION_TOP_UP_L: f64 = 0.5;

/// A rule that turns one metric of the latest record into an advisory
pub trait AdvisoryRule: Send + Sync {
    /// Metric this rule reads
    fn metric(&self) -> Metric;

    /// Evaluate the latest record
    fn evaluate(&self, latest: &Record) -> Advisory;
}

/// Flags a hydration deficit
pub struct HydrationRule;

impl AdvisoryRule for HydrationRule {
    fn metric(&self) -> Metric {
        Metric::Hydration
    }

    fn evaluate(&self, latest: &Record) -> Advisory {
        if latest.hydration_l < HYDRATION_ADVISORY_THRESHOLD {
            Advisory::new(
                AdvisoryKind::Deficit,
                Metric::Hydration,
                Severity::Alert,
                format!(
                    "Hydration deficit detected: increase intake by {}L immediately.",
                    HYDRATION_TOP_UP_L
                ),
            )
        } else {
            Advisory::new(
                AdvisoryKind::Ok,
                Metric::Hydration,
                Severity::Success,
                "Fluid levels within optimal range.",
            )
        }
    }
}

/// Flags a low step count
pub struct MobilityRule;

impl AdvisoryRule for MobilityRule {
    fn metric(&self) -> Metric {
        Metric::Steps
    }

    fn evaluate(&self, latest: &Record) -> Advisory {
        if latest.steps < MOBILITY_THRESHOLD {
            Advisory::new(
                AdvisoryKind::LowMobility,
                Metric::Steps,
                Severity::Warning,
                "Low mobility: standing desk or brief walk recommended.",
            )
        } else {
            Advisory::new(
                AdvisoryKind::Ok,
                Metric::Steps,
                Severity::Success,
                "Kinetic activity targets met.",
            )
        }
    }
}
