//! Core types for the Insight Engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::{Metric, Record};

/// Categorical health label derived from the status score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusLabel {
    /// All three criteria met
    Optimized,
    /// Two criteria met
    Stable,
    /// One or no criteria met
    MaintenanceRequired,
    /// Empty ledger
    AwaitingSignal,
}

impl StatusLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLabel::Optimized => "OPTIMIZED",
            StatusLabel::Stable => "STABLE",
            StatusLabel::MaintenanceRequired => "MAINTENANCE_REQUIRED",
            StatusLabel::AwaitingSignal => "AWAITING_SIGNAL",
        }
    }

    /// Display headline for dashboards
    pub fn headline(&self) -> &'static str {
        match self {
            StatusLabel::Optimized => "SYSTEM OPTIMIZED",
            StatusLabel::Stable => "STABLE PERFORMANCE",
            StatusLabel::MaintenanceRequired => "MAINTENANCE REQUIRED",
            StatusLabel::AwaitingSignal => "Awaiting Signal...",
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StatusLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPTIMIZED" => Ok(StatusLabel::Optimized),
            "STABLE" => Ok(StatusLabel::Stable),
            "MAINTENANCE_REQUIRED" => Ok(StatusLabel::MaintenanceRequired),
            "AWAITING_SIGNAL" => Ok(StatusLabel::AwaitingSignal),
            _ => Err(format!("Unknown status label: {}", s)),
        }
    }
}

/// Severity tag attached to a status or advisory
///
/// The presentation layer maps these to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// No data to judge
    Neutral,
    /// Targets met
    Success,
    /// Informational - no action needed
    Info,
    /// Worth attention but not urgent
    Warning,
    /// Requires attention now
    Alert,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Neutral => "neutral",
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Alert => "alert",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "neutral" => Ok(Severity::Neutral),
            "success" => Ok(Severity::Success),
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "alert" => Ok(Severity::Alert),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// Status label paired with its severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub label: StatusLabel,
    pub severity: Severity,
}

impl Status {
    pub fn new(label: StatusLabel, severity: Severity) -> Self {
        Self { label, severity }
    }

    /// Status for an empty ledger
    pub fn awaiting_signal() -> Self {
        Self::new(StatusLabel::AwaitingSignal, Severity::Neutral)
    }

    /// `(label, severity)` in their string forms
    pub fn as_pair(&self) -> (&'static str, &'static str) {
        (self.label.as_str(), self.severity.as_str())
    }
}

/// Outcome of a single advisory rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvisoryKind {
    /// Metric is within its healthy range
    Ok,
    /// Hydration below the advisory threshold
    Deficit,
    /// Step count below the mobility threshold
    LowMobility,
    /// No record to evaluate
    NoSignal,
}

impl AdvisoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvisoryKind::Ok => "OK",
            AdvisoryKind::Deficit => "DEFICIT",
            AdvisoryKind::LowMobility => "LOW_MOBILITY",
            AdvisoryKind::NoSignal => "NO_SIGNAL",
        }
    }
}

impl fmt::Display for AdvisoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A per-metric signal, independent of the status score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub metric: Metric,
    pub severity: Severity,
    /// One-line message for display
    pub message: String,
}

impl Advisory {
    pub fn new(
        kind: AdvisoryKind,
        metric: Metric,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            metric,
            severity,
            message: message.into(),
        }
    }

    /// Placeholder advisory when the ledger is empty
    pub fn no_signal(metric: Metric) -> Self {
        Self::new(
            AdvisoryKind::NoSignal,
            metric,
            Severity::Neutral,
            "No data yet.",
        )
    }

    pub fn is_ok(&self) -> bool {
        self.kind == AdvisoryKind::Ok
    }
}

/// Latest-minus-previous change per metric
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Deltas {
    /// Rounded to one decimal place
    pub work_hours: f64,
    /// Rounded to one decimal place
    pub hydration_l: f64,
    pub steps: i64,
}

impl Deltas {
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Everything the presentation layer needs for one ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Number of records in the ledger
    pub records: usize,
    pub latest: Option<Record>,
    pub deltas: Deltas,
    pub status: Status,
    /// 0-3, or None for an empty ledger
    pub score: Option<u8>,
    /// Percentage of the daily step target, uncapped
    pub efficiency: u32,
    /// Hydration advisory first, mobility second
    pub advisories: Vec<Advisory>,
}
