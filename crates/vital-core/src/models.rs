//! Domain models for VitalStream

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Persisted column labels, in on-disk order
pub const LEDGER_HEADERS: [&str; 4] = ["Date", "Coding Hours", "Water (L)", "Steps"];

/// Date format used in the ledger file
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Upper bound for work hours in a single day
pub const MAX_WORK_HOURS: f64 = 16.0;
/// Upper bound for hydration in a single day (liters)
pub const MAX_HYDRATION_L: f64 = 5.0;
/// Upper bound for steps in a single day
pub const MAX_STEPS: u32 = 30_000;

/// Entry defaults offered when a field is not supplied
pub const DEFAULT_WORK_HOURS: f64 = 6.0;
pub const DEFAULT_HYDRATION_L: f64 = 2.5;
pub const DEFAULT_STEPS: u32 = 10_000;

/// One dated observation of work hours, hydration and step count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    pub work_hours: f64,
    pub hydration_l: f64,
    pub steps: u32,
}

impl Record {
    pub fn new(date: NaiveDate, work_hours: f64, hydration_l: f64, steps: u32) -> Self {
        Self {
            date,
            work_hours,
            hydration_l,
            steps,
        }
    }

    /// Basic range sanity for a new entry
    ///
    /// Only applied to records about to be appended; history on disk is
    /// accepted as stored.
    pub fn validate(&self) -> Result<()> {
        check_range("work_hours", self.work_hours, MAX_WORK_HOURS)?;
        check_range("hydration_l", self.hydration_l, MAX_HYDRATION_L)?;
        if self.steps > MAX_STEPS {
            return Err(Error::InvalidData(format!(
                "steps must be between 0 and {}, got {}",
                MAX_STEPS, self.steps
            )));
        }
        Ok(())
    }

    /// Value of a single metric as a float (for charting)
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::WorkHours => self.work_hours,
            Metric::Hydration => self.hydration_l,
            Metric::Steps => f64::from(self.steps),
        }
    }
}

fn check_range(field: &str, value: f64, max: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=max).contains(&value) {
        return Err(Error::InvalidData(format!(
            "{} must be between 0 and {}, got {}",
            field, max, value
        )));
    }
    Ok(())
}

/// The tracked metric columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    WorkHours,
    Hydration,
    Steps,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WorkHours => "work_hours",
            Self::Hydration => "hydration",
            Self::Steps => "steps",
        }
    }

    /// Column label in the ledger file
    pub fn column(&self) -> &'static str {
        match self {
            Self::WorkHours => LEDGER_HEADERS[1],
            Self::Hydration => LEDGER_HEADERS[2],
            Self::Steps => LEDGER_HEADERS[3],
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Self::WorkHours => "h",
            Self::Hydration => "L",
            Self::Steps => "",
        }
    }

    pub fn all() -> &'static [Metric] {
        &[Self::WorkHours, Self::Hydration, Self::Steps]
    }
}

impl std::str::FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "work" | "work_hours" | "hours" | "coding" => Ok(Self::WorkHours),
            "water" | "hydration" | "hydration_l" => Ok(Self::Hydration),
            "steps" | "movement" => Ok(Self::Steps),
            _ => {
                let known: Vec<_> = Self::all().iter().map(|m| m.as_str()).collect();
                Err(format!("Unknown metric: {} (expected {})", s, known.join(", ")))
            }
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered, append-only sequence of records
///
/// Order is append order, which is not necessarily date order. Duplicate
/// dates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    records: Vec<Record>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in append order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Records with the newest date first (ties keep append order)
    pub fn sorted_by_date_desc(&self) -> Vec<&Record> {
        let mut sorted: Vec<&Record> = self.records.iter().collect();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    /// Values of one metric in append order
    pub fn series(&self, metric: Metric) -> Vec<(NaiveDate, f64)> {
        self.records
            .iter()
            .map(|r| (r.date, r.metric(metric)))
            .collect()
    }

    pub(crate) fn push(&mut self, record: Record) {
        self.records.push(record);
    }
}

impl From<Vec<Record>> for Ledger {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_validate_accepts_bounds() {
        assert!(Record::new(date(1), 0.0, 0.0, 0).validate().is_ok());
        assert!(Record::new(date(1), 16.0, 5.0, 30_000).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert!(Record::new(date(1), 16.5, 2.0, 100).validate().is_err());
        assert!(Record::new(date(1), -1.0, 2.0, 100).validate().is_err());
        assert!(Record::new(date(1), 6.0, 5.1, 100).validate().is_err());
        assert!(Record::new(date(1), 6.0, f64::NAN, 100).validate().is_err());
        let err = Record::new(date(1), 6.0, 2.0, 30_001)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("steps"));
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("work".parse::<Metric>().unwrap(), Metric::WorkHours);
        assert_eq!("Water".parse::<Metric>().unwrap(), Metric::Hydration);
        assert_eq!("movement".parse::<Metric>().unwrap(), Metric::Steps);

        let err = "sleep".parse::<Metric>().unwrap_err();
        assert_eq!(err, "Unknown metric: sleep (expected work_hours, hydration, steps)");
    }

    #[test]
    fn test_metric_columns_match_headers() {
        let columns: Vec<_> = Metric::all().iter().map(|m| m.column()).collect();
        assert_eq!(columns, &LEDGER_HEADERS[1..]);
    }

    #[test]
    fn test_sorted_by_date_desc_keeps_ledger_order() {
        let ledger = Ledger::from(vec![
            Record::new(date(2), 1.0, 1.0, 1),
            Record::new(date(5), 2.0, 2.0, 2),
            Record::new(date(2), 3.0, 3.0, 3),
            Record::new(date(1), 4.0, 4.0, 4),
        ]);

        let sorted = ledger.sorted_by_date_desc();
        let steps: Vec<u32> = sorted.iter().map(|r| r.steps).collect();
        assert_eq!(steps, vec![2, 1, 3, 4]);

        // the ledger itself is untouched
        assert_eq!(ledger.records()[0].steps, 1);
    }

    #[test]
    fn test_series() {
        let ledger = Ledger::from(vec![
            Record::new(date(3), 5.5, 1.8, 6000),
            Record::new(date(1), 6.0, 2.0, 8000),
        ]);

        assert_eq!(
            ledger.series(Metric::Steps),
            vec![(date(3), 6000.0), (date(1), 8000.0)]
        );
        assert_eq!(ledger.series(Metric::Hydration)[1], (date(1), 2.0));
    }
}
