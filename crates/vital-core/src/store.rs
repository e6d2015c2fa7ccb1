//! Ledger store: the CSV file that holds the ledger on disk
//!
//! The file has a fixed header row (`Date,Coding Hours,Water (L),Steps`) and
//! one row per record, dates as `YYYY-MM-DD`.
//!
//! # Lifecycle
//!
//! Each interaction loads the whole ledger, optionally appends one record,
//! and persists the whole ledger again:
//!
//! ```rust,ignore
//! use vital_core::store::{append, LedgerStore};
//!
//! let store = LedgerStore::new("health_data.csv");
//! let ledger = append(store.load()?, record);
//! store.persist(&ledger)?;
//! ```
//!
//! Writes go to a temp file in the same directory which is then renamed over
//! the ledger, so a crash mid-write leaves the previous ledger in place.
//! There is no cross-process locking; one writer at a time is assumed.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{Ledger, Record, DATE_FORMAT, LEDGER_HEADERS};

/// Append a record at the end of the ledger
///
/// No reordering and no deduplication: a record with an existing date is
/// simply added after it.
pub fn append(mut ledger: Ledger, record: Record) -> Ledger {
    ledger.push(record);
    ledger
}

/// File-backed ledger storage
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the ledger file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full ledger
    ///
    /// A missing file is the normal first-run state and yields an empty
    /// ledger.
    pub fn load(&self) -> Result<Ledger> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No ledger at {}, starting empty", self.path.display());
                return Ok(Ledger::new());
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let ledger = read_ledger(file)?;
        debug!(
            records = ledger.len(),
            "Loaded ledger from {}",
            self.path.display()
        );
        Ok(ledger)
    }

    /// Write the full ledger, replacing the previous contents atomically
    pub fn persist(&self, ledger: &Ledger) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let mut tmp = NamedTempFile::new_in(&dir)?;
        write_ledger(ledger, &mut tmp)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| Error::Io(e.error))?;

        info!(
            records = ledger.len(),
            "Committed ledger to {}",
            self.path.display()
        );
        Ok(())
    }
}

/// Parse a ledger from CSV
pub fn read_ledger<R: Read>(reader: R) -> Result<Ledger> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr.headers().map_err(map_read_error)?.clone();
    if headers.is_empty() {
        // zero-byte file
        return Ok(Ledger::new());
    }
    if !headers.iter().eq(LEDGER_HEADERS.iter().copied()) {
        return Err(Error::CorruptLedger(format!(
            "expected columns [{}], found [{}]",
            LEDGER_HEADERS.join(","),
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    let mut ledger = Ledger::new();
    for (i, result) in rdr.records().enumerate() {
        let row = result.map_err(map_read_error)?;
        // header is line 1
        ledger.push(parse_row(&row, i + 2)?);
    }

    Ok(ledger)
}

/// Serialize a ledger as CSV, header first
pub fn write_ledger<W: Write>(ledger: &Ledger, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);

    wtr.write_record(LEDGER_HEADERS).map_err(map_write_error)?;
    for record in ledger.records() {
        wtr.write_record([
            record.date.format(DATE_FORMAT).to_string(),
            format_real(record.work_hours),
            format_real(record.hydration_l),
            record.steps.to_string(),
        ])
        .map_err(map_write_error)?;
    }
    wtr.flush()?;

    Ok(())
}

/// Shortest representation that parses back to the same value ("6.0", "1.8")
fn format_real(value: f64) -> String {
    format!("{:?}", value)
}

fn map_read_error(e: csv::Error) -> Error {
    if !e.is_io_error() {
        return Error::CorruptLedger(e.to_string());
    }
    match e.into_kind() {
        csv::ErrorKind::Io(io) => Error::Io(io),
        other => Error::CorruptLedger(format!("{:?}", other)),
    }
}

fn map_write_error(e: csv::Error) -> Error {
    if !e.is_io_error() {
        return Error::Csv(e);
    }
    match e.into_kind() {
        csv::ErrorKind::Io(io) => Error::Io(io),
        other => Error::InvalidData(format!("{:?}", other)),
    }
}

fn parse_row(row: &StringRecord, line: usize) -> Result<Record> {
    let raw_date = field(row, 0, line)?;
    let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|e| {
        Error::CorruptLedger(format!("line {}: invalid date '{}': {}", line, raw_date, e))
    })?;
    let work_hours = parse_real(field(row, 1, line)?, line, 1)?;
    let hydration_l = parse_real(field(row, 2, line)?, line, 2)?;
    let steps = parse_steps(field(row, 3, line)?, line)?;

    Ok(Record::new(date, work_hours, hydration_l, steps))
}

fn field(row: &StringRecord, idx: usize, line: usize) -> Result<&str> {
    row.get(idx).map(str::trim).ok_or_else(|| {
        Error::CorruptLedger(format!(
            "line {}: missing {} column",
            line, LEDGER_HEADERS[idx]
        ))
    })
}

fn parse_real(s: &str, line: usize, idx: usize) -> Result<f64> {
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            Error::CorruptLedger(format!(
                "line {}: invalid {} value '{}'",
                line, LEDGER_HEADERS[idx], s
            ))
        })
}

/// Steps are integers, but files written by float-typed tools carry "8000.0"
fn parse_steps(s: &str, line: usize) -> Result<u32> {
    if let Ok(steps) = s.parse::<u32>() {
        return Ok(steps);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= f64::from(u32::MAX) => {
            Ok(v as u32)
        }
        _ => Err(Error::CorruptLedger(format!(
            "line {}: invalid {} value '{}'",
            line, LEDGER_HEADERS[3], s
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Writer whose storage is always full
    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "no space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_read_ledger_basic() {
        let csv = "Date,Coding Hours,Water (L),Steps\n\
                   2024-03-01,5.5,1.8,6000\n\
                   2024-03-02,6.0,2.0,8000\n";

        let ledger = read_ledger(csv.as_bytes()).unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.records()[0], Record::new(date(2024, 3, 1), 5.5, 1.8, 6000));
        assert_eq!(ledger.records()[1].steps, 8000);
    }

    #[test]
    fn test_read_ledger_header_only() {
        let ledger = read_ledger("Date,Coding Hours,Water (L),Steps\n".as_bytes()).unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_read_ledger_zero_bytes() {
        let ledger = read_ledger("".as_bytes()).unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_read_ledger_rejects_wrong_headers() {
        let csv = "date,hours,water,steps\n2024-03-01,5.5,1.8,6000\n";
        let err = read_ledger(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::CorruptLedger(_)));
    }

    #[test]
    fn test_read_ledger_rejects_reordered_headers() {
        let csv = "Date,Water (L),Coding Hours,Steps\n";
        assert!(matches!(
            read_ledger(csv.as_bytes()),
            Err(Error::CorruptLedger(_))
        ));
    }

    #[test]
    fn test_read_ledger_rejects_bad_rows() {
        let bad_date = "Date,Coding Hours,Water (L),Steps\n2024-13-01,5.5,1.8,6000\n";
        let bad_number = "Date,Coding Hours,Water (L),Steps\n2024-03-01,lots,1.8,6000\n";
        let short_row = "Date,Coding Hours,Water (L),Steps\n2024-03-01,5.5\n";

        for csv in [bad_date, bad_number, short_row] {
            let err = read_ledger(csv.as_bytes()).unwrap_err();
            assert!(matches!(err, Error::CorruptLedger(_)), "{}", csv);
        }
    }

    #[test]
    fn test_parse_steps_accepts_float_form() {
        assert_eq!(parse_steps("8000", 2).unwrap(), 8000);
        assert_eq!(parse_steps("8000.0", 2).unwrap(), 8000);
        assert!(parse_steps("8000.5", 2).is_err());
        assert!(parse_steps("-1", 2).is_err());
    }

    #[test]
    fn test_write_ledger_format() {
        let ledger = Ledger::from(vec![
            Record::new(date(2024, 3, 1), 5.5, 1.8, 6000),
            Record::new(date(2024, 3, 2), 6.0, 2.0, 8000),
        ]);

        let mut buf = Vec::new();
        write_ledger(&ledger, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "Date,Coding Hours,Water (L),Steps\n\
             2024-03-01,5.5,1.8,6000\n\
             2024-03-02,6.0,2.0,8000\n"
        );
    }

    #[test]
    fn test_write_empty_ledger_keeps_header() {
        let mut buf = Vec::new();
        write_ledger(&Ledger::new(), &mut buf).unwrap();
        assert_eq!(buf, b"Date,Coding Hours,Water (L),Steps\n");
    }

    #[test]
    fn test_append_keeps_position() {
        let ledger = Ledger::from(vec![Record::new(date(2024, 3, 5), 1.0, 1.0, 1)]);
        let ledger = append(ledger, Record::new(date(2024, 3, 1), 2.0, 2.0, 2));

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.records()[1].date, date(2024, 3, 1));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::new(dir.path().join("health_data.csv"));

        let ledger = store.load().unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_persist_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::new(dir.path().join("health_data.csv"));

        let ledger = Ledger::from(vec![
            Record::new(date(2024, 3, 1), 7.25, 0.1, 12_345),
            Record::new(date(2024, 3, 1), 0.0, 4.95, 0),
        ]);
        store.persist(&ledger).unwrap();

        assert_eq!(store.load().unwrap(), ledger);
    }

    #[test]
    fn test_persist_overwrites_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::new(dir.path().join("health_data.csv"));

        let first = Ledger::from(vec![Record::new(date(2024, 3, 1), 1.0, 1.0, 1)]);
        let second = Ledger::from(vec![Record::new(date(2024, 3, 9), 9.0, 3.0, 9)]);
        store.persist(&first).unwrap();
        store.persist(&second).unwrap();

        assert_eq!(store.load().unwrap(), second);
        let entries = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_persist_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = LedgerStore::new(dir.path().join("nested").join("health_data.csv"));

        store.persist(&Ledger::new()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_write_ledger_storage_failure_is_io_error() {
        // enough rows to overflow the csv writer's buffer mid-ledger
        let records = (0..2000)
            .map(|i| Record::new(date(2024, 1, 1) + chrono::Days::new(i), 6.0, 2.0, 8000))
            .collect::<Vec<_>>();

        let err = write_ledger(&Ledger::from(records), FullDisk).unwrap_err();
        assert!(matches!(err, Error::Io(_)), "got {:?}", err);

        // a small ledger only fails at the final flush
        let err = write_ledger(&Ledger::new(), FullDisk).unwrap_err();
        assert!(matches!(err, Error::Io(_)), "got {:?}", err);
    }

    #[test]
    fn test_persist_unwritable_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();
        let store = LedgerStore::new(blocker.join("health_data.csv"));

        let err = store.persist(&Ledger::new()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_load_unreadable_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // a directory where the file should be
        let store = LedgerStore::new(dir.path());

        let err = store.load().unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
