//! CSV export of the in-memory ledger
//!
//! The export is the same format as the ledger file, packaged with the
//! filename and content type a download needs.

use crate::error::Result;
use crate::models::Ledger;
use crate::store::write_ledger;

/// Filename offered for downloads
pub const EXPORT_FILENAME: &str = "vital_intel_export.csv";

/// Content type of the export
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// A ledger serialized for download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerExport {
    pub filename: &'static str,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl LedgerExport {
    /// Number of data rows (excluding the header)
    pub fn rows(&self) -> usize {
        self.bytes
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
            .saturating_sub(1)
    }
}

/// Serialize the ledger to CSV bytes, header first
pub fn export_csv(ledger: &Ledger) -> Result<LedgerExport> {
    let mut bytes = Vec::new();
    write_ledger(ledger, &mut bytes)?;

    Ok(LedgerExport {
        filename: EXPORT_FILENAME,
        content_type: CSV_CONTENT_TYPE,
        bytes,
    })
}
