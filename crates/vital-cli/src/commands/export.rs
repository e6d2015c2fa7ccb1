//! CSV export command

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use vital_core::{export_csv, LedgerStore};

use super::load_ledger;

pub fn cmd_export(store: &LedgerStore, output: Option<&Path>) -> Result<()> {
    let ledger = load_ledger(store)?;

    if ledger.is_empty() {
        println!("Nothing to export yet. Commit an entry with 'vital add' first.");
        return Ok(());
    }

    let export = export_csv(&ledger)?;
    let path = output.unwrap_or_else(|| Path::new(export.filename));

    if path == Path::new("-") {
        // Write to stdout
        io::stdout().write_all(&export.bytes)?;
        return Ok(());
    }

    let mut file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    file.write_all(&export.bytes)?;

    println!(
        "✅ Exported {} entries to {} ({})",
        export.rows(),
        path.display(),
        export.content_type
    );

    Ok(())
}
