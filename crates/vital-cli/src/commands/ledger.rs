//! Ledger command implementations (add, log, series)

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use vital_core::models::DATE_FORMAT;
use vital_core::store::append;
use vital_core::{Ledger, LedgerStore, Metric, Record};

use super::{format_thousands, load_ledger};

/// Validate, append and commit one entry
pub fn cmd_add(
    store: &LedgerStore,
    date: Option<&str>,
    work: f64,
    water: f64,
    steps: u32,
    json: bool,
) -> Result<()> {
    let date = match date {
        Some(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .with_context(|| format!("Invalid --date '{}' (use YYYY-MM-DD)", s))?,
        None => Local::now().date_naive(),
    };

    let record = Record::new(date, work, water, steps);
    record.validate().context("Entry rejected")?;

    let ledger = append(load_ledger(store)?, record.clone());
    store
        .persist(&ledger)
        .with_context(|| format!("Commit failed, ledger unchanged: {}", store.path().display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!("🛰️  Block synchronized");
    println!(
        "   {}  {:?}h  {:?}L  {} steps",
        record.date,
        record.work_hours,
        record.hydration_l,
        format_thousands(i64::from(record.steps))
    );
    println!("   Ledger now holds {} entries", ledger.len());

    Ok(())
}

/// Show entries, newest date first
pub fn cmd_log(store: &LedgerStore, limit: Option<usize>, json: bool) -> Result<()> {
    let ledger = load_ledger(store)?;

    if json {
        let rows = log_rows(&ledger, limit);
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    print!("{}", render_log(&ledger, limit));
    Ok(())
}

/// Entries sorted newest date first, truncated to `limit`
pub fn log_rows(ledger: &Ledger, limit: Option<usize>) -> Vec<&Record> {
    ledger
        .sorted_by_date_desc()
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// Text table for the log command
pub fn render_log(ledger: &Ledger, limit: Option<usize>) -> String {
    let rows = log_rows(ledger, limit);
    if rows.is_empty() {
        return "No entries yet. Commit one with:\n  vital add --work 6 --water 2 --steps 8000\n"
            .to_string();
    }

    let mut out = String::new();
    out.push('\n');
    out.push_str("📒 Log Ledger\n");
    out.push_str("   ─────────────────────────────────────────────\n");
    out.push_str(&format!(
        "   {:<10}  {:>12}  {:>9}  {:>7}\n",
        "Date", "Coding Hours", "Water (L)", "Steps"
    ));
    for record in &rows {
        out.push_str(&format!(
            "   {:<10}  {:>12.1}  {:>9.1}  {:>7}\n",
            record.date.to_string(),
            record.work_hours,
            record.hydration_l,
            format_thousands(i64::from(record.steps))
        ));
    }
    if rows.len() < ledger.len() {
        out.push_str(&format!("   ... {} more\n", ledger.len() - rows.len()));
    }

    out
}

/// Print one metric in ledger order
pub fn cmd_series(store: &LedgerStore, metric: &str, json: bool) -> Result<()> {
    let metric: Metric = metric.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let ledger = load_ledger(store)?;

    if json {
        let points: Vec<_> = ledger
            .series(metric)
            .iter()
            .map(|(date, value)| serde_json::json!({ "date": date, "value": value }))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "metric": metric,
                "points": points,
            }))?
        );
        return Ok(());
    }

    print!("{}", render_series(&ledger, metric));
    Ok(())
}

/// Text listing for the series command
pub fn render_series(ledger: &Ledger, metric: Metric) -> String {
    let series = ledger.series(metric);
    if series.is_empty() {
        return "No entries yet.\n".to_string();
    }

    let mut out = format!("📈 {}\n", metric.column());
    for (date, value) in &series {
        out.push_str(&format!("   {}  {}{}\n", date, value, metric.unit()));
    }
    out
}
