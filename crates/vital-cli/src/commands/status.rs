//! Insight dashboard for the latest entry

use anyhow::Result;
use vital_core::insights::{InsightEngine, Severity, Snapshot};
use vital_core::LedgerStore;

use super::{format_delta, format_step_delta, format_thousands, load_ledger};

pub fn cmd_status(store: &LedgerStore, json: bool) -> Result<()> {
    let ledger = load_ledger(store)?;
    let snapshot = InsightEngine::new().analyze(&ledger);

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    print!("{}", render_snapshot(&snapshot));
    Ok(())
}

/// Icon shown next to a severity
pub fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Neutral => "⏳",
        Severity::Success => "✅",
        Severity::Info => "🔵",
        Severity::Warning => "⚠️ ",
        Severity::Alert => "❌",
    }
}

/// Text dashboard for a snapshot
pub fn render_snapshot(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str("💠 System Intelligence Overview\n");
    out.push_str("   ─────────────────────────────────────────────\n");
    out.push_str(&format!(
        "   {} {}\n",
        severity_icon(snapshot.status.severity),
        snapshot.status.label.headline()
    ));

    let Some(latest) = &snapshot.latest else {
        out.push('\n');
        out.push_str("   System offline. Feed data with 'vital add' to begin analysis.\n");
        return out;
    };

    let deltas = &snapshot.deltas;
    out.push_str(&format!("   Latest entry: {}\n\n", latest.date));
    out.push_str(&format!(
        "   DEEP WORK    {:>8}  {}\n",
        format!("{:?}h", latest.work_hours),
        format_delta(deltas.work_hours, "h")
    ));
    out.push_str(&format!(
        "   HYDRATION    {:>8}  {}\n",
        format!("{:?}L", latest.hydration_l),
        format_delta(deltas.hydration_l, "L")
    ));
    out.push_str(&format!(
        "   MOVEMENT     {:>8}  {}\n",
        format_thousands(i64::from(latest.steps)),
        format_step_delta(deltas.steps)
    ));
    out.push_str(&format!(
        "   SYSTEM LOAD  {:>8}\n",
        format!("{}%", snapshot.efficiency)
    ));

    out.push('\n');
    out.push_str("   System Insights\n");
    for advisory in &snapshot.advisories {
        out.push_str(&format!(
            "   {} {}\n",
            severity_icon(advisory.severity),
            advisory.message
        ));
    }

    out
}
