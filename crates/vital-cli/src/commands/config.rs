//! Configuration display

use anyhow::Result;
use vital_core::config::{default_config_path, CONFIG_ENV, LEDGER_ENV};
use vital_core::Config;

pub fn cmd_config(config: &Config, json: bool) -> Result<()> {
    if json {
        let value = serde_json::json!({
            "ledger_path": config.ledger_path.display().to_string(),
            "ledger_source": config.ledger_source.as_str(),
            "config_file": config.config_file.as_ref().map(|p| p.display().to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print!("{}", render_config(config));
    Ok(())
}

/// Text summary of the resolved configuration
pub fn render_config(config: &Config) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str("⚙️  VitalStream Configuration\n");
    out.push_str("   ─────────────────────────────────────────────\n");
    out.push_str(&format!(
        "   Ledger: {} ({})\n",
        config.ledger_path.display(),
        config.ledger_source
    ));
    let config_file = match (&config.config_file, default_config_path()) {
        (Some(path), _) => path.display().to_string(),
        (None, Some(path)) => format!("none (looked for {})", path.display()),
        (None, None) => "none".to_string(),
    };
    out.push_str(&format!("   Config file: {}\n", config_file));
    out.push('\n');
    out.push_str(&format!(
        "   Override with --ledger, {} or {}\n",
        LEDGER_ENV, CONFIG_ENV
    ));
    out
}
