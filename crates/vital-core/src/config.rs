//! Configuration for locating the ledger
//!
//! ## Configuration Resolution
//!
//! Later layers win:
//! 1. Built-in default (`health_data.csv` in the working directory)
//! 2. Config file (`~/.config/vitalstream/config.toml`, or `VITAL_CONFIG`)
//! 3. `VITAL_LEDGER` environment variable
//! 4. `--ledger` on the command line (applied by the caller)
//!
//! Example config file:
//!
//! ```toml
//! [ledger]
//! path = "~/notes/health_data.csv"
//! ```
//!
//! Scoring thresholds are fixed and deliberately not part of the config.

use std::env;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable overriding the ledger path
pub const LEDGER_ENV: &str = "VITAL_LEDGER";

/// Environment variable pointing at a config file
pub const CONFIG_ENV: &str = "VITAL_CONFIG";

/// Ledger filename used when nothing else is configured
pub const DEFAULT_LEDGER_FILE: &str = "health_data.csv";

/// Where a configuration value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Default,
    File,
    Env,
    Flag,
}

impl ConfigSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::File => "config file",
            Self::Env => "environment",
            Self::Flag => "command line",
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the ledger CSV file
    pub ledger_path: PathBuf,
    /// Layer that set `ledger_path`
    pub ledger_source: ConfigSource,
    /// Config file that was read, if any
    pub config_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from(DEFAULT_LEDGER_FILE),
            ledger_source: ConfigSource::Default,
            config_file: None,
        }
    }
}

/// Raw config structure for TOML parsing
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    ledger: Option<RawLedger>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLedger {
    path: Option<PathBuf>,
}

/// Default config file path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("vitalstream").join("config.toml"))
}

impl Config {
    /// Resolve defaults, config file and environment
    ///
    /// An explicitly given config path must exist; the default location is
    /// optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        match explicit_config_path(config_path, env::var_os(CONFIG_ENV)) {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                config.apply_file(&path)?;
            }
            None => {
                if let Some(path) = default_config_path().filter(|p| p.exists()) {
                    config.apply_file(&path)?;
                }
            }
        }

        if let Some(ledger) = env::var_os(LEDGER_ENV).filter(|v| !v.is_empty()) {
            config.set_ledger_path(PathBuf::from(ledger), ConfigSource::Env);
        }

        debug!(
            ledger = %config.ledger_path.display(),
            source = config.ledger_source.as_str(),
            "Resolved configuration"
        );
        Ok(config)
    }

    /// Apply a command-line override when present
    pub fn with_ledger_override(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.set_ledger_path(path, ConfigSource::Flag);
        }
        self
    }

    fn set_ledger_path(&mut self, path: PathBuf, source: ConfigSource) {
        self.ledger_path = expand_home(path);
        self.ledger_source = source;
    }

    fn apply_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        self.apply_toml(&content, path.parent())?;
        self.config_file = Some(path.to_path_buf());
        Ok(())
    }

    /// Apply TOML config content
    ///
    /// Relative ledger paths resolve against `base_dir` (the config file's
    /// directory) when one is given.
    pub fn apply_toml(&mut self, content: &str, base_dir: Option<&Path>) -> Result<()> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        if let Some(path) = raw.ledger.and_then(|l| l.path) {
            let path = expand_home(path);
            let path = match base_dir {
                Some(base) if path.is_relative() => base.join(path),
                _ => path,
            };
            self.set_ledger_path(path, ConfigSource::File);
        }

        Ok(())
    }
}

/// Config file named by `--config` or `VITAL_CONFIG`; an empty variable is unset
fn explicit_config_path(flag: Option<&Path>, env_value: Option<OsString>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from))
}

/// Expand a leading `~` to the home directory
fn expand_home(path: PathBuf) -> PathBuf {
    if let (Ok(rest), Some(home)) = (path.strip_prefix("~"), dirs::home_dir()) {
        return home.join(rest);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.ledger_path, PathBuf::from("health_data.csv"));
        assert_eq!(config.ledger_source, ConfigSource::Default);
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_apply_toml_absolute_path() {
        let mut config = Config::default();
        config
            .apply_toml("[ledger]\npath = \"/data/vitals.csv\"\n", Some(Path::new("/etc/vital")))
            .unwrap();

        assert_eq!(config.ledger_path, PathBuf::from("/data/vitals.csv"));
        assert_eq!(config.ledger_source, ConfigSource::File);
    }

    #[test]
    fn test_apply_toml_relative_path_uses_base_dir() {
        let mut config = Config::default();
        config
            .apply_toml("[ledger]\npath = \"vitals.csv\"\n", Some(Path::new("/etc/vital")))
            .unwrap();

        assert_eq!(config.ledger_path, PathBuf::from("/etc/vital/vitals.csv"));
    }

    #[test]
    fn test_apply_toml_empty_keeps_default() {
        let mut config = Config::default();
        config.apply_toml("", None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_apply_toml_rejects_unknown_keys() {
        let mut config = Config::default();
        let err = config
            .apply_toml("[thresholds]\nsteps = 5000\n", None)
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(dir.path().join("nope.toml").as_path())).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ledger]\npath = \"ledger.csv\"\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.config_file.as_deref(), Some(path.as_path()));
        // the environment layer may override the file in CI shells
        if env::var_os(LEDGER_ENV).is_none() {
            assert_eq!(config.ledger_path, dir.path().join("ledger.csv"));
            assert_eq!(config.ledger_source, ConfigSource::File);
        }
    }

    #[test]
    fn test_explicit_config_path_layers() {
        let flag = Path::new("/etc/vital/flag.toml");

        assert_eq!(
            explicit_config_path(Some(flag), Some(OsString::from("/tmp/env.toml"))),
            Some(flag.to_path_buf())
        );
        assert_eq!(
            explicit_config_path(None, Some(OsString::from("/tmp/env.toml"))),
            Some(PathBuf::from("/tmp/env.toml"))
        );
        assert_eq!(explicit_config_path(None, Some(OsString::new())), None);
        assert_eq!(explicit_config_path(None, None), None);
    }

    #[test]
    fn test_flag_override_wins() {
        let config = Config::default().with_ledger_override(Some(PathBuf::from("flag.csv")));
        assert_eq!(config.ledger_path, PathBuf::from("flag.csv"));
        assert_eq!(config.ledger_source, ConfigSource::Flag);

        let untouched = Config::default().with_ledger_override(None);
        assert_eq!(untouched.ledger_source, ConfigSource::Default);
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(
            expand_home(PathBuf::from("/abs/file.csv")),
            PathBuf::from("/abs/file.csv")
        );
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(PathBuf::from("~/x.csv")), home.join("x.csv"));
        }
    }
}
