//! Application configuration.
//!
//! The config document is YAML, loaded once at startup. Individual settings
//! can be overridden by `SCRATCHSWEEP_`-prefixed environment variables and
//! by command-line flags; see [`crate::app::AppContext::from_cli`] for the
//! precedence rules.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, SweepError};
use crate::policy::units;

pub const ENV_PREFIX: &str = "SCRATCHSWEEP_";
pub const DEFAULT_CONFIG_FILE: &str = "/etc/scratchsweep/config.yaml";
pub const DEFAULT_POLICY_FILE: &str = "/etc/scratchsweep/policy.yaml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Policy document location.
    #[serde(default = "default_policy_file", alias = "policyFile")]
    pub policy_file: PathBuf,

    /// Report what would be purged instead of purging.
    #[serde(default, alias = "dryRun")]
    pub dry_run: bool,

    /// When set, planning judges files against `now + future_offset` so a
    /// report can warn about files that will become purge-eligible within
    /// that horizon.
    #[serde(
        default,
        alias = "futureOffset",
        deserialize_with = "units::de_opt_duration"
    )]
    pub future_offset: Option<Duration>,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Webhook URL for report delivery. Secret-shaped; normally injected
    /// through `SCRATCHSWEEP_ALERT_HOOK` rather than written to the file.
    #[serde(default, alias = "alertHook")]
    pub alert_hook: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            policy_file: default_policy_file(),
            dry_run: false,
            future_offset: None,
            logging: LoggingConfig::default(),
            alert_hook: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| SweepError::Config(format!("read config {}: {err}", path.display())))?;
        serde_yaml::from_str(&raw)
            .map_err(|err| SweepError::Config(format!("parse config {}: {err}", path.display())))
    }
}

fn default_policy_file() -> PathBuf {
    PathBuf::from(DEFAULT_POLICY_FILE)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}
