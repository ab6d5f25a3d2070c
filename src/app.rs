//! Application context: configuration resolution.
//!
//! Precedence, most specific first: command-line flags, then
//! `SCRATCHSWEEP_` environment variables, then the config file, then
//! built-in defaults. The alert hook is env-only because it is a secret.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::{Config, DEFAULT_CONFIG_FILE, ENV_PREFIX, LogLevel};
use crate::error::Result;
use crate::policy::Policy;

pub struct AppContext {
    pub config_path: PathBuf,
    pub config: Config,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config_path = cli
            .config
            .clone()
            .or_else(|| env_path("CONFIG_FILE"))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        // An unreadable config file degrades to defaults; the command-line
        // options still apply. There is no logger yet, so complain on
        // stderr.
        let mut config = match Config::load(&config_path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("could not load config '{}': {err}", config_path.display());
                Config::default()
            }
        };

        if let Some(policy) = cli.policy.clone().or_else(|| env_path("POLICY_FILE")) {
            config.policy_file = policy;
        }
        if cli.dry_run || env_flag("DRY_RUN") {
            config.dry_run = true;
        }
        if env_flag("DEBUG") {
            config.logging.level = LogLevel::Debug;
        }
        if let Some(hook) = env_string("ALERT_HOOK") {
            config.alert_hook = Some(hook);
        }

        // Unlike the config file, a bad policy file is fatal up front.
        Policy::load(&config.policy_file)?;

        Ok(Self {
            config_path,
            config,
        })
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{name}"))
        .ok()
        .filter(|v| !v.is_empty())
}

fn env_path(name: &str) -> Option<PathBuf> {
    env_string(name).map(PathBuf::from)
}

fn env_flag(name: &str) -> bool {
    env_string(name).is_some()
}
