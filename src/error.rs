//! Error types for scratchsweep.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SweepError>;

#[derive(Debug, Error)]
pub enum SweepError {
    /// Application configuration could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Policy document could not be read, parsed, or validated.
    #[error("policy error: {0}")]
    Policy(String),

    /// The walker asked for a policy covering a path it should never have
    /// visited. This is an invariant violation, not a user error.
    #[error("no policy declared for directory {}", .0.display())]
    PolicyNotFound(PathBuf),

    /// report() or purge() was called without a ready plan.
    #[error("plan not ready: run plan before report or purge")]
    PlanNotReady,

    /// The alert webhook rejected or failed to receive a report.
    #[error("notification failed: {0}")]
    Notify(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
