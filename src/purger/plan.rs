//! The plan: files selected for purge from one scan, and why.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::error::{Result, SweepError};

/// Whether a file is large or small relative to its policy threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileClass {
    Large,
    Small,
}

/// Which timestamp axis triggered purge eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileReason {
    Access,
    Creation,
    Modification,
}

impl fmt::Display for FileReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Access => "access",
            Self::Creation => "creation",
            Self::Modification => "modification",
        };
        f.write_str(s)
    }
}

/// One file selected for purge.
///
/// `observed_age >= threshold_age` holds at evaluation time by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub path: PathBuf,
    pub class: FileClass,
    pub reason: FileReason,
    #[serde(serialize_with = "as_secs")]
    pub observed_age: Duration,
    #[serde(serialize_with = "as_secs")]
    pub threshold_age: Duration,
}

impl FileRecord {
    fn render_line(&self) -> String {
        format!(
            "{}: {} {}s >= {}s",
            self.path.display(),
            self.reason,
            self.observed_age.as_secs(),
            self.threshold_age.as_secs()
        )
    }
}

fn as_secs<S: Serializer>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_secs())
}

/// Immutable outcome of one scan: the files to delete and the directories
/// considered, in visitation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub files: Vec<FileRecord>,
    pub directories: Vec<PathBuf>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Human-readable rendering used for reports and notifications. The
    /// receiving channel may truncate it.
    pub fn render(&self) -> String {
        if self.files.is_empty() {
            return "no files to purge".to_string();
        }
        self.files
            .iter()
            .map(FileRecord::render_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// The engine's single plan slot. Transitions only through the documented
/// operations: plan() produces Ready, a completed purge leaves Stale.
#[derive(Debug, Default)]
pub enum PlanState {
    #[default]
    NoPlan,
    Ready(Plan),
    Stale,
}

impl PlanState {
    /// Borrow the ready plan, or fail if none is ready.
    pub fn ready(&self) -> Result<&Plan> {
        match self {
            Self::Ready(plan) => Ok(plan),
            _ => Err(SweepError::PlanNotReady),
        }
    }

    /// Consume the ready plan, leaving the slot stale. A fresh plan() is
    /// required before the next report() or purge().
    pub fn take_ready(&mut self) -> Result<Plan> {
        match std::mem::replace(self, Self::Stale) {
            Self::Ready(plan) => Ok(plan),
            other => {
                *self = other;
                Err(SweepError::PlanNotReady)
            }
        }
    }
}
