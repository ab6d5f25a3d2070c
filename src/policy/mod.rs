//! Purge policy model and resolver.
//!
//! A policy is an ordered set of directory-scoped rules. Each rule names a
//! directory subtree, a size threshold splitting files into exactly two
//! classes, and per-class age intervals. Policies are reloaded fresh from
//! disk at the start of every planning run so that edits take effect
//! without a restart.

pub mod units;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Result, SweepError};

/// Maximum ages before a file becomes purge-eligible on each timestamp
/// axis. An unset or zero interval means the axis never triggers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Intervals {
    #[serde(
        default,
        alias = "accessInterval",
        alias = "access_interval",
        deserialize_with = "units::de_opt_duration"
    )]
    pub access: Option<Duration>,

    #[serde(
        default,
        alias = "creationInterval",
        alias = "creation_interval",
        deserialize_with = "units::de_opt_duration"
    )]
    pub creation: Option<Duration>,

    #[serde(
        default,
        alias = "modificationInterval",
        alias = "modification_interval",
        deserialize_with = "units::de_opt_duration"
    )]
    pub modification: Option<Duration>,
}

/// Interval sets for the two size classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct SizedIntervals {
    #[serde(default)]
    pub large: Intervals,
    #[serde(default)]
    pub small: Intervals,
}

/// Purge rule for one directory subtree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DirectoryPolicy {
    /// Directory to consider for purging. Must be absolute.
    pub path: PathBuf,

    /// Size in bytes demarcating large from small files. A file whose size
    /// is greater than or equal to the threshold is large.
    #[serde(
        alias = "sizeThresholdBytes",
        alias = "size_threshold_bytes",
        deserialize_with = "units::de_size"
    )]
    pub threshold: u64,

    #[serde(default)]
    pub intervals: SizedIntervals,
}

/// Full rule set across multiple directory trees.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Policy {
    pub directories: Vec<DirectoryPolicy>,
}

impl Policy {
    /// Read, parse, and validate a policy document.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| SweepError::Policy(format!("read policy {}: {err}", path.display())))?;
        let policy: Self = serde_yaml::from_str(&raw)
            .map_err(|err| SweepError::Policy(format!("parse policy {}: {err}", path.display())))?;
        policy.validate()?;
        Ok(policy)
    }

    /// Structural validation: paths must be absolute and unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for directory in &self.directories {
            if !directory.path.is_absolute() {
                return Err(SweepError::Policy(format!(
                    "policy path '{}' is not absolute",
                    directory.path.display()
                )));
            }
            if !seen.insert(&directory.path) {
                return Err(SweepError::Policy(format!(
                    "duplicate policy path '{}'",
                    directory.path.display()
                )));
            }
        }
        Ok(())
    }

    /// Directory visitation order: longest path string first, so more
    /// specific subtrees are finalized before their ancestors. This is the
    /// same ordering ingress-nginx applies to its ingresses.
    pub fn visitation_order(&self) -> Vec<PathBuf> {
        let mut order: Vec<PathBuf> = self.directories.iter().map(|d| d.path.clone()).collect();
        order.sort_by(|a, b| b.as_os_str().len().cmp(&a.as_os_str().len()));
        order
    }

    /// The policy entry declared for exactly this path. The walker only
    /// roots traversals at declared paths, so a miss is an invariant
    /// violation rather than a user error.
    pub fn policy_for(&self, path: &Path) -> Result<&DirectoryPolicy> {
        self.directories
            .iter()
            .find(|d| d.path == path)
            .ok_or_else(|| SweepError::PolicyNotFound(path.to_path_buf()))
    }
}
