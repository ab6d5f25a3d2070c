//! File classification against a directory policy.

use std::path::Path;
use std::time::SystemTime;

use crate::policy::DirectoryPolicy;
use crate::purger::plan::{FileClass, FileReason, FileRecord};

/// Snapshot of the stat fields classification needs. Creation time is not
/// available on every filesystem; a missing timestamp never triggers its
/// axis.
#[derive(Debug, Clone, Copy)]
pub struct FileStat {
    pub size: u64,
    pub accessed: Option<SystemTime>,
    pub created: Option<SystemTime>,
    pub modified: Option<SystemTime>,
}

impl FileStat {
    pub fn from_metadata(meta: &std::fs::Metadata) -> Self {
        Self {
            size: meta.len(),
            accessed: meta.accessed().ok(),
            created: meta.created().ok(),
            modified: meta.modified().ok(),
        }
    }
}

/// Decide whether a file is purge-eligible under `policy` as of `when`.
///
/// Size greater than or equal to the threshold selects the large interval
/// set. Axes are evaluated in fixed priority order (access, creation,
/// modification) and the first axis whose configured interval has elapsed
/// wins, so a file stale on several axes is always reported stale-by-access
/// first. A zero or unset interval disables its axis.
pub fn classify(
    path: &Path,
    stat: &FileStat,
    policy: &DirectoryPolicy,
    when: SystemTime,
) -> Option<FileRecord> {
    let (class, intervals) = if stat.size >= policy.threshold {
        (FileClass::Large, &policy.intervals.large)
    } else {
        (FileClass::Small, &policy.intervals.small)
    };

    let axes = [
        (FileReason::Access, intervals.access, stat.accessed),
        (FileReason::Creation, intervals.creation, stat.created),
        (FileReason::Modification, intervals.modification, stat.modified),
    ];

    for (reason, interval, timestamp) in axes {
        let Some(interval) = interval else { continue };
        if interval.is_zero() {
            continue;
        }
        let Some(timestamp) = timestamp else { continue };
        // Timestamps in the future never trigger.
        let Ok(age) = when.duration_since(timestamp) else {
            continue;
        };
        if age >= interval {
            return Some(FileRecord {
                path: path.to_path_buf(),
                class,
                reason,
                observed_age: age,
                threshold_age: interval,
            });
        }
    }
    None
}
