//! The purge engine.
//!
//! A [`Purger`] plans filesystem purges according to its policy, reports
//! its plans, and executes them. All three operations serialize on one
//! lock; the plan slot lives inside it, so holding the guard is the only
//! way to observe or advance the plan lifecycle.

pub mod classify;
pub mod plan;
pub mod walk;

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

use tokio::sync::Mutex;

pub use classify::{FileStat, classify};
pub use plan::{FileClass, FileReason, FileRecord, Plan, PlanState};

use crate::config::Config;
use crate::error::Result;
use crate::notify::Notifier;
use crate::policy::Policy;

pub struct Purger {
    config: Config,
    state: Mutex<PlanState>,
}

impl Purger {
    pub fn new(config: Config) -> Self {
        tracing::debug!("purger initialized");
        Self {
            config,
            state: Mutex::new(PlanState::NoPlan),
        }
    }

    /// Scan the policy directories and assemble a fresh plan. Safe to call
    /// repeatedly; each call fully supersedes the previous plan.
    pub async fn plan(&self) -> Result<()> {
        tracing::debug!("waiting for lock: plan");
        let mut state = self.state.lock().await;
        self.perform_plan(&mut state)
    }

    /// Report the current plan to the alert hook or the log.
    pub async fn report(&self) -> Result<()> {
        tracing::debug!("waiting for lock: report");
        let state = self.state.lock().await;
        self.perform_report(&state).await
    }

    /// Purge planned files and after-purge-empty directories. With dry run
    /// enabled this reports instead and leaves the plan intact.
    pub async fn purge(&self) -> Result<()> {
        tracing::debug!("waiting for lock: purge");
        let mut state = self.state.lock().await;
        self.perform_purge(&mut state).await
    }

    /// Plan, report, and purge under a single lock acquisition, so no other
    /// operation can interleave between planning and acting on that plan.
    pub async fn execute(&self) -> Result<()> {
        tracing::debug!("waiting for lock: execute");
        let mut state = self.state.lock().await;
        self.perform_plan(&mut state)?;
        self.perform_report(&state).await?;
        self.perform_purge(&mut state).await
    }

    /// Snapshot of the current plan, if one is ready.
    pub async fn current_plan(&self) -> Option<Plan> {
        match &*self.state.lock().await {
            PlanState::Ready(plan) => Some(plan.clone()),
            _ => None,
        }
    }

    // The perform_* methods do the actual work. They are split from the
    // public operations so execute() can run the whole sequence under one
    // lock; taking `&mut PlanState` means the caller must hold the guard.

    fn perform_plan(&self, state: &mut PlanState) -> Result<()> {
        tracing::debug!(policy = %self.config.policy_file.display(), "reloading policy");
        let policy = Policy::load(&self.config.policy_file)?;

        // Any existing plan is superseded.
        *state = PlanState::NoPlan;

        // One clock reading for the whole scan, shifted forward when a
        // look-ahead horizon is configured.
        let mut when = SystemTime::now();
        if let Some(offset) = self.config.future_offset {
            when += offset;
        }

        let mut files = Vec::new();
        let mut finalized: Vec<PathBuf> = Vec::new();
        for root in policy.visitation_order() {
            tracing::debug!(root = %root.display(), "considering");
            let dir_policy = policy.policy_for(&root)?;
            for (path, stat) in walk::scan_root(&root, &finalized) {
                if let Some(record) = classify(&path, &stat, dir_policy, when) {
                    tracing::debug!(
                        path = %record.path.display(),
                        reason = %record.reason,
                        "marked for purge"
                    );
                    files.push(record);
                }
            }
            // Done with this tree; skip it under shorter ancestor roots.
            finalized.push(root);
        }

        *state = PlanState::Ready(Plan {
            files,
            directories: finalized,
        });
        Ok(())
    }

    async fn perform_report(&self, state: &PlanState) -> Result<()> {
        let plan = state.ready()?;
        let text = plan.render();
        if let Some(hook) = &self.config.alert_hook {
            Notifier::new(hook.clone()).send("Purge plan", &text).await?;
            tracing::info!(files = plan.files.len(), "purge plan sent to alert hook");
        } else {
            tracing::info!("{text}");
        }
        Ok(())
    }

    async fn perform_purge(&self, state: &mut PlanState) -> Result<()> {
        if self.config.dry_run {
            tracing::warn!("dry run enabled; reporting instead of purging");
            return self.perform_report(state).await;
        }
        let plan = state.take_ready()?;

        let mut touched: HashSet<PathBuf> = HashSet::new();
        let mut skipped = 0usize;
        for record in &plan.files {
            tracing::debug!(path = %record.path.display(), "removing file");
            match fs::remove_file(&record.path) {
                Ok(()) => {
                    if let Some(parent) = record.path.parent() {
                        touched.insert(parent.to_path_buf());
                    }
                }
                Err(err) => {
                    skipped += 1;
                    tracing::warn!(
                        path = %record.path.display(),
                        error = %err,
                        "could not remove file; continuing"
                    );
                }
            }
        }

        tracing::debug!("file purge complete; removing empty directories");
        // Longest paths first, so children are evaluated before parents.
        let mut victims: Vec<PathBuf> = touched.into_iter().collect();
        victims.sort_by(|a, b| b.as_os_str().len().cmp(&a.as_os_str().len()));
        for dir in victims {
            if plan.directories.contains(&dir) {
                tracing::debug!(dir = %dir.display(), "keeping directory named in policy");
                continue;
            }
            let empty = match fs::read_dir(&dir) {
                Ok(mut entries) => entries.next().is_none(),
                Err(err) => {
                    skipped += 1;
                    tracing::warn!(dir = %dir.display(), error = %err, "could not read directory; continuing");
                    continue;
                }
            };
            if !empty {
                continue;
            }
            match fs::remove_dir(&dir) {
                Ok(()) => tracing::debug!(dir = %dir.display(), "removed empty directory"),
                Err(err) => {
                    skipped += 1;
                    tracing::warn!(
                        dir = %dir.display(),
                        error = %err,
                        "could not remove directory; continuing"
                    );
                }
            }
        }

        if skipped > 0 {
            tracing::warn!(skipped, "purge finished with skipped items");
        }
        tracing::debug!("purge complete");
        Ok(())
    }
}
