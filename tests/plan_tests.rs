//! Planning behavior against a real filesystem tree.

mod common;

use std::time::Duration;

use scratchsweep::purger::{FileReason, Purger};

use common::{AgeAxis, Fixture, HOUR, set_age};

#[tokio::test]
async fn fresh_tree_yields_empty_plan() {
    let fixture = Fixture::new();
    let purger = Purger::new(fixture.config());
    assert!(purger.current_plan().await.is_none());
    purger.plan().await.expect("plan");
    let plan = purger.current_plan().await.expect("plan ready");
    assert!(plan.files.is_empty());
    assert_eq!(plan.directories.len(), 2);
}

#[tokio::test]
async fn stale_atime_selects_file() {
    let fixture = Fixture::new();
    set_age(&fixture.scratch.join("large"), AgeAxis::Access, 8 * HOUR);
    let purger = Purger::new(fixture.config());
    purger.plan().await.expect("plan");
    let plan = purger.current_plan().await.expect("plan ready");
    assert_eq!(plan.files.len(), 1);
    assert_eq!(plan.files[0].path.file_name().unwrap(), "large");
    assert_eq!(plan.files[0].reason, FileReason::Access);
    assert!(plan.files[0].observed_age >= plan.files[0].threshold_age);
}

#[tokio::test]
async fn stale_mtime_selects_file() {
    let fixture = Fixture::new();
    fixture.write_policy(&format!(
        r#"directories:
  - path: "{scratch}"
    threshold: 10
    intervals:
      large:
        modification_interval: "1h"
  - path: "{foobar}"
    threshold: 30
"#,
        scratch = fixture.scratch.display(),
        foobar = fixture.foobar.display(),
    ));
    set_age(&fixture.scratch.join("large"), AgeAxis::Modification, 8 * HOUR);
    let purger = Purger::new(fixture.config());
    purger.plan().await.expect("plan");
    let plan = purger.current_plan().await.expect("plan ready");
    assert_eq!(plan.files.len(), 1);
    assert_eq!(plan.files[0].path.file_name().unwrap(), "large");
    assert_eq!(plan.files[0].reason, FileReason::Modification);
}

#[tokio::test]
async fn access_reason_wins_when_several_axes_are_stale() {
    let fixture = Fixture::new();
    fixture.write_policy(&format!(
        r#"directories:
  - path: "{scratch}"
    threshold: 10
    intervals:
      large:
        access_interval: "1h"
        modification_interval: "1h"
  - path: "{foobar}"
    threshold: 30
"#,
        scratch = fixture.scratch.display(),
        foobar = fixture.foobar.display(),
    ));
    let victim = fixture.scratch.join("large");
    set_age(&victim, AgeAxis::Access, 8 * HOUR);
    set_age(&victim, AgeAxis::Modification, 8 * HOUR);
    let purger = Purger::new(fixture.config());
    purger.plan().await.expect("plan");
    let plan = purger.current_plan().await.expect("plan ready");
    assert_eq!(plan.files.len(), 1);
    assert_eq!(plan.files[0].reason, FileReason::Access);
}

#[tokio::test]
async fn threshold_splits_classes() {
    let fixture = Fixture::new();
    // Below the 4h small interval but past the 1h large interval, so only
    // the large file qualifies.
    set_age(&fixture.scratch.join("small"), AgeAxis::Access, 3 * HOUR);
    set_age(&fixture.scratch.join("large"), AgeAxis::Access, 3 * HOUR);
    let purger = Purger::new(fixture.config());
    purger.plan().await.expect("plan");
    let plan = purger.current_plan().await.expect("plan ready");
    assert_eq!(plan.files.len(), 1);
    assert_eq!(plan.files[0].path.file_name().unwrap(), "large");
}

#[tokio::test]
async fn absent_interval_set_never_selects() {
    let fixture = Fixture::new();
    fixture.write_policy(&format!(
        r#"directories:
  - path: "{scratch}"
    threshold: 10
    intervals:
      large:
        access_interval: "1h"
  - path: "{foobar}"
    threshold: 30
"#,
        scratch = fixture.scratch.display(),
        foobar = fixture.foobar.display(),
    ));
    // No small intervals at all: even an absurdly old small file stays.
    let small = fixture.scratch.join("small");
    set_age(&small, AgeAxis::Access, Duration::from_secs(1000 * 7 * 24 * 3600));
    set_age(&small, AgeAxis::Modification, Duration::from_secs(1000 * 7 * 24 * 3600));
    let purger = Purger::new(fixture.config());
    purger.plan().await.expect("plan");
    let plan = purger.current_plan().await.expect("plan ready");
    assert!(plan.files.is_empty());
}

#[tokio::test]
async fn nested_root_uses_its_own_policy() {
    let fixture = Fixture::new();
    // 8h is past foobar's 4h large interval; under scratch's policy the
    // file would also qualify, but foobar must claim it.
    set_age(&fixture.foobar.join("large"), AgeAxis::Access, 8 * HOUR);
    let purger = Purger::new(fixture.config());
    purger.plan().await.expect("plan");
    let plan = purger.current_plan().await.expect("plan ready");
    assert_eq!(plan.files.len(), 1);
    let victim = &plan.files[0].path;
    assert_eq!(victim.parent().unwrap().file_name().unwrap(), "foobar");
    assert_eq!(victim.file_name().unwrap(), "large");
    // foobar's large interval, not scratch's.
    assert_eq!(plan.files[0].threshold_age, Duration::from_secs(4 * 3600));
}

#[tokio::test]
async fn files_are_never_counted_twice_across_nested_roots() {
    let fixture = Fixture::new();
    // Old enough to qualify under both roots' rules.
    for name in ["small", "medium", "large"] {
        set_age(&fixture.scratch.join(name), AgeAxis::Access, 100 * HOUR);
        set_age(&fixture.foobar.join(name), AgeAxis::Access, 100 * HOUR);
    }
    let purger = Purger::new(fixture.config());
    purger.plan().await.expect("plan");
    let plan = purger.current_plan().await.expect("plan ready");
    // scratch: all three qualify. foobar: only `large` has a configured
    // interval. Nothing appears twice.
    assert_eq!(plan.files.len(), 4);
    let mut paths: Vec<_> = plan.files.iter().map(|f| f.path.clone()).collect();
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), 4);
}

#[tokio::test]
async fn replanning_is_idempotent() {
    let fixture = Fixture::new();
    set_age(&fixture.scratch.join("large"), AgeAxis::Access, 8 * HOUR);
    let purger = Purger::new(fixture.config());
    purger.plan().await.expect("first plan");
    let first = purger.current_plan().await.expect("plan ready");
    purger.plan().await.expect("second plan");
    let second = purger.current_plan().await.expect("plan ready");
    // Observed ages differ by the wall-clock delta between runs; everything
    // else must match exactly.
    assert_eq!(first.directories, second.directories);
    assert_eq!(first.files.len(), second.files.len());
    for (a, b) in first.files.iter().zip(&second.files) {
        assert_eq!(a.path, b.path);
        assert_eq!(a.class, b.class);
        assert_eq!(a.reason, b.reason);
        assert_eq!(a.threshold_age, b.threshold_age);
    }
}

#[tokio::test]
async fn policy_edits_take_effect_on_next_plan() {
    let fixture = Fixture::new();
    set_age(&fixture.scratch.join("large"), AgeAxis::Access, 8 * HOUR);
    let purger = Purger::new(fixture.config());
    purger.plan().await.expect("plan");
    assert_eq!(purger.current_plan().await.expect("ready").files.len(), 1);

    // Drop all intervals; the same purger must pick up the change.
    fixture.write_policy(&format!(
        "directories:\n  - path: \"{}\"\n    threshold: 10\n",
        fixture.scratch.display()
    ));
    purger.plan().await.expect("replan");
    assert!(purger.current_plan().await.expect("ready").files.is_empty());
}

#[tokio::test]
async fn broken_policy_fails_plan_and_keeps_prior_state() {
    let fixture = Fixture::new();
    set_age(&fixture.scratch.join("large"), AgeAxis::Access, 8 * HOUR);
    let purger = Purger::new(fixture.config());
    purger.plan().await.expect("plan");
    assert!(purger.current_plan().await.is_some());

    fixture.write_policy("directories: [this is not a policy");
    assert!(purger.plan().await.is_err());
    // No partial plan: the engine keeps the plan from the successful run.
    let plan = purger.current_plan().await.expect("prior plan intact");
    assert_eq!(plan.files.len(), 1);
}

#[tokio::test]
async fn future_offset_warns_ahead() {
    let fixture = Fixture::new();
    let mut config = fixture.config();
    config.future_offset = Some(Duration::from_secs(3650 * 24 * 3600));
    let purger = Purger::new(config);
    purger.plan().await.expect("plan");
    let plan = purger.current_plan().await.expect("plan ready");
    // Ten years out, every file with a configured interval qualifies:
    // all of scratch's three, plus foobar's large. foobar's small files
    // have no intervals and stay off the plan regardless of horizon.
    assert_eq!(plan.files.len(), 4);
}
