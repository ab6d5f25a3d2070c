//! Shared test fixture: a temporary scratch tree with a nested policy
//! directory, plus helpers for aging files and rewriting the policy.
#![allow(dead_code)]

use std::fs::{self, FileTimes, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use scratchsweep::config::Config;
use tempfile::TempDir;

pub enum AgeAxis {
    Access,
    Modification,
}

/// Rewind a file's access or modification time by `age`.
pub fn set_age(path: &Path, axis: AgeAxis, age: Duration) {
    let then = SystemTime::now() - age;
    let times = match axis {
        AgeAxis::Access => FileTimes::new().set_accessed(then),
        AgeAxis::Modification => FileTimes::new().set_modified(then),
    };
    let file = OpenOptions::new()
        .append(true)
        .open(path)
        .expect("open file to set times");
    file.set_times(times).expect("set file times");
}

pub const HOUR: Duration = Duration::from_secs(3600);

/// Temp tree:
///
/// ```text
/// <root>/scratch/{small,medium,large}
/// <root>/scratch/foobar/{small,medium,large}
/// <root>/policy.yaml
/// <root>/config.yaml
/// ```
///
/// With the default policy, `medium` (13 bytes) is large for `scratch`
/// (threshold 10) but small for `foobar` (threshold 30).
pub struct Fixture {
    pub root: TempDir,
    pub scratch: PathBuf,
    pub foobar: PathBuf,
    pub policy_file: PathBuf,
    pub config_file: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create tempdir");
        let scratch = root.path().join("scratch");
        let foobar = scratch.join("foobar");
        fs::create_dir_all(&foobar).expect("create tree");
        for dir in [&scratch, &foobar] {
            fs::write(dir.join("small"), "hi").expect("write small");
            fs::write(dir.join("medium"), "Hello, world!").expect("write medium");
            fs::write(dir.join("large"), "The quick brown fox jumped over the lazy dog.")
                .expect("write large");
        }

        let policy_file = root.path().join("policy.yaml");
        fs::write(&policy_file, default_policy(&scratch, &foobar)).expect("write policy");

        let config_file = root.path().join("config.yaml");
        fs::write(
            &config_file,
            format!("policy_file: \"{}\"\n", policy_file.display()),
        )
        .expect("write config");

        Self {
            root,
            scratch,
            foobar,
            policy_file,
            config_file,
        }
    }

    /// Library-level config pointing at the fixture's policy file.
    pub fn config(&self) -> Config {
        Config {
            policy_file: self.policy_file.clone(),
            ..Config::default()
        }
    }

    pub fn write_policy(&self, yaml: &str) {
        fs::write(&self.policy_file, yaml).expect("rewrite policy");
    }
}

pub fn default_policy(scratch: &Path, foobar: &Path) -> String {
    format!(
        r#"directories:
  - path: "{scratch}"
    threshold: 10
    intervals:
      large:
        access_interval: "1h"
      small:
        access_interval: "4h"
  - path: "{foobar}"
    threshold: 30
    intervals:
      large:
        access_interval: "4h"
"#,
        scratch = scratch.display(),
        foobar = foobar.display(),
    )
}
