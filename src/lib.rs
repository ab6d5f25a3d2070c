//! scratchsweep - policy-driven scratch filesystem purger.
//!
//! Given a set of directory trees and per-tree rules about file size and
//! age, scratchsweep decides which files are stale enough to delete,
//! optionally reports that decision, and optionally carries it out,
//! including removing directories left empty by the deletion.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod notify;
pub mod policy;
pub mod purger;

pub use error::{Result, SweepError};
