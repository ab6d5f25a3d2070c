//! Command-line interface.

pub mod commands;

use std::path::PathBuf;

use clap::{ArgAction, Parser};

pub use commands::Commands;

#[derive(Parser, Debug)]
#[command(
    name = "scratchsweep",
    version,
    about = "Policy-driven scratch filesystem purger"
)]
pub struct Cli {
    /// Application configuration file
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Purge policy file (overrides the config file's setting)
    #[arg(short = 'p', long, global = true, value_name = "FILE")]
    pub policy: Option<PathBuf>,

    /// Do not act, but report what would be done
    #[arg(short = 'x', long, global = true)]
    pub dry_run: bool,

    /// Increase log verbosity (repeat for more)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}
