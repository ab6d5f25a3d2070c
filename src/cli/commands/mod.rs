//! CLI command implementations.
//!
//! Each subcommand has its own module with an Args struct and a run()
//! function.

use clap::Subcommand;

pub mod check;
pub mod execute;
pub mod purge;
pub mod report;

use crate::app::AppContext;
use crate::error::Result;

pub async fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Report(args) => report::run(ctx, args).await,
        Commands::Purge(args) => purge::run(ctx, args).await,
        Commands::Execute(args) => execute::run(ctx, args).await,
        Commands::Check(args) => check::run(ctx, args),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report what files would be purged
    Report(report::ReportArgs),

    /// Purge files and after-purge-empty directories
    Purge(purge::PurgeArgs),

    /// Plan, report, and purge in one locked sequence
    Execute(execute::ExecuteArgs),

    /// Validate the configuration and policy files
    Check(check::CheckArgs),
}
