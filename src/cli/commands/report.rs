//! scratchsweep report - plan and report what would be purged.

use clap::Args;

use crate::app::AppContext;
use crate::error::Result;
use crate::purger::Purger;

#[derive(Args, Debug)]
pub struct ReportArgs {}

pub async fn run(ctx: &AppContext, _args: &ReportArgs) -> Result<()> {
    let purger = Purger::new(ctx.config.clone());
    purger.plan().await?;
    purger.report().await
}
