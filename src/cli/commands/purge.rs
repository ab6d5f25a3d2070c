//! scratchsweep purge - plan and purge stale files.

use clap::Args;

use crate::app::AppContext;
use crate::error::Result;
use crate::purger::Purger;

#[derive(Args, Debug)]
pub struct PurgeArgs {}

pub async fn run(ctx: &AppContext, _args: &PurgeArgs) -> Result<()> {
    let purger = Purger::new(ctx.config.clone());
    purger.plan().await?;
    purger.purge().await
}
