//! scratchsweep execute - plan, report, and purge under one lock.
//!
//! This is the do-it-all entrypoint for scheduled runs.

use clap::Args;

use crate::app::AppContext;
use crate::error::Result;
use crate::purger::Purger;

#[derive(Args, Debug)]
pub struct ExecuteArgs {}

pub async fn run(ctx: &AppContext, _args: &ExecuteArgs) -> Result<()> {
    let purger = Purger::new(ctx.config.clone());
    purger.execute().await
}
