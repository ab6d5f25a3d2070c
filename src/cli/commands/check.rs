//! scratchsweep check - validate configuration and policy.

use clap::Args;

use crate::app::AppContext;
use crate::error::Result;
use crate::policy::Policy;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Print each directory rule
    #[arg(long)]
    pub full: bool,
}

pub fn run(ctx: &AppContext, args: &CheckArgs) -> Result<()> {
    // AppContext::from_cli already validated the policy once; load again so
    // we can summarize it.
    let policy = Policy::load(&ctx.config.policy_file)?;
    println!("config: {}", ctx.config_path.display());
    println!(
        "policy: {} ({} directories)",
        ctx.config.policy_file.display(),
        policy.directories.len()
    );
    if args.full {
        for root in policy.visitation_order() {
            let rule = policy.policy_for(&root)?;
            println!("  {} threshold={}B", rule.path.display(), rule.threshold);
        }
    }
    Ok(())
}
