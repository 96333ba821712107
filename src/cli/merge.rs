//! Status and merge commands

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check};
use anstream::println;
use gh_steward::error::Result;
use gh_steward::merge::{MergeDecision, check_status, merge_if_ready};
use gh_steward::types::MergeMethod;

/// Run the status command
pub async fn run_status(ctx: &CommandContext, number: u64) -> Result<()> {
    let summary = check_status(ctx.platform.as_ref(), number).await?;

    println!(
        "{} {}:",
        "Check status for PR".emphasis(),
        format!("#{number}").accent()
    );
    println!("  Total:   {}", summary.total);
    println!("  Success: {}", summary.success.success());
    println!("  Failure: {}", summary.failure.warn());
    println!("  Neutral: {}", summary.neutral);
    println!("  Pending: {}", summary.pending);

    Ok(())
}

/// Run the merge command
pub async fn run_merge(ctx: &CommandContext, number: u64, method: MergeMethod) -> Result<()> {
    match merge_if_ready(ctx.platform.as_ref(), number, method).await? {
        MergeDecision::Merged(outcome) if outcome.merged => {
            let sha = outcome.sha.as_deref().unwrap_or("(no sha)");
            println!(
                "{} Merged PR {} {}",
                check(),
                format!("#{number}").accent(),
                format!("({sha})").muted()
            );
        }
        MergeDecision::Merged(outcome) => {
            println!(
                "{} {}",
                format!("Merge of PR #{number} did not complete:").warn(),
                outcome.message.as_deref().unwrap_or("no message").muted()
            );
        }
        MergeDecision::Blocked(readiness) => {
            println!("{}", format!("Cannot merge PR #{number}:").warn());
            for reason in &readiness.blocking_reasons {
                println!("  - {reason}");
            }
        }
    }

    Ok(())
}
