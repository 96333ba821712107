//! Review command - heuristic review of a pull request

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check};
use anstream::println;
use gh_steward::error::Result;
use gh_steward::review::review_pull_request;

/// Run the review command
pub async fn run_review(ctx: &CommandContext, number: u64) -> Result<()> {
    println!(
        "{} {}",
        "Reviewing PR".emphasis(),
        format!("#{number}").accent()
    );

    let report = review_pull_request(ctx.platform.as_ref(), number).await?;

    if report.findings.is_empty() {
        println!("{} Review complete. No issues found.", check());
        return Ok(());
    }

    for finding in &report.findings {
        println!("  {} {}", "-".warn(), finding);
    }
    if report.commented {
        println!(
            "{} Review complete. Issues were commented on the PR.",
            check()
        );
    }

    Ok(())
}
