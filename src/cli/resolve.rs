//! Resolve command - run the branch-and-merge workflow

use crate::cli::CliProgress;
use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check, link};
use anstream::println;
use gh_steward::error::Result;
use gh_steward::resolve::run_resolution;

/// Run the resolve command
pub async fn run_resolve(ctx: &CommandContext, base: &str, prefix: &str) -> Result<()> {
    println!(
        "{} {} {}",
        "Resolving changes in".emphasis(),
        ctx.config.slug().accent(),
        format!("(base: {base})").muted()
    );

    let progress = CliProgress::compact();
    let outcome = run_resolution(ctx.platform.as_ref(), base, prefix, &progress).await?;

    if outcome.no_changes() {
        println!(
            "{} No changes found between {} and {}.",
            check(),
            base.accent(),
            outcome.branch.name.accent()
        );
        return Ok(());
    }

    println!();
    println!(
        "{} {} file(s) reconciled, {} skipped",
        check(),
        outcome.updated.len().accent(),
        outcome.skipped.len().accent()
    );
    for skipped in &outcome.skipped {
        println!(
            "  {} {}",
            format!("skipped {}:", skipped.path).warn(),
            skipped.reason.muted()
        );
    }

    if let Some(ref pr) = outcome.pull_request {
        println!(
            "{} Pull request created: {}",
            check(),
            link(&format!("#{}", pr.number), &pr.html_url).accent()
        );
    }
    if let Some(ref error) = outcome.publish_error {
        println!(
            "{} {}",
            "Failed to create pull request:".warn(),
            error.muted()
        );
    }

    Ok(())
}
