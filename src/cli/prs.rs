//! List and update commands

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check, link};
use anstream::println;
use gh_steward::error::Result;
use gh_steward::types::PullRequestUpdate;

/// Run the list command
pub async fn run_list(ctx: &CommandContext) -> Result<()> {
    let prs = ctx.platform.list_open_pull_requests().await?;

    if prs.is_empty() {
        println!("{}", "No open pull requests.".muted());
        return Ok(());
    }

    println!("{}:", "Open pull requests".emphasis());
    for pr in &prs {
        println!(
            "  {} {} {}",
            link(&format!("#{}", pr.number), &pr.html_url).accent(),
            pr.title,
            format!("by {}", pr.author).muted()
        );
    }

    Ok(())
}

/// Run the update command
pub async fn run_update(
    ctx: &CommandContext,
    number: u64,
    update: PullRequestUpdate,
) -> Result<()> {
    if update.is_empty() {
        println!(
            "{}",
            "No updates specified. Pull request remains unchanged.".muted()
        );
        return Ok(());
    }

    let updated = ctx.platform.update_pull_request(number, &update).await?;

    println!("{} Updated PR #{}", check(), updated.number.accent());
    println!("  Title: {}", updated.title);
    println!("  State: {}", updated.state);

    Ok(())
}
