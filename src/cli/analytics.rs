//! Analytics command - windowed pull-request statistics

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, spinner_style};
use anstream::println;
use gh_steward::analytics::compute_analytics;
use gh_steward::error::Result;
use indicatif::ProgressBar;
use std::time::Duration;

/// Run the analytics command
pub async fn run_analytics(ctx: &CommandContext, days: i64) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!("Fetching pull requests from the last {days} day(s)..."));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let stats = compute_analytics(ctx.platform.as_ref(), days).await;
    spinner.finish_and_clear();

    let Some(stats) = stats? else {
        println!("No PRs updated in the last {days} day(s).");
        return Ok(());
    };

    println!(
        "{}",
        format!("Pull request analytics for the last {days} day(s):").emphasis()
    );
    println!("  Total PRs:  {}", stats.total.accent());
    println!("  Merged PRs: {}", stats.merged.accent());
    println!("  Open PRs:   {}", stats.open.accent());
    println!("  Average time to merge: {:.2} hours", stats.avg_hours_to_merge);
    println!("  Average comments per PR: {:.2}", stats.avg_comments_per_pr);

    println!();
    println!("{}:", "Top contributors".emphasis());
    for (author, count) in &stats.top_contributors {
        println!("  {} {}", author.accent(), format!("{count} PR(s)").muted());
    }

    Ok(())
}
