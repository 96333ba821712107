//! Seed and update-files commands

use crate::cli::CliProgress;
use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check};
use anstream::println;
use gh_steward::error::Result;
use gh_steward::seed::{MultiUpdateOutcome, SeedOutcome, ensure_seed_file, update_files};

/// Run the seed command
pub async fn run_seed(
    ctx: &CommandContext,
    path: &str,
    base: &str,
    initial_content: &str,
    updated_content: &str,
) -> Result<()> {
    println!(
        "{} {} {}",
        "Seeding".emphasis(),
        path.accent(),
        format!("in {}", ctx.config.slug()).muted()
    );

    let progress = CliProgress::compact();
    let outcome = ensure_seed_file(
        ctx.platform.as_ref(),
        path,
        base,
        initial_content,
        updated_content,
        &progress,
    )
    .await?;

    match outcome {
        SeedOutcome::RepoCreated { path } => println!(
            "{} Created repository {} and file {}",
            check(),
            ctx.config.slug().accent(),
            path.accent()
        ),
        SeedOutcome::FileCreated { path } => {
            println!("{} Created file {}", check(), path.accent());
        }
        SeedOutcome::FileUpdated { path, branch } => println!(
            "{} Updated {} on branch {}",
            check(),
            path.accent(),
            branch.accent()
        ),
    }

    Ok(())
}

/// Run the update-files command
pub async fn run_update_files(
    ctx: &CommandContext,
    base: &str,
    paths: &[String],
    content: &str,
) -> Result<()> {
    let progress = CliProgress::compact();
    let outcome: MultiUpdateOutcome =
        update_files(ctx.platform.as_ref(), base, paths, content, &progress).await?;

    println!(
        "{} Updated {} out of {} file(s) on branch {}",
        check(),
        outcome.updated.len().accent(),
        paths.len(),
        outcome.branch.accent()
    );
    for skipped in &outcome.skipped {
        println!(
            "  {} {}",
            format!("skipped {}:", skipped.path).warn(),
            skipped.reason.muted()
        );
    }

    Ok(())
}
