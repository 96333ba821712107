//! Interactive menu
//!
//! A numbered menu over the same operations the subcommands expose. Remote
//! failures are reported and the menu keeps running; only terminal I/O
//! errors abort it.

use crate::cli::context::CommandContext;
use crate::cli::labels::LabelAction;
use crate::cli::style::Stylize;
use crate::cli::{analytics, labels, merge, prs, review};
use anstream::println;
use dialoguer::{Input, Select};
use gh_steward::error::{Error, Result};
use gh_steward::types::{MergeMethod, PrStateUpdate, PullRequestUpdate};

const MENU_ITEMS: &[&str] = &[
    "List open pull requests",
    "Perform automatic PR review",
    "Check PR status",
    "Merge a pull request",
    "Update a pull request",
    "View PR analytics",
    "Manage PR labels",
    "Exit",
];

/// Run the interactive menu until the user exits.
pub async fn run_menu(ctx: &CommandContext) -> Result<()> {
    println!("{}", "GitHub Pull Request Manager".emphasis());
    println!("{}", format!("Repository: {}", ctx.config.slug()).muted());

    loop {
        println!();
        let choice = Select::new()
            .with_prompt("What would you like to do?")
            .items(MENU_ITEMS)
            .default(0)
            .interact()
            .map_err(|e| Error::Internal(format!("failed to read menu choice: {e}")))?;

        let result = match choice {
            0 => prs::run_list(ctx).await,
            1 => {
                let number = prompt_pr_number()?;
                review::run_review(ctx, number).await
            }
            2 => {
                let number = prompt_pr_number()?;
                merge::run_status(ctx, number).await
            }
            3 => {
                let number = prompt_pr_number()?;
                merge::run_merge(ctx, number, MergeMethod::Merge).await
            }
            4 => {
                let number = prompt_pr_number()?;
                match prompt_update()? {
                    Some(update) => prs::run_update(ctx, number, update).await,
                    None => Ok(()),
                }
            }
            5 => {
                let days: i64 = Input::new()
                    .with_prompt("Days of history")
                    .default(30)
                    .interact_text()
                    .map_err(|e| Error::Internal(format!("failed to read input: {e}")))?;
                analytics::run_analytics(ctx, days).await
            }
            6 => {
                let number = prompt_pr_number()?;
                match prompt_label_action()? {
                    Some(action) => labels::run_labels(ctx, number, action).await,
                    None => Ok(()),
                }
            }
            _ => {
                println!("{}", "Goodbye!".muted());
                return Ok(());
            }
        };

        // Keep the menu alive across remote failures.
        if let Err(e) = result {
            println!("{}", format!("Error: {e}").warn());
        }
    }
}

fn prompt_pr_number() -> Result<u64> {
    Input::new()
        .with_prompt("PR number")
        .interact_text()
        .map_err(|e| Error::Internal(format!("failed to read input: {e}")))
}

fn prompt_optional(label: &str) -> Result<Option<String>> {
    let value: String = Input::new()
        .with_prompt(format!("{label} (leave empty to skip)"))
        .allow_empty(true)
        .interact_text()
        .map_err(|e| Error::Internal(format!("failed to read input: {e}")))?;

    Ok(Some(value.trim().to_string()).filter(|v| !v.is_empty()))
}

/// Prompt for the update fields; `None` means the input was invalid and the
/// operation should be dropped.
fn prompt_update() -> Result<Option<PullRequestUpdate>> {
    let title = prompt_optional("New title")?;
    let body = prompt_optional("New body")?;
    let state = match prompt_optional("New state (open/closed)")? {
        None => None,
        Some(raw) => match raw.parse::<PrStateUpdate>() {
            Ok(state) => Some(state),
            Err(e) => {
                println!("{}", e.warn());
                return Ok(None);
            }
        },
    };

    Ok(Some(PullRequestUpdate { title, body, state }))
}

fn prompt_label_action() -> Result<Option<LabelAction>> {
    let actions = &["list", "add", "remove"];
    let choice = Select::new()
        .with_prompt("What would you like to do with labels?")
        .items(actions)
        .default(0)
        .interact()
        .map_err(|e| Error::Internal(format!("failed to read input: {e}")))?;

    if choice == 0 {
        return Ok(Some(LabelAction::List));
    }

    let raw: String = Input::new()
        .with_prompt("Label(s), comma separated")
        .interact_text()
        .map_err(|e| Error::Internal(format!("failed to read input: {e}")))?;
    let labels: Vec<String> = raw
        .split(',')
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();

    if labels.is_empty() {
        println!("{}", "No labels specified.".warn());
        return Ok(None);
    }

    Ok(Some(if choice == 1 {
        LabelAction::Add(labels)
    } else {
        LabelAction::Remove(labels)
    }))
}
