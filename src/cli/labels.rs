//! Labels command - list, add, or remove PR labels

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check};
use anstream::println;
use gh_steward::error::Result;

/// What to do with a PR's labels
#[derive(Debug, Clone)]
pub enum LabelAction {
    /// Print the current label set
    List,
    /// Add these labels
    Add(Vec<String>),
    /// Remove these labels, one at a time
    Remove(Vec<String>),
}

/// Run the labels command
pub async fn run_labels(ctx: &CommandContext, number: u64, action: LabelAction) -> Result<()> {
    match action {
        LabelAction::List => {
            let labels = ctx.platform.list_labels(number).await?;
            if labels.is_empty() {
                println!("{}", format!("No labels on PR #{number}.").muted());
                return Ok(());
            }
            println!(
                "{}:",
                format!("Current labels for PR #{number}").emphasis()
            );
            for label in &labels {
                println!("  - {label}");
            }
        }
        LabelAction::Add(labels) => {
            let result = ctx.platform.add_labels(number, &labels).await?;
            println!(
                "{} Added label(s) to PR #{}; now: {}",
                check(),
                number.accent(),
                result.join(", ")
            );
        }
        LabelAction::Remove(labels) => {
            for label in &labels {
                match ctx.platform.remove_label(number, label).await {
                    Ok(()) => println!(
                        "{} Removed label '{}' from PR #{}",
                        check(),
                        label.accent(),
                        number
                    ),
                    Err(e) => println!(
                        "{} {}",
                        format!("Failed to remove label '{label}':").warn(),
                        e.to_string().muted()
                    ),
                }
            }
        }
    }

    Ok(())
}
