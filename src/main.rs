//! steward - GitHub repository chores from the command line

mod cli;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use cli::context::CommandContext;
use cli::labels::LabelAction;
use gh_steward::config::Config;
use gh_steward::resolve::DEFAULT_BRANCH_PREFIX;
use gh_steward::seed::{DEFAULT_INITIAL_CONTENT, DEFAULT_MULTI_CONTENT, DEFAULT_UPDATED_CONTENT};
use gh_steward::types::{MergeMethod, PrStateUpdate, PullRequestUpdate};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "steward",
    version,
    about = "GitHub repository chores: conflict-resolution branches, PR review, merge gating, and analytics"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Provision a working branch, reconcile changed files, and open a PR
    Resolve {
        /// Base branch to branch from and compare against
        #[arg(long, default_value = "main")]
        base: String,
        /// Prefix for the working branch name
        #[arg(long, default_value = DEFAULT_BRANCH_PREFIX)]
        prefix: String,
    },
    /// List open pull requests
    List,
    /// Run the heuristic review on a pull request
    Review {
        /// Pull request number
        number: u64,
    },
    /// Summarize check-run status for a pull request
    Status {
        /// Pull request number
        number: u64,
    },
    /// Merge a pull request once checks and approvals allow it
    Merge {
        /// Pull request number
        number: u64,
        /// Merge method: merge, squash, or rebase
        #[arg(long, default_value = "merge")]
        method: String,
    },
    /// Update title, body, or state of a pull request
    Update {
        /// Pull request number
        number: u64,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New body
        #[arg(long)]
        body: Option<String>,
        /// New state: open or closed
        #[arg(long)]
        state: Option<String>,
    },
    /// Show pull-request analytics over a time window
    Analytics {
        /// Window size in days
        #[arg(long, default_value_t = 30)]
        days: i64,
    },
    /// List, add, or remove labels on a pull request
    Labels {
        /// Pull request number
        number: u64,
        /// Labels to add, comma separated
        #[arg(long, value_delimiter = ',')]
        add: Vec<String>,
        /// Labels to remove, comma separated
        #[arg(long, value_delimiter = ',')]
        remove: Vec<String>,
    },
    /// Ensure the repository and a seed file exist
    Seed {
        /// File path (falls back to GITHUB_FILE_PATH)
        #[arg(long)]
        path: Option<String>,
        /// Base branch for the update flow
        #[arg(long, default_value = "main")]
        base: String,
    },
    /// Write the same content to several files on a fresh branch
    UpdateFiles {
        /// Base branch to branch from
        #[arg(long, default_value = "main")]
        base: String,
        /// Content to write to every file
        #[arg(long)]
        content: Option<String>,
        /// File paths to update
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Open the interactive menu
    Menu,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Minimal logging for the CLI; RUST_LOG turns on more.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .without_time()
        .init();

    let args = Cli::parse();

    let config = Config::from_env().context("loading configuration")?;
    let ctx = CommandContext::new(config)?;

    match args.command.unwrap_or(Command::Menu) {
        Command::Resolve { base, prefix } => {
            cli::resolve::run_resolve(&ctx, &base, &prefix).await?;
        }
        Command::List => cli::prs::run_list(&ctx).await?,
        Command::Review { number } => cli::review::run_review(&ctx, number).await?,
        Command::Status { number } => cli::merge::run_status(&ctx, number).await?,
        Command::Merge { number, method } => {
            let method: MergeMethod = method.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            cli::merge::run_merge(&ctx, number, method).await?;
        }
        Command::Update {
            number,
            title,
            body,
            state,
        } => {
            let state = state
                .map(|s| s.parse::<PrStateUpdate>())
                .transpose()
                .map_err(|e| anyhow::anyhow!(e))?;
            let update = PullRequestUpdate { title, body, state };
            cli::prs::run_update(&ctx, number, update).await?;
        }
        Command::Analytics { days } => cli::analytics::run_analytics(&ctx, days).await?,
        Command::Labels {
            number,
            add,
            remove,
        } => {
            let action = match (add.is_empty(), remove.is_empty()) {
                (true, true) => LabelAction::List,
                (false, true) => LabelAction::Add(add),
                (true, false) => LabelAction::Remove(remove),
                (false, false) => {
                    anyhow::bail!("pass either --add or --remove, not both");
                }
            };
            cli::labels::run_labels(&ctx, number, action).await?;
        }
        Command::Seed { path, base } => {
            let path = path
                .or_else(|| ctx.config.default_file_path.clone())
                .context("no file path: pass --path or set GITHUB_FILE_PATH")?;
            cli::seed::run_seed(
                &ctx,
                &path,
                &base,
                DEFAULT_INITIAL_CONTENT,
                DEFAULT_UPDATED_CONTENT,
            )
            .await?;
        }
        Command::UpdateFiles {
            base,
            content,
            paths,
        } => {
            let content = content.unwrap_or_else(|| DEFAULT_MULTI_CONTENT.to_string());
            cli::seed::run_update_files(&ctx, &base, &paths, &content).await?;
        }
        Command::Menu => cli::menu::run_menu(&ctx).await?,
    }

    Ok(())
}
