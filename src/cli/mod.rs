//! Command-line interface

pub mod analytics;
pub mod context;
pub mod labels;
pub mod menu;
pub mod merge;
pub mod prs;
pub mod resolve;
pub mod review;
pub mod seed;
pub mod style;

use crate::cli::style::Stylize;
use anstream::println;
use async_trait::async_trait;
use gh_steward::resolve::ProgressCallback;

/// Progress sink that prints compact, muted status lines.
pub struct CliProgress;

impl CliProgress {
    /// One-line-per-step progress output.
    #[must_use]
    pub const fn compact() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_message(&self, message: &str) {
        println!("  {}", message.muted());
    }
}
