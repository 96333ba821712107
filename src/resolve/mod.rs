//! Branch-and-merge workflow
//!
//! Provisions a working branch from a base branch, classifies the changed
//! files between the two, materializes each file with a per-status
//! strategy, and opens a pull request. The content strategies in
//! [`plan`] are pure; all remote interaction lives in [`execute`].

mod branch;
mod classify;
mod execute;
pub mod plan;

pub use branch::{DEFAULT_BRANCH_PREFIX, provision_branch};
pub use classify::classify_changes;
pub use execute::{run_resolution, update_file};
pub use plan::{ResolutionOutcome, SkippedFile};

use async_trait::async_trait;

/// Receives human-readable progress messages during a workflow run.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called once per notable step.
    async fn on_message(&self, message: &str);
}

/// Progress sink that discards all messages.
pub struct SilentProgress;

#[async_trait]
impl ProgressCallback for SilentProgress {
    async fn on_message(&self, _message: &str) {}
}
