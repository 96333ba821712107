//! Pure content strategies and outcome types for the workflow
//!
//! No I/O happens here - all data is passed in, making it easy to unit
//! test. The effectful driver lives in `execute`.

use crate::types::{Branch, PullRequest};

/// Commit message for files copied through from the base branch.
pub const ADD_COMMIT_MESSAGE: &str = "Add new file";

/// Commit message for files carrying both versions.
pub const RESOLVE_COMMIT_MESSAGE: &str = "Resolve conflicts";

/// Commit message for removed files kept for human review.
pub const KEEP_REMOVED_COMMIT_MESSAGE: &str = "Keep removed file for review";

/// Title of the pull request the publisher opens.
pub const PR_TITLE: &str = "Resolve conflicts and handle changes";

/// Body of the pull request the publisher opens.
pub const PR_BODY: &str = "Automated conflict resolution and change handling";

/// Notice prepended to files that were removed in the base branch.
const REMOVAL_NOTICE: &str = "# This file was deleted in the base branch. Please review.\n\n";

/// Combine both versions of a modified file, demarcated by BASE and HEAD
/// markers.
///
/// This is deliberately not a merge: both versions are embedded verbatim
/// for a human to untangle.
#[must_use]
pub fn merged_content(base: &str, head: &str) -> String {
    format!("<<<<<<< BASE\n{base}\n=======\n{head}\n>>>>>>> HEAD\n")
}

/// Annotate a removed file's content with a deletion notice instead of
/// deleting it.
#[must_use]
pub fn removal_notice(content: &str) -> String {
    format!("{REMOVAL_NOTICE}{content}")
}

/// A file the workflow could not reconcile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// Repository path of the file
    pub path: String,
    /// Why it was skipped
    pub reason: String,
}

/// What a workflow run did
#[derive(Debug, Clone)]
pub struct ResolutionOutcome {
    /// The provisioned working branch
    pub branch: Branch,
    /// Files written to the working branch, in processing order
    pub updated: Vec<String>,
    /// Files skipped with their reasons, in processing order
    pub skipped: Vec<SkippedFile>,
    /// The pull request, when publishing succeeded
    pub pull_request: Option<PullRequest>,
    /// Publisher failure, when it did not
    pub publish_error: Option<String>,
}

impl ResolutionOutcome {
    /// True when the comparison yielded nothing to reconcile.
    #[must_use]
    pub fn no_changes(&self) -> bool {
        self.updated.is_empty()
            && self.skipped.is_empty()
            && self.pull_request.is_none()
            && self.publish_error.is_none()
    }

    /// Number of change records the run looked at.
    #[must_use]
    pub fn files_processed(&self) -> usize {
        self.updated.len() + self.skipped.len()
    }
}
