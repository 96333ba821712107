//! Core types for gh-steward

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A branch ref in the remote repository
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Branch {
    /// Branch name (without the `refs/heads/` prefix)
    pub name: String,
    /// Commit sha the branch head points at
    pub head_sha: String,
}

/// How a file changed between two refs
///
/// Wire values outside the closed set are preserved in `Unknown` so the
/// reconciler can surface them as explicit per-file failures instead of
/// silently doing nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeStatus {
    /// File exists in head but not base
    Added,
    /// File exists in both with differing content
    Modified,
    /// File exists in base but not head
    Removed,
    /// Any other wire value (renamed, copied, ...)
    Unknown(String),
}

impl ChangeStatus {
    /// Parse a wire status string from a comparison payload.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "added" => Self::Added,
            "modified" => Self::Modified,
            "removed" => Self::Removed,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl std::fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added => write!(f, "added"),
            Self::Modified => write!(f, "modified"),
            Self::Removed => write!(f, "removed"),
            Self::Unknown(raw) => write!(f, "unknown ({raw})"),
        }
    }
}

/// One file's change between two refs, as reported by a comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    /// Repository path of the file
    pub path: String,
    /// Change status
    pub status: ChangeStatus,
}

/// File content fetched from or written to the remote store
///
/// The `sha` is the optimistic-concurrency version tag. It changes on every
/// write, so it must be re-fetched immediately before a write rather than
/// cached across operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    /// Repository path of the file
    pub path: String,
    /// Raw file bytes
    pub content: Vec<u8>,
    /// Current version tag, when known
    pub sha: Option<String>,
}

/// State of a pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrState {
    /// Open for review
    Open,
    /// Closed (merged or not)
    Closed,
}

impl std::fmt::Display for PrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// A newly created pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Web URL
    pub html_url: String,
    /// Head branch name
    pub head_ref: String,
    /// Base branch name
    pub base_ref: String,
}

/// A pull request row from a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestSummary {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Login of the author
    pub author: String,
    /// Current state
    pub state: PrState,
    /// When the PR was opened
    pub created_at: Option<DateTime<Utc>>,
    /// When the PR was last updated
    pub updated_at: Option<DateTime<Utc>>,
    /// When the PR was merged, if it was
    pub merged_at: Option<DateTime<Utc>>,
    /// Web URL
    pub html_url: String,
}

/// Fields to change on an existing pull request
///
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PullRequestUpdate {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// New state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<PrStateUpdate>,
}

impl PullRequestUpdate {
    /// True when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.state.is_none()
    }
}

/// Target state for a pull request update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrStateUpdate {
    /// Reopen the PR
    Open,
    /// Close the PR
    Closed,
}

impl std::str::FromStr for PrStateUpdate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            other => Err(format!("invalid state '{other}'; must be 'open' or 'closed'")),
        }
    }
}

/// Result of a metadata update
#[derive(Debug, Clone)]
pub struct UpdatedPullRequest {
    /// PR number
    pub number: u64,
    /// Title after the update
    pub title: String,
    /// State after the update
    pub state: PrState,
}

/// Merge strategy/method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMethod {
    /// Create a merge commit
    #[default]
    Merge,
    /// Squash all commits into one
    Squash,
    /// Rebase commits onto base branch
    Rebase,
}

impl std::fmt::Display for MergeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Merge => write!(f, "merge"),
            Self::Squash => write!(f, "squash"),
            Self::Rebase => write!(f, "rebase"),
        }
    }
}

impl std::str::FromStr for MergeMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "merge" => Ok(Self::Merge),
            "squash" => Ok(Self::Squash),
            "rebase" => Ok(Self::Rebase),
            other => Err(format!(
                "invalid merge method '{other}'; must be 'merge', 'squash', or 'rebase'"
            )),
        }
    }
}

/// Result of a merge operation
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Whether the merge went through
    pub merged: bool,
    /// Sha of the merge commit (if successful)
    pub sha: Option<String>,
    /// Message from the merge endpoint (especially on failure)
    pub message: Option<String>,
}

/// Completion status of a check run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Waiting to start
    Queued,
    /// Currently running
    InProgress,
    /// Finished (see the conclusion)
    Completed,
    /// Any other wire value
    Unknown(String),
}

impl CheckStatus {
    /// Parse a wire status string.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "queued" => Self::Queued,
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Conclusion of a completed check run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckConclusion {
    /// Passed
    Success,
    /// Failed
    Failure,
    /// Exceeded its time budget
    TimedOut,
    /// Cancelled before finishing
    Cancelled,
    /// Finished without a pass/fail verdict
    Neutral,
    /// Skipped entirely
    Skipped,
    /// Any other wire value
    Unknown(String),
}

impl CheckConclusion {
    /// Parse a wire conclusion string.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "success" => Self::Success,
            "failure" => Self::Failure,
            "timed_out" => Self::TimedOut,
            "cancelled" => Self::Cancelled,
            "neutral" => Self::Neutral,
            "skipped" => Self::Skipped,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// True for conclusions that block a merge.
    #[must_use]
    pub const fn is_failing(&self) -> bool {
        matches!(self, Self::Failure | Self::TimedOut | Self::Cancelled)
    }
}

/// An external CI/validation result reported against a commit
#[derive(Debug, Clone)]
pub struct CheckRun {
    /// Check name as reported by the CI provider
    pub name: String,
    /// Completion status
    pub status: CheckStatus,
    /// Conclusion, present once completed
    pub conclusion: Option<CheckConclusion>,
}

/// Aggregated view over a PR's check runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckSummary {
    /// Total number of check runs
    pub total: usize,
    /// Completed successfully
    pub success: usize,
    /// Failed, timed out, or cancelled
    pub failure: usize,
    /// Completed without a pass/fail verdict
    pub neutral: usize,
    /// Not yet completed
    pub pending: usize,
}

impl CheckSummary {
    /// True when nothing failed and nothing is still running.
    ///
    /// A PR with zero check runs passes vacuously.
    #[must_use]
    pub const fn all_clear(&self) -> bool {
        self.failure == 0 && self.pending == 0
    }
}

/// A reviewer's verdict on a pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewVerdict {
    /// Approved the changes
    Approved,
    /// Requested changes
    ChangesRequested,
    /// Commented without a verdict
    Commented,
    /// Review was dismissed
    Dismissed,
    /// Review not yet submitted
    Pending,
    /// Any other wire value
    Unknown(String),
}

/// Merge readiness check result
///
/// Captures the conditions that must hold before a merge is attempted.
#[derive(Debug, Clone)]
pub struct MergeReadiness {
    /// Aggregated check-run results
    pub checks: CheckSummary,
    /// Whether at least one review approved
    pub approved: bool,
    /// Human-readable reasons why the PR cannot be merged
    pub blocking_reasons: Vec<String>,
}

impl MergeReadiness {
    /// True when the merge may proceed.
    #[must_use]
    pub fn can_merge(&self) -> bool {
        self.blocking_reasons.is_empty()
    }
}

/// One changed file in a pull request, as seen by the review heuristics
#[derive(Debug, Clone)]
pub struct PrFile {
    /// Repository path of the file
    pub path: String,
    /// Change status
    pub status: ChangeStatus,
    /// Total changed lines/bytes reported by the diff
    pub changes: u64,
    /// Unified diff text, when the remote includes it
    pub patch: Option<String>,
}

/// Aggregated pull-request statistics over a time window
#[derive(Debug, Clone)]
pub struct PrStats {
    /// PRs updated within the window
    pub total: usize,
    /// Of those, how many were merged
    pub merged: usize,
    /// Of those, how many are open
    pub open: usize,
    /// Average hours from creation to merge, over merged PRs
    pub avg_hours_to_merge: f64,
    /// Average issue-comment count per PR
    pub avg_comments_per_pr: f64,
    /// Top contributors by PR count, at most five
    pub top_contributors: Vec<(String, usize)>,
}
