//! Remote repository client
//!
//! Wraps the hosting service's HTTP endpoints behind one trait so the
//! workflow and helper code can run against a mock in tests.

mod github;

pub use github::GitHubService;

use crate::error::Result;
use crate::types::{
    Branch, ChangeRecord, CheckRun, FileContent, MergeMethod, MergeOutcome, PrFile, PullRequest,
    PullRequestSummary, PullRequestUpdate, ReviewVerdict, UpdatedPullRequest,
};
use async_trait::async_trait;

/// Remote repository operations
///
/// Every call is stateless: the implementation carries the owner/repo and
/// credentials, the caller supplies branch/path/number parameters. No call
/// is retried; a non-2xx response surfaces as a typed error and the caller
/// decides whether to abort or skip.
#[async_trait]
pub trait RepoService: Send + Sync {
    /// Fetch a file's content and version tag from a branch.
    async fn get_file(&self, path: &str, branch: &str) -> Result<FileContent>;

    /// Write file content to a branch.
    ///
    /// `sha` is the optimistic-concurrency version tag: required when
    /// updating an existing file, omitted when creating one. A stale tag
    /// fails with [`crate::error::Error::VersionConflict`].
    async fn put_file(
        &self,
        path: &str,
        branch: &str,
        content: &[u8],
        message: &str,
        sha: Option<&str>,
    ) -> Result<FileContent>;

    /// Create a file on the repository's default branch.
    ///
    /// Unlike [`put_file`](Self::put_file) this carries no branch ref, so
    /// it also works on a freshly created, still-empty repository.
    async fn create_file(&self, path: &str, content: &[u8], message: &str) -> Result<FileContent>;

    /// Resolve a branch name to its head commit sha.
    async fn branch_head(&self, branch: &str) -> Result<String>;

    /// Create a branch pointing at `from_sha`.
    async fn create_branch(&self, name: &str, from_sha: &str) -> Result<Branch>;

    /// Compare two refs, yielding one record per changed file.
    async fn compare(&self, base: &str, head: &str) -> Result<Vec<ChangeRecord>>;

    /// Open a pull request from `head` into `base`.
    async fn create_pull_request(
        &self,
        base: &str,
        head: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest>;

    /// List open pull requests.
    async fn list_open_pull_requests(&self) -> Result<Vec<PullRequestSummary>>;

    /// Fetch one page of pull requests across all states, most recently
    /// updated first, 100 per page. Pages start at 1; an empty vec means
    /// the listing is exhausted.
    async fn list_pull_requests_page(&self, page: u32) -> Result<Vec<PullRequestSummary>>;

    /// Patch title/body/state of an existing pull request.
    async fn update_pull_request(
        &self,
        number: u64,
        update: &PullRequestUpdate,
    ) -> Result<UpdatedPullRequest>;

    /// Merge a pull request. Readiness policy is enforced by the caller,
    /// not here.
    async fn merge_pull_request(&self, number: u64, method: MergeMethod) -> Result<MergeOutcome>;

    /// List review verdicts on a pull request.
    async fn list_reviews(&self, number: u64) -> Result<Vec<ReviewVerdict>>;

    /// List check runs for a pull request's head commit.
    async fn list_checks(&self, number: u64) -> Result<Vec<CheckRun>>;

    /// List the files changed by a pull request.
    async fn list_changed_files(&self, number: u64) -> Result<Vec<PrFile>>;

    /// Post an issue comment on a pull request.
    async fn add_comment(&self, number: u64, body: &str) -> Result<()>;

    /// Count issue comments on a pull request (first listing page only).
    async fn count_comments(&self, number: u64) -> Result<usize>;

    /// List label names on a pull request.
    async fn list_labels(&self, number: u64) -> Result<Vec<String>>;

    /// Add labels to a pull request, returning the resulting label set.
    async fn add_labels(&self, number: u64, labels: &[String]) -> Result<Vec<String>>;

    /// Remove one label from a pull request.
    async fn remove_label(&self, number: u64, label: &str) -> Result<()>;

    /// Check whether the configured repository exists.
    async fn repo_exists(&self) -> Result<bool>;

    /// Create the configured repository under the authenticated user.
    async fn create_repo(&self) -> Result<()>;
}
