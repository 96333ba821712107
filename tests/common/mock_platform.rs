//! Mock repository service for testing
//!
//! These are test utilities - not all may be used in every test file but
//! are available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use gh_steward::error::{Error, Result};
use gh_steward::platform::RepoService;
use gh_steward::types::{
    Branch, ChangeRecord, CheckRun, FileContent, MergeMethod, MergeOutcome, PrFile, PrState,
    PullRequest, PullRequestSummary, PullRequestUpdate, ReviewVerdict, UpdatedPullRequest,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Branch used by `create_file` (no-ref writes).
pub const DEFAULT_BRANCH: &str = "main";

/// Call record for `put_file`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutFileCall {
    pub path: String,
    pub branch: String,
    pub content: Vec<u8>,
    pub message: String,
    pub sha: Option<String>,
}

/// Call record for `create_pull_request`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrCall {
    pub base: String,
    pub head: String,
    pub title: String,
    pub body: String,
}

/// Simple mock repository service for testing
///
/// Carries an in-memory branch/file store so the workflow's
/// fetch-then-write discipline can run for real:
/// - `create_branch` copies the files of the branch it forks from
/// - `put_file` enforces the optimistic-concurrency version tag
///
/// Features:
/// - Call tracking for verification
/// - Configurable responses per PR number
/// - Error injection for failure path testing
pub struct MockRepoService {
    next_pr_number: AtomicU64,
    sha_counter: AtomicU64,
    // branch name -> head sha
    branches: Mutex<HashMap<String, String>>,
    // (branch, path) -> (content, version sha)
    files: Mutex<HashMap<(String, String), (Vec<u8>, String)>>,
    // applied to freshly created branches, simulating divergence from base
    branch_file_overrides: Mutex<HashMap<String, Vec<u8>>>,
    repo_exists: Mutex<bool>,
    // Configurable responses
    compare_response: Mutex<Vec<ChangeRecord>>,
    open_prs: Mutex<Vec<PullRequestSummary>>,
    pages: Mutex<HashMap<u32, Vec<PullRequestSummary>>>,
    checks_responses: Mutex<HashMap<u64, Vec<CheckRun>>>,
    reviews_responses: Mutex<HashMap<u64, Vec<ReviewVerdict>>>,
    changed_files_responses: Mutex<HashMap<u64, Vec<PrFile>>>,
    comment_counts: Mutex<HashMap<u64, usize>>,
    labels: Mutex<HashMap<u64, Vec<String>>>,
    merge_responses: Mutex<HashMap<u64, MergeOutcome>>,
    // Call tracking
    get_file_calls: Mutex<Vec<(String, String)>>,
    put_file_calls: Mutex<Vec<PutFileCall>>,
    create_file_calls: Mutex<Vec<(String, String)>>,
    create_branch_calls: Mutex<Vec<String>>,
    create_pr_calls: Mutex<Vec<CreatePrCall>>,
    merge_calls: Mutex<Vec<(u64, MergeMethod)>>,
    comments: Mutex<Vec<(u64, String)>>,
    page_requests: Mutex<Vec<u32>>,
    create_repo_calls: AtomicU64,
    // Error injection
    error_on_branch_head: Mutex<Option<String>>,
    error_on_create_branch: Mutex<Option<String>>,
    error_on_create_pr: Mutex<Option<String>>,
    version_conflict_paths: Mutex<Vec<String>>,
}

impl Default for MockRepoService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRepoService {
    /// Create an empty mock for an existing repository.
    pub fn new() -> Self {
        Self {
            next_pr_number: AtomicU64::new(1),
            sha_counter: AtomicU64::new(1),
            branches: Mutex::new(HashMap::new()),
            files: Mutex::new(HashMap::new()),
            branch_file_overrides: Mutex::new(HashMap::new()),
            repo_exists: Mutex::new(true),
            compare_response: Mutex::new(Vec::new()),
            open_prs: Mutex::new(Vec::new()),
            pages: Mutex::new(HashMap::new()),
            checks_responses: Mutex::new(HashMap::new()),
            reviews_responses: Mutex::new(HashMap::new()),
            changed_files_responses: Mutex::new(HashMap::new()),
            comment_counts: Mutex::new(HashMap::new()),
            labels: Mutex::new(HashMap::new()),
            merge_responses: Mutex::new(HashMap::new()),
            get_file_calls: Mutex::new(Vec::new()),
            put_file_calls: Mutex::new(Vec::new()),
            create_file_calls: Mutex::new(Vec::new()),
            create_branch_calls: Mutex::new(Vec::new()),
            create_pr_calls: Mutex::new(Vec::new()),
            merge_calls: Mutex::new(Vec::new()),
            comments: Mutex::new(Vec::new()),
            page_requests: Mutex::new(Vec::new()),
            create_repo_calls: AtomicU64::new(0),
            error_on_branch_head: Mutex::new(None),
            error_on_create_branch: Mutex::new(None),
            error_on_create_pr: Mutex::new(None),
            version_conflict_paths: Mutex::new(Vec::new()),
        }
    }

    fn next_sha(&self) -> String {
        format!("sha-{}", self.sha_counter.fetch_add(1, Ordering::SeqCst))
    }

    // === Setup methods ===

    /// Seed a branch with a head sha.
    pub fn set_branch(&self, name: &str, head_sha: &str) {
        self.branches
            .lock()
            .unwrap()
            .insert(name.to_string(), head_sha.to_string());
    }

    /// Seed a file on a branch.
    pub fn set_file(&self, branch: &str, path: &str, content: &[u8]) {
        let sha = self.next_sha();
        self.files
            .lock()
            .unwrap()
            .insert((branch.to_string(), path.to_string()), (content.to_vec(), sha));
    }

    /// Make freshly created branches carry this content for `path`,
    /// simulating a head version that diverged from base.
    pub fn set_head_file_override(&self, path: &str, content: &[u8]) {
        self.branch_file_overrides
            .lock()
            .unwrap()
            .insert(path.to_string(), content.to_vec());
    }

    /// Set the comparison result.
    pub fn set_compare_response(&self, records: Vec<ChangeRecord>) {
        *self.compare_response.lock().unwrap() = records;
    }

    /// Set the open-PR listing.
    pub fn set_open_prs(&self, prs: Vec<PullRequestSummary>) {
        *self.open_prs.lock().unwrap() = prs;
    }

    /// Set one page of the all-state PR listing.
    pub fn set_page(&self, page: u32, prs: Vec<PullRequestSummary>) {
        self.pages.lock().unwrap().insert(page, prs);
    }

    /// Set the check runs for a PR.
    pub fn set_checks_response(&self, number: u64, checks: Vec<CheckRun>) {
        self.checks_responses.lock().unwrap().insert(number, checks);
    }

    /// Set the review verdicts for a PR.
    pub fn set_reviews_response(&self, number: u64, reviews: Vec<ReviewVerdict>) {
        self.reviews_responses.lock().unwrap().insert(number, reviews);
    }

    /// Set the changed files for a PR.
    pub fn set_changed_files_response(&self, number: u64, files: Vec<PrFile>) {
        self.changed_files_responses
            .lock()
            .unwrap()
            .insert(number, files);
    }

    /// Set the comment count for a PR.
    pub fn set_comment_count(&self, number: u64, count: usize) {
        self.comment_counts.lock().unwrap().insert(number, count);
    }

    /// Set the labels on a PR.
    pub fn set_labels(&self, number: u64, labels: Vec<String>) {
        self.labels.lock().unwrap().insert(number, labels);
    }

    /// Set the merge outcome for a PR.
    pub fn set_merge_response(&self, number: u64, outcome: MergeOutcome) {
        self.merge_responses.lock().unwrap().insert(number, outcome);
    }

    /// Mark the repository as missing.
    pub fn set_repo_missing(&self) {
        *self.repo_exists.lock().unwrap() = false;
    }

    // === Error injection ===

    /// Make `branch_head` fail.
    pub fn fail_branch_head(&self, msg: &str) {
        *self.error_on_branch_head.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_branch` fail.
    pub fn fail_create_branch(&self, msg: &str) {
        *self.error_on_create_branch.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_pull_request` fail.
    pub fn fail_create_pr(&self, msg: &str) {
        *self.error_on_create_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make every `put_file` for this path fail with a version conflict.
    pub fn conflict_on_put(&self, path: &str) {
        self.version_conflict_paths
            .lock()
            .unwrap()
            .push(path.to_string());
    }

    // === Call verification ===

    /// All `(path, branch)` pairs `get_file` was called with.
    pub fn get_file_calls(&self) -> Vec<(String, String)> {
        self.get_file_calls.lock().unwrap().clone()
    }

    /// All `put_file` calls.
    pub fn put_file_calls(&self) -> Vec<PutFileCall> {
        self.put_file_calls.lock().unwrap().clone()
    }

    /// All `(path, message)` pairs `create_file` was called with.
    pub fn create_file_calls(&self) -> Vec<(String, String)> {
        self.create_file_calls.lock().unwrap().clone()
    }

    /// Names of branches created.
    pub fn create_branch_calls(&self) -> Vec<String> {
        self.create_branch_calls.lock().unwrap().clone()
    }

    /// All `create_pull_request` calls.
    pub fn create_pr_calls(&self) -> Vec<CreatePrCall> {
        self.create_pr_calls.lock().unwrap().clone()
    }

    /// All merge calls.
    pub fn merge_calls(&self) -> Vec<(u64, MergeMethod)> {
        self.merge_calls.lock().unwrap().clone()
    }

    /// All comments posted.
    pub fn comments(&self) -> Vec<(u64, String)> {
        self.comments.lock().unwrap().clone()
    }

    /// Pages requested from the listing.
    pub fn page_requests(&self) -> Vec<u32> {
        self.page_requests.lock().unwrap().clone()
    }

    /// How many times `create_repo` was called.
    pub fn create_repo_calls(&self) -> u64 {
        self.create_repo_calls.load(Ordering::SeqCst)
    }

    /// Content currently stored for a file on a branch.
    pub fn stored_content(&self, branch: &str, path: &str) -> Option<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .get(&(branch.to_string(), path.to_string()))
            .map(|(content, _)| content.clone())
    }

    /// Assert no file writes happened.
    pub fn assert_no_writes(&self) {
        let calls = self.put_file_calls();
        assert!(calls.is_empty(), "expected no writes but got: {calls:?}");
    }
}

#[async_trait]
impl RepoService for MockRepoService {
    async fn get_file(&self, path: &str, branch: &str) -> Result<FileContent> {
        self.get_file_calls
            .lock()
            .unwrap()
            .push((path.to_string(), branch.to_string()));

        let files = self.files.lock().unwrap();
        files
            .get(&(branch.to_string(), path.to_string()))
            .map(|(content, sha)| FileContent {
                path: path.to_string(),
                content: content.clone(),
                sha: Some(sha.clone()),
            })
            .ok_or_else(|| Error::NotFound(format!("{path} on branch {branch}")))
    }

    async fn put_file(
        &self,
        path: &str,
        branch: &str,
        content: &[u8],
        message: &str,
        sha: Option<&str>,
    ) -> Result<FileContent> {
        self.put_file_calls.lock().unwrap().push(PutFileCall {
            path: path.to_string(),
            branch: branch.to_string(),
            content: content.to_vec(),
            message: message.to_string(),
            sha: sha.map(ToString::to_string),
        });

        if self
            .version_conflict_paths
            .lock()
            .unwrap()
            .contains(&path.to_string())
        {
            return Err(Error::VersionConflict {
                path: path.to_string(),
            });
        }

        let mut files = self.files.lock().unwrap();
        let key = (branch.to_string(), path.to_string());
        if let Some((_, current_sha)) = files.get(&key) {
            // Updates must carry the current version tag.
            if sha != Some(current_sha.as_str()) {
                return Err(Error::VersionConflict {
                    path: path.to_string(),
                });
            }
        }

        let new_sha = self.next_sha();
        files.insert(key, (content.to_vec(), new_sha.clone()));
        Ok(FileContent {
            path: path.to_string(),
            content: content.to_vec(),
            sha: Some(new_sha),
        })
    }

    async fn create_file(&self, path: &str, content: &[u8], message: &str) -> Result<FileContent> {
        self.create_file_calls
            .lock()
            .unwrap()
            .push((path.to_string(), message.to_string()));

        let new_sha = self.next_sha();
        self.files.lock().unwrap().insert(
            (DEFAULT_BRANCH.to_string(), path.to_string()),
            (content.to_vec(), new_sha.clone()),
        );
        Ok(FileContent {
            path: path.to_string(),
            content: content.to_vec(),
            sha: Some(new_sha),
        })
    }

    async fn branch_head(&self, branch: &str) -> Result<String> {
        if let Some(msg) = self.error_on_branch_head.lock().unwrap().as_ref() {
            return Err(Error::Rejected {
                status: 500,
                message: msg.clone(),
            });
        }

        let branches = self.branches.lock().unwrap();
        branches
            .get(branch)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("branch {branch}")))
    }

    async fn create_branch(&self, name: &str, from_sha: &str) -> Result<Branch> {
        self.create_branch_calls
            .lock()
            .unwrap()
            .push(name.to_string());

        if let Some(msg) = self.error_on_create_branch.lock().unwrap().as_ref() {
            return Err(Error::Rejected {
                status: 500,
                message: msg.clone(),
            });
        }

        let mut branches = self.branches.lock().unwrap();
        if branches.contains_key(name) {
            return Err(Error::AlreadyExists(name.to_string()));
        }

        // Copy the files of the branch this ref forks from, then apply the
        // configured divergence.
        let source = branches
            .iter()
            .find(|(_, sha)| sha.as_str() == from_sha)
            .map(|(branch, _)| branch.clone());
        branches.insert(name.to_string(), from_sha.to_string());
        drop(branches);

        if let Some(source) = source {
            let mut files = self.files.lock().unwrap();
            let copied: Vec<(String, Vec<u8>)> = files
                .iter()
                .filter(|((branch, _), _)| *branch == source)
                .map(|((_, path), (content, _))| (path.clone(), content.clone()))
                .collect();
            for (path, content) in copied {
                let sha = self.next_sha();
                files.insert((name.to_string(), path), (content, sha));
            }

            let overrides = self.branch_file_overrides.lock().unwrap();
            for (path, content) in overrides.iter() {
                let sha = self.next_sha();
                files.insert((name.to_string(), path.clone()), (content.clone(), sha));
            }
        }

        Ok(Branch {
            name: name.to_string(),
            head_sha: from_sha.to_string(),
        })
    }

    async fn compare(&self, _base: &str, _head: &str) -> Result<Vec<ChangeRecord>> {
        Ok(self.compare_response.lock().unwrap().clone())
    }

    async fn create_pull_request(
        &self,
        base: &str,
        head: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest> {
        self.create_pr_calls.lock().unwrap().push(CreatePrCall {
            base: base.to_string(),
            head: head.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        });

        if let Some(msg) = self.error_on_create_pr.lock().unwrap().as_ref() {
            return Err(Error::Rejected {
                status: 422,
                message: msg.clone(),
            });
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        Ok(PullRequest {
            number,
            title: title.to_string(),
            html_url: format!("https://github.com/test/repo/pull/{number}"),
            head_ref: head.to_string(),
            base_ref: base.to_string(),
        })
    }

    async fn list_open_pull_requests(&self) -> Result<Vec<PullRequestSummary>> {
        Ok(self.open_prs.lock().unwrap().clone())
    }

    async fn list_pull_requests_page(&self, page: u32) -> Result<Vec<PullRequestSummary>> {
        self.page_requests.lock().unwrap().push(page);
        Ok(self.pages.lock().unwrap().get(&page).cloned().unwrap_or_default())
    }

    async fn update_pull_request(
        &self,
        number: u64,
        update: &PullRequestUpdate,
    ) -> Result<UpdatedPullRequest> {
        Ok(UpdatedPullRequest {
            number,
            title: update.title.clone().unwrap_or_else(|| "unchanged".to_string()),
            state: match update.state {
                Some(gh_steward::types::PrStateUpdate::Closed) => PrState::Closed,
                _ => PrState::Open,
            },
        })
    }

    async fn merge_pull_request(&self, number: u64, method: MergeMethod) -> Result<MergeOutcome> {
        self.merge_calls.lock().unwrap().push((number, method));

        let responses = self.merge_responses.lock().unwrap();
        Ok(responses.get(&number).cloned().unwrap_or(MergeOutcome {
            merged: true,
            sha: Some(format!("merged-sha-{number}")),
            message: None,
        }))
    }

    async fn list_reviews(&self, number: u64) -> Result<Vec<ReviewVerdict>> {
        Ok(self
            .reviews_responses
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_checks(&self, number: u64) -> Result<Vec<CheckRun>> {
        Ok(self
            .checks_responses
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_changed_files(&self, number: u64) -> Result<Vec<PrFile>> {
        Ok(self
            .changed_files_responses
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_comment(&self, number: u64, body: &str) -> Result<()> {
        self.comments
            .lock()
            .unwrap()
            .push((number, body.to_string()));
        Ok(())
    }

    async fn count_comments(&self, number: u64) -> Result<usize> {
        Ok(self
            .comment_counts
            .lock()
            .unwrap()
            .get(&number)
            .copied()
            .unwrap_or(0))
    }

    async fn list_labels(&self, number: u64) -> Result<Vec<String>> {
        Ok(self
            .labels
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_labels(&self, number: u64, labels: &[String]) -> Result<Vec<String>> {
        let mut map = self.labels.lock().unwrap();
        let entry = map.entry(number).or_default();
        for label in labels {
            if !entry.contains(label) {
                entry.push(label.clone());
            }
        }
        Ok(entry.clone())
    }

    async fn remove_label(&self, number: u64, label: &str) -> Result<()> {
        let mut map = self.labels.lock().unwrap();
        let entry = map.entry(number).or_default();
        let before = entry.len();
        entry.retain(|l| l != label);
        if entry.len() == before {
            return Err(Error::NotFound(format!("label '{label}' on #{number}")));
        }
        Ok(())
    }

    async fn repo_exists(&self) -> Result<bool> {
        Ok(*self.repo_exists.lock().unwrap())
    }

    async fn create_repo(&self) -> Result<()> {
        self.create_repo_calls.fetch_add(1, Ordering::SeqCst);
        *self.repo_exists.lock().unwrap() = true;
        Ok(())
    }
}
