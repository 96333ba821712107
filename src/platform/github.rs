//! GitHub implementation of the repository service

use crate::config::Config;
use crate::error::{Error, Result};
use crate::platform::RepoService;
use crate::types::{
    Branch, ChangeRecord, ChangeStatus, CheckConclusion, CheckRun, CheckStatus, FileContent,
    MergeMethod, MergeOutcome, PrFile, PrState, PullRequest, PullRequestSummary, PullRequestUpdate,
    ReviewVerdict, UpdatedPullRequest,
};
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use octocrab::Octocrab;
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use tracing::debug;

/// Default API host for github.com.
const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Page size used for listings.
const PER_PAGE: u8 = 100;

// Wire types for the raw REST endpoints octocrab does not cover.

#[derive(Deserialize)]
struct ContentsPayload {
    sha: String,
    content: Option<String>,
}

#[derive(Deserialize)]
struct PutContentsResponse {
    content: Option<ContentsMeta>,
}

#[derive(Deserialize)]
struct ContentsMeta {
    sha: String,
}

#[derive(Deserialize)]
struct RefPayload {
    object: RefTarget,
}

#[derive(Deserialize)]
struct RefTarget {
    sha: String,
}

#[derive(Deserialize)]
struct ComparePayload {
    #[serde(default)]
    files: Vec<DiffFile>,
}

#[derive(Deserialize)]
struct DiffFile {
    filename: String,
    status: String,
    #[serde(default)]
    changes: u64,
    patch: Option<String>,
}

impl DiffFile {
    fn into_pr_file(self) -> PrFile {
        PrFile {
            status: ChangeStatus::parse(&self.status),
            path: self.filename,
            changes: self.changes,
            patch: self.patch,
        }
    }
}

#[derive(Deserialize)]
struct CheckRunsPayload {
    #[serde(default)]
    check_runs: Vec<WireCheckRun>,
}

#[derive(Deserialize)]
struct WireCheckRun {
    name: String,
    status: String,
    conclusion: Option<String>,
}

#[derive(Deserialize)]
struct WireLabel {
    name: String,
}

#[derive(Deserialize)]
struct PatchedPullRequest {
    number: u64,
    title: Option<String>,
    state: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// GitHub service using octocrab for PR/issue endpoints and raw HTTP for
/// the contents, refs, compare, check-runs, and label endpoints.
pub struct GitHubService {
    client: Octocrab,
    /// HTTP client for raw requests
    http_client: Client,
    token: String,
    owner: String,
    repo: String,
    /// API base for raw requests (injectable for tests)
    api_base: String,
}

impl GitHubService {
    /// Create a service talking to github.com.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_api_base(config, DEFAULT_API_BASE)
    }

    /// Create a service against an explicit API base URL.
    pub fn with_api_base(config: &Config, api_base: &str) -> Result<Self> {
        let api_base = api_base.trim_end_matches('/').to_string();

        let client = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(&api_base)
            .map_err(|e| Error::Internal(format!("invalid API base: {e}")))?
            .build()
            .map_err(|e| Error::Internal(format!("failed to build GitHub client: {e}")))?;

        let http_client = Client::builder()
            .user_agent(concat!("gh-steward/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            http_client,
            token: config.token.clone(),
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            api_base,
        })
    }

    fn repo_url(&self, rest: &str) -> String {
        format!("{}/repos/{}/{}/{rest}", self.api_base, self.owner, self.repo)
    }

    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        self.http_client
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }

    /// Turn a non-2xx response into a typed rejection carrying the remote's
    /// message when one is present.
    async fn rejection(response: reqwest::Response) -> Error {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or(body);
        Error::Rejected { status, message }
    }

    /// Fetch check runs for a commit sha.
    async fn commit_check_runs(&self, sha: &str) -> Result<Vec<CheckRun>> {
        let url = self.repo_url(&format!("commits/{sha}/check-runs"));
        let response = self.request(Method::GET, &url).send().await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let payload: CheckRunsPayload = response.json().await?;
        Ok(payload
            .check_runs
            .into_iter()
            .map(|run| CheckRun {
                name: run.name,
                status: CheckStatus::parse(&run.status),
                conclusion: run.conclusion.as_deref().map(CheckConclusion::parse),
            })
            .collect())
    }
}

/// Decode GitHub's base64 file content, which wraps lines with newlines.
fn decode_content(encoded: &str) -> Result<Vec<u8>> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    BASE64
        .decode(compact)
        .map_err(|e| Error::Decode(format!("invalid base64 file content: {e}")))
}

/// Helper to convert an octocrab PR to a listing summary
fn summary_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequestSummary {
    let state = match pr.state {
        Some(octocrab::models::IssueState::Open) => PrState::Open,
        // IssueState is non-exhaustive; anything else reads as closed
        _ => PrState::Closed,
    };

    PullRequestSummary {
        number: pr.number,
        title: pr.title.clone().unwrap_or_default(),
        author: pr
            .user
            .as_ref()
            .map(|u| u.login.clone())
            .unwrap_or_default(),
        state,
        created_at: pr.created_at,
        updated_at: pr.updated_at,
        merged_at: pr.merged_at,
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
    }
}

#[async_trait]
impl RepoService for GitHubService {
    async fn get_file(&self, path: &str, branch: &str) -> Result<FileContent> {
        debug!(path, branch, "fetching file");
        let url = self.repo_url(&format!("contents/{path}"));
        let response = self
            .request(Method::GET, &url)
            .query(&[("ref", branch)])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("{path} on branch {branch}")));
        }
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let value: serde_json::Value = response.json().await?;
        if value.is_array() {
            return Err(Error::Directory(path.to_string()));
        }

        let payload: ContentsPayload = serde_json::from_value(value)
            .map_err(|e| Error::Decode(format!("unexpected contents payload: {e}")))?;
        let content = match payload.content.as_deref() {
            Some(encoded) => decode_content(encoded)?,
            None => Vec::new(),
        };

        debug!(path, branch, bytes = content.len(), "fetched file");
        Ok(FileContent {
            path: path.to_string(),
            content,
            sha: Some(payload.sha),
        })
    }

    async fn put_file(
        &self,
        path: &str,
        branch: &str,
        content: &[u8],
        message: &str,
        sha: Option<&str>,
    ) -> Result<FileContent> {
        debug!(path, branch, message, update = sha.is_some(), "writing file");
        let url = self.repo_url(&format!("contents/{path}"));

        let mut body = serde_json::json!({
            "message": message,
            "content": BASE64.encode(content),
            "branch": branch,
        });
        if let Some(sha) = sha {
            body["sha"] = serde_json::Value::String(sha.to_string());
        }

        let response = self.request(Method::PUT, &url).json(&body).send().await?;

        if response.status() == StatusCode::CONFLICT {
            return Err(Error::VersionConflict {
                path: path.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let payload: PutContentsResponse = response.json().await?;
        debug!(path, branch, "wrote file");
        Ok(FileContent {
            path: path.to_string(),
            content: content.to_vec(),
            sha: payload.content.map(|c| c.sha),
        })
    }

    async fn create_file(&self, path: &str, content: &[u8], message: &str) -> Result<FileContent> {
        debug!(path, message, "creating file on the default branch");
        let url = self.repo_url(&format!("contents/{path}"));
        let body = serde_json::json!({
            "message": message,
            "content": BASE64.encode(content),
        });

        let response = self.request(Method::PUT, &url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let payload: PutContentsResponse = response.json().await?;
        debug!(path, "created file");
        Ok(FileContent {
            path: path.to_string(),
            content: content.to_vec(),
            sha: payload.content.map(|c| c.sha),
        })
    }

    async fn branch_head(&self, branch: &str) -> Result<String> {
        debug!(branch, "resolving branch head");
        let url = self.repo_url(&format!("git/ref/heads/{branch}"));
        let response = self.request(Method::GET, &url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("branch {branch}")));
        }
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let payload: RefPayload = response.json().await?;
        debug!(branch, sha = %payload.object.sha, "resolved branch head");
        Ok(payload.object.sha)
    }

    async fn create_branch(&self, name: &str, from_sha: &str) -> Result<Branch> {
        debug!(name, from_sha, "creating branch");
        let url = self.repo_url("git/refs");
        let body = serde_json::json!({
            "ref": format!("refs/heads/{name}"),
            "sha": from_sha,
        });

        let response = self.request(Method::POST, &url).json(&body).send().await?;

        if response.status() == StatusCode::UNPROCESSABLE_ENTITY {
            return Err(Error::AlreadyExists(name.to_string()));
        }
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        debug!(name, "created branch");
        Ok(Branch {
            name: name.to_string(),
            head_sha: from_sha.to_string(),
        })
    }

    async fn compare(&self, base: &str, head: &str) -> Result<Vec<ChangeRecord>> {
        debug!(base, head, "comparing refs");
        let url = self.repo_url(&format!("compare/{base}...{head}"));
        let response = self.request(Method::GET, &url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("comparison {base}...{head}")));
        }
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let payload: ComparePayload = response.json().await?;
        let records: Vec<ChangeRecord> = payload
            .files
            .into_iter()
            .map(|file| ChangeRecord {
                status: ChangeStatus::parse(&file.status),
                path: file.filename,
            })
            .collect();
        debug!(base, head, count = records.len(), "compared refs");
        Ok(records)
    }

    async fn create_pull_request(
        &self,
        base: &str,
        head: &str,
        title: &str,
        body: &str,
    ) -> Result<PullRequest> {
        debug!(base, head, "creating PR");
        let pr = self
            .client
            .pulls(&self.owner, &self.repo)
            .create(title, head, base)
            .body(body)
            .send()
            .await?;

        debug!(pr_number = pr.number, "created PR");
        Ok(PullRequest {
            number: pr.number,
            title: pr.title.clone().unwrap_or_else(|| title.to_string()),
            html_url: pr
                .html_url
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            head_ref: pr.head.ref_field.clone(),
            base_ref: pr.base.ref_field.clone(),
        })
    }

    async fn list_open_pull_requests(&self) -> Result<Vec<PullRequestSummary>> {
        debug!("listing open PRs");
        let prs = self
            .client
            .pulls(&self.owner, &self.repo)
            .list()
            .state(octocrab::params::State::Open)
            .per_page(PER_PAGE)
            .send()
            .await?;

        let result: Vec<PullRequestSummary> =
            prs.items.iter().map(summary_from_octocrab).collect();
        debug!(count = result.len(), "listed open PRs");
        Ok(result)
    }

    async fn list_pull_requests_page(&self, page: u32) -> Result<Vec<PullRequestSummary>> {
        debug!(page, "listing PR page");
        let prs = self
            .client
            .pulls(&self.owner, &self.repo)
            .list()
            .state(octocrab::params::State::All)
            .sort(octocrab::params::pulls::Sort::Updated)
            .direction(octocrab::params::Direction::Descending)
            .per_page(PER_PAGE)
            .page(page)
            .send()
            .await?;

        let result: Vec<PullRequestSummary> =
            prs.items.iter().map(summary_from_octocrab).collect();
        debug!(page, count = result.len(), "listed PR page");
        Ok(result)
    }

    async fn update_pull_request(
        &self,
        number: u64,
        update: &PullRequestUpdate,
    ) -> Result<UpdatedPullRequest> {
        debug!(number, "updating PR metadata");
        let url = self.repo_url(&format!("pulls/{number}"));
        let response = self
            .request(Method::PATCH, &url)
            .json(update)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("pull request #{number}")));
        }
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let payload: PatchedPullRequest = response.json().await?;
        debug!(number, "updated PR metadata");
        Ok(UpdatedPullRequest {
            number: payload.number,
            title: payload.title.unwrap_or_default(),
            state: if payload.state == "open" {
                PrState::Open
            } else {
                PrState::Closed
            },
        })
    }

    async fn merge_pull_request(&self, number: u64, method: MergeMethod) -> Result<MergeOutcome> {
        debug!(number, %method, "merging PR");
        let octocrab_method = match method {
            MergeMethod::Merge => octocrab::params::pulls::MergeMethod::Merge,
            MergeMethod::Squash => octocrab::params::pulls::MergeMethod::Squash,
            MergeMethod::Rebase => octocrab::params::pulls::MergeMethod::Rebase,
        };

        let result = self
            .client
            .pulls(&self.owner, &self.repo)
            .merge(number)
            .method(octocrab_method)
            .send()
            .await?;

        let outcome = MergeOutcome {
            merged: result.merged,
            sha: result.sha,
            message: result.message,
        };
        debug!(number, merged = outcome.merged, "merge complete");
        Ok(outcome)
    }

    async fn list_reviews(&self, number: u64) -> Result<Vec<ReviewVerdict>> {
        debug!(number, "listing reviews");
        let reviews = self
            .client
            .pulls(&self.owner, &self.repo)
            .list_reviews(number)
            .send()
            .await?;

        let verdicts: Vec<ReviewVerdict> = reviews
            .items
            .into_iter()
            .map(|review| match review.state {
                Some(octocrab::models::pulls::ReviewState::Approved) => ReviewVerdict::Approved,
                Some(octocrab::models::pulls::ReviewState::ChangesRequested) => {
                    ReviewVerdict::ChangesRequested
                }
                Some(octocrab::models::pulls::ReviewState::Commented) => ReviewVerdict::Commented,
                Some(octocrab::models::pulls::ReviewState::Pending) => ReviewVerdict::Pending,
                Some(other) => ReviewVerdict::Unknown(format!("{other:?}")),
                None => ReviewVerdict::Unknown("missing state".to_string()),
            })
            .collect();
        debug!(number, count = verdicts.len(), "listed reviews");
        Ok(verdicts)
    }

    async fn list_checks(&self, number: u64) -> Result<Vec<CheckRun>> {
        debug!(number, "listing check runs");
        // Check runs hang off the head commit, not the PR itself.
        let pr = self
            .client
            .pulls(&self.owner, &self.repo)
            .get(number)
            .await?;

        let checks = self.commit_check_runs(&pr.head.sha).await?;
        debug!(number, count = checks.len(), "listed check runs");
        Ok(checks)
    }

    async fn list_changed_files(&self, number: u64) -> Result<Vec<PrFile>> {
        debug!(number, "listing changed files");
        let url = self.repo_url(&format!("pulls/{number}/files"));
        let response = self.request(Method::GET, &url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("pull request #{number}")));
        }
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let files: Vec<DiffFile> = response.json().await?;
        let result: Vec<PrFile> = files.into_iter().map(DiffFile::into_pr_file).collect();
        debug!(number, count = result.len(), "listed changed files");
        Ok(result)
    }

    async fn add_comment(&self, number: u64, body: &str) -> Result<()> {
        debug!(number, "adding comment");
        self.client
            .issues(&self.owner, &self.repo)
            .create_comment(number, body)
            .await?;
        debug!(number, "added comment");
        Ok(())
    }

    async fn count_comments(&self, number: u64) -> Result<usize> {
        debug!(number, "counting comments");
        let comments = self
            .client
            .issues(&self.owner, &self.repo)
            .list_comments(number)
            .send()
            .await?;

        Ok(comments.items.len())
    }

    async fn list_labels(&self, number: u64) -> Result<Vec<String>> {
        debug!(number, "listing labels");
        let url = self.repo_url(&format!("issues/{number}/labels"));
        let response = self.request(Method::GET, &url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("pull request #{number}")));
        }
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let labels: Vec<WireLabel> = response.json().await?;
        Ok(labels.into_iter().map(|l| l.name).collect())
    }

    async fn add_labels(&self, number: u64, labels: &[String]) -> Result<Vec<String>> {
        debug!(number, ?labels, "adding labels");
        let url = self.repo_url(&format!("issues/{number}/labels"));
        let response = self.request(Method::POST, &url).json(labels).send().await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let labels: Vec<WireLabel> = response.json().await?;
        Ok(labels.into_iter().map(|l| l.name).collect())
    }

    async fn remove_label(&self, number: u64, label: &str) -> Result<()> {
        debug!(number, label, "removing label");
        let url = self.repo_url(&format!(
            "issues/{number}/labels/{}",
            urlencoding::encode(label)
        ));
        let response = self.request(Method::DELETE, &url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("label '{label}' on #{number}")));
        }
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        Ok(())
    }

    async fn repo_exists(&self) -> Result<bool> {
        debug!("checking repository existence");
        let url = format!("{}/repos/{}/{}", self.api_base, self.owner, self.repo);
        let response = self.request(Method::GET, &url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        Ok(true)
    }

    async fn create_repo(&self) -> Result<()> {
        debug!(repo = %self.repo, "creating repository");
        let url = format!("{}/user/repos", self.api_base);
        let body = serde_json::json!({
            "name": self.repo,
            "private": false,
        });

        let response = self.request(Method::POST, &url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        debug!(repo = %self.repo, "created repository");
        Ok(())
    }
}
