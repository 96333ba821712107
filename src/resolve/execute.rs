//! Workflow execution - effectful operations
//!
//! Drives the provision → classify → reconcile → publish pipeline against
//! a [`RepoService`]. Per-file failures are recorded and skipped; only
//! provisioning and comparison failures abort the run.

use crate::error::Result;
use crate::platform::RepoService;
use crate::resolve::plan::{
    ADD_COMMIT_MESSAGE, KEEP_REMOVED_COMMIT_MESSAGE, PR_BODY, PR_TITLE, RESOLVE_COMMIT_MESSAGE,
    ResolutionOutcome, SkippedFile, merged_content, removal_notice,
};
use crate::resolve::{ProgressCallback, classify_changes, provision_branch};
use crate::types::{ChangeRecord, ChangeStatus};
use tracing::{debug, warn};

/// Run the branch-and-merge workflow.
///
/// Provisions a working branch off `base_branch`, reconciles every change
/// record the comparison reports, and opens a pull request from the working
/// branch back into the base. A comparison with zero records returns early
/// with no writes and no pull request.
pub async fn run_resolution(
    service: &dyn RepoService,
    base_branch: &str,
    prefix: &str,
    progress: &dyn ProgressCallback,
) -> Result<ResolutionOutcome> {
    let branch = provision_branch(service, base_branch, prefix).await?;
    progress
        .on_message(&format!("Created working branch {}", branch.name))
        .await;

    let records = classify_changes(service, base_branch, &branch.name).await?;

    let mut outcome = ResolutionOutcome {
        branch,
        updated: Vec::new(),
        skipped: Vec::new(),
        pull_request: None,
        publish_error: None,
    };

    if records.is_empty() {
        debug!(base_branch, "no changes between refs");
        return Ok(outcome);
    }

    for record in &records {
        progress
            .on_message(&format!("Reconciling {} ({})", record.path, record.status))
            .await;

        match reconcile_file(service, base_branch, &outcome.branch.name, record).await {
            Ok(()) => outcome.updated.push(record.path.clone()),
            Err(e) => {
                warn!(path = %record.path, error = %e, "skipping file");
                outcome.skipped.push(SkippedFile {
                    path: record.path.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    // Publish regardless of per-file skips; the PR carries whatever landed.
    match service
        .create_pull_request(base_branch, &outcome.branch.name, PR_TITLE, PR_BODY)
        .await
    {
        Ok(pr) => {
            progress
                .on_message(&format!("Opened pull request #{}", pr.number))
                .await;
            outcome.pull_request = Some(pr);
        }
        Err(e) => {
            warn!(error = %e, "failed to create pull request");
            outcome.publish_error = Some(e.to_string());
        }
    }

    Ok(outcome)
}

/// Materialize one change record into the working branch.
async fn reconcile_file(
    service: &dyn RepoService,
    base_branch: &str,
    work_branch: &str,
    record: &ChangeRecord,
) -> Result<()> {
    let path = record.path.as_str();
    match &record.status {
        ChangeStatus::Added => {
            let base = service.get_file(path, base_branch).await?;
            update_file(service, work_branch, path, &base.content, ADD_COMMIT_MESSAGE).await
        }
        ChangeStatus::Modified => {
            let base = service.get_file(path, base_branch).await?;
            let head = service.get_file(path, work_branch).await?;
            let merged = merged_content(
                &String::from_utf8_lossy(&base.content),
                &String::from_utf8_lossy(&head.content),
            );
            update_file(
                service,
                work_branch,
                path,
                merged.as_bytes(),
                RESOLVE_COMMIT_MESSAGE,
            )
            .await
        }
        ChangeStatus::Removed => {
            let base = service.get_file(path, base_branch).await?;
            let kept = removal_notice(&String::from_utf8_lossy(&base.content));
            update_file(
                service,
                work_branch,
                path,
                kept.as_bytes(),
                KEEP_REMOVED_COMMIT_MESSAGE,
            )
            .await
        }
        ChangeStatus::Unknown(raw) => Err(crate::error::Error::Decode(format!(
            "unrecognized change status '{raw}'"
        ))),
    }
}

/// Write content to an existing file on a branch.
///
/// The current version tag is fetched immediately before the write - a
/// stale tag would make the write fail, and tags change on every commit.
pub async fn update_file(
    service: &dyn RepoService,
    branch: &str,
    path: &str,
    content: &[u8],
    message: &str,
) -> Result<()> {
    let current = service.get_file(path, branch).await?;
    service
        .put_file(path, branch, content, message, current.sha.as_deref())
        .await?;
    Ok(())
}
