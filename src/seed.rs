//! Repository and file seeding workflows
//!
//! Two small chores that share the branch provisioner and the file-update
//! helper: ensuring a repository and a seed file exist, and pushing the
//! same content to several files on a fresh branch.

use crate::error::{Error, Result};
use crate::platform::RepoService;
use crate::resolve::plan::{ADD_COMMIT_MESSAGE, SkippedFile};
use crate::resolve::{ProgressCallback, provision_branch, update_file};
use tracing::warn;

/// Branch prefix for the single-file update flow.
pub const SEED_BRANCH_PREFIX: &str = "feature-update-file";

/// Branch prefix for the multi-file update flow.
pub const MULTI_UPDATE_BRANCH_PREFIX: &str = "feature-multi-update";

/// Default content written when creating the seed file.
pub const DEFAULT_INITIAL_CONTENT: &str = "This is the initial content of the file.";

/// Default content written when updating the seed file.
pub const DEFAULT_UPDATED_CONTENT: &str = "This is the updated content of the file.";

/// Default content for the multi-file update flow.
pub const DEFAULT_MULTI_CONTENT: &str = "This is the updated content for multiple files.";

/// What the seed workflow did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The repository was missing and has been created, along with the file
    RepoCreated {
        /// Path of the file written to the fresh repository
        path: String,
    },
    /// The file was missing and has been created on the base branch
    FileCreated {
        /// Path of the created file
        path: String,
    },
    /// The file existed and was updated on a fresh working branch
    FileUpdated {
        /// Path of the updated file
        path: String,
        /// Name of the working branch carrying the update
        branch: String,
    },
}

/// Ensure the repository and a seed file exist.
///
/// Creates the repository when it is missing. When the file already exists
/// it is updated on a freshly provisioned working branch; otherwise it is
/// created directly on the base branch.
pub async fn ensure_seed_file(
    service: &dyn RepoService,
    path: &str,
    base_branch: &str,
    initial_content: &str,
    updated_content: &str,
    progress: &dyn ProgressCallback,
) -> Result<SeedOutcome> {
    let repo_was_missing = if service.repo_exists().await? {
        false
    } else {
        progress
            .on_message("Repository does not exist; creating it")
            .await;
        service.create_repo().await?;
        true
    };

    let file_exists = if repo_was_missing {
        false
    } else {
        match service.get_file(path, base_branch).await {
            Ok(_) => true,
            Err(e) if e.is_not_found() => false,
            Err(e) => return Err(e),
        }
    };

    if file_exists {
        let branch = provision_branch(service, base_branch, SEED_BRANCH_PREFIX).await?;
        progress
            .on_message(&format!("Created working branch {}", branch.name))
            .await;
        update_file(
            service,
            &branch.name,
            path,
            updated_content.as_bytes(),
            "Update file",
        )
        .await?;
        return Ok(SeedOutcome::FileUpdated {
            path: path.to_string(),
            branch: branch.name,
        });
    }

    // No branch ref here: this path also runs against a repository that
    // was created moments ago and has no branches yet.
    service
        .create_file(path, initial_content.as_bytes(), ADD_COMMIT_MESSAGE)
        .await?;

    if repo_was_missing {
        Ok(SeedOutcome::RepoCreated {
            path: path.to_string(),
        })
    } else {
        Ok(SeedOutcome::FileCreated {
            path: path.to_string(),
        })
    }
}

/// What the multi-file update did
#[derive(Debug, Clone)]
pub struct MultiUpdateOutcome {
    /// The working branch the files were written to
    pub branch: String,
    /// Files updated successfully
    pub updated: Vec<String>,
    /// Files skipped with their reasons
    pub skipped: Vec<SkippedFile>,
}

/// Write the same content to each path on a freshly provisioned branch.
///
/// Per-file failures are recorded and skipped; the remaining files still
/// get written.
pub async fn update_files(
    service: &dyn RepoService,
    base_branch: &str,
    paths: &[String],
    content: &str,
    progress: &dyn ProgressCallback,
) -> Result<MultiUpdateOutcome> {
    if paths.is_empty() {
        return Err(Error::Internal("no file paths given".to_string()));
    }

    let branch = provision_branch(service, base_branch, MULTI_UPDATE_BRANCH_PREFIX).await?;
    progress
        .on_message(&format!("Created working branch {}", branch.name))
        .await;

    let mut outcome = MultiUpdateOutcome {
        branch: branch.name.clone(),
        updated: Vec::new(),
        skipped: Vec::new(),
    };

    for path in paths {
        progress.on_message(&format!("Updating {path}")).await;
        let message = format!("Update file {path}");
        match update_file(service, &branch.name, path, content.as_bytes(), &message).await {
            Ok(()) => outcome.updated.push(path.clone()),
            Err(e) => {
                warn!(path = %path, error = %e, "skipping file");
                outcome.skipped.push(SkippedFile {
                    path: path.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(outcome)
}
