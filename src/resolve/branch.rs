//! Branch provisioner

use crate::error::Result;
use crate::platform::RepoService;
use crate::types::Branch;
use chrono::Utc;
use tracing::debug;

/// Prefix for working branches when the caller does not choose one.
pub const DEFAULT_BRANCH_PREFIX: &str = "feature-branch";

/// Create a uniquely named working branch from the base branch's head.
///
/// The name is `<prefix>-<unix-timestamp>`, unique in practice within a
/// run. Failure here is fatal to the whole workflow: there is no fallback
/// base branch, and nothing may be written before the ref exists.
pub async fn provision_branch(
    service: &dyn RepoService,
    base_branch: &str,
    prefix: &str,
) -> Result<Branch> {
    let base_sha = service.branch_head(base_branch).await?;

    let name = format!("{prefix}-{}", Utc::now().timestamp());
    debug!(base_branch, branch = %name, "provisioning working branch");

    service.create_branch(&name, &base_sha).await
}
