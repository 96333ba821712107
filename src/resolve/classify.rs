//! Change classifier

use crate::error::Result;
use crate::platform::RepoService;
use crate::types::ChangeRecord;

/// Classify the changes between two refs as per-file change records.
///
/// A thin projection over the remote comparison. An empty result means the
/// workflow has nothing to reconcile and terminates successfully without
/// creating a pull request.
pub async fn classify_changes(
    service: &dyn RepoService,
    base: &str,
    head: &str,
) -> Result<Vec<ChangeRecord>> {
    service.compare(base, head).await
}
