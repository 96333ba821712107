//! Heuristic pull-request review
//!
//! Flags oversized diffs, unconventional file names, and leftover TODO
//! markers, then posts one aggregated comment when anything was found.

use crate::error::Result;
use crate::platform::RepoService;
use crate::types::PrFile;

/// Diff size above which a file is flagged.
pub const MAX_FILE_CHANGES: u64 = 1_000_000;

/// First line of the aggregated review comment.
const COMMENT_HEADER: &str = "Automatic review found the following issues:";

/// Apply the review heuristics to a set of changed files.
///
/// A file can contribute more than one finding. Naming follows the
/// lowercase-with-underscores convention: any uppercase character or space
/// in the path is flagged.
#[must_use]
pub fn review_findings(files: &[PrFile]) -> Vec<String> {
    let mut findings = Vec::new();

    for file in files {
        if file.changes > MAX_FILE_CHANGES {
            findings.push(format!(
                "File {} is too large ({} bytes)",
                file.path, file.changes
            ));
        }

        if file.path.chars().any(char::is_uppercase) || file.path.contains(' ') {
            findings.push(format!(
                "File {} doesn't follow naming conventions",
                file.path
            ));
        }

        if file.patch.as_deref().is_some_and(|p| p.contains("TODO")) {
            findings.push(format!("File {} contains TODO comments", file.path));
        }
    }

    findings
}

/// Render the aggregated review comment.
#[must_use]
pub fn findings_comment(findings: &[String]) -> String {
    let mut comment = format!("{COMMENT_HEADER}\n");
    for finding in findings {
        comment.push_str(&format!("- {finding}\n"));
    }
    comment
}

/// Result of a review pass
#[derive(Debug, Clone)]
pub struct ReviewReport {
    /// Findings, in file order
    pub findings: Vec<String>,
    /// Whether a comment was posted
    pub commented: bool,
}

/// Review a pull request and comment on it when issues were found.
pub async fn review_pull_request(service: &dyn RepoService, number: u64) -> Result<ReviewReport> {
    let files = service.list_changed_files(number).await?;
    let findings = review_findings(&files);

    if findings.is_empty() {
        return Ok(ReviewReport {
            findings,
            commented: false,
        });
    }

    service
        .add_comment(number, &findings_comment(&findings))
        .await?;

    Ok(ReviewReport {
        findings,
        commented: true,
    })
}
