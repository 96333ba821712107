//! Merge gating
//!
//! Summarizes check runs and review verdicts, and merges a pull request
//! only when nothing blocks it. Summarization and readiness assessment are
//! pure; [`merge_if_ready`] is the effectful driver.

use crate::error::Result;
use crate::platform::RepoService;
use crate::types::{
    CheckConclusion, CheckRun, CheckStatus, CheckSummary, MergeMethod, MergeOutcome,
    MergeReadiness, ReviewVerdict,
};
use tracing::debug;

/// Bucket check runs into the status summary.
///
/// A run that has not completed counts as pending whatever its conclusion
/// field says. Completed runs split into success, failure (including timed
/// out and cancelled), and neutral for everything else.
#[must_use]
pub fn summarize_checks(checks: &[CheckRun]) -> CheckSummary {
    let mut summary = CheckSummary {
        total: checks.len(),
        ..CheckSummary::default()
    };

    for check in checks {
        if check.status != CheckStatus::Completed {
            summary.pending += 1;
            continue;
        }
        match &check.conclusion {
            Some(CheckConclusion::Success) => summary.success += 1,
            Some(c) if c.is_failing() => summary.failure += 1,
            _ => summary.neutral += 1,
        }
    }

    summary
}

/// Assess whether a merge may proceed.
///
/// Blocks on any failed or pending check and on the absence of an
/// approving review. A PR with zero check runs gates only on approval.
#[must_use]
pub fn assess_readiness(checks: CheckSummary, reviews: &[ReviewVerdict]) -> MergeReadiness {
    let approved = reviews.iter().any(|r| *r == ReviewVerdict::Approved);

    let mut blocking_reasons = Vec::new();
    if checks.failure > 0 {
        blocking_reasons.push(format!("{} failing check(s)", checks.failure));
    }
    if checks.pending > 0 {
        blocking_reasons.push(format!("{} check(s) still running", checks.pending));
    }
    if !approved {
        blocking_reasons.push("no approving review".to_string());
    }

    MergeReadiness {
        checks,
        approved,
        blocking_reasons,
    }
}

/// What [`merge_if_ready`] decided
#[derive(Debug, Clone)]
pub enum MergeDecision {
    /// The gate passed and the merge was attempted
    Merged(MergeOutcome),
    /// The gate refused; see the blocking reasons
    Blocked(MergeReadiness),
}

/// Fetch and summarize check-run status for a pull request.
pub async fn check_status(service: &dyn RepoService, number: u64) -> Result<CheckSummary> {
    let checks = service.list_checks(number).await?;
    Ok(summarize_checks(&checks))
}

/// Merge a pull request only when all checks completed successfully and at
/// least one review approved. Never retried; a blocked gate reports its
/// reasons instead of merging.
pub async fn merge_if_ready(
    service: &dyn RepoService,
    number: u64,
    method: MergeMethod,
) -> Result<MergeDecision> {
    let summary = check_status(service, number).await?;
    let reviews = service.list_reviews(number).await?;

    let readiness = assess_readiness(summary, &reviews);
    if !readiness.can_merge() {
        debug!(number, reasons = ?readiness.blocking_reasons, "merge blocked");
        return Ok(MergeDecision::Blocked(readiness));
    }

    let outcome = service.merge_pull_request(number, method).await?;
    Ok(MergeDecision::Merged(outcome))
}
