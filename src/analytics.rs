//! Pull-request analytics over a time window
//!
//! Listing is driven by a lazy, restartable pager with an explicit page
//! bound; the summary computation is pure.

use crate::error::Result;
use crate::platform::RepoService;
use crate::types::{PrState, PrStats, PullRequestSummary};
use chrono::{Duration, Utc};
use std::collections::HashMap;
use tracing::{debug, warn};

/// How many contributors the report names.
pub const TOP_CONTRIBUTORS: usize = 5;

/// Hard bound on pagination (100 PRs per page).
pub const MAX_PAGES: u32 = 50;

/// Lazy pager over the full pull-request listing.
///
/// Pages are fetched one at a time so a caller can consume partial results;
/// the loop bound is [`MAX_PAGES`] rather than an implicit link-header
/// chain. `restart` rewinds to the first page.
#[derive(Debug, Clone)]
pub struct PrPager {
    next_page: u32,
    exhausted: bool,
}

impl PrPager {
    /// Create a pager positioned at the first page.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_page: 1,
            exhausted: false,
        }
    }

    /// Rewind to the first page.
    pub const fn restart(&mut self) {
        self.next_page = 1;
        self.exhausted = false;
    }

    /// True once the listing has been fully consumed.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Fetch the next page, or `None` once the listing is exhausted.
    pub async fn next_page(
        &mut self,
        service: &dyn RepoService,
    ) -> Result<Option<Vec<PullRequestSummary>>> {
        if self.exhausted {
            return Ok(None);
        }
        if self.next_page > MAX_PAGES {
            warn!(max_pages = MAX_PAGES, "stopping pull-request pagination at the page bound");
            self.exhausted = true;
            return Ok(None);
        }

        let page = service.list_pull_requests_page(self.next_page).await?;
        if page.is_empty() {
            self.exhausted = true;
            return Ok(None);
        }

        self.next_page += 1;
        Ok(Some(page))
    }
}

impl Default for PrPager {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect the pull requests updated within the last `window_days` days.
///
/// The listing is ordered by update time descending, so collection stops at
/// the first page that falls entirely outside the window.
pub async fn collect_recent(
    service: &dyn RepoService,
    window_days: i64,
) -> Result<Vec<PullRequestSummary>> {
    let cutoff = Utc::now() - Duration::days(window_days);
    let mut pager = PrPager::new();
    let mut recent = Vec::new();

    while let Some(page) = pager.next_page(service).await? {
        let mut any_in_window = false;
        for pr in page {
            if pr.updated_at.is_some_and(|t| t > cutoff) {
                recent.push(pr);
                any_in_window = true;
            }
        }
        if !any_in_window {
            break;
        }
    }

    debug!(window_days, count = recent.len(), "collected recent PRs");
    Ok(recent)
}

/// Summarize a window of pull requests (pure).
///
/// `comment_counts` pairs with `prs` by index. Returns `None` for an empty
/// window so callers report "no PRs" instead of dividing by zero.
#[must_use]
pub fn summarize(prs: &[PullRequestSummary], comment_counts: &[usize]) -> Option<PrStats> {
    if prs.is_empty() {
        return None;
    }

    let merged: Vec<&PullRequestSummary> =
        prs.iter().filter(|pr| pr.merged_at.is_some()).collect();
    let open = prs.iter().filter(|pr| pr.state == PrState::Open).count();

    let avg_hours_to_merge = if merged.is_empty() {
        0.0
    } else {
        let total_seconds: i64 = merged
            .iter()
            .filter_map(|pr| Some((pr.merged_at? - pr.created_at?).num_seconds()))
            .sum();
        #[allow(clippy::cast_precision_loss)]
        let avg = total_seconds as f64 / merged.len() as f64 / 3600.0;
        avg
    };

    let mut by_author: HashMap<&str, usize> = HashMap::new();
    for pr in prs {
        *by_author.entry(pr.author.as_str()).or_insert(0) += 1;
    }
    let mut top_contributors: Vec<(String, usize)> = by_author
        .into_iter()
        .map(|(author, count)| (author.to_string(), count))
        .collect();
    // Deterministic order: count descending, then name ascending.
    top_contributors.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top_contributors.truncate(TOP_CONTRIBUTORS);

    let total_comments: usize = comment_counts.iter().sum();
    #[allow(clippy::cast_precision_loss)]
    let avg_comments_per_pr = total_comments as f64 / prs.len() as f64;

    Some(PrStats {
        total: prs.len(),
        merged: merged.len(),
        open,
        avg_hours_to_merge,
        avg_comments_per_pr,
        top_contributors,
    })
}

/// Compute analytics for the last `window_days` days.
///
/// One extra comment-count read per PR, so O(n) remote calls in the number
/// of PRs in the window. A PR whose comment listing fails counts zero
/// comments rather than aborting the report.
pub async fn compute_analytics(
    service: &dyn RepoService,
    window_days: i64,
) -> Result<Option<PrStats>> {
    let recent = collect_recent(service, window_days).await?;

    let mut comment_counts = Vec::with_capacity(recent.len());
    for pr in &recent {
        comment_counts.push(service.count_comments(pr.number).await.unwrap_or(0));
    }

    Ok(summarize(&recent, &comment_counts))
}
