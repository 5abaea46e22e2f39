//! Cursor-based pagination over one entry's reviews.

use std::collections::HashSet;

use covisit_client::{ApiError, StorefrontApi};
use tokio::time::Duration;

/// Cursor for the first page of any entry's review stream.
pub const WILDCARD_CURSOR: &str = "*";

/// Pagination thresholds and pacing.
#[derive(Debug, Clone)]
pub struct PageOptions {
    /// Entries whose total review count is below this are not worth
    /// paginating; the sweep gets an empty sequence back immediately.
    pub popularity_floor: u64,
    /// Fixed delay between successive page requests for one entry.
    pub page_delay: Duration,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            popularity_floor: 2500,
            page_delay: Duration::from_secs(3),
        }
    }
}

/// Fetch the full reviewer-id sequence for one entry.
///
/// Requests the first page with the wildcard cursor, then follows each
/// page's `next_cursor` until a cursor repeats — the API's pagination is
/// cursor-stable, so a repeated token signals end-of-stream. Reviewer ids
/// are accumulated in page-arrival order; overlapping pages are not
/// deduplicated here.
///
/// A rate-limit response propagates immediately. This function never backs
/// off; cooldown policy belongs to the sweep driving it.
pub async fn fetch_reviewer_ids<A: StorefrontApi>(
    api: &A,
    entry_id: i64,
    opts: &PageOptions,
) -> Result<Vec<String>, ApiError> {
    let mut seen_cursors = HashSet::new();
    seen_cursors.insert(WILDCARD_CURSOR.to_string());

    let first = api.review_page(entry_id, WILDCARD_CURSOR).await?;
    if first.total_reviews < opts.popularity_floor {
        log::debug!(
            "entry {entry_id}: {} reviews, below floor of {}, skipping pagination",
            first.total_reviews,
            opts.popularity_floor
        );
        return Ok(Vec::new());
    }

    log::info!(
        "entry {entry_id}: paginating {} reviews",
        first.total_reviews
    );

    let mut reviewer_ids = first.reviewer_ids;
    let mut cursor = first.next_cursor;

    while seen_cursors.insert(cursor.clone()) {
        tokio::time::sleep(opts.page_delay).await;
        let page = api.review_page(entry_id, &cursor).await?;
        log::debug!(
            "entry {entry_id}: fetched {} reviewers (cursor {cursor})",
            page.reviewer_ids.len()
        );
        reviewer_ids.extend(page.reviewer_ids);
        cursor = page.next_cursor;
    }

    log::info!(
        "entry {entry_id}: collected {} reviewer ids across {} pages",
        reviewer_ids.len(),
        seen_cursors.len()
    );
    Ok(reviewer_ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{ScriptedApi, page};

    fn zero_delay() -> PageOptions {
        PageOptions {
            popularity_floor: 2500,
            page_delay: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn stops_when_a_cursor_repeats() {
        // Page served for "*" points at "a"; the page served for "a" points
        // at "a" again, so the third request must never be issued.
        let api = ScriptedApi::new().with_pages(
            1,
            vec![page(&["u1", "u2"], 5000, "a"), page(&["u3"], 5000, "a")],
        );

        let ids = fetch_reviewer_ids(&api, 1, &zero_delay()).await.unwrap();
        assert_eq!(ids, vec!["u1", "u2", "u3"]);
        assert_eq!(api.review_calls(), 2);
    }

    #[tokio::test]
    async fn below_popularity_floor_returns_empty_without_more_requests() {
        let api = ScriptedApi::new().with_pages(7, vec![page(&["u1"], 50, "a")]);

        let ids = fetch_reviewer_ids(&api, 7, &zero_delay()).await.unwrap();
        assert!(ids.is_empty());
        assert_eq!(api.review_calls(), 1);
    }

    #[tokio::test]
    async fn duplicates_across_pages_are_preserved() {
        let api = ScriptedApi::new().with_pages(
            1,
            vec![
                page(&["u1", "u2"], 9000, "a"),
                page(&["u2", "u3"], 9000, "b"),
                page(&[], 9000, "b"),
            ],
        );

        let ids = fetch_reviewer_ids(&api, 1, &zero_delay()).await.unwrap();
        assert_eq!(ids, vec!["u1", "u2", "u2", "u3"]);
    }

    #[tokio::test]
    async fn rate_limit_propagates_immediately() {
        let api = ScriptedApi::new().with_rate_limited_reviews(1);

        let err = fetch_reviewer_ids(&api, 1, &zero_delay()).await.unwrap_err();
        assert!(err.is_rate_limit());
    }
}
