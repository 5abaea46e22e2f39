//! Scripted [`StorefrontApi`] fake for pipeline tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use covisit_client::{ApiError, CatalogEntry, EntryDetail, ReviewPage, client::StorefrontApi};

/// Shorthand for building a scripted review page.
pub fn page(reviewer_ids: &[&str], total_reviews: u64, next_cursor: &str) -> ReviewPage {
    ReviewPage {
        reviewer_ids: reviewer_ids.iter().map(|s| s.to_string()).collect(),
        total_reviews,
        next_cursor: next_cursor.to_string(),
    }
}

/// Build `n` review pages of distinct reviewer ids, chained by cursors
/// `p1..pn`, with the final page repeating its own cursor.
pub fn reviewer_pages(total: usize, per_page: usize, total_reviews: u64) -> Vec<ReviewPage> {
    let mut pages = Vec::new();
    let mut next_id = 0;
    let page_count = total.div_ceil(per_page);
    for p in 0..page_count {
        let count = per_page.min(total - next_id);
        let ids: Vec<String> = (0..count)
            .map(|_| {
                next_id += 1;
                format!("u{next_id}")
            })
            .collect();
        let cursor = if p + 1 < page_count {
            format!("p{}", p + 1)
        } else {
            format!("p{p}")
        };
        pages.push(ReviewPage {
            reviewer_ids: ids,
            total_reviews,
            next_cursor: cursor,
        });
    }
    pages
}

/// A storefront fake driven by pre-scripted responses, with call counting.
#[derive(Default)]
pub struct ScriptedApi {
    listing: Vec<CatalogEntry>,
    details: HashMap<i64, String>,
    pages: Mutex<HashMap<i64, VecDeque<ReviewPage>>>,
    /// Number of rate-limit responses to serve before real detail lookups.
    detail_rate_limits: Mutex<HashMap<i64, u32>>,
    /// Number of rate-limit responses to serve before real review pages.
    review_rate_limits: Mutex<HashMap<i64, u32>>,
    detail_calls: AtomicU32,
    review_calls: AtomicU32,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listing(mut self, entries: &[(i64, &str)]) -> Self {
        self.listing = entries
            .iter()
            .map(|(id, name)| CatalogEntry {
                id: *id,
                name: name.to_string(),
            })
            .collect();
        self
    }

    pub fn with_detail(mut self, id: i64, kind: &str) -> Self {
        self.details.insert(id, kind.to_string());
        self
    }

    pub fn with_pages(self, id: i64, pages: Vec<ReviewPage>) -> Self {
        self.pages.lock().unwrap().insert(id, pages.into());
        self
    }

    /// Serve `n` rate-limit errors for this entry's detail lookups before
    /// answering normally.
    pub fn with_rate_limited_details(self, id: i64, n: u32) -> Self {
        self.detail_rate_limits.lock().unwrap().insert(id, n);
        self
    }

    /// Serve rate-limit errors for every review request for this entry.
    pub fn with_rate_limited_reviews(self, id: i64) -> Self {
        self.review_rate_limits.lock().unwrap().insert(id, u32::MAX);
        self
    }

    /// Serve `n` rate-limit errors for this entry's review requests, then
    /// answer from the scripted pages.
    pub fn with_review_rate_limits(self, id: i64, n: u32) -> Self {
        self.review_rate_limits.lock().unwrap().insert(id, n);
        self
    }

    pub fn detail_calls(&self) -> u32 {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn review_calls(&self) -> u32 {
        self.review_calls.load(Ordering::SeqCst)
    }
}

impl StorefrontApi for ScriptedApi {
    async fn catalog_listing(&self) -> Result<Vec<CatalogEntry>, ApiError> {
        Ok(self.listing.clone())
    }

    async fn entry_detail(&self, id: i64) -> Result<EntryDetail, ApiError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);

        let mut limits = self.detail_rate_limits.lock().unwrap();
        if let Some(n) = limits.get_mut(&id)
            && *n > 0
        {
            *n -= 1;
            return Err(ApiError::RateLimited { status: 429 });
        }
        drop(limits);

        let kind = self.details.get(&id).cloned().unwrap_or_default();
        Ok(EntryDetail { kind })
    }

    async fn review_page(&self, id: i64, cursor: &str) -> Result<ReviewPage, ApiError> {
        self.review_calls.fetch_add(1, Ordering::SeqCst);

        let mut limits = self.review_rate_limits.lock().unwrap();
        if let Some(n) = limits.get_mut(&id)
            && *n > 0
        {
            *n = n.saturating_sub(1);
            return Err(ApiError::RateLimited { status: 429 });
        }
        drop(limits);

        let mut pages = self.pages.lock().unwrap();
        let queue = pages
            .get_mut(&id)
            .unwrap_or_else(|| panic!("no pages scripted for entry {id}"));
        let page = queue
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected review request for entry {id} (cursor {cursor})"));
        Ok(page)
    }
}
