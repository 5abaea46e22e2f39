use std::collections::HashMap;

use serde::Deserialize;

/// One catalog entry from the storefront app list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: i64,
    pub name: String,
}

/// Classification result from the entry-detail endpoint.
#[derive(Debug, Clone)]
pub struct EntryDetail {
    /// Category string as reported by the store (e.g. "game", "dlc", "demo").
    pub kind: String,
}

impl EntryDetail {
    /// Only entries classified as games are kept by the catalog sweep.
    pub fn is_game(&self) -> bool {
        self.kind == "game"
    }
}

/// One page of reviews for an entry.
#[derive(Debug, Clone)]
pub struct ReviewPage {
    /// Reviewer identifiers in page order. May overlap with other pages.
    pub reviewer_ids: Vec<String>,
    /// Total review count reported by the page's query summary.
    pub total_reviews: u64,
    /// Opaque cursor for the next page. A repeated cursor means end-of-stream.
    pub next_cursor: String,
}

// ── Wire formats ────────────────────────────────────────────────────────────

/// Top-level response wrapper from the app-list endpoint.
#[derive(Debug, Deserialize)]
pub struct AppListResponse {
    pub applist: AppList,
}

#[derive(Debug, Deserialize)]
pub struct AppList {
    pub apps: Vec<AppListItem>,
}

#[derive(Debug, Deserialize)]
pub struct AppListItem {
    pub appid: i64,
    #[serde(default)]
    pub name: String,
}

impl From<AppListItem> for CatalogEntry {
    fn from(item: AppListItem) -> Self {
        CatalogEntry {
            id: item.appid,
            name: item.name,
        }
    }
}

/// The detail endpoint keys its response by the queried id as a string.
pub type EntryDetailsResponse = HashMap<String, EntryDetailsEnvelope>;

#[derive(Debug, Deserialize)]
pub struct EntryDetailsEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<EntryDetailsData>,
}

#[derive(Debug, Deserialize)]
pub struct EntryDetailsData {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: String,
}

/// Top-level response from the review endpoint.
#[derive(Debug, Deserialize)]
pub struct ReviewPageResponse {
    pub query_summary: QuerySummary,
    #[serde(default)]
    pub reviews: Vec<ReviewItem>,
    #[serde(default)]
    pub cursor: String,
}

#[derive(Debug, Deserialize)]
pub struct QuerySummary {
    #[serde(default)]
    pub total_reviews: u64,
}

#[derive(Debug, Deserialize)]
pub struct ReviewItem {
    pub author: ReviewAuthor,
}

#[derive(Debug, Deserialize)]
pub struct ReviewAuthor {
    pub steamid: String,
}

impl ReviewPageResponse {
    pub fn into_page(self) -> ReviewPage {
        ReviewPage {
            reviewer_ids: self.reviews.into_iter().map(|r| r.author.steamid).collect(),
            total_reviews: self.query_summary.total_reviews,
            next_cursor: self.cursor,
        }
    }
}
