use std::time::Duration;

use crate::error::ApiError;
use crate::types::{
    AppListResponse, CatalogEntry, EntryDetail, EntryDetailsResponse, ReviewPage,
    ReviewPageResponse,
};

const DEFAULT_STORE_BASE: &str = "https://store.steampowered.com";
const DEFAULT_API_BASE: &str = "https://api.steampowered.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const REVIEWS_PER_PAGE: u32 = 100;

/// Remote storefront endpoints used by the pipeline.
///
/// The pipeline only depends on this trait, so sweeps can be driven by
/// scripted fakes in tests. Implementations must not sleep or back off
/// internally; pacing and rate-limit cooldowns belong to the caller.
pub trait StorefrontApi {
    /// Fetch the full catalog listing (every entry id + name).
    fn catalog_listing(
        &self,
    ) -> impl Future<Output = Result<Vec<CatalogEntry>, ApiError>> + Send;

    /// Fetch the category classification for a single entry.
    fn entry_detail(&self, id: i64) -> impl Future<Output = Result<EntryDetail, ApiError>> + Send;

    /// Fetch one page of reviews for an entry. `cursor` is `"*"` for the
    /// first page, then the previous page's `next_cursor`.
    fn review_page(
        &self,
        id: i64,
        cursor: &str,
    ) -> impl Future<Output = Result<ReviewPage, ApiError>> + Send;
}

/// Configuration for [`StoreClient`].
#[derive(Debug, Clone)]
pub struct StoreClientConfig {
    /// Base URL for the store site (detail + review endpoints).
    pub store_base: String,
    /// Base URL for the web API (catalog listing endpoint).
    pub api_base: String,
    /// API key for the catalog listing endpoint. Detail and review
    /// endpoints are unauthenticated.
    pub api_key: Option<String>,
}

impl Default for StoreClientConfig {
    fn default() -> Self {
        Self {
            store_base: DEFAULT_STORE_BASE.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
        }
    }
}

/// HTTP client for the storefront API.
pub struct StoreClient {
    http: reqwest::Client,
    config: StoreClientConfig,
}

impl StoreClient {
    pub fn new(config: StoreClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, config })
    }

    /// Issue a GET and return the body text, mapping any non-2xx status to
    /// [`ApiError::RateLimited`]. The storefront signals throttling with
    /// plain 429s but has been observed returning other non-2xx statuses
    /// under load, so all of them are treated as a cool-down signal.
    async fn get_text(&self, url: &str, query: &[(&str, &str)]) -> Result<String, ApiError> {
        let resp = self.http.get(url).query(query).send().await?;
        let status = resp.status();
        if !status.is_success() {
            log::debug!("GET {url} -> HTTP {status}");
            return Err(ApiError::RateLimited {
                status: status.as_u16(),
            });
        }
        Ok(resp.text().await?)
    }
}

impl StorefrontApi for StoreClient {
    async fn catalog_listing(&self) -> Result<Vec<CatalogEntry>, ApiError> {
        let key = self.config.api_key.as_deref().ok_or(ApiError::MissingApiKey)?;
        let url = format!("{}/ISteamApps/GetAppList/v0002/", self.config.api_base);
        let text = self
            .get_text(&url, &[("key", key), ("format", "json")])
            .await?;
        let parsed: AppListResponse = serde_json::from_str(&text)?;
        Ok(parsed.applist.apps.into_iter().map(Into::into).collect())
    }

    async fn entry_detail(&self, id: i64) -> Result<EntryDetail, ApiError> {
        let url = format!("{}/api/appdetails", self.config.store_base);
        let id_str = id.to_string();
        let text = self.get_text(&url, &[("appids", &id_str)]).await?;
        let parsed: EntryDetailsResponse = serde_json::from_str(&text)?;

        let envelope = parsed
            .get(&id_str)
            .ok_or_else(|| ApiError::Api(format!("detail response missing entry {id}")))?;
        // success:false means the store has no details for this id; it is
        // simply not a game rather than an error.
        let kind = envelope
            .data
            .as_ref()
            .map(|d| d.kind.clone())
            .unwrap_or_default();
        Ok(EntryDetail { kind })
    }

    async fn review_page(&self, id: i64, cursor: &str) -> Result<ReviewPage, ApiError> {
        let url = format!("{}/appreviews/{id}", self.config.store_base);
        let per_page = REVIEWS_PER_PAGE.to_string();
        let text = self
            .get_text(
                &url,
                &[
                    ("json", "1"),
                    ("filter", "all"),
                    ("purchase_type", "all"),
                    ("review_type", "all"),
                    ("language", "all"),
                    ("day_range", "5100"),
                    ("num_per_page", &per_page),
                    ("cursor", cursor),
                ],
            )
            .await?;
        let parsed: ReviewPageResponse = serde_json::from_str(&text).map_err(|e| {
            ApiError::Api(format!(
                "failed to parse review page for {id}: {e}. Response: {}",
                truncate_to_boundary(&text, 200)
            ))
        })?;
        Ok(parsed.into_page())
    }
}

/// Truncate to at most `max` bytes without splitting a UTF-8 character.
/// Error bodies are not guaranteed to be ASCII (the store serves localized
/// HTML error pages), so a raw byte slice could land mid-character.
fn truncate_to_boundary(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_are_kept_whole() {
        assert_eq!(truncate_to_boundary("not json", 200), "not json");
    }

    #[test]
    fn truncation_backs_off_to_a_char_boundary() {
        // 'é' occupies bytes 199..201, straddling the limit.
        let body = format!("{}é trailing html", "a".repeat(199));
        let snippet = truncate_to_boundary(&body, 200);
        assert_eq!(snippet, "a".repeat(199));
    }

    #[test]
    fn truncation_at_an_exact_boundary_keeps_the_char() {
        let body = format!("{}é", "a".repeat(198));
        assert_eq!(truncate_to_boundary(&body, 200), body);
    }
}
