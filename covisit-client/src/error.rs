/// Errors that can occur while talking to the storefront API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate limited by the storefront API (HTTP {status})")]
    RateLimited { status: u16 },

    #[error("Failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Catalog listing requires an API key (set --api-key or COVISIT_API_KEY)")]
    MissingApiKey,
}

impl ApiError {
    /// True when the remote signalled overload and the caller should cool
    /// down and retry the same request.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, ApiError::RateLimited { .. })
    }
}
