use covisit_client::ApiError;
use covisit_db::StoreError;

/// Errors that can abort a sweep.
///
/// Rate limiting never surfaces here — it is absorbed by the per-entry
/// retry loop. What escalates is exhausted transport retries, store
/// failures, and cursor I/O, all of which are fatal to the run.
#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    #[error("Storefront API error: {0}")]
    Api(#[from] ApiError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Cursor I/O error: {0}")]
    Cursor(#[from] std::io::Error),

    #[error("Giving up after {attempts} failed attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: ApiError,
    },
}
