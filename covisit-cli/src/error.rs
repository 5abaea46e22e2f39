use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Opening or querying the database failed
    #[error("Database error: {0}")]
    Database(String),

    /// Storefront API failure outside a sweep
    #[error("API error: {0}")]
    Api(#[from] covisit_client::ApiError),

    /// A sweep aborted
    #[error("{0}")]
    Sweep(#[from] covisit_lib::SweepError),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }
}

impl From<covisit_db::StoreError> for CliError {
    fn from(e: covisit_db::StoreError) -> Self {
        Self::Database(e.to_string())
    }
}
