pub(crate) mod catalog;
pub(crate) mod links;
pub(crate) mod rank;
pub(crate) mod reviews;
pub(crate) mod stats;

use std::path::Path;

use covisit_client::{StoreClient, StoreClientConfig};
use covisit_db::Connection;

use crate::ApiArgs;
use crate::error::CliError;

pub(crate) const API_KEY_ENV: &str = "COVISIT_API_KEY";

pub(crate) fn open_store(db_path: &Path) -> Result<Connection, CliError> {
    covisit_db::open_database(db_path)
        .map_err(|e| CliError::database(format!("Failed to open {}: {e}", db_path.display())))
}

pub(crate) fn build_client(args: &ApiArgs) -> Result<StoreClient, CliError> {
    let mut config = StoreClientConfig::default();
    if let Some(base) = &args.store_base {
        config.store_base = base.clone();
    }
    if let Some(base) = &args.api_base {
        config.api_base = base.clone();
    }
    config.api_key = args
        .api_key
        .clone()
        .or_else(|| std::env::var(API_KEY_ENV).ok());

    Ok(StoreClient::new(config)?)
}
