pub mod client;
pub mod error;
pub mod types;

pub use client::{StoreClient, StoreClientConfig, StorefrontApi};
pub use error::ApiError;
pub use types::{CatalogEntry, EntryDetail, ReviewPage};
