//! SQLite persistence layer for harvested catalog and review data.
//!
//! Provides schema creation, CRUD operations, query APIs, and the
//! file-backed resume cursors used by the sweeps. Backed by SQLite
//! (via rusqlite with the bundled feature).

pub mod cursor;
pub mod operations;
pub mod queries;
pub mod schema;

pub use cursor::ResumeCursor;
pub use operations::{
    StoreError, insert_entry, insert_review_aggregate, link_reviewer_entries,
    replace_similarity,
};
pub use queries::{
    StoreStats, aggregated_entry_ids, entries_for_reviewer, entry_exists, has_aggregate,
    last_aggregate_id, list_entries, reviewer_ids_for_entry, similarity_for_entry, store_stats,
};
pub use schema::{open_database, open_memory};

pub use rusqlite::Connection;
