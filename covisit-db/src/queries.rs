//! Read-side query APIs.

use covisit_client::CatalogEntry;
use rusqlite::{Connection, params};

use crate::operations::StoreError;

/// Whether a catalog entry has already been persisted.
pub fn entry_exists(conn: &Connection, id: i64) -> Result<bool, StoreError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM entries WHERE id = ?1)",
        params![id],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// All persisted catalog entries in ascending id order.
pub fn list_entries(conn: &Connection) -> Result<Vec<CatalogEntry>, StoreError> {
    let mut stmt = conn.prepare("SELECT id, name FROM entries ORDER BY id ASC")?;
    let rows = stmt.query_map([], |row| {
        Ok(CatalogEntry {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Whether a review aggregate exists for an entry.
pub fn has_aggregate(conn: &Connection, entry_id: i64) -> Result<bool, StoreError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM review_aggregates WHERE entry_id = ?1)",
        params![entry_id],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Entry ids with a persisted review aggregate, ascending.
pub fn aggregated_entry_ids(conn: &Connection) -> Result<Vec<i64>, StoreError> {
    let mut stmt =
        conn.prepare("SELECT entry_id FROM review_aggregates ORDER BY entry_id ASC")?;
    let rows = stmt.query_map([], |row| row.get(0))?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// The highest entry id with a persisted aggregate, if any.
///
/// Pre-cursor databases tracked review-sweep progress implicitly through
/// this value; it now only seeds a missing cursor file and feeds `stats`.
pub fn last_aggregate_id(conn: &Connection) -> Result<Option<i64>, StoreError> {
    let id: Option<i64> = conn.query_row(
        "SELECT MAX(entry_id) FROM review_aggregates",
        [],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// An entry's frozen reviewer-id sequence in page-arrival order.
pub fn reviewer_ids_for_entry(conn: &Connection, entry_id: i64) -> Result<Vec<String>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT reviewer_id FROM aggregate_reviewers
         WHERE entry_id = ?1 ORDER BY position ASC",
    )?;
    let rows = stmt.query_map(params![entry_id], |row| row.get(0))?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// The set of entries a reviewer has reviewed.
pub fn entries_for_reviewer(conn: &Connection, reviewer_id: &str) -> Result<Vec<i64>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT entry_id FROM reviewer_entries WHERE reviewer_id = ?1 ORDER BY entry_id ASC",
    )?;
    let rows = stmt.query_map(params![reviewer_id], |row| row.get(0))?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Stored similarity ranking for an entry, best match first.
pub fn similarity_for_entry(
    conn: &Connection,
    entry_id: i64,
) -> Result<Vec<(i64, u32)>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT other_entry_id, shared FROM similarity
         WHERE entry_id = ?1 ORDER BY rank ASC",
    )?;
    let rows = stmt.query_map(params![entry_id], |row| Ok((row.get(0)?, row.get(1)?)))?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

/// Row counts across the store, for the `stats` command.
#[derive(Debug, Clone, Default)]
pub struct StoreStats {
    pub entries: u64,
    pub aggregates: u64,
    pub distinct_reviewers: u64,
    pub reviewer_links: u64,
    pub ranked_entries: u64,
}

pub fn store_stats(conn: &Connection) -> Result<StoreStats, StoreError> {
    let count = |sql: &str| -> Result<u64, rusqlite::Error> {
        conn.query_row(sql, [], |row| row.get::<_, i64>(0))
            .map(|n| n as u64)
    };
    Ok(StoreStats {
        entries: count("SELECT COUNT(*) FROM entries")?,
        aggregates: count("SELECT COUNT(*) FROM review_aggregates")?,
        distinct_reviewers: count("SELECT COUNT(DISTINCT reviewer_id) FROM reviewer_entries")?,
        reviewer_links: count("SELECT COUNT(*) FROM reviewer_entries")?,
        ranked_entries: count("SELECT COUNT(DISTINCT entry_id) FROM similarity")?,
    })
}
