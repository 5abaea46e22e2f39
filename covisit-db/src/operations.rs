//! Write operations for all record kinds.

use covisit_client::CatalogEntry;
use rusqlite::{Connection, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Insert a catalog entry. Entries are immutable once fetched, so an
/// existing row is left untouched.
pub fn insert_entry(conn: &Connection, entry: &CatalogEntry) -> Result<(), StoreError> {
    conn.execute(
        "INSERT OR IGNORE INTO entries (id, name) VALUES (?1, ?2)",
        params![entry.id, entry.name],
    )?;
    Ok(())
}

/// Persist one entry's full reviewer-id sequence as a frozen aggregate.
///
/// The sequence is stored in page-arrival order with duplicates preserved.
/// Replaces any previous aggregate for the entry (a re-sweep supersedes
/// the old page set).
pub fn insert_review_aggregate(
    conn: &Connection,
    entry_id: i64,
    reviewer_ids: &[String],
) -> Result<(), StoreError> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "DELETE FROM aggregate_reviewers WHERE entry_id = ?1",
        params![entry_id],
    )?;
    tx.execute(
        "INSERT INTO review_aggregates (entry_id, reviewer_count)
         VALUES (?1, ?2)
         ON CONFLICT(entry_id) DO UPDATE SET
             reviewer_count = excluded.reviewer_count,
             fetched_at = datetime('now')",
        params![entry_id, reviewer_ids.len() as i64],
    )?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO aggregate_reviewers (entry_id, position, reviewer_id)
             VALUES (?1, ?2, ?3)",
        )?;
        for (position, reviewer_id) in reviewer_ids.iter().enumerate() {
            stmt.execute(params![entry_id, position as i64, reviewer_id])?;
        }
    }
    tx.commit()?;
    Ok(())
}

/// Add `entry_id` to each reviewer's entries-reviewed set.
///
/// Set semantics via `INSERT OR IGNORE`: re-applying the same aggregate is a
/// no-op. All rows for one aggregate go through a single transaction so the
/// aggregate is either fully applied or not at all. Returns the number of
/// links that did not already exist.
pub fn link_reviewer_entries<S: AsRef<str>>(
    conn: &Connection,
    entry_id: i64,
    reviewer_ids: &[S],
) -> Result<usize, StoreError> {
    let tx = conn.unchecked_transaction()?;
    let mut inserted = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO reviewer_entries (reviewer_id, entry_id) VALUES (?1, ?2)",
        )?;
        for reviewer_id in reviewer_ids {
            inserted += stmt.execute(params![reviewer_id.as_ref(), entry_id])?;
        }
    }
    tx.commit()?;
    Ok(inserted)
}

/// Replace the stored similarity ranking for an entry.
///
/// `ranking` must already be sorted by shared-reviewer count descending;
/// rank positions are assigned from the slice order.
pub fn replace_similarity(
    conn: &Connection,
    entry_id: i64,
    ranking: &[(i64, u32)],
) -> Result<(), StoreError> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "DELETE FROM similarity WHERE entry_id = ?1",
        params![entry_id],
    )?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO similarity (entry_id, other_entry_id, shared, rank)
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        for (rank, (other_id, shared)) in ranking.iter().enumerate() {
            stmt.execute(params![entry_id, other_id, *shared as i64, rank as i64])?;
        }
    }
    tx.commit()?;
    Ok(())
}
