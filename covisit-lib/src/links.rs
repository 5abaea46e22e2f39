//! Inversion of review aggregates into the reviewer -> entries index.

use std::collections::HashSet;

use covisit_db::{Connection, StoreError, aggregated_entry_ids, link_reviewer_entries,
    reviewer_ids_for_entry};

use crate::error::SweepError;

/// Outcome of one link-building pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Aggregates processed.
    pub aggregates: usize,
    /// Distinct reviewers seen across all aggregates (with repeats across
    /// aggregates counted once per aggregate).
    pub reviewers: usize,
    /// Links that did not already exist.
    pub new_links: usize,
}

/// Apply one aggregate to the link index: every distinct reviewer in it
/// gets `entry_id` added to their entries-reviewed set.
///
/// Idempotent — reapplying the same aggregate inserts nothing new. All of
/// an aggregate's links commit in one transaction, so the aggregate is
/// either fully applied or untouched. Returns the number of links created.
pub fn apply_aggregate(
    conn: &Connection,
    entry_id: i64,
    reviewer_ids: &[String],
) -> Result<usize, StoreError> {
    let distinct: Vec<&str> = reviewer_ids
        .iter()
        .map(String::as_str)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    log::debug!(
        "entry {entry_id}: linking {} distinct reviewers (of {} ids)",
        distinct.len(),
        reviewer_ids.len()
    );
    link_reviewer_entries(conn, entry_id, &distinct)
}

/// Build links for every persisted aggregate, one aggregate at a time.
///
/// Each aggregate completes before the next begins; there is no cross-
/// aggregate ordering requirement beyond that.
pub fn build_links(conn: &Connection) -> Result<LinkStats, SweepError> {
    let mut stats = LinkStats::default();

    for entry_id in aggregated_entry_ids(conn)? {
        let reviewer_ids = reviewer_ids_for_entry(conn, entry_id)?;
        let distinct = reviewer_ids.iter().collect::<HashSet<_>>().len();
        let inserted = apply_aggregate(conn, entry_id, &reviewer_ids)?;

        stats.aggregates += 1;
        stats.reviewers += distinct;
        stats.new_links += inserted;
        log::info!("entry {entry_id}: {inserted} new links ({distinct} distinct reviewers)");
    }

    Ok(stats)
}
