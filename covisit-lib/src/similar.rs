//! Co-occurrence similarity ranking.
//!
//! Two entries are similar in proportion to how many distinct reviewers
//! reviewed both. The tally for an entry walks every co-reviewer's full
//! entries-reviewed set, so the queried entry itself always shows up; it
//! is removed by identity, not by rank position.

use std::collections::{HashMap, HashSet};

use covisit_db::{
    Connection, StoreError, aggregated_entry_ids, entries_for_reviewer, replace_similarity,
    reviewer_ids_for_entry,
};

/// Outcome of a full ranking pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankStats {
    /// Entries ranked and stored.
    pub ranked: usize,
    /// Entries with an empty reviewer set (ranking stored empty).
    pub empty: usize,
}

/// Rank every other entry by the number of distinct co-reviewers shared
/// with `entry_id`, best match first.
///
/// Ties sort in unspecified order. An entry with no stored reviewer
/// sequence gets an empty ranking.
pub fn rank_similar(conn: &Connection, entry_id: i64) -> Result<Vec<(i64, u32)>, StoreError> {
    let reviewer_ids = reviewer_ids_for_entry(conn, entry_id)?;
    if reviewer_ids.is_empty() {
        return Ok(Vec::new());
    }

    let distinct: HashSet<&str> = reviewer_ids.iter().map(String::as_str).collect();

    let mut tally: HashMap<i64, u32> = HashMap::new();
    for reviewer_id in distinct {
        for other in entries_for_reviewer(conn, reviewer_id)? {
            *tally.entry(other).or_insert(0) += 1;
        }
    }

    // Exclude the queried entry by identity. (Every reviewer in the set
    // reviewed it, so it would otherwise top the ranking.)
    tally.remove(&entry_id);

    let mut ranking: Vec<(i64, u32)> = tally.into_iter().collect();
    ranking.sort_unstable_by(|a, b| b.1.cmp(&a.1));
    Ok(ranking)
}

/// Recompute and store the similarity ranking for every aggregated entry.
pub fn rank_all(conn: &Connection) -> Result<RankStats, StoreError> {
    let mut stats = RankStats::default();

    for entry_id in aggregated_entry_ids(conn)? {
        let ranking = rank_similar(conn, entry_id)?;
        if ranking.is_empty() {
            stats.empty += 1;
        }
        replace_similarity(conn, entry_id, &ranking)?;
        stats.ranked += 1;
        log::info!("entry {entry_id}: ranked {} similar entries", ranking.len());
    }

    Ok(stats)
}
