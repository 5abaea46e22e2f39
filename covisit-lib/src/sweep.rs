//! Checkpointed sweeps over the catalog listing and the saved game list.
//!
//! Both sweeps share the same per-entry shape: skip work that is already
//! done, fetch, persist if the entry qualifies, then advance the resume
//! cursor. The cursor only ever reflects fully completed entries, so a
//! crash loses at most the in-flight entry.

use covisit_client::{ApiError, CatalogEntry, StorefrontApi};
use covisit_db::{Connection, ResumeCursor};
use covisit_db::{
    insert_entry, insert_review_aggregate, last_aggregate_id, list_entries,
};
use tokio::time::Duration;

use crate::error::SweepError;
use crate::paginate::{self, PageOptions};

/// Knobs for the catalog sweep.
#[derive(Debug, Clone)]
pub struct CatalogSweepOptions {
    /// Cooldown before retrying a rate-limited detail lookup.
    pub rate_limit_cooldown: Duration,
    /// Pacing delay after each successful detail lookup.
    pub detail_delay: Duration,
    /// Transport/decode failures tolerated per entry before the run aborts.
    pub transport_attempts: u32,
    /// Stop after visiting this many entries (None = whole listing).
    pub limit: Option<usize>,
}

impl Default for CatalogSweepOptions {
    fn default() -> Self {
        Self {
            rate_limit_cooldown: Duration::from_secs(150),
            detail_delay: Duration::from_secs(1),
            transport_attempts: 3,
            limit: None,
        }
    }
}

/// Outcome of one catalog sweep, returned to the caller instead of any
/// process-wide counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSweepStats {
    /// Entries for which a detail lookup completed this run.
    pub visited: usize,
    /// Entries classified as games and persisted.
    pub saved: usize,
    /// Entries skipped because they were below the cursor or already stored.
    pub skipped: usize,
}

/// Knobs for the review sweep.
#[derive(Debug, Clone)]
pub struct ReviewSweepOptions {
    /// Cooldown before retrying a rate-limited entry from the first page.
    pub rate_limit_cooldown: Duration,
    /// An aggregate is persisted only when strictly more than this many
    /// reviewer ids were collected.
    pub persist_floor: usize,
    /// Pacing delay after each persisted aggregate.
    pub persist_delay: Duration,
    /// Transport/decode failures tolerated per entry before the run aborts.
    pub transport_attempts: u32,
    pub page: PageOptions,
    /// Stop after visiting this many entries (None = all saved games).
    pub limit: Option<usize>,
}

impl Default for ReviewSweepOptions {
    fn default() -> Self {
        Self {
            rate_limit_cooldown: Duration::from_secs(15 * 60),
            persist_floor: 100,
            persist_delay: Duration::from_secs(5 * 60),
            transport_attempts: 3,
            page: PageOptions::default(),
            limit: None,
        }
    }
}

/// Outcome of one review sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewSweepStats {
    /// Entries whose pagination completed this run.
    pub visited: usize,
    /// Entries that cleared the persistence floor and were stored.
    pub persisted: usize,
    /// Entries visited but left unstored (never revisited).
    pub below_floor: usize,
}

/// Retry one entry's fetch until it succeeds.
///
/// Rate limiting retries forever with the fixed cooldown — the remote will
/// eventually let us through, and skipping the entry would punch a hole in
/// the sweep. Transport and decode failures also sleep the cooldown but are
/// bounded by `attempts`, after which the run aborts.
async fn fetch_with_retry<T, F, Fut>(
    what: &str,
    op: F,
    cooldown: Duration,
    attempts: u32,
) -> Result<T, SweepError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut failures = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_rate_limit() => {
                log::warn!("{what}: rate limited, cooling down for {}s", cooldown.as_secs());
                tokio::time::sleep(cooldown).await;
            }
            Err(e) => {
                failures += 1;
                if failures >= attempts {
                    return Err(SweepError::RetriesExhausted {
                        attempts: failures,
                        source: e,
                    });
                }
                log::warn!("{what}: attempt {failures}/{attempts} failed: {e}");
                tokio::time::sleep(cooldown).await;
            }
        }
    }
}

/// Sweep the full catalog listing once, persisting the entries the store
/// classifies as games.
///
/// Resumable: entries at or below the cursor, and entries already stored,
/// are skipped without a detail lookup. The cursor advances after every
/// completed lookup whether or not the entry qualified — it tracks
/// "visited", not "kept".
pub async fn sweep_catalog<A: StorefrontApi>(
    api: &A,
    conn: &Connection,
    cursor: &ResumeCursor,
    opts: &CatalogSweepOptions,
) -> Result<CatalogSweepStats, SweepError> {
    let mut listing = api.catalog_listing().await?;
    // The listing is not guaranteed sorted; cursor-based resume needs a
    // stable ascending order.
    listing.sort_unstable_by_key(|e| e.id);
    let total = listing.len();
    log::info!("catalog sweep: {total} entries in listing");

    let mut done_through = cursor.get()?;
    let mut stats = CatalogSweepStats::default();

    for (i, entry) in listing.into_iter().enumerate() {
        if entry.id <= done_through || covisit_db::entry_exists(conn, entry.id)? {
            stats.skipped += 1;
            continue;
        }

        let detail = fetch_with_retry(
            &format!("detail lookup for {} ({})", entry.name, entry.id),
            || api.entry_detail(entry.id),
            opts.rate_limit_cooldown,
            opts.transport_attempts,
        )
        .await?;

        stats.visited += 1;
        if detail.is_game() {
            insert_entry(conn, &entry)?;
            stats.saved += 1;
            log::info!("saved game {} ({}), {} saved so far", entry.name, entry.id, stats.saved);
        }

        cursor.set(entry.id)?;
        done_through = entry.id;

        log::debug!("catalog sweep: {:.2}% done", (i as f32 / total as f32) * 100.0);

        if opts.limit.is_some_and(|max| stats.visited >= max) {
            log::info!("catalog sweep: reached limit of {} entries", stats.visited);
            break;
        }

        tokio::time::sleep(opts.detail_delay).await;
    }

    Ok(stats)
}

/// Sweep the saved game list once, persisting a review aggregate for every
/// entry that clears the persistence floor.
///
/// Entries at or below the review cursor are skipped. A visited entry is
/// never revisited: either its aggregate was persisted, or it fell short of
/// the floor and is skipped permanently. Only a rate-limited entry is
/// retried in place.
pub async fn sweep_reviews<A: StorefrontApi>(
    api: &A,
    conn: &Connection,
    cursor: &ResumeCursor,
    opts: &ReviewSweepOptions,
) -> Result<ReviewSweepStats, SweepError> {
    let entries = list_entries(conn)?;
    log::info!("review sweep: {} saved games", entries.len());

    let mut done_through = cursor.get()?;
    if done_through == 0 {
        // Databases written before cursor files tracked progress through the
        // highest persisted aggregate id; honor that on first run.
        if let Some(last) = last_aggregate_id(conn)? {
            done_through = last;
            cursor.set(last)?;
        }
    }

    let mut stats = ReviewSweepStats::default();

    for entry in entries {
        if entry.id <= done_through {
            continue;
        }

        let reviewer_ids = visit_entry(api, &entry, opts).await?;
        stats.visited += 1;

        let persisted = reviewer_ids.len() > opts.persist_floor;
        if persisted {
            insert_review_aggregate(conn, entry.id, &reviewer_ids)?;
            stats.persisted += 1;
            log::info!(
                "persisted aggregate for {} ({}): {} reviewer ids",
                entry.name,
                entry.id,
                reviewer_ids.len()
            );
        } else {
            stats.below_floor += 1;
            log::debug!(
                "entry {} collected {} reviewer ids, below persistence floor",
                entry.id,
                reviewer_ids.len()
            );
        }

        // Visited either way; the entry is done and never retried.
        cursor.set(entry.id)?;
        done_through = entry.id;

        if opts.limit.is_some_and(|max| stats.visited >= max) {
            log::info!("review sweep: reached limit of {} entries", stats.visited);
            break;
        }

        if persisted {
            tokio::time::sleep(opts.persist_delay).await;
        }
    }

    Ok(stats)
}

/// Paginate one entry's reviews, absorbing rate limits with the sweep
/// cooldown. The whole pagination restarts from the wildcard cursor after a
/// cooldown — partial page sets are discarded.
async fn visit_entry<A: StorefrontApi>(
    api: &A,
    entry: &CatalogEntry,
    opts: &ReviewSweepOptions,
) -> Result<Vec<String>, SweepError> {
    fetch_with_retry(
        &format!("reviews for {} ({})", entry.name, entry.id),
        || paginate::fetch_reviewer_ids(api, entry.id, &opts.page),
        opts.rate_limit_cooldown,
        opts.transport_attempts,
    )
    .await
}
