use std::path::Path;

use covisit_db::{ResumeCursor, last_aggregate_id, store_stats};

use crate::commands::open_store;
use crate::error::CliError;

pub(crate) fn run_stats(db_path: &Path, state_dir: &Path) -> Result<(), CliError> {
    if !db_path.exists() {
        log::warn!("No database found at {}", db_path.display());
        log::info!("Run 'covisit catalog' to create one.");
        return Ok(());
    }

    let conn = open_store(db_path)?;
    let stats = store_stats(&conn)?;

    log::info!("Database: {}", db_path.display());
    log::info!("  Entries (games):    {:>10}", stats.entries);
    log::info!("  Review aggregates:  {:>10}", stats.aggregates);
    log::info!("  Distinct reviewers: {:>10}", stats.distinct_reviewers);
    log::info!("  Reviewer links:     {:>10}", stats.reviewer_links);
    log::info!("  Ranked entries:     {:>10}", stats.ranked_entries);

    let catalog = ResumeCursor::named(state_dir, "catalog");
    let reviews = ResumeCursor::named(state_dir, "reviews");
    log::info!("  Catalog cursor:     {:>10}", catalog.get()?);
    log::info!("  Review cursor:      {:>10}", reviews.get()?);
    if let Some(last) = last_aggregate_id(&conn)? {
        log::info!("  Last aggregate id:  {:>10}", last);
    }

    Ok(())
}
