use std::path::Path;

use chrono::Local;
use covisit_lib::{rank_all, rank_similar};

use crate::commands::open_store;
use crate::error::CliError;

pub(crate) fn run_rank(db_path: &Path, entry_id: Option<i64>, top: usize) -> Result<(), CliError> {
    let conn = open_store(db_path)?;

    match entry_id {
        Some(id) => {
            let ranking = rank_similar(&conn, id)?;
            if ranking.is_empty() {
                log::info!("entry {id}: no similar entries (no reviewer data?)");
                return Ok(());
            }
            log::info!("entry {id}: top {} of {} similar entries", top.min(ranking.len()), ranking.len());
            for (other_id, shared) in ranking.iter().take(top) {
                log::info!("  {other_id:>10}  {shared} shared reviewers");
            }
        }
        None => {
            let started = Local::now();
            let stats = rank_all(&conn)?;
            let elapsed = Local::now() - started;
            log::info!(
                "ranking finished in {}s: {} entries ranked ({} empty)",
                elapsed.num_seconds(),
                stats.ranked,
                stats.empty
            );
        }
    }
    Ok(())
}
