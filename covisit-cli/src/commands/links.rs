use std::path::Path;

use chrono::Local;
use covisit_lib::build_links;

use crate::commands::open_store;
use crate::error::CliError;

pub(crate) fn run_links(db_path: &Path) -> Result<(), CliError> {
    let conn = open_store(db_path)?;

    let started = Local::now();
    let stats = build_links(&conn)?;
    let elapsed = Local::now() - started;

    log::info!(
        "link build finished in {}s: {} aggregates, {} new links",
        elapsed.num_seconds(),
        stats.aggregates,
        stats.new_links
    );
    Ok(())
}
