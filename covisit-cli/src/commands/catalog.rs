use std::path::Path;

use chrono::Local;
use covisit_db::ResumeCursor;
use covisit_lib::{CatalogSweepOptions, sweep_catalog};

use crate::ApiArgs;
use crate::commands::{build_client, open_store};
use crate::error::CliError;

pub(crate) async fn run_catalog(
    db_path: &Path,
    state_dir: &Path,
    api: ApiArgs,
    limit: Option<usize>,
) -> Result<(), CliError> {
    let client = build_client(&api)?;
    let conn = open_store(db_path)?;
    let cursor = ResumeCursor::named(state_dir, "catalog");

    let opts = CatalogSweepOptions {
        limit,
        ..Default::default()
    };

    let started = Local::now();
    let stats = sweep_catalog(&client, &conn, &cursor, &opts).await?;
    let elapsed = Local::now() - started;

    log::info!(
        "catalog sweep finished in {}s: {} visited, {} saved, {} skipped",
        elapsed.num_seconds(),
        stats.visited,
        stats.saved,
        stats.skipped
    );
    Ok(())
}
