use std::path::Path;

use chrono::Local;
use covisit_db::ResumeCursor;
use covisit_lib::{PageOptions, ReviewSweepOptions, sweep_reviews};

use crate::ApiArgs;
use crate::commands::{build_client, open_store};
use crate::error::CliError;

pub(crate) async fn run_reviews(
    db_path: &Path,
    state_dir: &Path,
    api: ApiArgs,
    limit: Option<usize>,
    min_reviews: usize,
    popularity_floor: u64,
) -> Result<(), CliError> {
    let client = build_client(&api)?;
    let conn = open_store(db_path)?;
    let cursor = ResumeCursor::named(state_dir, "reviews");

    let opts = ReviewSweepOptions {
        persist_floor: min_reviews,
        page: PageOptions {
            popularity_floor,
            ..Default::default()
        },
        limit,
        ..Default::default()
    };

    let started = Local::now();
    let stats = sweep_reviews(&client, &conn, &cursor, &opts).await?;
    let elapsed = Local::now() - started;

    log::info!(
        "review sweep finished in {}s: {} visited, {} persisted, {} below floor",
        elapsed.num_seconds(),
        stats.visited,
        stats.persisted,
        stats.below_floor
    );
    Ok(())
}
