//! Crawl-and-aggregate pipeline.
//!
//! Four batch stages, each run to completion before the next:
//!
//! 1. catalog sweep — classify every listing entry, keep the games
//! 2. review sweep — paginate reviews per game, freeze reviewer sequences
//! 3. link build — invert aggregates into a reviewer -> entries index
//! 4. similarity ranking — co-occurrence counts over shared reviewers
//!
//! Stages communicate only through the store; a run can stop at any stage
//! boundary and be resumed later via the per-sweep cursors.

pub mod error;
pub mod links;
pub mod paginate;
pub mod similar;
pub mod sweep;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::SweepError;
pub use links::{LinkStats, apply_aggregate, build_links};
pub use paginate::{PageOptions, fetch_reviewer_ids};
pub use similar::{RankStats, rank_all, rank_similar};
pub use sweep::{
    CatalogSweepOptions, CatalogSweepStats, ReviewSweepOptions, ReviewSweepStats, sweep_catalog,
    sweep_reviews,
};
