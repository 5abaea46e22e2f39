//! covisit CLI
//!
//! Batch harvester for storefront catalog and review data. Each subcommand
//! runs one pipeline stage to completion; stages communicate only through
//! the database, so they can be run (and re-run) independently.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

mod commands;
mod error;

use error::CliError;

#[derive(Parser)]
#[command(name = "covisit")]
#[command(about = "Harvest storefront review data and rank games by shared reviewers", long_about = None)]
struct Cli {
    /// Path to the SQLite database
    #[arg(long, global = true, default_value = "covisit.db")]
    db: PathBuf,

    /// Directory holding the sweep cursor files
    #[arg(long, global = true, default_value = ".")]
    state_dir: PathBuf,

    /// Enable debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Remote endpoint arguments shared by the crawling commands.
#[derive(Args, Clone)]
struct ApiArgs {
    /// Base URL for the store site (detail + review endpoints)
    #[arg(long)]
    store_base: Option<String>,

    /// Base URL for the web API (catalog listing endpoint)
    #[arg(long)]
    api_base: Option<String>,

    /// API key for the catalog listing endpoint (or COVISIT_API_KEY)
    #[arg(long)]
    api_key: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sweep the catalog listing and keep the entries classified as games
    Catalog {
        #[command(flatten)]
        api: ApiArgs,

        /// Stop after visiting this many entries
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Sweep saved games and harvest each one's full reviewer list
    Reviews {
        #[command(flatten)]
        api: ApiArgs,

        /// Stop after visiting this many entries
        #[arg(short, long)]
        limit: Option<usize>,

        /// Persist an aggregate only when strictly more reviewer ids than
        /// this were collected
        #[arg(long, default_value_t = 100)]
        min_reviews: usize,

        /// Skip pagination entirely for entries with fewer total reviews
        #[arg(long, default_value_t = 2500)]
        popularity_floor: u64,
    },

    /// Build the reviewer -> entries index from persisted aggregates
    Links,

    /// Compute co-occurrence similarity rankings
    Rank {
        /// Rank a single entry and print it (default: rank and store all)
        entry_id: Option<i64>,

        /// How many matches to print for a single entry
        #[arg(short = 'n', long, default_value_t = 20)]
        top: usize,
    },

    /// Show row counts and sweep positions
    Stats,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .init();

    if let Err(e) = run(cli).await {
        log::error!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Catalog { api, limit } => {
            commands::catalog::run_catalog(&cli.db, &cli.state_dir, api, limit).await
        }
        Commands::Reviews {
            api,
            limit,
            min_reviews,
            popularity_floor,
        } => {
            commands::reviews::run_reviews(
                &cli.db,
                &cli.state_dir,
                api,
                limit,
                min_reviews,
                popularity_floor,
            )
            .await
        }
        Commands::Links => commands::links::run_links(&cli.db),
        Commands::Rank { entry_id, top } => commands::rank::run_rank(&cli.db, entry_id, top),
        Commands::Stats => commands::stats::run_stats(&cli.db, &cli.state_dir),
    }
}
