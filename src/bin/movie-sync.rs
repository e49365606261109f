use std::{sync::Arc, time::Duration};

use clap::Parser;
use movie_ratings::{catalog::OmdbClient, config::Config, db, store::MovieStore, sync::Synchronizer};

/// Pull movie metadata from OMDb into the local database.
#[derive(Debug, Parser)]
#[command(name = "movie-sync", version)]
struct Cli {
    /// Catalog search terms, synchronized in order
    #[arg(default_values = ["Batman", "Superman", "Spider-Man"])]
    terms: Vec<String>,

    /// Keep the existing schema and rows instead of recreating them
    #[arg(long)]
    keep_existing: bool,

    /// Pause before each detail request, in milliseconds (defaults to SYNC_DELAY_MS)
    #[arg(long)]
    delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    movie_ratings::init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let db = if cli.keep_existing {
        db::connect_and_migrate(config.database_url.as_str()).await?
    } else {
        tracing::info!(database = %config.database_url, "recreating schema");
        db::connect_and_reset(config.database_url.as_str()).await?
    };

    let catalog = OmdbClient::new(
        movie_ratings::http_client()?,
        config.omdb_api_key.clone(),
        config.omdb_base_url.clone(),
    );
    let delay = Duration::from_millis(cli.delay_ms.unwrap_or(config.sync_delay_ms));

    let synchronizer = Synchronizer::new(Arc::new(catalog), MovieStore::new(db), delay);
    let report = synchronizer.run(&cli.terms).await;

    tracing::info!(
        matched = report.matched,
        inserted = report.inserted,
        updated = report.updated,
        skipped = report.skipped,
        failed = report.failed,
        "sync finished"
    );

    Ok(())
}
