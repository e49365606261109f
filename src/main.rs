use std::sync::Arc;

use movie_ratings::{AppState, catalog::OmdbClient, config::Config, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    movie_ratings::init_tracing();

    let config = Config::from_env()?;

    let db = db::connect_and_migrate(config.database_url.as_str()).await?;
    let catalog = OmdbClient::new(
        movie_ratings::http_client()?,
        config.omdb_api_key.clone(),
        config.omdb_base_url.clone(),
    );

    let state = Arc::new(AppState::new(db, Arc::new(catalog)));
    let app = movie_ratings::router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
