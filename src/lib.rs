pub mod catalog;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
pub mod sync;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    catalog::Catalog,
    store::{MovieStore, RatingStore},
};

pub struct AppState {
    pub movies: MovieStore,
    pub ratings: RatingStore,
    pub catalog: Arc<dyn Catalog>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, catalog: Arc<dyn Catalog>) -> Self {
        Self { movies: MovieStore::new(db.clone()), ratings: RatingStore::new(db), catalog }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/movies", post(routes::create_movie).get(routes::list_movies))
        .route(
            "/movies/{id}",
            get(routes::get_movie).put(routes::update_movie).delete(routes::delete_movie),
        )
        .route("/movies/{id}/ratings", get(routes::list_movie_ratings))
        .route("/ratings", post(routes::create_rating))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

/// Shared outbound client for catalog calls.
pub fn http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("movie-ratings/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(30))
        .build()
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movie_ratings=debug,sqlx=warn".to_string()),
        )
        .init();
}
