use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::debug;

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{MovieFields, MovieInput, MovieResponse, RatingInput, RatingResponse, current_year},
};

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    Json(input): Json<MovieInput>,
) -> AppResult<(StatusCode, Json<MovieResponse>)> {
    input.validate(current_year())?;

    let catalog = state.catalog.find_by_title(&input.title).await;
    if let Some(found) = &catalog {
        debug!(title = %input.title, external_id = %found.external_id, "enriching from catalog");
    }

    let (external_id, plot, poster_url) = match catalog {
        Some(found) => (Some(found.external_id), found.plot, found.poster_url),
        None => (None, None, None),
    };

    let fields = MovieFields {
        title: input.title,
        year: input.year,
        genre: input.genre,
        director: input.director,
        plot,
        poster_url,
    };

    let movie = state.movies.create(external_id, fields).await?;
    Ok((StatusCode::CREATED, Json(movie.into())))
}

pub async fn list_movies(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<MovieResponse>>> {
    let movies = state.movies.list().await?;
    Ok(Json(movies.into_iter().map(Into::into).collect()))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<MovieResponse>> {
    let movie =
        state.movies.find_by_id(id).await?.ok_or_else(|| AppError::not_found("movie not found"))?;
    Ok(Json(movie.into()))
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(input): Json<MovieInput>,
) -> AppResult<Json<MovieResponse>> {
    input.validate(current_year())?;
    let movie = state.movies.update(id, &input).await?;
    Ok(Json(movie.into()))
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.movies.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_rating(
    State(state): State<Arc<AppState>>,
    Json(input): Json<RatingInput>,
) -> AppResult<(StatusCode, Json<RatingResponse>)> {
    input.validate()?;
    let rating = state.ratings.create(&input).await?;
    Ok((StatusCode::CREATED, Json(rating.into())))
}

/// An existing movie with no ratings is reported as not found too, with its
/// own message.
pub async fn list_movie_ratings(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<RatingResponse>>> {
    let ratings = state.ratings.list_for_movie(id).await?;
    if ratings.is_empty() {
        return Err(AppError::not_found("no ratings for this movie"));
    }
    Ok(Json(ratings.into_iter().map(Into::into).collect()))
}
