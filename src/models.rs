use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    entities::{movie, rating},
    error::{AppError, AppResult},
};

const MAX_SHORT_TEXT: usize = 255;
const MAX_LONG_TEXT: usize = 1024;
const EARLIEST_YEAR: i32 = 1900;

/// Catalog-sourced columns written on every upsert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovieFields {
    pub title: String,
    pub year: i32,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub plot: Option<String>,
    pub poster_url: Option<String>,
}

/// Body of `POST /movies` and `PUT /movies/{id}`.
#[derive(Clone, Debug, Deserialize)]
pub struct MovieInput {
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub director: Option<String>,
}

impl MovieInput {
    /// `current_year` is passed in so callers decide what "now" means.
    pub fn validate(&self, current_year: i32) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::validation("title is required"));
        }
        check_len("title", &self.title, MAX_SHORT_TEXT)?;
        if self.year <= EARLIEST_YEAR || self.year > current_year {
            return Err(AppError::validation(format!(
                "year must be between {} and {current_year}",
                EARLIEST_YEAR + 1
            )));
        }
        if let Some(genre) = &self.genre {
            check_len("genre", genre, MAX_SHORT_TEXT)?;
        }
        if let Some(director) = &self.director {
            check_len("director", director, MAX_SHORT_TEXT)?;
        }
        Ok(())
    }
}

/// Body of `POST /ratings`.
#[derive(Clone, Debug, Deserialize)]
pub struct RatingInput {
    pub movie_id: i32,
    pub name: String,
    pub rate: i32,
    pub description: String,
}

impl RatingInput {
    pub fn validate(&self) -> AppResult<()> {
        check_len("name", &self.name, MAX_SHORT_TEXT)?;
        check_len("description", &self.description, MAX_LONG_TEXT)?;
        if !(1..=10).contains(&self.rate) {
            return Err(AppError::validation("rate must be between 1 and 10"));
        }
        Ok(())
    }
}

fn check_len(field: &str, value: &str, max: usize) -> AppResult<()> {
    if value.chars().count() > max {
        return Err(AppError::validation(format!("{field} must be at most {max} characters")));
    }
    Ok(())
}

pub fn current_year() -> i32 {
    i32::from(jiff::Timestamp::now().to_zoned(jiff::tz::TimeZone::UTC).year())
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MovieResponse {
    pub id: i32,
    pub external_id: Option<String>,
    pub title: String,
    pub year: i32,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub plot: Option<String>,
    pub poster_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<movie::Model> for MovieResponse {
    fn from(m: movie::Model) -> Self {
        Self {
            id: m.id,
            external_id: m.external_id,
            title: m.title,
            year: m.year,
            genre: m.genre,
            director: m.director,
            plot: m.plot,
            poster_url: m.poster_url,
            created_at: from_unix(m.created_at),
            updated_at: from_unix(m.updated_at),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RatingResponse {
    pub id: i32,
    pub movie_id: i32,
    pub name: String,
    pub rate: i32,
    pub description: String,
    pub created_at: Timestamp,
}

impl From<rating::Model> for RatingResponse {
    fn from(r: rating::Model) -> Self {
        Self {
            id: r.id,
            movie_id: r.movie_id,
            name: r.name,
            rate: r.rate,
            description: r.description,
            created_at: from_unix(r.created_at),
        }
    }
}

fn from_unix(seconds: i64) -> Timestamp {
    Timestamp::from_second(seconds).unwrap_or(Timestamp::UNIX_EPOCH)
}
