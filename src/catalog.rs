use async_trait::async_trait;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// One row of a catalog search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogMatch {
    pub external_id: String,
    pub title: String,
    pub year: String,
}

/// Full detail for one catalog title. `year` is kept as the raw catalog
/// string ("1989", "2005–2010", "N/A").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogMovie {
    pub external_id: String,
    pub title: String,
    pub year: String,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub plot: Option<String>,
    pub poster_url: Option<String>,
}

/// Read-only access to the movie catalog. Failures never surface: they
/// come back as an empty list or `None`.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn search(&self, term: &str) -> Vec<CatalogMatch>;

    async fn fetch_details(&self, external_id: &str) -> Option<CatalogMovie>;

    /// Best single match for an exact title.
    async fn find_by_title(&self, title: &str) -> Option<CatalogMovie>;
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("catalog rejected query: {0}")]
    Rejected(String),
}

pub struct OmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String) -> Self {
        if api_key.trim().is_empty() {
            warn!("no OMDB_API_KEY provided, catalog lookups are disabled");
        }
        Self { client, api_key, base_url }
    }

    fn enabled(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    async fn query<T: DeserializeOwned>(&self, params: &[(&str, &str)]) -> Result<T, CatalogError> {
        let body: Value = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        decode_envelope(body)
    }

    async fn details(&self, params: &[(&str, &str)]) -> Option<CatalogMovie> {
        if !self.enabled() {
            return None;
        }

        match self.query::<DetailsPayload>(params).await {
            Ok(payload) => Some(payload.into()),
            Err(CatalogError::Rejected(reason)) => {
                debug!(?params, reason = %reason, "no catalog details");
                None
            },
            Err(err) => {
                warn!(?params, error = %err, "catalog details lookup failed");
                None
            },
        }
    }
}

#[async_trait]
impl Catalog for OmdbClient {
    async fn search(&self, term: &str) -> Vec<CatalogMatch> {
        if !self.enabled() {
            return Vec::new();
        }

        match self.query::<SearchPayload>(&[("s", term), ("type", "movie")]).await {
            Ok(payload) => {
                debug!(term = %term, matches = payload.search.len(), "catalog search");
                payload.search.into_iter().map(Into::into).collect()
            },
            Err(CatalogError::Rejected(reason)) => {
                debug!(term = %term, reason = %reason, "catalog search returned nothing");
                Vec::new()
            },
            Err(err) => {
                warn!(term = %term, error = %err, "catalog search failed");
                Vec::new()
            },
        }
    }

    async fn fetch_details(&self, external_id: &str) -> Option<CatalogMovie> {
        self.details(&[("i", external_id), ("plot", "full")]).await
    }

    async fn find_by_title(&self, title: &str) -> Option<CatalogMovie> {
        self.details(&[("t", title), ("type", "movie")]).await
    }
}

/// OMDb wraps every answer in `{"Response": "True" | "False", "Error": ...}`
/// with the payload fields flattened alongside.
fn decode_envelope<T: DeserializeOwned>(body: Value) -> Result<T, CatalogError> {
    match body.get("Response").and_then(Value::as_str) {
        Some("True") => Ok(serde_json::from_value(body)?),
        _ => {
            let reason = body.get("Error").and_then(Value::as_str).unwrap_or("no response flag");
            Err(CatalogError::Rejected(reason.to_string()))
        },
    }
}

/// OMDb fills unknown fields with "N/A".
fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| {
        let s = s.trim();
        !s.is_empty() && s != "N/A"
    })
}

#[derive(Debug, Deserialize)]
struct SearchPayload {
    #[serde(rename = "Search", default)]
    search: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchItem {
    title: String,
    #[serde(default)]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
}

impl From<SearchItem> for CatalogMatch {
    fn from(item: SearchItem) -> Self {
        Self { external_id: item.imdb_id, title: item.title, year: item.year }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DetailsPayload {
    title: String,
    #[serde(default)]
    year: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    genre: Option<String>,
    director: Option<String>,
    plot: Option<String>,
    poster: Option<String>,
}

impl From<DetailsPayload> for CatalogMovie {
    fn from(p: DetailsPayload) -> Self {
        Self {
            external_id: p.imdb_id,
            title: p.title,
            year: p.year,
            genre: present(p.genre),
            director: present(p.director),
            plot: present(p.plot),
            poster_url: present(p.poster),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_search_envelope() {
        let body = json!({
            "Search": [
                {"Title": "Batman Begins", "Year": "2005", "imdbID": "tt0372784", "Type": "movie", "Poster": "N/A"},
                {"Title": "Batman", "Year": "1989", "imdbID": "tt0096895", "Type": "movie", "Poster": "N/A"}
            ],
            "totalResults": "2",
            "Response": "True"
        });

        let payload: SearchPayload = decode_envelope(body).unwrap();
        let matches: Vec<CatalogMatch> = payload.search.into_iter().map(Into::into).collect();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].external_id, "tt0372784");
        assert_eq!(matches[1].title, "Batman");
        assert_eq!(matches[1].year, "1989");
    }

    #[test]
    fn false_envelope_is_rejected_with_reason() {
        let body = json!({"Response": "False", "Error": "Movie not found!"});
        let err = decode_envelope::<SearchPayload>(body).unwrap_err();
        assert!(matches!(err, CatalogError::Rejected(ref r) if r == "Movie not found!"));
    }

    #[test]
    fn missing_flag_is_rejected() {
        let err = decode_envelope::<SearchPayload>(json!({"Search": []})).unwrap_err();
        assert!(matches!(err, CatalogError::Rejected(_)));
    }

    #[test]
    fn details_normalize_placeholders() {
        let body = json!({
            "Title": "Batman",
            "Year": "1989",
            "Genre": "Action, Adventure",
            "Director": "Tim Burton",
            "Plot": "N/A",
            "Poster": "N/A",
            "imdbID": "tt0096895",
            "Response": "True"
        });

        let movie: CatalogMovie = decode_envelope::<DetailsPayload>(body).unwrap().into();
        assert_eq!(movie.external_id, "tt0096895");
        assert_eq!(movie.director.as_deref(), Some("Tim Burton"));
        assert_eq!(movie.plot, None);
        assert_eq!(movie.poster_url, None);
    }

    #[test]
    fn details_without_title_fail_to_decode() {
        let body = json!({"imdbID": "tt1", "Response": "True"});
        let err = decode_envelope::<DetailsPayload>(body).unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
    }
}
