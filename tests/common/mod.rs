#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use movie_ratings::{
    catalog::{Catalog, CatalogMatch, CatalogMovie},
    db,
};
use sea_orm::{ConnectOptions, DatabaseConnection};

/// A single pooled connection keeps the in-memory database alive and shared.
pub async fn memory_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    db::connect_and_migrate(options).await.unwrap()
}

#[derive(Default)]
pub struct FakeCatalog {
    pub searches: HashMap<String, Vec<CatalogMatch>>,
    pub details: HashMap<String, CatalogMovie>,
    pub titles: HashMap<String, CatalogMovie>,
    pub detail_calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn with_search(mut self, term: &str, movies: &[CatalogMovie]) -> Self {
        let matches = movies
            .iter()
            .map(|m| CatalogMatch {
                external_id: m.external_id.clone(),
                title: m.title.clone(),
                year: m.year.clone(),
            })
            .collect();
        self.searches.insert(term.to_string(), matches);
        for m in movies {
            self.details.insert(m.external_id.clone(), m.clone());
        }
        self
    }

    pub fn with_title(mut self, movie: CatalogMovie) -> Self {
        self.titles.insert(movie.title.clone(), movie);
        self
    }

    pub fn without_details(mut self, external_id: &str) -> Self {
        self.details.remove(external_id);
        self
    }

    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn search(&self, term: &str) -> Vec<CatalogMatch> {
        self.searches.get(term).cloned().unwrap_or_default()
    }

    async fn fetch_details(&self, external_id: &str) -> Option<CatalogMovie> {
        self.detail_calls.lock().unwrap().push(external_id.to_string());
        self.details.get(external_id).cloned()
    }

    async fn find_by_title(&self, title: &str) -> Option<CatalogMovie> {
        self.titles.get(title).cloned()
    }
}

pub fn catalog_movie(external_id: &str, title: &str, year: &str) -> CatalogMovie {
    CatalogMovie {
        external_id: external_id.to_string(),
        title: title.to_string(),
        year: year.to_string(),
        genre: Some("Action, Adventure".to_string()),
        director: Some("Someone".to_string()),
        plot: Some(format!("The plot of {title}.")),
        poster_url: Some(format!("https://img.example/{external_id}.jpg")),
    }
}

pub fn batman_begins() -> CatalogMovie {
    CatalogMovie {
        director: Some("Christopher Nolan".to_string()),
        ..catalog_movie("tt0372784", "Batman Begins", "2005")
    }
}

pub fn batman_1989() -> CatalogMovie {
    CatalogMovie {
        director: Some("Tim Burton".to_string()),
        ..catalog_movie("tt0096895", "Batman", "1989")
    }
}
