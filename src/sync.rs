use std::{sync::Arc, time::Duration};

use tracing::{debug, info, warn};

use crate::{
    catalog::{Catalog, CatalogMovie},
    models::MovieFields,
    store::{MovieStore, UpsertOutcome},
};

/// Counters for one or more synchronized search terms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub matched: usize,
    pub inserted: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl SyncReport {
    fn merge(&mut self, other: SyncReport) {
        self.matched += other.matched;
        self.inserted += other.inserted;
        self.updated += other.updated;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

pub struct Synchronizer {
    catalog: Arc<dyn Catalog>,
    movies: MovieStore,
    delay: Duration,
}

impl Synchronizer {
    pub fn new(catalog: Arc<dyn Catalog>, movies: MovieStore, delay: Duration) -> Self {
        Self { catalog, movies, delay }
    }

    pub async fn run(&self, terms: &[String]) -> SyncReport {
        let mut total = SyncReport::default();
        for term in terms {
            info!(term = %term, "synchronizing search term");
            total.merge(self.sync_term(term).await);
        }
        total
    }

    /// Pulls every catalog match for `term` into the movie store, one at a
    /// time. A failing match is logged and counted, never fatal.
    pub async fn sync_term(&self, term: &str) -> SyncReport {
        let matches = self.catalog.search(term).await;
        let mut report = SyncReport { matched: matches.len(), ..Default::default() };

        if matches.is_empty() {
            debug!(term = %term, "no catalog matches");
            return report;
        }

        for m in matches {
            tokio::time::sleep(self.delay).await;

            let Some(details) = self.catalog.fetch_details(&m.external_id).await else {
                debug!(external_id = %m.external_id, "no details, skipping");
                report.skipped += 1;
                continue;
            };

            let Some(fields) = catalog_fields(&details) else {
                debug!(external_id = %details.external_id, year = %details.year, "unparsable year, skipping");
                report.skipped += 1;
                continue;
            };

            match self.movies.upsert(&details.external_id, fields).await {
                Ok(UpsertOutcome::Inserted(_)) => {
                    info!(title = %details.title, "synced (new)");
                    report.inserted += 1;
                },
                Ok(UpsertOutcome::Updated(_)) => {
                    info!(title = %details.title, "synced (updated)");
                    report.updated += 1;
                },
                Err(err) => {
                    warn!(title = %details.title, error = %err, "failed to sync movie");
                    report.failed += 1;
                },
            }
        }

        report
    }
}

fn catalog_fields(details: &CatalogMovie) -> Option<MovieFields> {
    Some(MovieFields {
        title: details.title.clone(),
        year: parse_year(&details.year)?,
        genre: details.genre.clone(),
        director: details.director.clone(),
        plot: details.plot.clone(),
        poster_url: details.poster_url.clone(),
    })
}

/// Year from the first four characters of a catalog year ("2005–2010").
pub fn parse_year(raw: &str) -> Option<i32> {
    let prefix = raw.get(..4)?;
    if !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_ranged_years() {
        assert_eq!(parse_year("1989"), Some(1989));
        assert_eq!(parse_year("2005–2010"), Some(2005));
        assert_eq!(parse_year("2019-"), Some(2019));
    }

    #[test]
    fn rejects_malformed_years() {
        assert_eq!(parse_year("N/A"), None);
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("198"), None);
        assert_eq!(parse_year("19a9"), None);
        assert_eq!(parse_year("+198"), None);
        assert_eq!(parse_year("é1989"), None);
    }

    #[test]
    fn report_merge_sums_counters() {
        let mut total = SyncReport { matched: 2, inserted: 1, skipped: 1, ..Default::default() };
        total.merge(SyncReport { matched: 3, updated: 2, failed: 1, ..Default::default() });
        assert_eq!(
            total,
            SyncReport { matched: 5, inserted: 1, updated: 2, skipped: 1, failed: 1 }
        );
    }
}
