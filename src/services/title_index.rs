use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rand::{seq::SliceRandom, Rng};

use crate::{
    error::{AppError, AppResult},
    models::{PopularSample, SuggestionResult, CURATED_LIMIT, DISPLAY_LIMIT, SAMPLE_SIZE},
    services::catalog::CatalogSource,
};

/// Immutable, ordered catalog of every known title
///
/// Built once at startup and shared read-only between surfaces. Lowercased copies
/// are kept alongside the originals so each keystroke only lowercases the query.
#[derive(Debug, Clone)]
pub struct TitleIndex {
    titles: Vec<String>,
    folded: Vec<String>,
    source: &'static str,
    loaded_at: DateTime<Utc>,
}

impl TitleIndex {
    pub fn new(titles: Vec<String>) -> Self {
        Self::from_source(titles, "memory")
    }

    fn from_source(titles: Vec<String>, source: &'static str) -> Self {
        let folded = titles.iter().map(|t| t.to_lowercase()).collect();
        Self {
            titles,
            folded,
            source,
            loaded_at: Utc::now(),
        }
    }

    /// Loads from `primary`, falling back to `fallback` on error or an empty listing
    pub async fn load(
        primary: &dyn CatalogSource,
        fallback: &dyn CatalogSource,
    ) -> AppResult<Self> {
        match primary.load_titles().await {
            Ok(titles) if !titles.is_empty() => {
                tracing::info!(
                    titles = titles.len(),
                    source = primary.name(),
                    "Loaded movie titles"
                );
                return Ok(Self::from_source(titles, primary.name()));
            }
            Ok(_) => {
                tracing::warn!(
                    source = primary.name(),
                    fallback = fallback.name(),
                    "Title listing empty, falling back"
                );
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    source = primary.name(),
                    fallback = fallback.name(),
                    "Title listing unavailable, falling back"
                );
            }
        }

        match fallback.load_titles().await {
            Ok(titles) if !titles.is_empty() => {
                tracing::info!(
                    titles = titles.len(),
                    source = fallback.name(),
                    "Loaded movie titles"
                );
                Ok(Self::from_source(titles, fallback.name()))
            }
            Ok(_) => {
                tracing::error!(source = fallback.name(), "Fallback title listing empty");
                Err(AppError::CatalogLoad(format!(
                    "{} and {} returned no titles",
                    primary.name(),
                    fallback.name()
                )))
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    source = fallback.name(),
                    "Fallback title listing failed"
                );
                Err(AppError::CatalogLoad(e.to_string()))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Name of the source the titles came from
    pub fn source(&self) -> &'static str {
        self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Every title containing `query`, case-insensitively, in catalog order
    pub fn matching<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a str> + 'a {
        let needle = query.to_lowercase();
        self.titles
            .iter()
            .zip(self.folded.iter())
            .filter(move |(_, folded)| folded.contains(&needle))
            .map(|(title, _)| title.as_str())
    }

    /// Capped matches for the dropdown together with the true match count
    pub fn search(&self, query: &str) -> SuggestionResult {
        let mut matches = Vec::new();
        let mut total_match_count = 0;

        for title in self.matching(query) {
            if matches.len() < DISPLAY_LIMIT {
                matches.push(title.to_string());
            }
            total_match_count += 1;
        }

        SuggestionResult {
            matches,
            total_match_count,
        }
    }

    /// Popular sample: curated hits first, then distinct random titles
    ///
    /// Each curated name contributes the first title containing it, up to
    /// `CURATED_LIMIT`. Random padding fills up to `SAMPLE_SIZE` or until the
    /// distinct titles run out.
    pub fn sample<R: Rng + ?Sized>(&self, curated: &[String], rng: &mut R) -> PopularSample {
        let mut titles: Vec<String> = Vec::with_capacity(SAMPLE_SIZE);

        for name in curated {
            if titles.len() >= CURATED_LIMIT {
                break;
            }
            if let Some(found) = self.matching(name).next() {
                if !titles.iter().any(|t| t == found) {
                    titles.push(found.to_string());
                }
            }
        }

        let candidates: Vec<&str> = {
            let mut seen: HashSet<&str> = titles.iter().map(String::as_str).collect();
            self.titles
                .iter()
                .map(String::as_str)
                .filter(|title| seen.insert(*title))
                .collect()
        };

        let needed = SAMPLE_SIZE.saturating_sub(titles.len());
        titles.extend(
            candidates
                .choose_multiple(rng, needed)
                .map(|title| title.to_string()),
        );

        PopularSample { titles }
    }
}
