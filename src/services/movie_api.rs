/// Client for the movie recommendation API
///
/// Search, recommendation and trending lookups happen over HTTP. The suggestion engine
/// never talks to this layer; the session issues these calls on submit and on tab
/// changes and routes the outcome back through the event loop.
use reqwest::{Client as HttpClient, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, AppResult},
    models::{
        ApiMoviesResponse, ApiRecommendRequest, ApiRecommendResponse, Movie,
        RecommendationOutcome, TrendingKind,
    },
};

/// Remote movie lookups
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieApi: Send + Sync {
    /// Full-text movie search
    async fn search(&self, query: &str, limit: u32) -> AppResult<Vec<Movie>>;

    /// Movies similar to `title`
    async fn recommend(&self, title: &str, count: u32) -> AppResult<RecommendationOutcome>;

    /// Movies for a trending tab
    async fn trending(&self, kind: TrendingKind, limit: u32) -> AppResult<Vec<Movie>>;
}

#[derive(Clone)]
pub struct HttpMovieApi {
    http_client: HttpClient,
    api_url: String,
}

impl HttpMovieApi {
    pub fn new(api_url: impl Into<String>) -> Self {
        let api_url: String = api_url.into();
        Self {
            http_client: HttpClient::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Sends a request and decodes its JSON body; every failure is a search failure
    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::SearchExecution(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::SearchExecution(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::SearchExecution(e.to_string()))
    }
}

#[async_trait::async_trait]
impl MovieApi for HttpMovieApi {
    async fn search(&self, query: &str, limit: u32) -> AppResult<Vec<Movie>> {
        let query = query.trim();
        if query.chars().count() < crate::models::MIN_SEARCH_CHARS {
            return Err(AppError::InvalidInput(
                "Search query must be at least 2 characters".to_string(),
            ));
        }

        let request = self
            .http_client
            .get(self.url("/movies/search"))
            .query(&[("q", query.to_string()), ("limit", limit.to_string())]);
        let response: ApiMoviesResponse = self.fetch(request).await?;

        tracing::info!(
            query = %query,
            results = response.movies.len(),
            "Movie search completed"
        );

        Ok(response.movies)
    }

    async fn recommend(&self, title: &str, count: u32) -> AppResult<RecommendationOutcome> {
        let body = ApiRecommendRequest {
            movie_title: title.trim().to_string(),
            num_recommendations: count,
        };
        let request = self
            .http_client
            .post(self.url("/movies/recommend"))
            .json(&body);
        let response: ApiRecommendResponse = self.fetch(request).await?;
        let outcome = RecommendationOutcome::from(response);

        match &outcome {
            RecommendationOutcome::Found(movies) => {
                tracing::info!(
                    title = %body.movie_title,
                    results = movies.len(),
                    "Recommendations fetched"
                );
            }
            RecommendationOutcome::NotFound { suggestions, .. } => {
                tracing::info!(
                    title = %body.movie_title,
                    suggestions = suggestions.len(),
                    "Recommendation title not recognised"
                );
            }
        }

        Ok(outcome)
    }

    async fn trending(&self, kind: TrendingKind, limit: u32) -> AppResult<Vec<Movie>> {
        let request = match kind {
            TrendingKind::TopRated => self
                .http_client
                .get(self.url("/movies/top-rated"))
                .query(&[("limit", limit)]),
            TrendingKind::Random => self
                .http_client
                .get(self.url("/movies/random"))
                .query(&[("count", limit)]),
        };
        let response: ApiMoviesResponse = self.fetch(request).await?;

        tracing::info!(
            kind = %kind,
            results = response.movies.len(),
            "Trending movies fetched"
        );

        Ok(response.movies)
    }
}
