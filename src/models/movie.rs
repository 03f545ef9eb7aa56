use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// A movie as returned by the search, recommendation and trending endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Trending tab shown on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrendingKind {
    TopRated,
    Random,
}

impl Display for TrendingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendingKind::TopRated => write!(f, "top-rated"),
            TrendingKind::Random => write!(f, "random"),
        }
    }
}

impl FromStr for TrendingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top-rated" => Ok(TrendingKind::TopRated),
            "random" => Ok(TrendingKind::Random),
            other => Err(format!("unknown trending tab: {}", other)),
        }
    }
}

/// Result of asking for movies similar to a title
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationOutcome {
    Found(Vec<Movie>),
    /// The API did not recognise the title; it may offer near matches
    NotFound {
        error: String,
        suggestions: Vec<Movie>,
    },
}

// ============================================================================
// Movie API Types
// ============================================================================

/// Response from GET /movies/all-titles
#[derive(Debug, Clone, Deserialize)]
pub struct ApiTitlesResponse {
    #[serde(default)]
    pub titles: Vec<String>,
}

/// Response from the search, top-rated and random endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMoviesResponse {
    #[serde(default)]
    pub movies: Vec<Movie>,
}

/// Body of POST /movies/recommend
#[derive(Debug, Clone, Serialize)]
pub struct ApiRecommendRequest {
    pub movie_title: String,
    pub num_recommendations: u32,
}

/// Response from POST /movies/recommend
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRecommendResponse {
    #[serde(default)]
    pub recommendations: Vec<Movie>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub suggestions: Vec<Movie>,
}

impl From<ApiRecommendResponse> for RecommendationOutcome {
    fn from(response: ApiRecommendResponse) -> Self {
        match response.error {
            Some(error) => RecommendationOutcome::NotFound {
                error,
                suggestions: response.suggestions,
            },
            None => RecommendationOutcome::Found(response.recommendations),
        }
    }
}
