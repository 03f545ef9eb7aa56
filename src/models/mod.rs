use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod dropdown;
pub mod movie;

pub use dropdown::{DropdownEntry, DropdownState, EntryAction, EntryKind};
pub use movie::{
    ApiMoviesResponse, ApiRecommendRequest, ApiRecommendResponse, ApiTitlesResponse, Movie,
    RecommendationOutcome, TrendingKind,
};

/// Maximum number of suggestions rendered in a dropdown
pub const DISPLAY_LIMIT: usize = 15;

/// Maximum size of the popular sample
pub const SAMPLE_SIZE: usize = 10;

/// Maximum number of curated entries at the head of the popular sample
pub const CURATED_LIMIT: usize = 8;

/// Minimum trimmed query length, in characters, that produces suggestions
pub const MIN_SEARCH_CHARS: usize = 2;

/// One of the search inputs that carries a suggestion dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceId {
    /// Primary movie search box
    Search,
    /// Input naming the movie to base recommendations on
    Recommendation,
}

impl SurfaceId {
    /// Every registered search surface, in page order
    pub const ALL: [SurfaceId; 2] = [SurfaceId::Search, SurfaceId::Recommendation];
}

impl Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceId::Search => write!(f, "hero-search"),
            SurfaceId::Recommendation => write!(f, "recommendation-input"),
        }
    }
}

/// How a trimmed query is treated by the suggestion engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryRegime {
    Empty,
    Short,
    Searchable,
}

/// A trimmed user query
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query(String);

impl Query {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classifies by character count, not byte length
    pub fn regime(&self) -> QueryRegime {
        match self.0.chars().count() {
            0 => QueryRegime::Empty,
            n if n < MIN_SEARCH_CHARS => QueryRegime::Short,
            _ => QueryRegime::Searchable,
        }
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Capped matches for a query plus the true number of matches
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SuggestionResult {
    pub matches: Vec<String>,
    pub total_match_count: usize,
}

impl SuggestionResult {
    /// True when more titles matched than fit in the dropdown
    pub fn overflows(&self) -> bool {
        self.total_match_count > DISPLAY_LIMIT
    }
}

/// Titles offered when the input is empty
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PopularSample {
    pub titles: Vec<String>,
}

impl PopularSample {
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}
