use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the movie API (search, recommendations, trending, title listing)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Bundled CSV listing of titles, tried before the API
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Quiet period after the last keystroke before suggestions are evaluated
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Curated substrings used to seed the popular sample (comma-separated in env)
    #[serde(default = "default_popular_titles")]
    pub popular_titles: Vec<String>,

    /// Maximum results requested from the search endpoint
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,

    /// Number of trending movies requested per tab
    #[serde(default = "default_trending_limit")]
    pub trending_limit: u32,

    /// Number of similar movies requested for a recommendation
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: u32,
}

fn default_api_base_url() -> String {
    "https://movie-recommendation-fcbf.onrender.com".to_string()
}

fn default_catalog_path() -> String {
    "./movie_names.csv".to_string()
}

fn default_debounce_ms() -> u64 {
    300
}

pub fn default_popular_titles() -> Vec<String> {
    [
        "The Godfather",
        "Inception",
        "The Dark Knight",
        "Pulp Fiction",
        "Forrest Gump",
        "The Matrix",
        "Goodfellas",
        "The Lord of the Rings",
        "Star Wars",
        "Titanic",
        "Avatar",
        "Avengers",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_search_limit() -> u32 {
    20
}

fn default_trending_limit() -> u32 {
    12
}

fn default_recommendation_count() -> u32 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            catalog_path: default_catalog_path(),
            debounce_ms: default_debounce_ms(),
            popular_titles: default_popular_titles(),
            search_limit: default_search_limit(),
            trending_limit: default_trending_limit(),
            recommendation_count: default_recommendation_count(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_env_empty() {
        let config = Config::from_vars(Vec::new()).unwrap();
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.catalog_path, "./movie_names.csv");
        assert_eq!(config.popular_titles.len(), 12);
        assert_eq!(config.popular_titles[0], "The Godfather");
        assert_eq!(config.search_limit, 20);
        assert_eq!(config.trending_limit, 12);
    }

    #[test]
    fn test_popular_titles_from_comma_list() {
        let vars = vec![
            ("POPULAR_TITLES".to_string(), "Alien,Heat".to_string()),
            ("DEBOUNCE_MS".to_string(), "150".to_string()),
        ];
        let config = Config::from_vars(vars).unwrap();
        assert_eq!(config.popular_titles, vec!["Alien", "Heat"]);
        assert_eq!(config.debounce(), Duration::from_millis(150));
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let vars = vec![("DEBOUNCE_MS".to_string(), "soon".to_string())];
        assert!(Config::from_vars(vars).is_err());
    }
}
