use std::path::{Path, PathBuf};

use crate::{error::AppResult, services::catalog::CatalogSource};

/// Bundled CSV listing with one title per line under a header row
#[derive(Debug, Clone)]
pub struct LocalCatalog {
    path: PathBuf,
}

impl LocalCatalog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parses a listing: skips the header line, trims each line, drops blanks
pub fn parse_listing(text: &str) -> Vec<String> {
    text.split('\n')
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait::async_trait]
impl CatalogSource for LocalCatalog {
    async fn load_titles(&self) -> AppResult<Vec<String>> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        let titles = parse_listing(&text);

        tracing::info!(
            path = %self.path.display(),
            titles = titles.len(),
            source = self.name(),
            "Read title listing"
        );

        Ok(titles)
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_listing_skips_header() {
        let titles = parse_listing("title\nInception\nThe Matrix\n");
        assert_eq!(titles, vec!["Inception", "The Matrix"]);
    }

    #[test]
    fn test_parse_listing_trims_and_drops_blank_lines() {
        let titles = parse_listing("title\r\n  Heat  \r\n\r\n\nAlien\r\n");
        assert_eq!(titles, vec!["Heat", "Alien"]);
    }

    #[test]
    fn test_parse_listing_header_only() {
        assert!(parse_listing("title").is_empty());
        assert!(parse_listing("").is_empty());
    }

    #[test]
    fn test_parse_listing_keeps_duplicates() {
        let titles = parse_listing("title\nHeat\nHeat\n");
        assert_eq!(titles, vec!["Heat", "Heat"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let catalog = LocalCatalog::new("/nonexistent/movie_names.csv");
        let result = catalog.load_titles().await;
        assert!(matches!(result, Err(crate::error::AppError::Io(_))));
    }
}
