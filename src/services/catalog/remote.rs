use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::ApiTitlesResponse,
    services::catalog::CatalogSource,
};

/// Title listing served by the movie API at `/movies/all-titles`
#[derive(Clone)]
pub struct RemoteCatalog {
    http_client: HttpClient,
    api_url: String,
}

impl RemoteCatalog {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url: api_url.into(),
        }
    }
}

#[async_trait::async_trait]
impl CatalogSource for RemoteCatalog {
    async fn load_titles(&self) -> AppResult<Vec<String>> {
        let url = format!("{}/movies/all-titles", self.api_url.trim_end_matches('/'));
        let response = self.http_client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        let listing: ApiTitlesResponse = response.json().await?;

        tracing::info!(
            titles = listing.titles.len(),
            source = self.name(),
            "Fetched title listing"
        );

        Ok(listing.titles)
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
