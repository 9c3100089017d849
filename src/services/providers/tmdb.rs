//! TMDB API provider
//!
//! API Flow:
//! 1. Search: /search/multi → mixed movie, tv and person results
//! 2. Detail: /{movie|tv}/{id} → a single record with overview

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{content::SearchPage, ContentDetail, MediaType, SearchResult},
    services::providers::MetadataProvider,
};
use reqwest::Client as HttpClient;

const LANGUAGE: &str = "en-US";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.tmdb_api_key.clone(), config.tmdb_api_url.clone())
    }

    fn search_url(&self) -> String {
        format!("{}/search/multi", self.api_url)
    }

    fn detail_url(&self, media_type: MediaType, id: &str) -> String {
        format!(
            "{}/{}/{}",
            self.api_url,
            media_type,
            urlencoding::encode(id)
        )
    }

    /// Requests without a key would only come back as 401, so fail before sending
    fn ensure_configured(&self) -> AppResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::MissingConfig("TMDB_API_KEY".to_string()));
        }
        if self.api_url.trim().is_empty() {
            return Err(AppError::MissingConfig("TMDB_API_URL".to_string()));
        }
        Ok(())
    }

    async fn ensure_success(response: reqwest::Response) -> AppResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = %status, body = %body, "TMDB request failed");
        Err(AppError::ExternalApi {
            status: status.as_u16(),
            message: body,
        })
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn search_multi(&self, query: &str) -> AppResult<Vec<SearchResult>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }
        self.ensure_configured()?;

        let response = self
            .http_client
            .get(self.search_url())
            .query(&[
                ("query", query),
                ("include_adult", "false"),
                ("language", LANGUAGE),
                ("page", "1"),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let page: SearchPage = Self::ensure_success(response).await?.json().await?;
        let results = page.into_results();

        tracing::info!(
            query = %query,
            results = results.len(),
            provider = "tmdb",
            "Multi search completed"
        );

        Ok(results)
    }

    async fn fetch_detail(&self, media_type: MediaType, id: &str) -> AppResult<ContentDetail> {
        self.ensure_configured()?;

        let response = self
            .http_client
            .get(self.detail_url(media_type, id))
            .query(&[("api_key", self.api_key.as_str()), ("language", LANGUAGE)])
            .send()
            .await?;

        let response_text = Self::ensure_success(response).await?.text().await?;
        let detail: ContentDetail = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %response_text,
                "Failed to deserialize TMDB detail response"
            );
            AppError::Internal(format!("Failed to parse TMDB response: {}", e))
        })?;

        tracing::info!(
            id = %id,
            media_type = %media_type,
            provider = "tmdb",
            "Detail fetched"
        );

        Ok(detail)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
