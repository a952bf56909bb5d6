//! Google Books volumes endpoint

use super::{CatalogClient, CatalogResult, VolumesResponse};
use crate::config::NookConfig;
use crate::error::{CatalogError, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Public Google Books search endpoint
pub const GOOGLE_BOOKS_API_BASE: &str = "https://www.googleapis.com/books/v1/volumes";

/// HTTP client for the Google Books volumes search
#[derive(Debug, Clone)]
pub struct GoogleBooksClient {
    http: reqwest::Client,
    base_url: String,
}

impl GoogleBooksClient {
    /// Create a client against `base_url` with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> CatalogResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from the configured endpoint and timeout
    pub fn from_config(config: &NookConfig) -> Result<Self> {
        Ok(Self::new(config.catalog_url.clone(), config.http_timeout)?)
    }

    /// Build the search URL for a query
    pub fn search_url(&self, query: &str, max_results: u32) -> String {
        format!(
            "{}?q={}&maxResults={}&printType=books",
            self.base_url,
            urlencoding::encode(query),
            max_results
        )
    }
}

#[async_trait]
impl CatalogClient for GoogleBooksClient {
    async fn search_volumes(
        &self,
        query: &str,
        max_results: u32,
    ) -> CatalogResult<VolumesResponse> {
        let url = self.search_url(query, max_results);
        tracing::debug!(%url, "querying catalog");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(CatalogError::Status(resp.status().as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| CatalogError::MalformedResponse(e.to_string()))
    }
}
