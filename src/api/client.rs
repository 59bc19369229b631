//! HTTP client for the image search endpoint.
//!
//! [`SearchClient`] centralizes networking policy (timeouts, gzip,
//! user-agent) and credential attachment so callers only deal with typed
//! requests and responses.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use crate::config::ApiConfig;

use super::error::SearchError;
use super::models::SearchResponse;

/// User-Agent sent on search and asset requests.
pub(crate) const USER_AGENT: &str = concat!("imgfetch/", env!("CARGO_PKG_VERSION"));

/// Client for a paginated image search endpoint.
///
/// Designed to be created once and reused across pages, taking advantage of
/// connection pooling. The access key is attached to every request as the
/// `client_id` query parameter.
pub struct SearchClient {
    client: Client,
    base_url: String,
    access_key: String,
    page_size: u32,
}

impl SearchClient {
    /// Creates a search client from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Build`] when HTTP client construction fails.
    pub fn new(config: &ApiConfig) -> Result<Self, SearchError> {
        Self::build(config, config.base_url.clone())
    }

    /// Creates a search client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Build`] when HTTP client construction fails.
    pub fn with_base_url(
        config: &ApiConfig,
        base_url: impl Into<String>,
    ) -> Result<Self, SearchError> {
        Self::build(config, base_url.into())
    }

    fn build(config: &ApiConfig, base_url: String) -> Result<Self, SearchError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.read_timeout_secs))
            .user_agent(USER_AGENT)
            .gzip(true)
            .build()
            .map_err(SearchError::build)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_key: config.access_key.clone(),
            page_size: config.page_size,
        })
    }

    /// Fetches one page of search results for `query`.
    ///
    /// Issues `GET {base}/search/photos` with `query`, `page` (1-based),
    /// `per_page`, and `client_id` parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] on network failure, timeout, non-success
    /// status, or a body that does not match the expected shape.
    #[tracing::instrument(skip(self), fields(query = %query, page))]
    pub async fn search_photos(
        &self,
        query: &str,
        page: u32,
    ) -> Result<SearchResponse, SearchError> {
        let url = format!("{}/search/photos", self.base_url);

        debug!(api_url = %url, "querying search endpoint");

        let page_param = page.to_string();
        let per_page_param = self.page_size.to_string();
        let params = [
            ("query", query),
            ("page", page_param.as_str()),
            ("per_page", per_page_param.as_str()),
            ("client_id", self.access_key.as_str()),
        ];

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::timeout(&url)
                } else {
                    SearchError::network(&url, e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "search endpoint returned error status");
            return Err(SearchError::http_status(&url, status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::network(&url, e))?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| SearchError::decode(&url, e))?;

        debug!(results = parsed.results.len(), "search page fetched");
        Ok(parsed)
    }
}

impl std::fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // access_key intentionally omitted
        f.debug_struct("SearchClient")
            .field("base_url", &self.base_url)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> ApiConfig {
        ApiConfig::with_access_key("test-key")
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let client = SearchClient::with_base_url(&test_config(), "http://localhost:8080/").unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_user_agent_identifies_tool() {
        assert!(USER_AGENT.starts_with("imgfetch/"));
    }

    #[test]
    fn test_debug_omits_access_key() {
        let client = SearchClient::new(&test_config()).unwrap();
        let rendered = format!("{client:?}");
        assert!(
            !rendered.contains("test-key"),
            "Debug output must not contain the access key: {rendered}"
        );
    }
}
