//! Fetching full-resolution image assets.

use std::path::PathBuf;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use tracing::{debug, info, instrument};
use url::Url;

use crate::api;
use crate::config::ApiConfig;

use super::error::DownloadError;
use super::saver::{DEFAULT_IMAGE_FILENAME, ImageSaver};

/// Downloads full-resolution image assets and hands them to a saver.
///
/// Created once and reused across downloads for connection pooling. Asset
/// URLs come verbatim from prior search results, so no credential is
/// attached here.
pub struct ImageDownloader {
    client: Client,
}

impl ImageDownloader {
    /// Creates a downloader using the shared timeout configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::Build`] when HTTP client construction fails.
    pub fn new(config: &ApiConfig) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.read_timeout_secs))
            .user_agent(api::USER_AGENT)
            .gzip(true)
            .build()
            .map_err(DownloadError::build)?;
        Ok(Self { client })
    }

    /// Fetches the asset at `url` and persists it through `saver` under the
    /// fixed default filename.
    ///
    /// The response body is streamed chunk by chunk; the saver receives the
    /// complete bytes once the stream is drained.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError`] if the URL is invalid, the request fails
    /// (network error, timeout), the server returns an error status, or
    /// saving fails.
    #[must_use = "download result contains the path to the saved image"]
    #[instrument(skip(self, saver), fields(url = %url))]
    pub async fn fetch_and_save(
        &self,
        url: &str,
        saver: &dyn ImageSaver,
    ) -> Result<PathBuf, DownloadError> {
        Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;

        debug!("starting image download");
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                DownloadError::timeout(url)
            } else {
                DownloadError::network(url, e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        let mut stream = response.bytes_stream();
        let mut bytes = Vec::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                if e.is_timeout() {
                    DownloadError::timeout(url)
                } else {
                    DownloadError::network(url, e)
                }
            })?;
            bytes.extend_from_slice(&chunk);
        }

        let path = saver.save(DEFAULT_IMAGE_FILENAME, &bytes).await?;

        info!(
            path = %path.display(),
            bytes = bytes.len(),
            "image download complete"
        );
        Ok(path)
    }
}

impl std::fmt::Debug for ImageDownloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageDownloader").finish_non_exhaustive()
    }
}
