//! Imagery provider binding (process API)
//!
//! Posts one built request with a bearer token and returns the raw PNG
//! bytes. The two per-window invocations in a run are independent; the
//! orchestrator issues them concurrently.

use crate::http::{error_body, join_url};
use async_trait::async_trait;
use cropsight_core::error::FetchError;
use cropsight_core::ports::ImageFetcher;
use cropsight_core::request::ImageRequest;
use cropsight_types::{AccessToken, ImageLabel, RawImage};

/// Process endpoint path at the provider
pub const PROCESS_PATH: &str = "api/v1/process";

/// HTTP imagery provider client.
#[derive(Debug, Clone)]
pub struct ProcessApiImageFetcher {
    client: reqwest::Client,
    process_url: String,
}

impl ProcessApiImageFetcher {
    /// Create a fetcher for the provider at `base_url`
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            process_url: join_url(base_url, PROCESS_PATH),
        }
    }
}

#[async_trait]
impl ImageFetcher for ProcessApiImageFetcher {
    async fn fetch(
        &self,
        token: &AccessToken,
        request: &ImageRequest,
        label: ImageLabel,
    ) -> Result<RawImage, FetchError> {
        tracing::debug!(url = %self.process_url, %label, "requesting snapshot");

        let response = self
            .client
            .post(&self.process_url)
            .header(reqwest::header::AUTHORIZATION, token.bearer())
            .json(request)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: error_body(response).await,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(RawImage::new(label, bytes.to_vec()))
    }
}
