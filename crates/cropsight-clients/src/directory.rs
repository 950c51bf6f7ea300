//! Coordinate directory binding
//!
//! Fetches the full boundary listing; no local cache, no incremental sync.

use crate::http::{error_body, join_url};
use async_trait::async_trait;
use cropsight_core::error::DirectoryError;
use cropsight_core::ports::BoundaryDirectory;
use cropsight_types::FarmerBoundary;

/// Listing path at the directory
pub const LISTING_PATH: &str = "api/get-all-coordinates";

/// HTTP coordinate directory client.
#[derive(Debug, Clone)]
pub struct HttpBoundaryDirectory {
    client: reqwest::Client,
    listing_url: String,
}

impl HttpBoundaryDirectory {
    /// Create a directory client for the service at `base_url`
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            listing_url: join_url(base_url, LISTING_PATH),
        }
    }
}

#[async_trait]
impl BoundaryDirectory for HttpBoundaryDirectory {
    async fn list_boundaries(&self) -> Result<Vec<FarmerBoundary>, DirectoryError> {
        tracing::debug!(url = %self.listing_url, "listing farmer boundaries");

        let response = self
            .client
            .get(&self.listing_url)
            .send()
            .await
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status {
                status: status.as_u16(),
                body: error_body(response).await,
            });
        }

        response
            .json::<Vec<FarmerBoundary>>()
            .await
            .map_err(|e| DirectoryError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_builds_listing_url() {
        let directory =
            HttpBoundaryDirectory::new(reqwest::Client::new(), "https://directory.example");
        assert_eq!(
            directory.listing_url,
            "https://directory.example/api/get-all-coordinates"
        );
    }
}
