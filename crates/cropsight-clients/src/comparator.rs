//! Comparator service binding
//!
//! Sends the before/after snapshot pair as multipart form data and decodes
//! the per-class change breakdown. The returned report carries neither
//! artifact URLs nor the boundary area; the orchestrator fills those in.

use crate::http::{error_body, join_url};
use async_trait::async_trait;
use cropsight_core::error::CompareError;
use cropsight_core::ports::ChangeComparator;
use cropsight_types::{ChangeReport, RawImage};
use reqwest::multipart;

/// Compare endpoint path at the service
pub const COMPARE_PATH: &str = "compare_ndvi/";

/// HTTP NDVI comparator client.
#[derive(Debug, Clone)]
pub struct HttpChangeComparator {
    client: reqwest::Client,
    compare_url: String,
}

impl HttpChangeComparator {
    /// Create a comparator client for the service at `base_url`
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            compare_url: join_url(base_url, COMPARE_PATH),
        }
    }
}

fn image_part(image: &RawImage) -> Result<multipart::Part, CompareError> {
    multipart::Part::bytes(image.bytes.clone())
        .file_name(image.label.file_name())
        .mime_str(image.content_type)
        .map_err(|e| CompareError::Transport(e.to_string()))
}

#[async_trait]
impl ChangeComparator for HttpChangeComparator {
    async fn compare(
        &self,
        before: &RawImage,
        after: &RawImage,
    ) -> Result<ChangeReport, CompareError> {
        tracing::debug!(url = %self.compare_url, "comparing snapshots");

        let form = multipart::Form::new()
            .part("before", image_part(before)?)
            .part("after", image_part(after)?);

        let response = self
            .client
            .post(&self.compare_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| CompareError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompareError::Status {
                status: status.as_u16(),
                body: error_body(response).await,
            });
        }

        response
            .json::<ChangeReport>()
            .await
            .map_err(|e| CompareError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparator_builds_compare_url() {
        let comparator =
            HttpChangeComparator::new(reqwest::Client::new(), "https://comparator.example");
        assert_eq!(
            comparator.compare_url,
            "https://comparator.example/compare_ndvi/"
        );
    }
}
