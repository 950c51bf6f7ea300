//! Upload service binding
//!
//! Batches every snapshot into one multipart call. The returned URL array
//! aligns positionally with the submitted images; part order in the form
//! preserves input order, which the orchestrator depends on.

use crate::http::{error_body, join_url};
use async_trait::async_trait;
use cropsight_core::error::UploadError;
use cropsight_core::ports::ArtifactUploader;
use cropsight_types::RawImage;
use reqwest::multipart;

/// Upload endpoint path at the service
pub const UPLOAD_PATH: &str = "upload";

/// HTTP artifact uploader client.
#[derive(Debug, Clone)]
pub struct HttpArtifactUploader {
    client: reqwest::Client,
    upload_url: String,
}

impl HttpArtifactUploader {
    /// Create an uploader client for the service at `base_url`
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            upload_url: join_url(base_url, UPLOAD_PATH),
        }
    }
}

#[async_trait]
impl ArtifactUploader for HttpArtifactUploader {
    async fn upload(&self, images: &[RawImage]) -> Result<Vec<String>, UploadError> {
        tracing::debug!(url = %self.upload_url, count = images.len(), "uploading snapshots");

        let mut form = multipart::Form::new();
        for image in images {
            let part = multipart::Part::bytes(image.bytes.clone())
                .file_name(image.label.file_name())
                .mime_str(image.content_type)
                .map_err(|e| UploadError::Transport(e.to_string()))?;
            form = form.part("file", part);
        }

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Status {
                status: status.as_u16(),
                body: error_body(response).await,
            });
        }

        response
            .json::<Vec<String>>()
            .await
            .map_err(|e| UploadError::Decode(e.to_string()))
    }
}
