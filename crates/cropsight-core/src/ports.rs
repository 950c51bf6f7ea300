//! Service ports for the remote collaborators
//!
//! The pipeline reaches every remote service through one of these traits:
//! - Token issuer (client-credentials exchange)
//! - Coordinate directory (list all boundaries)
//! - Imagery provider (process one request into raw bytes)
//! - Comparator service (two snapshots in, class breakdown out)
//! - Upload service (batch of snapshots in, public URLs out)
//!
//! HTTP implementations live in `cropsight-clients`; configurable stubs for
//! tests live in `cropsight-test-utils`.

use crate::error::{AuthError, CompareError, DirectoryError, FetchError, UploadError};
use crate::request::ImageRequest;
use async_trait::async_trait;
use cropsight_types::{AccessToken, ChangeReport, FarmerBoundary, ImageLabel, RawImage};

/// Coordinate directory: lists every known boundary, fresh per call.
#[async_trait]
pub trait BoundaryDirectory: Send + Sync {
    /// Fetch all boundaries from the directory
    async fn list_boundaries(&self) -> Result<Vec<FarmerBoundary>, DirectoryError>;
}

/// Token issuer: exchanges fixed client credentials for a bearer token.
///
/// Called exactly once per run; no retry, no caching.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Perform the credential exchange
    async fn fetch_token(&self) -> Result<AccessToken, AuthError>;
}

/// Imagery provider: turns a built request into raw image bytes.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Fetch one snapshot for the given request, labeled by sampling window
    async fn fetch(
        &self,
        token: &AccessToken,
        request: &ImageRequest,
        label: ImageLabel,
    ) -> Result<RawImage, FetchError>;
}

/// Comparator service: produces the per-class change breakdown.
///
/// The returned report does not carry artifact URLs or the boundary area;
/// the orchestrator fills those in.
#[async_trait]
pub trait ChangeComparator: Send + Sync {
    /// Compare a before/after snapshot pair
    async fn compare(
        &self,
        before: &RawImage,
        after: &RawImage,
    ) -> Result<ChangeReport, CompareError>;
}

/// Upload service: stores a batch of snapshots and returns their URLs.
///
/// Hard contract: `urls[i]` corresponds to `images[i]` for every batch size.
#[async_trait]
pub trait ArtifactUploader: Send + Sync {
    /// Upload all images in one batch call
    async fn upload(&self, images: &[RawImage]) -> Result<Vec<String>, UploadError>;
}
