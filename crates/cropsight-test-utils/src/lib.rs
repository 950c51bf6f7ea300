//! Testing utilities for the Cropsight workspace
//!
//! Configurable stub implementations of the pipeline's service ports, plus
//! shared fixtures. Each stub counts its invocations so tests can assert
//! which remote collaborators were (or were not) contacted.

#![allow(missing_docs)]

use async_trait::async_trait;
use cropsight_core::error::{AuthError, CompareError, DirectoryError, FetchError, UploadError};
use cropsight_core::ports::{
    ArtifactUploader, BoundaryDirectory, ChangeComparator, ImageFetcher, TokenProvider,
};
use cropsight_core::request::ImageRequest;
use cropsight_types::{
    AccessToken, ChangeReport, FarmerBoundary, ImageLabel, Polygon, RawImage, VegClassChange,
    Vertex,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A 4-vertex square boundary fixture
pub fn square_boundary(farmer_id: &str, total_area_ha: f64) -> FarmerBoundary {
    FarmerBoundary::new(
        farmer_id,
        Polygon::new(vec![
            Vertex::new(77.10, 28.50),
            Vertex::new(77.20, 28.50),
            Vertex::new(77.20, 28.60),
            Vertex::new(77.10, 28.60),
        ]),
        total_area_ha,
    )
}

/// Minimal valid-looking PNG payload (signature plus filler)
pub fn fake_png(filler: u8) -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
    bytes.extend(std::iter::repeat(filler).take(32));
    bytes
}

/// A comparator-shaped report: class breakdown present, bogus area, no URLs.
///
/// The bogus area lets tests verify the orchestrator overwrites it.
pub fn comparator_report() -> ChangeReport {
    let mut report = ChangeReport::empty();
    report.total_area_ha = 999.0;
    report.classes.insert(
        "dense vegetation".to_string(),
        VegClassChange {
            before_ha: 2.0,
            after_ha: 3.0,
            change_ha: 1.0,
            before_perc: 20.0,
            after_perc: 30.0,
        },
    );
    report.classes.insert(
        "bare/non-vegetation".to_string(),
        VegClassChange {
            before_ha: 8.0,
            after_ha: 7.0,
            change_ha: -1.0,
            before_perc: 80.0,
            after_perc: 70.0,
        },
    );
    report
}

/// Stub coordinate directory: fixed listing or fixed failure, with an
/// optional artificial delay for deadline tests.
pub struct StubDirectory {
    boundaries: Vec<FarmerBoundary>,
    failure: Option<String>,
    delay: Option<std::time::Duration>,
    calls: AtomicUsize,
}

impl StubDirectory {
    pub fn with_boundaries(boundaries: Vec<FarmerBoundary>) -> Self {
        Self {
            boundaries,
            failure: None,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            boundaries: Vec::new(),
            failure: Some(message.to_string()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: std::time::Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BoundaryDirectory for StubDirectory {
    async fn list_boundaries(&self) -> Result<Vec<FarmerBoundary>, DirectoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some(message) => Err(DirectoryError::Transport(message.clone())),
            None => Ok(self.boundaries.clone()),
        }
    }
}

/// Stub token issuer: fixed token or fixed error status.
pub struct StubTokenProvider {
    token: Option<String>,
    status: u16,
    calls: AtomicUsize,
}

impl StubTokenProvider {
    pub fn issuing(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            status: 200,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_with_status(status: u16) -> Self {
        Self {
            token: None,
            status,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenProvider for StubTokenProvider {
    async fn fetch_token(&self) -> Result<AccessToken, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.token {
            Some(token) => Ok(AccessToken::new(token.clone())),
            None => Err(AuthError::Status {
                status: self.status,
                body: "invalid_client".to_string(),
            }),
        }
    }
}

/// Stub imagery provider: canned bytes per label, records each request.
pub struct StubImageFetcher {
    fail: bool,
    calls: AtomicUsize,
    requests: Mutex<Vec<(ImageLabel, ImageRequest)>>,
}

impl StubImageFetcher {
    pub fn serving() -> Self {
        Self {
            fail: false,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests seen so far, in arrival order
    pub fn seen_requests(&self) -> Vec<(ImageLabel, ImageRequest)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageFetcher for StubImageFetcher {
    async fn fetch(
        &self,
        _token: &AccessToken,
        request: &ImageRequest,
        label: ImageLabel,
    ) -> Result<RawImage, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push((label, request.clone()));

        if self.fail {
            return Err(FetchError::Status {
                status: 500,
                body: "processing failed".to_string(),
            });
        }

        let filler = match label {
            ImageLabel::Before => 0x05,
            ImageLabel::After => 0x06,
        };
        Ok(RawImage::new(label, fake_png(filler)))
    }
}

/// Stub comparator: configured report or fixed failure.
pub struct StubComparator {
    report: Option<ChangeReport>,
    calls: AtomicUsize,
}

impl StubComparator {
    pub fn reporting(report: ChangeReport) -> Self {
        Self {
            report: Some(report),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            report: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChangeComparator for StubComparator {
    async fn compare(
        &self,
        _before: &RawImage,
        _after: &RawImage,
    ) -> Result<ChangeReport, CompareError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.report {
            Some(report) => Ok(report.clone()),
            None => Err(CompareError::Status {
                status: 500,
                body: "comparison failed".to_string(),
            }),
        }
    }
}

/// Stub uploader: one URL per image, derived from its label, in input order.
pub struct StubUploader {
    fail: bool,
    calls: AtomicUsize,
}

impl StubUploader {
    pub fn serving() -> Self {
        Self {
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArtifactUploader for StubUploader {
    async fn upload(&self, images: &[RawImage]) -> Result<Vec<String>, UploadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(UploadError::Status {
                status: 500,
                body: "storage unavailable".to_string(),
            });
        }

        Ok(images
            .iter()
            .enumerate()
            .map(|(i, image)| format!("https://files.example/{}-{}.png", image.label, i))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn uploader_preserves_input_order_for_all_batch_sizes() {
        let uploader = StubUploader::serving();

        for size in 1..=4 {
            let images: Vec<RawImage> = (0..size)
                .map(|i| {
                    let label = if i % 2 == 0 {
                        ImageLabel::Before
                    } else {
                        ImageLabel::After
                    };
                    RawImage::new(label, fake_png(i as u8))
                })
                .collect();

            let urls = uploader.upload(&images).await.unwrap();
            assert_eq!(urls.len(), size);
            for (i, image) in images.iter().enumerate() {
                assert_eq!(urls[i], format!("https://files.example/{}-{}.png", image.label, i));
            }
        }
    }

    #[test]
    fn fake_png_carries_signature() {
        assert!(fake_png(0xAB).starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn comparator_report_carries_bogus_area() {
        let report = comparator_report();
        assert_eq!(report.total_area_ha, 999.0);
        assert!(report.urls.is_empty());
        assert_eq!(report.classes.len(), 2);
    }
}
