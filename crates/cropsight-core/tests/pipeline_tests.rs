//! Functional tests for the change-report pipeline and its error semantics.
//!
//! These tests exercise ChangePipeline end to end against stub services:
//! - A resolved boundary yields a fully composed report.
//! - An unknown farmer degrades to the empty report without remote calls.
//! - Fatal stage failures abort the run with no partial report.

use cropsight_core::error::PipelineError;
use cropsight_core::{ChangePipeline, PipelineConfig, SamplingWindow};
use cropsight_test_utils::{
    comparator_report, square_boundary, StubComparator, StubDirectory, StubImageFetcher,
    StubTokenProvider, StubUploader,
};
use cropsight_types::ImageLabel;
use std::sync::Arc;
use std::time::Duration;

struct Harness {
    directory: Arc<StubDirectory>,
    tokens: Arc<StubTokenProvider>,
    fetcher: Arc<StubImageFetcher>,
    comparator: Arc<StubComparator>,
    uploader: Arc<StubUploader>,
}

impl Harness {
    fn healthy() -> Self {
        Self {
            directory: Arc::new(StubDirectory::with_boundaries(vec![square_boundary(
                "F100", 12.5,
            )])),
            tokens: Arc::new(StubTokenProvider::issuing("token-1")),
            fetcher: Arc::new(StubImageFetcher::serving()),
            comparator: Arc::new(StubComparator::reporting(comparator_report())),
            uploader: Arc::new(StubUploader::serving()),
        }
    }

    fn pipeline(&self) -> ChangePipeline {
        ChangePipeline::new(
            PipelineConfig::default(),
            self.directory.clone(),
            self.tokens.clone(),
            self.fetcher.clone(),
            self.comparator.clone(),
            self.uploader.clone(),
        )
    }
}

/// Scenario 1: a resolved 12.5 ha boundary produces a report carrying that
/// exact area and both artifact URLs, regardless of the comparator's own
/// area figure.
#[tokio::test]
async fn successful_run_composes_full_report() {
    let harness = Harness::healthy();
    let report = harness.pipeline().run("F100").await.unwrap();

    assert_eq!(report.total_area_ha, 12.5);
    assert_eq!(report.urls.len(), 2);
    assert!(!report.classes.is_empty());

    // Both windows fetched, one batch upload, one comparison.
    assert_eq!(harness.fetcher.calls(), 2);
    assert_eq!(harness.uploader.calls(), 1);
    assert_eq!(harness.comparator.calls(), 1);
    assert_eq!(harness.tokens.calls(), 1);
}

/// The uploader's positional contract flows through to the report: the
/// before-image URL comes first.
#[tokio::test]
async fn report_urls_preserve_upload_order() {
    let harness = Harness::healthy();
    let report = harness.pipeline().run("F100").await.unwrap();

    assert_eq!(report.urls[0], "https://files.example/before-0.png");
    assert_eq!(report.urls[1], "https://files.example/after-1.png");
}

/// The two imagery requests differ only in their time windows; both carry
/// the same closed ring built from the resolved polygon.
#[tokio::test]
async fn fetched_requests_cover_both_windows() {
    let harness = Harness::healthy();
    harness.pipeline().run("F100").await.unwrap();

    let seen = harness.fetcher.seen_requests();
    assert_eq!(seen.len(), 2);

    let labels: Vec<ImageLabel> = seen.iter().map(|(label, _)| *label).collect();
    assert!(labels.contains(&ImageLabel::Before));
    assert!(labels.contains(&ImageLabel::After));

    let (_, first) = &seen[0];
    let (_, second) = &seen[1];
    assert_eq!(
        first.input.bounds.geometry.coordinates,
        second.input.bounds.geometry.coordinates
    );
    assert_ne!(
        first.input.data[0].data_filter.time_range,
        second.input.data[0].data_filter.time_range
    );
}

/// Scenario 2: an unknown farmer yields a success-shaped empty report, and
/// neither the token issuer nor the imagery provider is contacted.
#[tokio::test]
async fn unknown_farmer_yields_empty_report_without_remote_calls() {
    let harness = Harness::healthy();
    let report = harness.pipeline().run("UNKNOWN").await.unwrap();

    assert_eq!(report.total_area_ha, 0.0);
    assert!(report.classes.is_empty());
    assert!(report.urls.is_empty());

    assert_eq!(harness.tokens.calls(), 0);
    assert_eq!(harness.fetcher.calls(), 0);
    assert_eq!(harness.uploader.calls(), 0);
    assert_eq!(harness.comparator.calls(), 0);
}

/// Scenario 3: a token issuer failure aborts the run before any image fetch.
#[tokio::test]
async fn auth_failure_aborts_before_any_fetch() {
    let mut harness = Harness::healthy();
    harness.tokens = Arc::new(StubTokenProvider::failing_with_status(401));

    let error = harness.pipeline().run("F100").await.unwrap_err();
    assert!(matches!(error, PipelineError::Auth(_)));
    assert_eq!(harness.fetcher.calls(), 0);
}

/// Scenario 4: a comparator failure after a successful upload surfaces
/// CompareError and the already-obtained URLs are discarded with the run.
#[tokio::test]
async fn compare_failure_discards_uploaded_urls() {
    let mut harness = Harness::healthy();
    harness.comparator = Arc::new(StubComparator::failing());

    let error = harness.pipeline().run("F100").await.unwrap_err();
    assert!(matches!(error, PipelineError::Compare(_)));
}

/// A fetch failure is fatal; nothing is uploaded or compared.
#[tokio::test]
async fn fetch_failure_aborts_run() {
    let mut harness = Harness::healthy();
    harness.fetcher = Arc::new(StubImageFetcher::failing());

    let error = harness.pipeline().run("F100").await.unwrap_err();
    assert!(matches!(error, PipelineError::Fetch(_)));
    assert_eq!(harness.uploader.calls(), 0);
    assert_eq!(harness.comparator.calls(), 0);
}

/// An upload failure is fatal even when the comparison would have succeeded.
#[tokio::test]
async fn upload_failure_aborts_run() {
    let mut harness = Harness::healthy();
    harness.uploader = Arc::new(StubUploader::failing());

    let error = harness.pipeline().run("F100").await.unwrap_err();
    assert!(matches!(error, PipelineError::Upload(_)));
}

/// A directory transport failure is fatal and distinct from a lookup miss.
#[tokio::test]
async fn directory_failure_aborts_run() {
    let mut harness = Harness::healthy();
    harness.directory = Arc::new(StubDirectory::failing("connection refused"));

    let error = harness.pipeline().run("F100").await.unwrap_err();
    assert!(matches!(error, PipelineError::Directory(_)));
    assert_eq!(harness.tokens.calls(), 0);
}

/// The snapshot entry point fetches only the after window's image.
#[tokio::test]
async fn snapshot_fetches_only_after_window() {
    let harness = Harness::healthy();
    let image = harness.pipeline().snapshot("F100").await.unwrap().unwrap();

    assert_eq!(image.label, ImageLabel::After);
    assert_eq!(harness.fetcher.calls(), 1);
    assert_eq!(harness.uploader.calls(), 0);
    assert_eq!(harness.comparator.calls(), 0);

    let seen = harness.fetcher.seen_requests();
    let (_, request) = &seen[0];
    assert_eq!(
        request.input.data[0].data_filter.time_range.from,
        "2023-06-01T00:00:00Z"
    );
}

/// Snapshot for an unknown farmer is None, with no token fetch.
#[tokio::test]
async fn snapshot_unknown_farmer_is_none() {
    let harness = Harness::healthy();
    let result = harness.pipeline().snapshot("UNKNOWN").await.unwrap();

    assert!(result.is_none());
    assert_eq!(harness.tokens.calls(), 0);
}

/// A configured run deadline bounds the whole pipeline.
#[tokio::test]
async fn run_timeout_surfaces_timeout_error() {
    let harness = Harness::healthy();
    let slow_directory = Arc::new(
        StubDirectory::with_boundaries(vec![square_boundary("F100", 12.5)])
            .with_delay(Duration::from_secs(5)),
    );
    let config = PipelineConfig::new()
        .with_windows(SamplingWindow::new(2023, 5), SamplingWindow::new(2023, 6))
        .with_run_timeout(Duration::from_millis(20));

    let pipeline = ChangePipeline::new(
        config,
        slow_directory,
        harness.tokens.clone(),
        harness.fetcher.clone(),
        harness.comparator.clone(),
        harness.uploader.clone(),
    );

    let error = pipeline.run("F100").await.unwrap_err();
    assert!(matches!(error, PipelineError::Timeout { .. }));
}
