//! The change-report pipeline (the orchestrator)
//!
//! Sequences one run end to end:
//! `ResolveBoundary -> BuildRequests(x2) -> Authenticate -> FetchImages(x2)
//! -> {Upload, Compare} -> ComposeReport`.
//!
//! The two fetches have no data dependency and run concurrently, as do the
//! upload and compare calls. ComposeReport is the single synchronization
//! point: it waits on both, then overwrites the comparator's area figure
//! with the resolved boundary's area and attaches the uploaded URLs.
//!
//! The only non-fatal branch is a boundary lookup miss, which produces the
//! empty report without contacting the token issuer or imagery provider.

use crate::error::PipelineError;
use crate::ports::{ArtifactUploader, BoundaryDirectory, ChangeComparator, ImageFetcher, TokenProvider};
use crate::request::{build_request, SamplingWindow};
use crate::resolver::CoordinateResolver;
use cropsight_types::{ChangeReport, FarmerBoundary, ImageLabel, RawImage};
use std::sync::Arc;
use std::time::Duration;
use ulid::Ulid;

/// Unique run identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(pub Ulid);

impl RunId {
    /// Generate a new run ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Earlier sampling window
    pub before: SamplingWindow,
    /// Later sampling window
    pub after: SamplingWindow,
    /// Optional bound on a whole run; `None` leaves only per-call timeouts
    pub run_timeout: Option<Duration>,
}

impl PipelineConfig {
    /// Create the default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With both sampling windows
    #[inline]
    #[must_use]
    pub fn with_windows(mut self, before: SamplingWindow, after: SamplingWindow) -> Self {
        self.before = before;
        self.after = after;
        self
    }

    /// With a whole-run deadline
    #[inline]
    #[must_use]
    pub fn with_run_timeout(mut self, timeout: Duration) -> Self {
        self.run_timeout = Some(timeout);
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            before: SamplingWindow::new(2023, 5),
            after: SamplingWindow::new(2023, 6),
            run_timeout: None,
        }
    }
}

/// The orchestrator
///
/// Owns a port handle per remote collaborator; no state is shared between
/// concurrent runs.
#[derive(Clone)]
pub struct ChangePipeline {
    config: PipelineConfig,
    resolver: CoordinateResolver,
    tokens: Arc<dyn TokenProvider>,
    fetcher: Arc<dyn ImageFetcher>,
    comparator: Arc<dyn ChangeComparator>,
    uploader: Arc<dyn ArtifactUploader>,
}

impl ChangePipeline {
    /// Wire a pipeline from its five ports
    #[must_use]
    pub fn new(
        config: PipelineConfig,
        directory: Arc<dyn BoundaryDirectory>,
        tokens: Arc<dyn TokenProvider>,
        fetcher: Arc<dyn ImageFetcher>,
        comparator: Arc<dyn ChangeComparator>,
        uploader: Arc<dyn ArtifactUploader>,
    ) -> Self {
        Self {
            config,
            resolver: CoordinateResolver::new(directory),
            tokens,
            fetcher,
            comparator,
            uploader,
        }
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full pipeline for one farmer.
    ///
    /// An unknown farmer yields the empty report. Every remote failure
    /// aborts the run with no partial report; already-obtained intermediate
    /// results (uploaded URLs included) are discarded.
    ///
    /// # Errors
    /// `PipelineError` for any fatal stage failure or a run timeout.
    pub async fn run(&self, farmer_id: &str) -> Result<ChangeReport, PipelineError> {
        match self.config.run_timeout {
            Some(limit) => tokio::time::timeout(limit, self.run_inner(farmer_id))
                .await
                .map_err(|_| PipelineError::Timeout {
                    elapsed_secs: limit.as_secs(),
                })?,
            None => self.run_inner(farmer_id).await,
        }
    }

    async fn run_inner(&self, farmer_id: &str) -> Result<ChangeReport, PipelineError> {
        let run_id = RunId::new();
        tracing::info!(%run_id, farmer_id, "starting change-report run");

        let Some(boundary) = self.resolver.resolve(farmer_id).await? else {
            tracing::info!(%run_id, farmer_id, "no boundary found, returning empty report");
            return Ok(ChangeReport::empty());
        };
        tracing::debug!(
            %run_id,
            vertices = boundary.polygon.len(),
            area_ha = boundary.total_area_ha,
            "boundary resolved"
        );

        let before_request = build_request(self.config.before, &boundary.polygon);
        let after_request = build_request(self.config.after, &boundary.polygon);

        let token = self.tokens.fetch_token().await?;
        tracing::debug!(%run_id, "access token received");

        let (before, after) = tokio::try_join!(
            self.fetcher.fetch(&token, &before_request, ImageLabel::Before),
            self.fetcher.fetch(&token, &after_request, ImageLabel::After),
        )?;
        tracing::info!(
            %run_id,
            before_bytes = before.len(),
            after_bytes = after.len(),
            "snapshots fetched"
        );

        let images = [before, after];
        let (urls, report) = tokio::try_join!(
            async {
                self.uploader
                    .upload(&images)
                    .await
                    .map_err(PipelineError::from)
            },
            async {
                self.comparator
                    .compare(&images[0], &images[1])
                    .await
                    .map_err(PipelineError::from)
            },
        )?;
        tracing::info!(%run_id, urls = urls.len(), "snapshots uploaded and compared");

        Ok(compose_report(report, &boundary, urls))
    }

    /// Fetch only the later window's snapshot for one farmer.
    ///
    /// The second pipeline entry point: resolve, authenticate, fetch the
    /// after-month image. `None` when the farmer is unknown.
    ///
    /// # Errors
    /// `PipelineError` for any fatal stage failure.
    pub async fn snapshot(&self, farmer_id: &str) -> Result<Option<RawImage>, PipelineError> {
        let run_id = RunId::new();
        tracing::info!(%run_id, farmer_id, "starting snapshot run");

        let Some(boundary) = self.resolver.resolve(farmer_id).await? else {
            tracing::info!(%run_id, farmer_id, "no boundary found for snapshot");
            return Ok(None);
        };

        let token = self.tokens.fetch_token().await?;
        let request = build_request(self.config.after, &boundary.polygon);
        let image = self
            .fetcher
            .fetch(&token, &request, ImageLabel::After)
            .await?;
        tracing::info!(%run_id, bytes = image.len(), "snapshot fetched");

        Ok(Some(image))
    }
}

impl std::fmt::Debug for ChangePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangePipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Merge the comparator's breakdown with the uploader's URLs and the
/// resolved area.
///
/// Invariant: the final report always carries the resolved boundary's area,
/// never any figure the comparator supplied.
fn compose_report(
    mut report: ChangeReport,
    boundary: &FarmerBoundary,
    urls: Vec<String>,
) -> ChangeReport {
    report.total_area_ha = boundary.total_area_ha;
    report.urls = urls;
    report
}
