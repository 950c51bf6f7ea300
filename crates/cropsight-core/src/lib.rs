//! Cropsight Core - change-report pipeline orchestration
//!
//! The central pipeline that:
//! - Resolves a farmer identifier to a boundary polygon
//! - Builds one imagery request per sampling window
//! - Authenticates against the imagery provider
//! - Fetches, uploads, and compares the two snapshots
//! - Composes the final NDVI change report
//!
//! # Example
//!
//! ```rust,ignore
//! use cropsight_core::{ChangePipeline, PipelineConfig};
//!
//! # async fn example(pipeline: ChangePipeline) -> Result<(), Box<dyn std::error::Error>> {
//! let report = pipeline.run("F100").await?;
//! println!("total area: {} ha", report.total_area_ha);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod request;
pub mod resolver;

// Re-exports for convenience
pub use error::{
    AuthError, CompareError, DirectoryError, FetchError, PipelineError, UploadError,
};
pub use pipeline::{ChangePipeline, PipelineConfig, RunId};
pub use ports::{ArtifactUploader, BoundaryDirectory, ChangeComparator, ImageFetcher, TokenProvider};
pub use request::{build_request, ImageRequest, SamplingWindow};
pub use resolver::CoordinateResolver;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
