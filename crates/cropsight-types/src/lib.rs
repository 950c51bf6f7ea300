//! Cropsight Types - shared data model
//!
//! Passive data shapes flowing through the change-report pipeline:
//! - Polygon geometry and resolved farmer boundaries
//! - Raw satellite snapshots held in memory for one run
//! - The composed NDVI change report
//! - Bearer tokens for the imagery provider
//!
//! Everything here is created and consumed within a single pipeline run;
//! nothing outlives the request that produced it.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod boundary;
pub mod geometry;
pub mod image;
pub mod report;
pub mod token;

// Re-exports for convenience
pub use boundary::FarmerBoundary;
pub use geometry::{Polygon, Vertex};
pub use image::{ImageLabel, RawImage};
pub use report::{ChangeReport, VegClassChange};
pub use token::AccessToken;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
