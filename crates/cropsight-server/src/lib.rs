//! Cropsight Server - thin HTTP surface over the change-report pipeline
//!
//! Exposes:
//! - `GET /process-image?farmerId=...` - composed change report as JSON
//! - `GET /snapshot?farmerId=...` - the after-month snapshot as PNG bytes
//! - `GET /healthz` - liveness probe
//!
//! Both report endpoints are thin callers of `cropsight-core`; all real
//! design lives in the pipeline.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod routes;

pub use config::AppConfig;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
