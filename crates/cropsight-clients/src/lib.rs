//! Cropsight Clients - HTTP bindings for the remote collaborators
//!
//! One thin reqwest-backed binding per service port:
//! - [`OAuthTokenProvider`] - client-credentials exchange at the token issuer
//! - [`HttpBoundaryDirectory`] - coordinate directory listing
//! - [`ProcessApiImageFetcher`] - imagery provider process API
//! - [`HttpChangeComparator`] - NDVI comparator service
//! - [`HttpArtifactUploader`] - snapshot upload service
//!
//! Every binding shares one `reqwest::Client` (connection pooling and the
//! per-call timeout live there) and holds only its base URL on top.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod auth;
pub mod comparator;
pub mod directory;
mod http;
pub mod imagery;
pub mod uploader;

// Re-exports for convenience
pub use auth::{Credentials, OAuthTokenProvider};
pub use comparator::HttpChangeComparator;
pub use directory::HttpBoundaryDirectory;
pub use imagery::ProcessApiImageFetcher;
pub use uploader::HttpArtifactUploader;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
