//! Boundary resolution by farmer identifier
//!
//! Looks a farmer up against the full directory listing, fetched fresh on
//! every call. Exact identifier equality, first match wins (identifiers are
//! expected unique). A miss is a terminal, non-exceptional outcome.

use crate::error::DirectoryError;
use crate::ports::BoundaryDirectory;
use cropsight_types::FarmerBoundary;
use std::sync::Arc;

/// Maps a farmer identifier to its boundary, or `None` when unknown.
#[derive(Clone)]
pub struct CoordinateResolver {
    directory: Arc<dyn BoundaryDirectory>,
}

impl CoordinateResolver {
    /// Create a resolver over a directory port
    #[inline]
    #[must_use]
    pub fn new(directory: Arc<dyn BoundaryDirectory>) -> Self {
        Self { directory }
    }

    /// Resolve a farmer identifier to its boundary.
    ///
    /// # Errors
    /// `DirectoryError` when the directory itself is unreachable or returns
    /// an undecodable listing. An unknown farmer is `Ok(None)`, not an error.
    pub async fn resolve(&self, farmer_id: &str) -> Result<Option<FarmerBoundary>, DirectoryError> {
        let boundaries = self.directory.list_boundaries().await?;
        tracing::debug!(count = boundaries.len(), "directory listing fetched");

        Ok(boundaries.into_iter().find(|b| b.farmer_id == farmer_id))
    }
}

impl std::fmt::Debug for CoordinateResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoordinateResolver").finish_non_exhaustive()
    }
}
