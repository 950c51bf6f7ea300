//! Error types for the change-report pipeline
//!
//! One small error enum per remote collaborator, plus the pipeline-level
//! error that aborts a run. A boundary lookup miss is not an error: the
//! pipeline degrades to the empty report instead. No failure is retried
//! anywhere; transient and permanent failures abort identically.

/// Pipeline-level error: any of these aborts the run with no partial report.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Coordinate directory unreachable or undecodable
    #[error("boundary directory failed: {0}")]
    Directory(#[from] DirectoryError),

    /// Credential exchange failed
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// Imagery provider call failed
    #[error("image fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Comparator service call failed
    #[error("comparison failed: {0}")]
    Compare(#[from] CompareError),

    /// Upload service call failed
    #[error("upload failed: {0}")]
    Upload(#[from] UploadError),

    /// Whole-run deadline exceeded
    #[error("pipeline run timed out after {elapsed_secs}s")]
    Timeout { elapsed_secs: u64 },
}

impl PipelineError {
    /// Short stage name for logs and error responses
    #[inline]
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Directory(_) => "directory",
            Self::Auth(_) => "auth",
            Self::Fetch(_) => "fetch",
            Self::Compare(_) => "compare",
            Self::Upload(_) => "upload",
            Self::Timeout { .. } => "timeout",
        }
    }
}

/// Coordinate directory errors
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// Transport-level failure
    #[error("transport: {0}")]
    Transport(String),

    /// Non-success status from the directory
    #[error("status {status}: {body}")]
    Status { status: u16, body: String },

    /// Listing response could not be decoded
    #[error("decode: {0}")]
    Decode(String),
}

/// Token issuer errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Transport-level failure
    #[error("transport: {0}")]
    Transport(String),

    /// Non-success status from the issuer
    #[error("status {status}: {body}")]
    Status { status: u16, body: String },

    /// Malformed credential response
    #[error("decode: {0}")]
    Decode(String),
}

/// Imagery provider errors
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport-level failure
    #[error("transport: {0}")]
    Transport(String),

    /// Non-success status from the provider
    #[error("status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Comparator service errors
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// Transport-level failure
    #[error("transport: {0}")]
    Transport(String),

    /// Non-success status from the comparator
    #[error("status {status}: {body}")]
    Status { status: u16, body: String },

    /// Report response could not be decoded
    #[error("decode: {0}")]
    Decode(String),
}

/// Upload service errors
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// Transport-level failure
    #[error("transport: {0}")]
    Transport(String),

    /// Non-success status from the uploader
    #[error("status {status}: {body}")]
    Status { status: u16, body: String },

    /// URL list response could not be decoded
    #[error("decode: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_error_display() {
        let err = PipelineError::Auth(AuthError::Status {
            status: 401,
            body: "invalid_client".to_string(),
        });
        assert!(err.to_string().contains("authentication failed"));
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn pipeline_error_stage_names() {
        assert_eq!(
            PipelineError::Directory(DirectoryError::Transport("x".into())).stage(),
            "directory"
        );
        assert_eq!(
            PipelineError::Compare(CompareError::Decode("x".into())).stage(),
            "compare"
        );
        assert_eq!(PipelineError::Timeout { elapsed_secs: 30 }.stage(), "timeout");
    }
}
