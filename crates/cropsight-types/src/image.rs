//! Raw satellite snapshots
//!
//! Opaque byte sequences returned by the imagery provider, labeled by
//! sampling window and held only in memory for the duration of one run.

use serde::{Deserialize, Serialize};

/// PNG file signature
const PNG_MAGIC: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

/// Which sampling window a snapshot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageLabel {
    /// Earlier sampling window
    Before,
    /// Later sampling window
    After,
}

impl ImageLabel {
    /// Wire name used for multipart part names and file names
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageLabel::Before => "before",
            ImageLabel::After => "after",
        }
    }

    /// File name for multipart uploads
    #[inline]
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.png", self.as_str())
    }
}

impl std::fmt::Display for ImageLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw snapshot: labeled bytes plus an inferred content type.
#[derive(Debug, Clone, PartialEq)]
pub struct RawImage {
    /// Sampling window label
    pub label: ImageLabel,
    /// Raw image bytes
    pub bytes: Vec<u8>,
    /// Inferred MIME type
    pub content_type: &'static str,
}

impl RawImage {
    /// Create a snapshot, inferring the content type from the bytes.
    #[must_use]
    pub fn new(label: ImageLabel, bytes: Vec<u8>) -> Self {
        let content_type = if bytes.starts_with(PNG_MAGIC) {
            "image/png"
        } else {
            "application/octet-stream"
        };
        Self {
            label,
            bytes,
            content_type,
        }
    }

    /// Byte length of the snapshot
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the snapshot carries no bytes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_wire_names() {
        assert_eq!(ImageLabel::Before.as_str(), "before");
        assert_eq!(ImageLabel::After.as_str(), "after");
        assert_eq!(ImageLabel::Before.file_name(), "before.png");
    }

    #[test]
    fn non_png_bytes_fall_back_to_octet_stream() {
        let image = RawImage::new(ImageLabel::Before, vec![1, 2, 3]);
        assert_eq!(image.content_type, "application/octet-stream");
        assert_eq!(image.len(), 3);
    }

    #[test]
    fn png_signature_detected() {
        let mut bytes = PNG_MAGIC.to_vec();
        bytes.extend_from_slice(&[0; 16]);
        let image = RawImage::new(ImageLabel::After, bytes);
        assert_eq!(image.content_type, "image/png");
    }
}
