//! Content inspectors: corroborate declared types against payload bytes.

mod image;
mod pdf;

pub use image::ImageContentInspector;
pub use pdf::PdfContentInspector;

use async_trait::async_trait;
use fitmedia_core::UploadCandidate;

/// Verifies that a payload's bytes corroborate its declared content type.
///
/// Inspection is fail-closed: implementations never error outward. Anything
/// that prevents a conclusive match (unknown type, truncated header) is
/// reported as invalid content.
#[async_trait]
pub trait ContentInspector: Send + Sync {
    /// Whether this inspector takes responsibility for the declared type.
    ///
    /// Capability can be broader than strict signature support: a type may
    /// be routable here and still fail content verification.
    fn can_handle(&self, content_type: &str) -> bool;

    /// Verify the payload bytes against the declared type.
    async fn is_valid_content(&self, candidate: &UploadCandidate) -> bool;
}
