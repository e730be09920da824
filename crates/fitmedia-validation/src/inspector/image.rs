//! Image content inspection via magic-byte signatures.

use async_trait::async_trait;
use fitmedia_core::UploadCandidate;

use super::ContentInspector;
use crate::signature::SignatureCatalog;

/// Checks image payloads against the signature catalog.
///
/// Declared types absent from the catalog are rejected even if the bytes
/// might be a valid image of an unlisted format. `can_handle` is broader:
/// any `image/*` type routes here, so the image validator can produce a
/// precise rejection instead of the generic unsupported-type path.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageContentInspector;

impl ImageContentInspector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ContentInspector for ImageContentInspector {
    fn can_handle(&self, content_type: &str) -> bool {
        content_type.trim().to_lowercase().starts_with("image/")
    }

    async fn is_valid_content(&self, candidate: &UploadCandidate) -> bool {
        let catalog = SignatureCatalog::global();

        let Some(signatures) = catalog.signatures_for(&candidate.content_type) else {
            tracing::warn!(
                file_name = %candidate.file_name,
                content_type = %candidate.content_type,
                "No signature registered for declared content type, rejecting"
            );
            return false;
        };

        let head = candidate.head(catalog.max_signature_len(&candidate.content_type));
        let matched = signatures.iter().any(|sig| sig.matches(head));

        if !matched {
            tracing::warn!(
                file_name = %candidate.file_name,
                content_type = %candidate.content_type,
                "File header does not match any signature for declared content type"
            );
        }

        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn candidate(content_type: &str, data: &[u8]) -> UploadCandidate {
        UploadCandidate::new("photo.bin", content_type, data.to_vec())
    }

    #[tokio::test]
    async fn accepts_matching_jpeg_header() {
        let inspector = ImageContentInspector::new();
        let file = candidate("image/jpeg", &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]);
        assert!(inspector.is_valid_content(&file).await);
    }

    #[tokio::test]
    async fn rejects_zeroed_header_for_jpeg() {
        let inspector = ImageContentInspector::new();
        let file = candidate("image/jpeg", &[0x00, 0x00, 0x00, 0x00]);
        assert!(!inspector.is_valid_content(&file).await);
    }

    #[tokio::test]
    async fn rejects_unlisted_declared_type() {
        // svg is a real image type, but it has no signature entry: fail closed.
        let inspector = ImageContentInspector::new();
        let file = candidate("image/svg+xml", b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>");
        assert!(!inspector.is_valid_content(&file).await);
    }

    #[tokio::test]
    async fn rejects_truncated_header() {
        let inspector = ImageContentInspector::new();
        let file = candidate("image/png", &PNG_HEADER[..4]);
        assert!(!inspector.is_valid_content(&file).await);
    }

    #[tokio::test]
    async fn accepts_png_header_case_insensitive_type() {
        let inspector = ImageContentInspector::new();
        let file = candidate("IMAGE/PNG", &PNG_HEADER);
        assert!(inspector.is_valid_content(&file).await);
    }

    #[test]
    fn can_handle_is_broader_than_the_catalog() {
        let inspector = ImageContentInspector::new();
        assert!(inspector.can_handle("image/png"));
        // Routable even though content verification will fail
        assert!(inspector.can_handle("image/svg+xml"));
        assert!(!inspector.can_handle("application/pdf"));
        assert!(!inspector.can_handle("text/plain"));
    }
}
