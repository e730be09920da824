//! PDF content inspection: magic number plus embedded-action scan.

use async_trait::async_trait;
use fitmedia_core::UploadCandidate;

use super::ContentInspector;
use crate::signature::PDF_MAGIC;

/// How much of the payload the embedded-action scan reads.
const SCAN_PREFIX_LIMIT: usize = 16 * 1024;

/// Name markers for executable actions inside a PDF. `/js` also covers
/// `/javascript` but both are listed to keep the blocklist explicit.
const SUSPICIOUS_MARKERS: [&str; 4] = ["/js", "/javascript", "/launch", "/richmedia"];

/// Two-stage PDF check: the `%PDF` magic number, then a bounded scan of the
/// leading bytes for script and launch-action name markers.
///
/// The scan is a flat substring search over the lower-cased prefix, not a
/// PDF object-model parse. It can over-reject when a marker happens to
/// appear inside compressed stream data, and under-reject hex-escaped name
/// obfuscation. Rejection is the safe default for both.
#[derive(Clone, Copy, Debug, Default)]
pub struct PdfContentInspector;

impl PdfContentInspector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ContentInspector for PdfContentInspector {
    fn can_handle(&self, content_type: &str) -> bool {
        let normalized = content_type
            .split(';')
            .next()
            .unwrap_or(content_type)
            .trim()
            .to_lowercase();
        normalized == "application/pdf"
    }

    async fn is_valid_content(&self, candidate: &UploadCandidate) -> bool {
        if candidate.head(PDF_MAGIC.len()) != PDF_MAGIC {
            tracing::warn!(
                file_name = %candidate.file_name,
                "File does not start with the PDF magic number"
            );
            return false;
        }

        let prefix = candidate.head(SCAN_PREFIX_LIMIT).to_ascii_lowercase();
        let text = String::from_utf8_lossy(&prefix);
        for marker in SUSPICIOUS_MARKERS {
            if text.contains(marker) {
                tracing::warn!(
                    file_name = %candidate.file_name,
                    marker = %marker,
                    "PDF contains a potentially malicious action marker"
                );
                return false;
            }
        }

        true
    }
}
