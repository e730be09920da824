//! Types for in-flight uploads and validation outcomes.

use std::collections::HashMap;

use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;

/// A file being validated.
///
/// Both `file_name` and `content_type` are client-supplied and untrusted
/// until validation corroborates them against the payload bytes. Candidates
/// are created per request and discarded after the validation decision.
#[derive(Clone, Debug)]
pub struct UploadCandidate {
    pub file_name: String,
    /// Declared MIME type from the upload request
    pub content_type: String,
    pub data: Bytes,
}

impl UploadCandidate {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Payload size in bytes.
    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// At most the first `n` bytes of the payload. The explicit cap keeps
    /// header inspection bounded on adversarially large uploads.
    pub fn head(&self, n: usize) -> &[u8] {
        &self.data[..self.data.len().min(n)]
    }
}

/// Finite tag identifying a registered validator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ValidatorKind {
    Image,
    Pdf,
}

impl ValidatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidatorKind::Image => "image",
            ValidatorKind::Pdf => "pdf",
        }
    }
}

impl std::fmt::Display for ValidatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a validation call.
///
/// Invariant: `error_message` is present exactly when `is_valid` is false.
#[derive(Clone, Debug, Serialize)]
pub struct FileValidationResult {
    pub is_valid: bool,
    pub error_message: Option<String>,
    pub metadata: HashMap<String, Value>,
}

impl FileValidationResult {
    pub fn success() -> Self {
        Self {
            is_valid: true,
            error_message: None,
            metadata: HashMap::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error_message: Some(message.into()),
            metadata: HashMap::new(),
        }
    }

    /// Attach a structured metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_is_bounded_by_request_and_payload() {
        let candidate = UploadCandidate::new("a.png", "image/png", vec![1u8, 2, 3, 4]);
        assert_eq!(candidate.head(2), &[1, 2]);
        assert_eq!(candidate.head(16), &[1, 2, 3, 4]);
        assert_eq!(candidate.len(), 4);
    }

    #[test]
    fn result_invariant_holds_for_constructors() {
        let ok = FileValidationResult::success();
        assert!(ok.is_valid);
        assert!(ok.error_message.is_none());

        let failed = FileValidationResult::failure("bad file");
        assert!(!failed.is_valid);
        assert_eq!(failed.error_message.as_deref(), Some("bad file"));
    }

    #[test]
    fn metadata_builder_accumulates_entries() {
        let result = FileValidationResult::failure("mixed types")
            .with_metadata("ExpectedType", "image/png")
            .with_metadata("FoundType", "application/pdf");
        assert_eq!(result.metadata["ExpectedType"], "image/png");
        assert_eq!(result.metadata["FoundType"], "application/pdf");
    }

    #[test]
    fn validator_kind_display() {
        assert_eq!(ValidatorKind::Image.to_string(), "image");
        assert_eq!(ValidatorKind::Pdf.to_string(), "pdf");
    }
}
