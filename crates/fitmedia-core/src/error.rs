//! Error types module
//!
//! This module provides the error taxonomy for the upload validation
//! subsystem. Hard failures are represented by the `ValidationError` enum;
//! ordinary user-input problems are reported through soft
//! `FileValidationResult` values instead (see `models`).
//!
//! `Cancelled` and `Internal` are the only variants that escape the
//! orchestrator; every other variant is converted into a soft result at
//! that boundary.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for security-relevant rejections
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "FILE_SIZE_EXCEEDED")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File size {size} bytes exceeds maximum allowed size of {max} bytes")]
    FileSizeExceeded { size: u64, max: u64 },

    #[error("Invalid file name: {0}")]
    FileNameInvalid(String),

    #[error("File content does not match the declared type: {0}")]
    ContentTypeMismatch(String),

    #[error("Unsupported file type: {}. Allowed types: {}", .content_type, .allowed.join(", "))]
    UnsupportedFileType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("File validation failed: {0}")]
    Failed(String),

    #[error("Validation was cancelled")]
    Cancelled,

    #[error("Internal validation error")]
    Internal(#[source] anyhow::Error),
}

impl From<anyhow::Error> for ValidationError {
    fn from(err: anyhow::Error) -> Self {
        ValidationError::Internal(err)
    }
}

/// Static metadata for each variant: (http_status, error_code, sensitive, log_level).
/// client_message stays per-variant for dynamic content.
fn static_metadata(err: &ValidationError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        ValidationError::FileSizeExceeded { .. } => {
            (413, "FILE_SIZE_EXCEEDED", false, LogLevel::Debug)
        }
        ValidationError::FileNameInvalid(_) => (400, "FILE_NAME_INVALID", false, LogLevel::Warn),
        ValidationError::ContentTypeMismatch(_) => {
            (415, "FILE_CONTENT_TYPE_MISMATCH", false, LogLevel::Warn)
        }
        ValidationError::UnsupportedFileType { .. } => {
            (415, "UNSUPPORTED_FILE_TYPE", false, LogLevel::Debug)
        }
        ValidationError::Failed(_) => (400, "FILE_VALIDATION_FAILED", false, LogLevel::Debug),
        ValidationError::Cancelled => (408, "OPERATION_CANCELLED", false, LogLevel::Debug),
        ValidationError::Internal(_) => (500, "INTERNAL_ERROR", true, LogLevel::Error),
    }
}

impl ErrorMetadata for ValidationError {
    fn http_status_code(&self) -> u16 {
        static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        static_metadata(self).1
    }

    fn is_sensitive(&self) -> bool {
        static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            ValidationError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl ValidationError {
    /// Get detailed error information including the source chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}
