//! File validators: size, name, allow-list, and content checks per
//! upload category.

mod image;
mod pdf;

pub use image::ImageFileValidator;
pub use pdf::PdfFileValidator;

use async_trait::async_trait;
use fitmedia_core::{FileValidationResult, UploadCandidate, ValidationError, ValidatorKind};

/// Capability interface for one upload category.
///
/// Ordinary user-input problems surface as hard `ValidationError`s here;
/// the orchestrator converts them into soft results at its boundary.
#[async_trait]
pub trait FileValidator: Send + Sync {
    fn kind(&self) -> ValidatorKind;

    /// Whether this validator accepts the declared content type.
    fn can_handle(&self, content_type: &str) -> bool;

    /// Validate a batch. All shared checks (sizes, names) run first, then
    /// the category-specific checks per file.
    async fn validate_files(
        &self,
        files: &[UploadCandidate],
    ) -> Result<FileValidationResult, ValidationError>;

    /// Validate a single file through the batch path.
    async fn validate_file(
        &self,
        file: &UploadCandidate,
    ) -> Result<FileValidationResult, ValidationError> {
        self.validate_files(std::slice::from_ref(file)).await
    }
}
