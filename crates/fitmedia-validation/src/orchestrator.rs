//! Top-level validation entry point.
//!
//! The orchestrator resolves a validator for the batch, enforces batch
//! homogeneity, and converts hard validation errors into soft
//! `FileValidationResult` failures. Only cancellation and internal errors
//! escape as `Err`.

use fitmedia_core::{
    ErrorMetadata, FileValidationResult, UploadCandidate, UploadOptions, ValidationError,
    ValidatorKind,
};
use tokio_util::sync::CancellationToken;

use crate::checks;
use crate::registry::ValidatorRegistry;

pub struct ValidationOrchestrator {
    registry: ValidatorRegistry,
    options: UploadOptions,
}

impl ValidationOrchestrator {
    pub fn new(registry: ValidatorRegistry, options: UploadOptions) -> Self {
        Self { registry, options }
    }

    pub fn with_defaults(options: UploadOptions) -> Self {
        Self::new(ValidatorRegistry::with_defaults(options.clone()), options)
    }

    /// Validate a homogeneous batch of files.
    ///
    /// Returns `Err` only for cancellation and internal errors; everything
    /// else, including unsupported and mixed-type batches, comes back as a
    /// soft failure result.
    pub async fn validate_files(
        &self,
        files: &[UploadCandidate],
        cancel: &CancellationToken,
    ) -> Result<FileValidationResult, ValidationError> {
        if files.is_empty() {
            tracing::debug!("Validation requested with no files");
            return Ok(FileValidationResult::failure("No files uploaded"));
        }

        let expected_type = files[0].content_type.clone();
        let validator = match self.registry.validator_for_content_type(&expected_type) {
            Ok(validator) => validator,
            Err(err @ ValidationError::UnsupportedFileType { .. }) => {
                tracing::debug!(content_type = %expected_type, "No validator for declared type");
                let allowed: Vec<String> = self
                    .registry
                    .registered_kinds()
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                return Ok(FileValidationResult::failure(err.to_string())
                    .with_metadata("error_code", err.error_code())
                    .with_metadata("ContentType", expected_type)
                    .with_metadata("AllowedTypes", allowed));
            }
            Err(other) => return Err(other),
        };

        // Homogeneity pass, fail-fast on the first disagreeing file.
        for file in files {
            ensure_not_cancelled(cancel)?;
            if !validator.can_handle(&file.content_type) {
                tracing::warn!(
                    expected_type = %expected_type,
                    found_type = %file.content_type,
                    file_name = %file.file_name,
                    "Mixed file types in upload batch"
                );
                return Ok(FileValidationResult::failure(
                    "All files in a single upload must share the same file type",
                )
                .with_metadata("error_code", "MIXED_FILE_TYPES")
                .with_metadata("ExpectedType", expected_type.clone())
                .with_metadata("FoundType", file.content_type.clone()));
            }
        }

        // The per-file loop below never sees the batch as a whole, so the
        // aggregate cap is enforced here.
        if let Err(err) = checks::validate_total_size(files, self.options.max_total_size) {
            return Ok(FileValidationResult::failure(err.to_string())
                .with_metadata("error_code", err.error_code()));
        }

        for file in files {
            ensure_not_cancelled(cancel)?;
            match validator.validate_file(file).await {
                Ok(result) if result.is_valid => {}
                Ok(result) => return Ok(enrich(result, file)),
                Err(err) => return self.translate(err, file),
            }
        }

        Ok(FileValidationResult::success().with_metadata("FileCount", files.len()))
    }

    /// Validate a single file; same conversion rules as `validate_files`.
    pub async fn validate_file(
        &self,
        file: &UploadCandidate,
        cancel: &CancellationToken,
    ) -> Result<FileValidationResult, ValidationError> {
        ensure_not_cancelled(cancel)?;

        let validator = match self.registry.validator_for_file(file) {
            Ok(validator) => validator,
            Err(err @ ValidationError::UnsupportedFileType { .. }) => {
                tracing::debug!(content_type = %file.content_type, "No validator for declared type");
                let allowed: Vec<String> = self
                    .registry
                    .registered_kinds()
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                return Ok(FileValidationResult::failure(err.to_string())
                    .with_metadata("error_code", err.error_code())
                    .with_metadata("ContentType", file.content_type.clone())
                    .with_metadata("AllowedTypes", allowed));
            }
            Err(other) => return Err(other),
        };

        match validator.validate_file(file).await {
            Ok(result) if result.is_valid => Ok(result),
            Ok(result) => Ok(enrich(result, file)),
            Err(err) => self.translate(err, file),
        }
    }

    /// Whether every file falls into the same upload category: `image/*`
    /// in one bucket, exact `application/pdf` in the other. Empty and
    /// single-file collections are trivially homogeneous.
    pub fn all_same_category(files: &[UploadCandidate]) -> bool {
        let category = |file: &UploadCandidate| -> Option<ValidatorKind> {
            let normalized = file.content_type.trim().to_lowercase();
            if normalized.starts_with("image/") {
                Some(ValidatorKind::Image)
            } else if normalized == "application/pdf" {
                Some(ValidatorKind::Pdf)
            } else {
                None
            }
        };

        match files.first() {
            None => true,
            Some(first) => {
                let expected = category(first);
                files.iter().all(|file| category(file) == expected)
            }
        }
    }

    /// Convert a hard error into a soft result, except cancellation and
    /// internal errors which the caller must see.
    fn translate(
        &self,
        err: ValidationError,
        file: &UploadCandidate,
    ) -> Result<FileValidationResult, ValidationError> {
        match err {
            ValidationError::Cancelled => Err(ValidationError::Cancelled),
            ValidationError::Internal(source) => {
                tracing::error!(
                    file_name = %file.file_name,
                    error = %source,
                    "Unexpected failure during file validation"
                );
                Err(ValidationError::Internal(source))
            }
            other => {
                tracing::debug!(
                    file_name = %file.file_name,
                    file_size = file.len(),
                    error_code = other.error_code(),
                    error = %other,
                    "File failed validation"
                );
                Ok(enrich(
                    FileValidationResult::failure(other.to_string())
                        .with_metadata("error_code", other.error_code()),
                    file,
                ))
            }
        }
    }
}

fn enrich(result: FileValidationResult, file: &UploadCandidate) -> FileValidationResult {
    result
        .with_metadata("FileName", file.file_name.clone())
        .with_metadata("FileSize", file.len())
}

fn ensure_not_cancelled(cancel: &CancellationToken) -> Result<(), ValidationError> {
    if cancel.is_cancelled() {
        return Err(ValidationError::Cancelled);
    }
    Ok(())
}
