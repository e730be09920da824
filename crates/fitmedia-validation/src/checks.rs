//! Shared size and emptiness checks used by every validator.
//!
//! These are free functions rather than a base type so validators stay
//! independent implementations of the `FileValidator` capability trait.

use fitmedia_core::{UploadCandidate, UploadOptions, ValidationError};

use crate::filename;

/// A validator invoked with no files is a caller bug, reported as a hard
/// failure. The orchestrator screens empty batches before this point and
/// reports them as a soft result instead.
pub fn validate_not_empty(files: &[UploadCandidate]) -> Result<(), ValidationError> {
    if files.is_empty() {
        return Err(ValidationError::Failed(
            "no files were provided for validation".to_string(),
        ));
    }
    Ok(())
}

/// Aggregate batch size cap. Exceeding it is a hard failure even when each
/// file individually fits under the per-file cap.
pub fn validate_total_size(
    files: &[UploadCandidate],
    max_total: u64,
) -> Result<(), ValidationError> {
    let total: u64 = files.iter().map(UploadCandidate::len).sum();
    if total > max_total {
        tracing::debug!(total_size = total, max = max_total, "Upload batch exceeds total size cap");
        return Err(ValidationError::FileSizeExceeded {
            size: total,
            max: max_total,
        });
    }
    Ok(())
}

/// Per-file size cap.
pub fn validate_file_size(file: &UploadCandidate, max: u64) -> Result<(), ValidationError> {
    if file.len() > max {
        tracing::debug!(
            file_name = %file.file_name,
            file_size = file.len(),
            max = max,
            "File exceeds size cap"
        );
        return Err(ValidationError::FileSizeExceeded {
            size: file.len(),
            max,
        });
    }
    Ok(())
}

/// The common pipeline every validator runs before its type-specific
/// checks: not-empty, aggregate size, then per-file size and name safety.
pub fn run_common_checks(
    files: &[UploadCandidate],
    options: &UploadOptions,
) -> Result<(), ValidationError> {
    validate_not_empty(files)?;
    validate_total_size(files, options.max_total_size)?;
    for file in files {
        validate_file_size(file, options.max_file_size)?;
        filename::validate_file_name(&file.file_name)?;
    }
    Ok(())
}
