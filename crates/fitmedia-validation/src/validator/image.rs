//! Image upload validator.

use async_trait::async_trait;
use fitmedia_core::{
    FileValidationResult, UploadCandidate, UploadOptions, ValidationError, ValidatorKind,
};

use super::FileValidator;
use crate::checks;
use crate::inspector::{ContentInspector, ImageContentInspector};

pub struct ImageFileValidator {
    options: UploadOptions,
    inspector: ImageContentInspector,
}

impl ImageFileValidator {
    pub fn new(options: UploadOptions) -> Self {
        Self {
            options,
            inspector: ImageContentInspector::new(),
        }
    }

    async fn validate_candidate(&self, file: &UploadCandidate) -> Result<(), ValidationError> {
        if !self.inspector.can_handle(&file.content_type) {
            return Err(ValidationError::ContentTypeMismatch(format!(
                "'{}' is not an image; all files in an image upload must be images",
                file.file_name
            )));
        }

        if !self.options.image.allows_content_type(&file.content_type) {
            return Err(ValidationError::ContentTypeMismatch(format!(
                "content type '{}' is not an allowed image type",
                file.content_type
            )));
        }

        let extension = file.file_name.rsplit('.').next().unwrap_or("");
        if !self.options.image.allows_extension(extension) {
            return Err(ValidationError::ContentTypeMismatch(format!(
                "file extension '.{}' is not allowed for image uploads",
                extension.to_lowercase()
            )));
        }

        if !self.inspector.is_valid_content(file).await {
            return Err(ValidationError::ContentTypeMismatch(format!(
                "file '{}' does not match its declared content type '{}'",
                file.file_name, file.content_type
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl FileValidator for ImageFileValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Image
    }

    fn can_handle(&self, content_type: &str) -> bool {
        self.inspector.can_handle(content_type)
    }

    async fn validate_files(
        &self,
        files: &[UploadCandidate],
    ) -> Result<FileValidationResult, ValidationError> {
        checks::run_common_checks(files, &self.options)?;

        for file in files {
            self.validate_candidate(file).await?;
        }

        tracing::debug!(file_count = files.len(), "Image batch passed validation");
        Ok(FileValidationResult::success().with_metadata("validator", self.kind().as_str()))
    }
}
