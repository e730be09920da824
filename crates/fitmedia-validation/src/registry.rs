//! Explicit validator registry.
//!
//! Validators are registered under a finite `ValidatorKind` tag and
//! resolved by declared content type, in registration order.

use std::sync::Arc;

use fitmedia_core::{UploadCandidate, UploadOptions, ValidationError, ValidatorKind};

use crate::validator::{FileValidator, ImageFileValidator, PdfFileValidator};

pub struct ValidatorRegistry {
    entries: Vec<(ValidatorKind, Arc<dyn FileValidator>)>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registry with the image and PDF validators built from one shared
    /// configuration.
    pub fn with_defaults(options: UploadOptions) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ImageFileValidator::new(options.clone())));
        registry.register(Arc::new(PdfFileValidator::new(options)));
        registry
    }

    /// Register a validator under its own kind. A later registration of the
    /// same kind replaces the earlier one.
    pub fn register(&mut self, validator: Arc<dyn FileValidator>) {
        let kind = validator.kind();
        self.entries.retain(|(existing, _)| *existing != kind);
        self.entries.push((kind, validator));
    }

    pub fn get(&self, kind: ValidatorKind) -> Option<&Arc<dyn FileValidator>> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == kind)
            .map(|(_, validator)| validator)
    }

    pub fn registered_kinds(&self) -> Vec<ValidatorKind> {
        self.entries.iter().map(|(kind, _)| *kind).collect()
    }

    /// Resolve the validator responsible for a declared content type.
    pub fn validator_for_content_type(
        &self,
        content_type: &str,
    ) -> Result<&Arc<dyn FileValidator>, ValidationError> {
        let normalized = content_type.trim().to_lowercase();
        self.entries
            .iter()
            .find(|(_, validator)| validator.can_handle(&normalized))
            .map(|(_, validator)| validator)
            .ok_or_else(|| ValidationError::UnsupportedFileType {
                content_type: content_type.to_string(),
                allowed: self
                    .registered_kinds()
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            })
    }

    pub fn validator_for_file(
        &self,
        file: &UploadCandidate,
    ) -> Result<&Arc<dyn FileValidator>, ValidationError> {
        self.validator_for_content_type(&file.content_type)
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::with_defaults(UploadOptions::default())
    }
}
