//! Domain models

pub mod upload;

pub use upload::{FileValidationResult, UploadCandidate, ValidatorKind};
