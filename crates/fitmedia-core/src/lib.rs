//! Fitmedia Core Library
//!
//! This crate provides the error types, configuration, and domain models
//! shared across the Fitmedia upload validation components.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{CategoryRules, UploadOptions};
pub use error::{ErrorMetadata, LogLevel, ValidationError};
pub use models::{FileValidationResult, UploadCandidate, ValidatorKind};
