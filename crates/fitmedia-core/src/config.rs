//! Configuration module
//!
//! This module provides the upload validation configuration: size ceilings
//! and per-category allow-lists. The validation core consumes these values
//! at construction time and never mutates them.

use std::env;

use serde::Deserialize;

// Common constants
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_TOTAL_SIZE_BYTES: u64 = 50 * 1024 * 1024;

/// Allow-lists for one upload category (images or PDF documents).
#[derive(Clone, Debug, Deserialize)]
pub struct CategoryRules {
    pub allowed_content_types: Vec<String>,
    pub allowed_extensions: Vec<String>,
}

impl CategoryRules {
    /// Case-insensitive content type membership. MIME parameters
    /// (e.g. "; charset=utf-8") are stripped before comparison.
    pub fn allows_content_type(&self, content_type: &str) -> bool {
        let normalized = content_type
            .split(';')
            .next()
            .unwrap_or(content_type)
            .trim()
            .to_lowercase();
        self.allowed_content_types
            .iter()
            .any(|ct| ct.to_lowercase() == normalized)
    }

    /// Case-insensitive extension membership. Accepts the extension with or
    /// without a leading dot.
    pub fn allows_extension(&self, extension: &str) -> bool {
        let normalized = extension.trim_start_matches('.').to_lowercase();
        self.allowed_extensions
            .iter()
            .any(|ext| ext.trim_start_matches('.').to_lowercase() == normalized)
    }
}

/// Upload validation configuration
#[derive(Clone, Debug, Deserialize)]
pub struct UploadOptions {
    /// Maximum size of a single uploaded file, in bytes
    pub max_file_size: u64,
    /// Maximum aggregate size of a batch upload, in bytes
    pub max_total_size: u64,
    pub image: CategoryRules,
    pub pdf: CategoryRules,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE_BYTES,
            max_total_size: MAX_TOTAL_SIZE_BYTES,
            image: CategoryRules {
                allowed_content_types: [
                    "image/jpeg",
                    "image/png",
                    "image/gif",
                    "image/webp",
                    "image/bmp",
                    "image/tiff",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
                allowed_extensions: [
                    "jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            },
            pdf: CategoryRules {
                allowed_content_types: vec!["application/pdf".to_string()],
                allowed_extensions: vec!["pdf".to_string()],
            },
        }
    }
}

impl UploadOptions {
    /// Load configuration from environment variables, falling back to the
    /// built-in defaults for anything unset. `.env` files are honored.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let max_file_size = env::var("UPLOAD_MAX_FILE_SIZE_BYTES")
            .unwrap_or_else(|_| MAX_FILE_SIZE_BYTES.to_string())
            .parse::<u64>()
            .map_err(|_| anyhow::anyhow!("UPLOAD_MAX_FILE_SIZE_BYTES must be a valid number"))?;

        let max_total_size = env::var("UPLOAD_MAX_TOTAL_SIZE_BYTES")
            .unwrap_or_else(|_| MAX_TOTAL_SIZE_BYTES.to_string())
            .parse::<u64>()
            .map_err(|_| anyhow::anyhow!("UPLOAD_MAX_TOTAL_SIZE_BYTES must be a valid number"))?;

        if max_file_size > max_total_size {
            return Err(anyhow::anyhow!(
                "UPLOAD_MAX_FILE_SIZE_BYTES cannot exceed UPLOAD_MAX_TOTAL_SIZE_BYTES"
            ));
        }

        let image = CategoryRules {
            allowed_content_types: env_list(
                "UPLOAD_IMAGE_ALLOWED_CONTENT_TYPES",
                &defaults.image.allowed_content_types,
            ),
            allowed_extensions: env_list(
                "UPLOAD_IMAGE_ALLOWED_EXTENSIONS",
                &defaults.image.allowed_extensions,
            ),
        };

        let pdf = CategoryRules {
            allowed_content_types: env_list(
                "UPLOAD_PDF_ALLOWED_CONTENT_TYPES",
                &defaults.pdf.allowed_content_types,
            ),
            allowed_extensions: env_list(
                "UPLOAD_PDF_ALLOWED_EXTENSIONS",
                &defaults.pdf.allowed_extensions,
            ),
        };

        Ok(Self {
            max_file_size,
            max_total_size,
            image,
            pdf,
        })
    }
}

fn env_list(key: &str, default: &[String]) -> Vec<String> {
    match env::var(key) {
        Ok(value) => value
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect(),
        Err(_) => default.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_catalog_formats() {
        let options = UploadOptions::default();
        assert!(options.image.allows_content_type("image/jpeg"));
        assert!(options.image.allows_content_type("image/tiff"));
        assert!(options.pdf.allows_content_type("application/pdf"));
        assert!(options.max_file_size <= options.max_total_size);
    }

    #[test]
    fn content_type_check_is_case_insensitive() {
        let options = UploadOptions::default();
        assert!(options.image.allows_content_type("IMAGE/PNG"));
        assert!(!options.image.allows_content_type("image/svg+xml"));
    }

    #[test]
    fn content_type_check_strips_parameters() {
        let options = UploadOptions::default();
        assert!(options.image.allows_content_type("image/png; charset=utf-8"));
    }

    #[test]
    fn extension_check_accepts_leading_dot() {
        let options = UploadOptions::default();
        assert!(options.image.allows_extension(".JPG"));
        assert!(options.image.allows_extension("png"));
        assert!(!options.image.allows_extension("svg"));
        assert!(options.pdf.allows_extension(".pdf"));
    }
}
