//! PDF upload validator.

use async_trait::async_trait;
use fitmedia_core::{
    FileValidationResult, UploadCandidate, UploadOptions, ValidationError, ValidatorKind,
};

use super::FileValidator;
use crate::checks;
use crate::inspector::{ContentInspector, PdfContentInspector};

pub struct PdfFileValidator {
    options: UploadOptions,
    inspector: PdfContentInspector,
}

impl PdfFileValidator {
    pub fn new(options: UploadOptions) -> Self {
        Self {
            options,
            inspector: PdfContentInspector::new(),
        }
    }

    async fn validate_candidate(&self, file: &UploadCandidate) -> Result<(), ValidationError> {
        if !self.inspector.can_handle(&file.content_type) {
            return Err(ValidationError::ContentTypeMismatch(format!(
                "'{}' is not a PDF document",
                file.file_name
            )));
        }

        let extension = file.file_name.rsplit('.').next().unwrap_or("");
        if !extension.eq_ignore_ascii_case("pdf") {
            return Err(ValidationError::ContentTypeMismatch(format!(
                "PDF uploads must use the '.pdf' extension, got '.{}'",
                extension.to_lowercase()
            )));
        }

        if !self.inspector.is_valid_content(file).await {
            return Err(ValidationError::ContentTypeMismatch(format!(
                "file '{}' is not a valid PDF document",
                file.file_name
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl FileValidator for PdfFileValidator {
    fn kind(&self) -> ValidatorKind {
        ValidatorKind::Pdf
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

        tracing::debug!(file_count = files.len(), "PDF batch passed validation");
        Ok(FileValidationResult::success().with_metadata("validator", self.kind().as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PdfFileValidator {
        PdfFileValidator::new(UploadOptions::default())
    }

    fn pdf_candidate(name: &str, data: &[u8]) -> UploadCandidate {
        UploadCandidate::new(name, "application/pdf", data.to_vec())
    }

    #[tokio::test]
    async fn accepts_benign_pdf() {
        let file = pdf_candidate("certificate.pdf", b"%PDF-1.7\n<< /Type /Catalog >>\n");
        let result = validator().validate_file(&file).await.unwrap();
        assert!(result.is_valid);
        assert_eq!(result.metadata["validator"], "pdf");
    }

    #[tokio::test]
    async fn rejects_wrong_extension() {
        let file = pdf_candidate("certificate.doc", b"%PDF-1.7\n");
        let err = validator().validate_file(&file).await.unwrap_err();
        assert!(err.to_string().contains(".pdf"));
    }

    #[tokio::test]
    async fn rejects_non_pdf_declared_type() {
        let file = UploadCandidate::new("photo.pdf", "image/png", b"%PDF-1.7\n".to_vec());
        let err = validator().validate_file(&file).await.unwrap_err();
        assert!(matches!(err, ValidationError::ContentTypeMismatch(_)));
    }

    #[tokio::test]
    async fn rejects_pdf_with_embedded_script() {
        let file = pdf_candidate(
            "certificate.pdf",
            b"%PDF-1.4\n<< /S /JavaScript /JS (this.print()) >>\n",
        );
        let err = validator().validate_file(&file).await.unwrap_err();
        assert!(matches!(err, ValidationError::ContentTypeMismatch(_)));
    }

    #[tokio::test]
    async fn rejects_masqueraded_executable() {
        let file = pdf_candidate("certificate.pdf", b"MZ\x90\x00\x03");
        let err = validator().validate_file(&file).await.unwrap_err();
        assert!(matches!(err, ValidationError::ContentTypeMismatch(_)));
    }
}
