//! End-to-end orchestrator tests: batch routing, homogeneity, soft/hard
//! error channels, and cancellation.

use bytes::Bytes;
use fitmedia_core::{ErrorMetadata, UploadCandidate, UploadOptions, ValidationError};
use fitmedia_validation::ValidationOrchestrator;
use tokio_util::sync::CancellationToken;

const JPEG_HEADER: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];
const PNG_HEADER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

fn orchestrator() -> ValidationOrchestrator {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init()
        .ok();
    ValidationOrchestrator::with_defaults(UploadOptions::default())
}

fn candidate(name: &str, content_type: &str, data: impl Into<Bytes>) -> UploadCandidate {
    UploadCandidate::new(name, content_type, data)
}

#[tokio::test]
async fn empty_batch_is_a_soft_failure() {
    let result = orchestrator()
        .validate_files(&[], &CancellationToken::new())
        .await
        .unwrap();
    assert!(!result.is_valid);
    assert!(result.error_message.unwrap().contains("No files"));
}

#[tokio::test]
async fn valid_image_batch_succeeds_with_file_count() {
    let files = vec![
        candidate("a.jpg", "image/jpeg", JPEG_HEADER.to_vec()),
        candidate("b.png", "image/png", PNG_HEADER.to_vec()),
    ];
    let result = orchestrator()
        .validate_files(&files, &CancellationToken::new())
        .await
        .unwrap();
    assert!(result.is_valid, "{:?}", result.error_message);
    assert_eq!(result.metadata["FileCount"], 2);
}

#[tokio::test]
async fn mixed_types_fail_fast_with_metadata() {
    let files = vec![
        candidate("a.png", "image/png", PNG_HEADER.to_vec()),
        candidate("b.pdf", "application/pdf", b"%PDF-1.7\n".to_vec()),
    ];
    let result = orchestrator()
        .validate_files(&files, &CancellationToken::new())
        .await
        .unwrap();
    assert!(!result.is_valid);
    assert_eq!(result.metadata["error_code"], "MIXED_FILE_TYPES");
    assert_eq!(result.metadata["ExpectedType"], "image/png");
    assert_eq!(result.metadata["FoundType"], "application/pdf");
}

#[tokio::test]
async fn unsupported_type_is_a_soft_failure() {
    let files = vec![candidate("notes.txt", "text/plain", b"hello".to_vec())];
    let result = orchestrator()
        .validate_files(&files, &CancellationToken::new())
        .await
        .unwrap();
    assert!(!result.is_valid);
    let message = result.error_message.unwrap();
    assert!(message.contains("Unsupported file type"), "{message}");
    assert_eq!(result.metadata["ContentType"], "text/plain");
    assert_eq!(
        result.metadata["AllowedTypes"],
        serde_json::json!(["image", "pdf"])
    );
}

#[tokio::test]
async fn per_file_failure_is_enriched_with_name_and_size() {
    let files = vec![
        candidate("good.png", "image/png", PNG_HEADER.to_vec()),
        candidate("fake.png", "image/png", b"garbage bytes".to_vec()),
    ];
    let result = orchestrator()
        .validate_files(&files, &CancellationToken::new())
        .await
        .unwrap();
    assert!(!result.is_valid);
    assert_eq!(result.metadata["error_code"], "FILE_CONTENT_TYPE_MISMATCH");
    assert_eq!(result.metadata["FileName"], "fake.png");
    assert_eq!(result.metadata["FileSize"], 13);
}

#[tokio::test]
async fn oversized_batch_becomes_a_soft_failure_at_the_orchestrator() {
    // Each file fits individually; the aggregate exceeds the batch cap.
    let options = UploadOptions {
        max_file_size: 1024,
        max_total_size: 1500,
        ..UploadOptions::default()
    };
    let mut a = PNG_HEADER.to_vec();
    a.resize(900, 0);
    let mut b = PNG_HEADER.to_vec();
    b.resize(900, 0);
    let files = vec![
        candidate("a.png", "image/png", a),
        candidate("b.png", "image/png", b),
    ];
    let result = ValidationOrchestrator::with_defaults(options)
        .validate_files(&files, &CancellationToken::new())
        .await
        .unwrap();
    assert!(!result.is_valid);
    assert_eq!(result.metadata["error_code"], "FILE_SIZE_EXCEEDED");
}

#[tokio::test]
async fn pre_cancelled_token_escapes_as_an_error() {
    let token = CancellationToken::new();
    token.cancel();
    let files = vec![candidate("a.png", "image/png", PNG_HEADER.to_vec())];
    let err = orchestrator()
        .validate_files(&files, &token)
        .await
        .unwrap_err();
    assert!(matches!(err, ValidationError::Cancelled));
    assert_eq!(err.http_status_code(), 408);
}

#[tokio::test]
async fn single_file_path_matches_batch_semantics() {
    let orchestrator = orchestrator();
    let token = CancellationToken::new();

    let good = candidate("a.jpg", "image/jpeg", JPEG_HEADER.to_vec());
    assert!(orchestrator
        .validate_file(&good, &token)
        .await
        .unwrap()
        .is_valid);

    let spoofed = candidate("a.jpg", "image/jpeg", b"plain text".to_vec());
    let result = orchestrator.validate_file(&spoofed, &token).await.unwrap();
    assert!(!result.is_valid);
    assert_eq!(result.metadata["FileName"], "a.jpg");

    let unsupported = candidate("a.csv", "text/csv", b"x,y\n".to_vec());
    let result = orchestrator
        .validate_file(&unsupported, &token)
        .await
        .unwrap();
    assert!(!result.is_valid);
    assert_eq!(result.metadata["error_code"], "UNSUPPORTED_FILE_TYPE");
}

#[tokio::test]
async fn pdf_batch_round_trip() {
    let orchestrator = orchestrator();
    let token = CancellationToken::new();

    let clean = vec![
        candidate("cert-1.pdf", "application/pdf", b"%PDF-1.7\nbody\n".to_vec()),
        candidate("cert-2.pdf", "application/pdf", b"%PDF-1.4\nbody\n".to_vec()),
    ];
    assert!(orchestrator
        .validate_files(&clean, &token)
        .await
        .unwrap()
        .is_valid);

    let scripted = vec![candidate(
        "cert.pdf",
        "application/pdf",
        b"%PDF-1.4\n<< /S /JavaScript >>\n".to_vec(),
    )];
    let result = orchestrator.validate_files(&scripted, &token).await.unwrap();
    assert!(!result.is_valid);
    assert_eq!(result.metadata["error_code"], "FILE_CONTENT_TYPE_MISMATCH");
}

#[tokio::test]
async fn dangerous_file_name_is_reported_softly() {
    let files = vec![candidate(
        "../../avatar.png",
        "image/png",
        PNG_HEADER.to_vec(),
    )];
    let result = orchestrator()
        .validate_files(&files, &CancellationToken::new())
        .await
        .unwrap();
    assert!(!result.is_valid);
    assert_eq!(result.metadata["error_code"], "FILE_NAME_INVALID");
}
