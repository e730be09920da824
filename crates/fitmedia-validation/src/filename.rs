//! Filename safety: traversal detection, dangerous-extension blocking,
//! and storage-side sanitization.

use std::collections::HashSet;
use std::sync::LazyLock;

use fitmedia_core::ValidationError;
use regex::Regex;
use uuid::Uuid;

/// Two or more consecutive dots, or any path separator. Applied to the
/// file name with its extension stripped, so ordinary dotted names like
/// `a.b.png` pass while `..\name.png` does not.
static TRAVERSAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.{2,}|[/\\]").expect("traversal pattern is valid"));

/// Extensions that must never be accepted, whatever the declared type.
static BLOCKED_EXTENSIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // Windows executables and installers
        "exe", "dll", "bat", "cmd", "com", "msi", "msp", "mst", "scr", "pif",
        // Scripts
        "js", "jse", "vb", "vbs", "vbe", "ws", "wsf", "wsh", "ps1", "psm1", "ps2", "sh", "bash",
        "csh", "hta",
        // Shortcuts and control-panel helpers
        "lnk", "url", "scf", "msc", "cpl", "gadget", "inf", "reg",
        // Packages and disk images
        "jar", "app", "application", "deb", "rpm", "apk", "dmg", "pkg", "iso",
    ]
    .into_iter()
    .collect()
});

const MAX_STEM_LENGTH: usize = 50;

/// Split a name into (stem, extension-with-dot). A name without a dot has
/// an empty extension; a leading-dot name like `.env` is all stem.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Reject unsafe file names: empty names, path traversal in the stem, and
/// blocked extensions.
pub fn validate_file_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::FileNameInvalid(
            "file name is empty".to_string(),
        ));
    }

    let (stem, extension) = split_extension(name);

    if TRAVERSAL_PATTERN.is_match(stem) {
        tracing::warn!(file_name = %name, "Rejected file name with path traversal characters");
        return Err(ValidationError::FileNameInvalid(format!(
            "file name '{}' contains path traversal characters",
            name
        )));
    }

    let extension = extension.trim_start_matches('.').to_lowercase();
    if BLOCKED_EXTENSIONS.contains(extension.as_str()) {
        tracing::warn!(file_name = %name, extension = %extension, "Rejected blocked file extension");
        return Err(ValidationError::FileNameInvalid(format!(
            "file extension '.{}' is not allowed",
            extension
        )));
    }

    Ok(())
}

/// Make a name safe for storage keys: the stem keeps only
/// `[A-Za-z0-9._-]` characters (everything else becomes `_`, as does any
/// `..` run), is capped at 50 characters, and the original extension is
/// reattached. An empty input gets a generated unique base name.
pub fn sanitize_file_name(name: &str) -> String {
    let (stem, extension) = split_extension(name.trim());

    let cleaned: String = stem
        .replace("..", "_")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_STEM_LENGTH)
        .collect();

    let base = if cleaned.is_empty() {
        generated_base()
    } else {
        cleaned
    };

    format!("{}{}", base, extension)
}

/// Storage-side unique name: `{stem}_{yyyyMMddHHmmss}_{8-hex}{ext}`.
pub fn unique_file_name(name: &str) -> String {
    let sanitized = sanitize_file_name(name);
    let (stem, extension) = split_extension(&sanitized);
    let timestamp = chrono::Utc::now().format("%Y%m%d%H%M%S");
    let mut suffix = Uuid::new_v4().simple().to_string();
    suffix.truncate(8);
    format!("{}_{}_{}{}", stem, timestamp, suffix, extension)
}

fn generated_base() -> String {
    Uuid::new_v4().simple().to_string()
}
