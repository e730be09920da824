//! Magic-byte signature catalog.
//!
//! Maps declared MIME types to the binary signatures a genuine file of that
//! type must start with. The catalog is built once into a process-wide
//! static and never mutated afterwards.

use std::collections::HashMap;
use std::sync::LazyLock;

/// One candidate signature: a required byte prefix, plus optional extra
/// bytes at a fixed offset. The offset part covers container formats whose
/// identifying tag sits past the header (WebP keeps `WEBP` at offset 8
/// inside its RIFF container).
#[derive(Clone, Copy, Debug)]
pub struct Signature {
    prefix: &'static [u8],
    tag: Option<(usize, &'static [u8])>,
}

impl Signature {
    const fn prefix(prefix: &'static [u8]) -> Self {
        Self { prefix, tag: None }
    }

    const fn with_tag(prefix: &'static [u8], offset: usize, tag: &'static [u8]) -> Self {
        Self {
            prefix,
            tag: Some((offset, tag)),
        }
    }

    /// Whether `head` carries this signature.
    pub fn matches(&self, head: &[u8]) -> bool {
        if !head.starts_with(self.prefix) {
            return false;
        }
        match self.tag {
            None => true,
            Some((offset, tag)) => head
                .get(offset..offset + tag.len())
                .is_some_and(|slice| slice == tag),
        }
    }

    /// Number of head bytes needed to decide a match.
    pub fn required_len(&self) -> usize {
        match self.tag {
            None => self.prefix.len(),
            Some((offset, tag)) => self.prefix.len().max(offset + tag.len()),
        }
    }
}

/// PDF magic number, also used directly by the PDF inspector.
pub const PDF_MAGIC: &[u8] = b"%PDF";

pub struct SignatureCatalog {
    entries: HashMap<&'static str, Vec<Signature>>,
}

static CATALOG: LazyLock<SignatureCatalog> = LazyLock::new(SignatureCatalog::build);

impl SignatureCatalog {
    fn build() -> Self {
        let mut entries: HashMap<&'static str, Vec<Signature>> = HashMap::new();
        entries.insert("image/jpeg", vec![Signature::prefix(&[0xFF, 0xD8, 0xFF])]);
        entries.insert(
            "image/png",
            vec![Signature::prefix(&[
                0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A,
            ])],
        );
        entries.insert(
            "image/gif",
            vec![
                Signature::prefix(b"GIF87a"),
                Signature::prefix(b"GIF89a"),
            ],
        );
        entries.insert(
            "image/webp",
            vec![Signature::with_tag(b"RIFF", 8, b"WEBP")],
        );
        entries.insert("image/bmp", vec![Signature::prefix(&[0x42, 0x4D])]);
        entries.insert(
            "image/tiff",
            vec![
                Signature::prefix(&[0x49, 0x49, 0x2A, 0x00]),
                Signature::prefix(&[0x4D, 0x4D, 0x00, 0x2A]),
            ],
        );
        entries.insert("application/pdf", vec![Signature::prefix(PDF_MAGIC)]);
        Self { entries }
    }

    /// The process-wide catalog.
    pub fn global() -> &'static SignatureCatalog {
        &CATALOG
    }

    /// Signatures registered for a declared content type. Lookup is
    /// case-insensitive; MIME parameters are stripped.
    pub fn signatures_for(&self, content_type: &str) -> Option<&[Signature]> {
        self.entries
            .get(normalize(content_type).as_str())
            .map(|sigs| sigs.as_slice())
    }

    pub fn contains(&self, content_type: &str) -> bool {
        self.entries.contains_key(normalize(content_type).as_str())
    }

    /// Head bytes needed to test every signature for the type.
    pub fn max_signature_len(&self, content_type: &str) -> usize {
        self.signatures_for(content_type)
            .map(|sigs| sigs.iter().map(Signature::required_len).max().unwrap_or(0))
            .unwrap_or(0)
    }
}

fn normalize(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_lowercase()
}
