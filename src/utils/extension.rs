//! Extension detection from names and from leading bytes.

use std::path::Path;

/// Lowercased final extension of `path`, without the dot.
///
/// Dotfiles such as `.bashrc` have no extension.
///
/// ```
/// use fskit::extension_from_path;
/// use std::path::Path;
///
/// assert_eq!(extension_from_path(Path::new("photos/IMG_01.JPG")).as_deref(), Some("jpg"));
/// assert_eq!(extension_from_path(Path::new("Makefile")), None);
/// ```
#[must_use]
pub fn extension_from_path(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Known magic numbers, checked in order.
const SIGNATURES: &[(&[u8], &str)] = &[
    (&[0xFF, 0xD8, 0xFF], "jpg"),
    (&[0x89, 0x50, 0x4E, 0x47], "png"),
    (b"GIF8", "gif"),
    (b"%PDF", "pdf"),
    (&[0x50, 0x4B, 0x03, 0x04], "zip"),
    (b"MZ", "exe"),
    (&[0x49, 0x49, 0x2A, 0x00], "tiff"),
    (b"BM", "bmp"),
    (&[0x7F, 0x45, 0x4C, 0x46], "elf"),
    (&[0xD0, 0xCF, 0x11, 0xE0], "doc"),
    (b"Rar!", "rar"),
    (&[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C], "7z"),
];

/// Guess a file's extension from its leading bytes.
///
/// ZIP archives that contain Office Open XML markers are reported as
/// `docx`, `xlsx` or `pptx`; any other ZIP is `zip`. Pass as much of the
/// file as is practical: the Office check looks at every byte given.
///
/// ```
/// use fskit::extension_from_signature;
///
/// assert_eq!(extension_from_signature(b"%PDF-1.7\n"), Some("pdf"));
/// assert_eq!(extension_from_signature(b"plain text"), None);
/// ```
#[must_use]
pub fn extension_from_signature(bytes: &[u8]) -> Option<&'static str> {
    let (_, ext) = SIGNATURES
        .iter()
        .find(|(magic, _)| bytes.starts_with(magic))?;
    if *ext == "zip" {
        return Some(zip_subtype(bytes));
    }
    Some(*ext)
}

fn zip_subtype(bytes: &[u8]) -> &'static str {
    if !contains(bytes, b"[Content_Types].xml") {
        return "zip";
    }
    if contains(bytes, b"word/") {
        "docx"
    } else if contains(bytes, b"xl/") {
        "xlsx"
    } else if contains(bytes, b"ppt/") {
        "pptx"
    } else {
        "zip"
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}
