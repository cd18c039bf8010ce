//! String-shape validators.
//!
//! These look at text only; nothing here touches the filesystem.

/// Whether `text` looks like a path rather than a bare name.
///
/// True for absolute Unix paths, `~/` paths, Windows drive paths
/// (`C:\...`) and anything containing a separator.
#[must_use]
pub fn is_path(text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    let bytes = text.as_bytes();
    let windows_drive =
        bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'\\';
    text.starts_with('/') || text.starts_with("~/") || windows_drive || has_separator(text)
}

/// Whether `text` is usable as a single file name on every major platform.
#[must_use]
pub fn is_filename(text: &str) -> bool {
    if text.trim().is_empty() || has_separator(text) {
        return false;
    }
    if text.contains(['<', '>', ':', '"', '|', '?', '*', '\0']) {
        return false;
    }
    !text.ends_with([' ', '.'])
}

/// Whether `text` is an extension: ASCII alphanumerics, optionally led by
/// a single dot (`"png"`, `".tar"`, but not `"tar.gz"`).
#[must_use]
pub fn is_extension(text: &str) -> bool {
    let body = text.strip_prefix('.').unwrap_or(text);
    !body.is_empty() && body.chars().all(|c| c.is_ascii_alphanumeric())
}

fn has_separator(text: &str) -> bool {
    text.contains(['/', '\\'])
}
