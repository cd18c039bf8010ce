//! MIME type lookup.
//!
//! One static table maps each MIME type to its extensions; the first
//! extension listed is the canonical one returned by
//! [`extension_from_mime`]. Every extension appears under exactly one type,
//! so `extension_from_mime(mime_from_file(ext))` gives back the canonical
//! extension.

use super::extension::extension_from_path;
use super::validate::is_extension;
use std::path::Path;

static MIME_TYPES: &[(&str, &[&str])] = &[
    ("application/gzip", &["gz"]),
    ("application/json", &["json", "map"]),
    ("application/ld+json", &["jsonld"]),
    ("application/msword", &["doc", "dot"]),
    ("application/octet-stream", &["bin", "dms", "lrf", "deb", "dmg", "iso", "img", "msi"]),
    ("application/pdf", &["pdf"]),
    ("application/rtf", &["rtf"]),
    ("application/vnd.ms-excel", &["xls", "xlm", "xla", "xlt"]),
    ("application/vnd.ms-powerpoint", &["ppt", "pps", "pot"]),
    ("application/vnd.oasis.opendocument.presentation", &["odp"]),
    ("application/vnd.oasis.opendocument.spreadsheet", &["ods"]),
    ("application/vnd.oasis.opendocument.text", &["odt"]),
    (
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        &["pptx"],
    ),
    (
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        &["xlsx"],
    ),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        &["docx"],
    ),
    ("application/vnd.rar", &["rar"]),
    ("application/wasm", &["wasm"]),
    ("application/x-7z-compressed", &["7z"]),
    ("application/x-bzip2", &["bz2"]),
    ("application/x-elf", &["elf", "so"]),
    ("application/x-msdownload", &["exe", "dll", "com", "bat"]),
    ("application/x-sh", &["sh"]),
    ("application/x-tar", &["tar"]),
    ("application/x-xz", &["xz"]),
    ("application/xml", &["xml", "xsl", "xsd"]),
    ("application/zip", &["zip"]),
    ("application/zstd", &["zst"]),
    ("audio/aac", &["aac"]),
    ("audio/flac", &["flac"]),
    ("audio/midi", &["mid", "midi", "kar"]),
    ("audio/mp4", &["m4a", "mp4a"]),
    ("audio/mpeg", &["mp3", "mpga", "mp2", "m2a", "m3a"]),
    ("audio/ogg", &["oga", "ogg", "spx", "opus"]),
    ("audio/wav", &["wav"]),
    ("audio/webm", &["weba"]),
    ("font/otf", &["otf"]),
    ("font/ttf", &["ttf"]),
    ("font/woff", &["woff"]),
    ("font/woff2", &["woff2"]),
    ("image/avif", &["avif"]),
    ("image/bmp", &["bmp", "dib"]),
    ("image/gif", &["gif"]),
    ("image/heic", &["heic"]),
    ("image/jpeg", &["jpg", "jpeg", "jpe"]),
    ("image/png", &["png"]),
    ("image/svg+xml", &["svg", "svgz"]),
    ("image/tiff", &["tiff", "tif"]),
    ("image/vnd.microsoft.icon", &["ico"]),
    ("image/webp", &["webp"]),
    ("text/calendar", &["ics", "ifb"]),
    ("text/css", &["css"]),
    ("text/csv", &["csv"]),
    ("text/html", &["html", "htm", "shtml"]),
    ("text/javascript", &["js", "mjs", "cjs"]),
    ("text/markdown", &["md", "markdown"]),
    ("text/plain", &["txt", "text", "conf", "def", "list", "log", "in", "ini"]),
    ("text/tab-separated-values", &["tsv"]),
    ("text/yaml", &["yaml", "yml"]),
    ("video/mp2t", &["ts"]),
    ("video/mp4", &["mp4", "mp4v", "mpg4", "m4v"]),
    ("video/mpeg", &["mpeg", "mpg", "mpe", "m1v", "m2v"]),
    ("video/ogg", &["ogv"]),
    ("video/quicktime", &["mov", "qt"]),
    ("video/webm", &["webm"]),
    ("video/x-matroska", &["mkv", "mk3d", "mks"]),
    ("video/x-msvideo", &["avi"]),
];

/// MIME type for an extension (`"png"`, `".PNG"`) or for a path's
/// extension (`"photos/cat.png"`).
///
/// ```
/// use fskit::mime_from_file;
///
/// assert_eq!(mime_from_file(".JPG"), Some("image/jpeg"));
/// assert_eq!(mime_from_file("docs/readme.md"), Some("text/markdown"));
/// assert_eq!(mime_from_file("unknown.zzz"), None);
/// ```
#[must_use]
pub fn mime_from_file(text: &str) -> Option<&'static str> {
    if text.is_empty() {
        return None;
    }
    let extension = if is_extension(text) {
        text.trim_start_matches('.').to_ascii_lowercase()
    } else {
        extension_from_path(Path::new(text))?
    };
    MIME_TYPES
        .iter()
        .find(|(_, extensions)| extensions.contains(&extension.as_str()))
        .map(|(mime, _)| *mime)
}

/// Canonical extension for a MIME type. Matching is case-insensitive.
///
/// ```
/// use fskit::extension_from_mime;
///
/// assert_eq!(extension_from_mime("IMAGE/JPEG"), Some("jpg"));
/// assert_eq!(extension_from_mime("application/x-unknown"), None);
/// ```
#[must_use]
pub fn extension_from_mime(mime: &str) -> Option<&'static str> {
    let mime = mime.trim().to_ascii_lowercase();
    MIME_TYPES
        .iter()
        .find(|(name, _)| *name == mime)
        .and_then(|(_, extensions)| extensions.first().copied())
}
