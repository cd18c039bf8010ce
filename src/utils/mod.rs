//! Leaf utilities with no filesystem access of their own.

mod extension;
mod hash;
mod mime;
mod sanitize;
mod validate;

pub use extension::{extension_from_path, extension_from_signature};
pub use hash::{digest_hex, md5_hex};
pub use mime::{extension_from_mime, mime_from_file};
pub use sanitize::{MAX_FILENAME_LEN, sanitize_filename};
pub use validate::{is_extension, is_filename, is_path};
