//! Text digests.

use md5::Md5;
use sha2::{Digest, Sha256};

/// Lowercase hex MD5 digest of `text`.
///
/// Meant for checksums and cache keys, not for anything security related.
///
/// ```
/// use fskit::md5_hex;
///
/// assert_eq!(md5_hex("abc"), "900150983cd24fb0d6963f7d28e17f72");
/// ```
#[must_use]
pub fn md5_hex(text: &str) -> String {
    format!("{:x}", Md5::digest(text.as_bytes()))
}

/// Lowercase hex SHA-256 digest of `text`.
///
/// ```
/// use fskit::digest_hex;
///
/// assert_eq!(
///     digest_hex("abc"),
///     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
/// );
/// ```
#[must_use]
pub fn digest_hex(text: &str) -> String {
    format!("{:x}", Sha256::digest(text.as_bytes()))
}
