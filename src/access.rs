//! Checked filesystem primitives.
//!
//! Each accessor checks that its target exists first and reports a
//! classified not-found error when it doesn't; any platform failure after
//! that is classified through [`crate::error`]. The `exists` checks are the
//! only functions here that never fail.

use crate::error::{Category, Error, ErrorData, IoResultExt, Result};
use std::ffi::OsString;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Kind of a filesystem entry as reported by a stat call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Anything else: sockets, FIFOs, devices, or a link seen via `lstat`.
    Other,
}

/// Result of [`stat`] / [`lstat`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntryInfo {
    /// Entry kind.
    pub kind: EntryKind,
    /// Size in bytes.
    pub len: u64,
    /// Whether the read-only flag is set.
    pub readonly: bool,
    /// Whether the entry itself is a symbolic link (only from [`lstat`]).
    pub is_symlink: bool,
    /// Last modification time, when the platform reports one.
    pub modified: Option<SystemTime>,
}

impl EntryInfo {
    fn from_metadata(meta: &Metadata) -> Self {
        let file_type = meta.file_type();
        let kind = if file_type.is_file() {
            EntryKind::File
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::Other
        };
        Self {
            kind,
            len: meta.len(),
            readonly: meta.permissions().readonly(),
            is_symlink: file_type.is_symlink(),
            modified: meta.modified().ok(),
        }
    }

    /// Shorthand for `kind == EntryKind::File`.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Shorthand for `kind == EntryKind::Directory`.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// One entry of [`read_dir_typed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedEntry {
    /// File name within the listed directory.
    pub name: OsString,
    /// Entry kind, without following links.
    pub kind: EntryKind,
    /// Whether the entry is a symbolic link.
    pub is_symlink: bool,
}

/// Whether `path` exists, following symbolic links. Never fails.
#[must_use]
pub fn exists(path: &Path) -> bool {
    path.try_exists().unwrap_or(false)
}

/// Fail unless `path` exists, following symbolic links.
///
/// A missing path is `ENOENT`; a path that can't be resolved (a link loop,
/// a denied search permission) keeps its own classified code.
pub(crate) fn require(path: &Path, category: Category) -> Result<()> {
    if path.try_exists().classify(category, path)? {
        Ok(())
    } else {
        Err(Error::not_found(category, path))
    }
}

/// Whether `path` exists without following a final symbolic link.
pub(crate) fn lexists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Whether `path` exists and is both readable and writable by this
/// process. Any failure reads as `false`.
#[cfg(unix)]
#[must_use]
pub fn exists_accessible(path: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: c_path is a valid NUL-terminated string that outlives the call
    unsafe { libc::access(c_path.as_ptr(), libc::R_OK | libc::W_OK) == 0 }
}

/// Whether `path` exists and is both readable and writable by this
/// process. Any failure reads as `false`.
#[cfg(not(unix))]
#[must_use]
pub fn exists_accessible(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| !meta.permissions().readonly())
}

/// Stat `path`, following symbolic links.
///
/// # Errors
///
/// `FILE_ENOENT` when `path` doesn't exist; any other stat failure is
/// classified under [`Category::File`].
pub fn stat(path: &Path) -> Result<EntryInfo> {
    require(path, Category::File)?;
    let meta = fs::metadata(path).classify(Category::File, path)?;
    Ok(EntryInfo::from_metadata(&meta))
}

/// Stat `path` without following a final symbolic link.
///
/// # Errors
///
/// `FILE_ENOENT` when nothing exists at `path`.
pub fn lstat(path: &Path) -> Result<EntryInfo> {
    if !lexists(path) {
        return Err(Error::not_found(Category::File, path));
    }
    let meta = fs::symlink_metadata(path).classify(Category::File, path)?;
    Ok(EntryInfo::from_metadata(&meta))
}

/// Whether `path` is a regular file (links are not followed).
///
/// # Errors
///
/// `FILE_ENOENT` when `path` doesn't exist.
pub fn is_file(path: &Path) -> Result<bool> {
    Ok(lstat(path)?.is_file())
}

/// Whether `path` is a directory (links are not followed).
///
/// # Errors
///
/// `DIRECTORY_ENOENT` when `path` doesn't exist.
pub fn is_directory(path: &Path) -> Result<bool> {
    if !lexists(path) {
        return Err(Error::not_found(Category::Directory, path));
    }
    let meta = fs::symlink_metadata(path).classify(Category::Directory, path)?;
    Ok(meta.is_dir())
}

/// Whether the directory at `path` has no entries.
///
/// # Errors
///
/// `DIRECTORY_ENOENT` when missing, `DIRECTORY_ENOTDIR` when `path` is not
/// a directory.
pub fn is_directory_empty(path: &Path) -> Result<bool> {
    if !is_directory(path)? {
        return Err(Error::at_path(
            Category::Directory,
            "ENOTDIR",
            "Path is not a directory",
            path,
        ));
    }
    let mut entries = fs::read_dir(path).classify(Category::Directory, path)?;
    Ok(entries.next().is_none())
}

/// List the entries of a directory.
///
/// Names are returned relative to `path`, sorted so that traversal order
/// is stable across platforms. With `recursive`, nested entries are
/// included as relative paths (`sub/inner.txt`); directory links are
/// listed but not descended into.
///
/// # Errors
///
/// `DIRECTORY_ENOENT` when `path` doesn't exist; listing failures are
/// classified under [`Category::Directory`].
pub fn read_dir(path: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !exists(path) {
        return Err(Error::not_found(Category::Directory, path));
    }
    let mut names = Vec::new();
    collect_names(path, Path::new(""), recursive, &mut names)?;
    names.sort();
    Ok(names)
}

fn collect_names(
    root: &Path,
    prefix: &Path,
    recursive: bool,
    names: &mut Vec<PathBuf>,
) -> Result<()> {
    let dir = root.join(prefix);
    for entry in fs::read_dir(&dir).classify(Category::Directory, &dir)? {
        let entry = entry.classify(Category::Directory, &dir)?;
        let relative = prefix.join(entry.file_name());
        let file_type = entry
            .file_type()
            .classify(Category::Directory, &entry.path())?;
        names.push(relative.clone());
        if recursive && file_type.is_dir() {
            collect_names(root, &relative, recursive, names)?;
        }
    }
    Ok(())
}

/// List the immediate entries of a directory together with their kinds.
///
/// # Errors
///
/// Same as [`read_dir`].
pub fn read_dir_typed(path: &Path) -> Result<Vec<TypedEntry>> {
    if !exists(path) {
        return Err(Error::not_found(Category::Directory, path));
    }
    let mut entries = Vec::new();
    for entry in fs::read_dir(path).classify(Category::Directory, path)? {
        let entry = entry.classify(Category::Directory, path)?;
        let file_type = entry
            .file_type()
            .classify(Category::Directory, &entry.path())?;
        let kind = if file_type.is_file() {
            EntryKind::File
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::Other
        };
        entries.push(TypedEntry {
            name: entry.file_name(),
            kind,
            is_symlink: file_type.is_symlink(),
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Read the whole file into memory.
///
/// # Errors
///
/// `FILE_ENOENT` when missing; read failures are classified under
/// [`Category::File`].
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    if !exists(path) {
        return Err(Error::not_found(Category::File, path));
    }
    fs::read(path).classify(Category::File, path)
}

/// Read the whole file as UTF-8 text.
///
/// # Errors
///
/// As [`read_file`]; invalid UTF-8 is reported with the platform's
/// invalid-data error.
pub fn read_to_string(path: &Path) -> Result<String> {
    if !exists(path) {
        return Err(Error::not_found(Category::File, path));
    }
    fs::read_to_string(path).classify(Category::File, path)
}

/// Resolve `path` to its canonical absolute form.
///
/// # Errors
///
/// `DIRECTORY_ENOENT` when missing.
pub fn real_path(path: &Path) -> Result<PathBuf> {
    if !exists(path) {
        return Err(Error::not_found(Category::Directory, path));
    }
    fs::canonicalize(path).classify(Category::Directory, path)
}

/// Write `contents` to the file at `path`.
///
/// When the file already exists and `overwrite` is false, nothing is
/// written and the call succeeds.
///
/// # Errors
///
/// Write failures are classified under [`Category::File`].
pub fn write_file(path: &Path, contents: impl AsRef<[u8]>, overwrite: bool) -> Result<()> {
    if exists(path) && !overwrite {
        tracing::debug!(path = %path.display(), "file exists, leaving it untouched");
        return Ok(());
    }
    fs::write(path, contents).classify(Category::File, path)
}

/// Create a directory. A directory already at `path` is a no-op success.
///
/// # Errors
///
/// `DIRECTORY_EEXIST` when something other than a directory occupies
/// `path`; creation failures are classified under [`Category::Directory`].
pub fn make_dir(path: &Path, recursive: bool) -> Result<()> {
    if exists(path) {
        if path.is_dir() {
            return Ok(());
        }
        return Err(Error::at_path(
            Category::Directory,
            "EEXIST",
            "A non-directory entry already exists",
            path,
        ));
    }
    let created = if recursive {
        fs::create_dir_all(path)
    } else {
        fs::create_dir(path)
    };
    created.classify(Category::Directory, path)?;
    tracing::debug!(path = %path.display(), "created directory");
    Ok(())
}

/// Create a symbolic link at `link` pointing to `target`.
///
/// # Errors
///
/// `FILE_ENOENT` when `target` doesn't exist; link creation failures are
/// classified under [`Category::File`].
pub fn make_link(target: &Path, link: &Path) -> Result<()> {
    // `path` names the link even when the failure was about the target
    let at_link = |e: Error| {
        e.with_path("target", target)
            .with_path(ErrorData::PATH, link)
    };
    if !exists(target) {
        return Err(at_link(Error::not_found(Category::File, target)));
    }
    symlink(target, link)
        .classify(Category::File, link)
        .map_err(at_link)
}

#[cfg(unix)]
pub(crate) fn symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
pub(crate) fn symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

#[cfg(not(any(unix, windows)))]
pub(crate) fn symlink(_target: &Path, _link: &Path) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "Symlinks not supported on this platform",
    ))
}

/// Ensure the parent directory of `path` exists.
pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !exists(parent) => {
            make_dir(parent, true)
        }
        _ => Ok(()),
    }
}
