//! File and directory removal.

use crate::access;
use crate::error::{Category, Error, IoResultExt, Result};
use std::fs;
use std::path::Path;

/// Delete the file (or symbolic link) at `path`.
///
/// # Errors
///
/// `FILE_ENOENT` when nothing exists at `path`; removal failures, such as
/// `path` being a directory, are classified under [`Category::File`].
pub fn delete_file(path: &Path) -> Result<()> {
    if !access::lexists(path) {
        return Err(Error::not_found(Category::File, path));
    }
    fs::remove_file(path).classify(Category::File, path)?;
    tracing::debug!(path = %path.display(), "deleted file");
    Ok(())
}

/// Delete the directory at `path`.
///
/// A non-empty directory is only removed when `recursive` is set; otherwise
/// the call fails and the directory is left untouched.
///
/// # Errors
///
/// - `DIRECTORY_ENOENT` when `path` doesn't exist
/// - `DIRECTORY_ENOTDIR` when `path` is not a directory
/// - `DIRECTORY_ENOTEMPTY` when it has entries and `recursive` is false
pub fn delete_dir(path: &Path, recursive: bool) -> Result<()> {
    if !access::lexists(path) {
        return Err(Error::not_found(Category::Directory, path));
    }
    let empty = access::is_directory_empty(path)?;
    if !empty && !recursive {
        return Err(Error::at_path(
            Category::Directory,
            "ENOTEMPTY",
            "Directory not empty",
            path,
        ));
    }
    if empty {
        fs::remove_dir(path).classify(Category::Directory, path)?;
    } else {
        fs::remove_dir_all(path).classify(Category::Directory, path)?;
    }
    tracing::debug!(path = %path.display(), recursive, "deleted directory");
    Ok(())
}

/// Remove whatever is at `path`, recursively. A missing path is not an
/// error.
pub(crate) fn remove_tree(path: &Path) -> Result<()> {
    let Ok(meta) = fs::symlink_metadata(path) else {
        return Ok(());
    };
    if meta.is_dir() {
        fs::remove_dir_all(path).classify(Category::Directory, path)
    } else {
        fs::remove_file(path).classify(Category::File, path)
    }
}
