//! Rename with cross-device fallback.
//!
//! A platform rename cannot cross filesystems. When it fails with `EXDEV`,
//! [`rename`] copies the source to the destination and then deletes the
//! source, so the call still behaves like a move. [`rename_plain`] surfaces
//! `FILE_EXDEV` instead. A symbolic link source is recreated at the
//! destination rather than followed.

use crate::access;
use crate::copy::copy;
use crate::delete::remove_tree;
use crate::error::{Category, Error, IoResultExt, Result, is_cross_device};
use crate::options::CopyOptions;
use std::fs;
use std::io;
use std::path::Path;

/// Rename `source` to `destination`, falling back to copy + delete when the
/// two live on different filesystems.
///
/// Missing parent directories of `destination` are created. An existing
/// file at `destination` is replaced, as the platform rename does.
///
/// # Errors
///
/// - `FILE_ENOENT` when `source` doesn't exist
/// - any classified platform failure, or a failure of the fallback copy
///
/// Errors carry `oldPath`/`newPath`.
///
/// # Example
///
/// ```no_run
/// use fskit::rename;
/// use std::path::Path;
///
/// rename(Path::new("/tmp/upload.bin"), Path::new("/mnt/archive/upload.bin"))?;
/// # Ok::<(), fskit::Error>(())
/// ```
pub fn rename(source: &Path, destination: &Path) -> Result<()> {
    rename_via(source, destination, true, |from, to| fs::rename(from, to))
}

/// Rename `source` to `destination` without the cross-device fallback.
///
/// # Errors
///
/// As [`rename`], plus `FILE_EXDEV` when the paths are on different
/// filesystems.
pub fn rename_plain(source: &Path, destination: &Path) -> Result<()> {
    rename_via(source, destination, false, |from, to| fs::rename(from, to))
}

/// Rename through `platform_rename`, with or without the fallback.
pub(crate) fn rename_via<F>(
    source: &Path,
    destination: &Path,
    fallback: bool,
    platform_rename: F,
) -> Result<()>
where
    F: FnOnce(&Path, &Path) -> io::Result<()>,
{
    rename_step(source, destination, fallback, platform_rename)
        .map_err(|e| e.in_transfer(source, destination))
}

fn rename_step<F>(
    source: &Path,
    destination: &Path,
    fallback: bool,
    platform_rename: F,
) -> Result<()>
where
    F: FnOnce(&Path, &Path) -> io::Result<()>,
{
    if !access::lexists(source) {
        return Err(Error::not_found(Category::File, source));
    }
    access::ensure_parent(destination)?;

    match platform_rename(source, destination) {
        Ok(()) => {
            tracing::debug!(
                source = %source.display(),
                destination = %destination.display(),
                "renamed"
            );
            Ok(())
        }
        Err(e) if fallback && is_cross_device(&e) => {
            tracing::warn!(
                source = %source.display(),
                destination = %destination.display(),
                "rename crosses filesystems, falling back to copy and delete"
            );
            copy_across(source, destination)
        }
        Err(e) => Err::<(), _>(e).classify(Category::File, source),
    }
}

fn copy_across(source: &Path, destination: &Path) -> Result<()> {
    if access::lstat(source)?.is_symlink {
        relink(source, destination)?;
    } else {
        copy(source, destination, &CopyOptions::default())?;
    }
    remove_tree(source)
}

/// Recreate the link at `source` as `destination`, pointing at the same
/// target. The target is never read, so dangling links move too.
fn relink(source: &Path, destination: &Path) -> Result<()> {
    let target = fs::read_link(source).classify(Category::File, source)?;
    remove_tree(destination)?;
    access::symlink(&target, destination).classify(Category::File, destination)
}
