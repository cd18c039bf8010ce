//! Move with backup of replaced files.
//!
//! [`move_path`] moves a file or a whole tree. Files are renamed one at a
//! time; a file already sitting at the destination is first parked in a
//! sibling backup directory (`backup/` by default) instead of being
//! overwritten. Directories are recreated at the destination, their entries
//! moved one by one in listing order, and the emptied source removed.
//!
//! ```text
//! move_path("inbox/report.pdf", "docs/report.pdf")
//!
//! docs/report.pdf          (existing)  ->  docs/backup/report.pdf
//! inbox/report.pdf                     ->  docs/report.pdf
//! ```

use crate::access;
use crate::delete::delete_dir;
use crate::error::{Category, Error, Result};
use crate::options::MoveOptions;
use crate::rename::rename_via;
use std::fs;
use std::path::Path;

/// Move `source` to `destination` with default [`MoveOptions`].
///
/// # Errors
///
/// See [`move_with`].
pub fn move_path(source: &Path, destination: &Path) -> Result<()> {
    move_with(source, destination, &MoveOptions::default())
}

/// Move `source` to `destination`.
///
/// Symbolic links are moved as links, never followed. Moving a path onto
/// itself does nothing.
///
/// # Errors
///
/// - `FILE_ENOENT` when `source` doesn't exist
/// - `FILE_EINVALIDTYPE` for sockets, FIFOs and devices
/// - any classified failure of the rename, backup or cleanup steps
///
/// The error keeps `path` from the step that failed and carries the
/// outermost `oldPath`/`newPath`. Entries moved before the failure stay
/// moved.
pub fn move_with(source: &Path, destination: &Path, options: &MoveOptions) -> Result<()> {
    move_entry(source, destination, options)?;
    tracing::info!(
        source = %source.display(),
        destination = %destination.display(),
        "move finished"
    );
    Ok(())
}

fn move_entry(source: &Path, destination: &Path, options: &MoveOptions) -> Result<()> {
    move_step(source, destination, options).map_err(|e| e.in_transfer(source, destination))
}

fn move_step(source: &Path, destination: &Path, options: &MoveOptions) -> Result<()> {
    if !access::lexists(source) {
        return Err(Error::not_found(Category::File, source));
    }
    if source == destination {
        return Ok(());
    }
    let info = access::lstat(source)?;

    if info.is_symlink || info.is_file() {
        access::ensure_parent(destination)?;
        if access::lexists(destination) {
            park_existing(destination, options)?;
        }
        return rename_entry(source, destination, options);
    }

    if !info.is_dir() {
        return Err(Error::invalid_type(source));
    }

    if !access::exists(destination) {
        access::make_dir(destination, true)?;
    }
    for entry in access::read_dir(source, false)? {
        move_entry(&source.join(&entry), &destination.join(&entry), options)?;
    }
    delete_dir(source, true)
}

/// Rename the entry at `destination` into the backup directory beside it.
fn park_existing(destination: &Path, options: &MoveOptions) -> Result<()> {
    let Some(name) = destination.file_name() else {
        return Ok(());
    };
    let backup_dir = match destination.parent() {
        Some(parent) => parent.join(&options.backup_dir),
        None => Path::new(&options.backup_dir).to_path_buf(),
    };
    access::make_dir(&backup_dir, true)?;
    let parked = backup_dir.join(name);
    tracing::debug!(
        existing = %destination.display(),
        backup = %parked.display(),
        "parking existing destination"
    );
    rename_entry(destination, &parked, options)
}

fn rename_entry(source: &Path, destination: &Path, options: &MoveOptions) -> Result<()> {
    rename_via(
        source,
        destination,
        options.cross_device_fallback,
        |from, to| fs::rename(from, to),
    )
}
