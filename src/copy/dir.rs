//! Recursive copy engine.
//!
//! The walk is strictly sequential and depth-first in listing order. Each
//! entry is stat'ed (following links) and dispatched:
//!
//! - a file is copied unless a file or extension rule skips it;
//! - a directory is created, unless a folder rule skips it at its depth,
//!   and its entries are copied one level deeper;
//! - a directory that resolves to one already being walked fails with
//!   `FILE_ELOOP` before anything is created for it;
//! - anything else fails with `FILE_EINVALIDTYPE`.
//!
//! The first failure aborts the walk. Every level annotates the error with
//! its own `oldPath`/`newPath`, so the caller sees the outermost pair while
//! `path` still names the entry that actually failed.

use crate::access::{self, EntryKind};
use crate::error::{Category, Error, IoResultExt, Result};
use crate::options::CopyOptions;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use super::file::copy_leaf;

/// Statistics from a copy operation.
///
/// # Example
///
/// ```no_run
/// use fskit::{copy, CopyOptions};
/// use std::path::Path;
///
/// let stats = copy(Path::new("photos"), Path::new("backup/photos"), &CopyOptions::default())?;
/// println!("Copied {} files ({} bytes)", stats.files_copied, stats.bytes_copied);
/// println!("Skipped {} files", stats.files_skipped);
/// # Ok::<(), fskit::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Number of files copied
    pub files_copied: u64,
    /// Number of files skipped by a file or extension rule
    pub files_skipped: u64,
    /// Number of directories created
    pub dirs_created: u64,
    /// Number of directories skipped by a folder rule
    pub dirs_skipped: u64,
    /// Total bytes copied
    pub bytes_copied: u64,
    /// Duration of the copy operation
    pub duration: Duration,
}

/// Copy a file or directory tree from `source` to `destination`.
///
/// A file source is copied to `destination` itself (its parent directories
/// are created as needed). A directory source is merged into
/// `destination`: existing directories are reused and existing files with
/// the same name are replaced.
///
/// Symbolic links are followed; the copy contains their targets.
///
/// # Errors
///
/// - `FILE_ENOENT` when `source` doesn't exist
/// - `FILE_ELOOP` when a link leads back into a directory being copied
/// - `FILE_EINVALIDTYPE` for sockets, FIFOs and devices
/// - any classified platform failure from the entry that failed
///
/// Every error carries `oldPath`/`newPath` set to `source`/`destination`.
pub fn copy(source: &Path, destination: &Path, options: &CopyOptions) -> Result<CopyStats> {
    let start_time = Instant::now();
    let mut stats = CopyStats::default();

    let mut ancestors = Vec::new();
    copy_entry(source, destination, 0, options, &mut stats, &mut ancestors)?;

    stats.duration = start_time.elapsed();
    tracing::info!(
        source = %source.display(),
        destination = %destination.display(),
        files = stats.files_copied,
        skipped = stats.files_skipped + stats.dirs_skipped,
        bytes = stats.bytes_copied,
        "copy finished"
    );
    Ok(stats)
}

fn copy_entry(
    source: &Path,
    destination: &Path,
    depth: usize,
    options: &CopyOptions,
    stats: &mut CopyStats,
    ancestors: &mut Vec<PathBuf>,
) -> Result<()> {
    copy_step(source, destination, depth, options, stats, ancestors)
        .map_err(|e| e.in_transfer(source, destination))
}

fn copy_step(
    source: &Path,
    destination: &Path,
    depth: usize,
    options: &CopyOptions,
    stats: &mut CopyStats,
    ancestors: &mut Vec<PathBuf>,
) -> Result<()> {
    let info = access::stat(source)?;
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();

    match info.kind {
        EntryKind::File => {
            if options.ignore.ignores_file(&name) {
                stats.files_skipped += 1;
                options.verbose(&format!("skipped {} (ignored)", source.display()));
                return Ok(());
            }
            access::ensure_parent(destination)?;
            let bytes = copy_leaf(source, destination, options)?;
            stats.files_copied += 1;
            stats.bytes_copied += bytes;
            options.verbose(&format!(
                "copied {} -> {} ({bytes} bytes)",
                source.display(),
                destination.display()
            ));
            Ok(())
        }
        EntryKind::Directory => {
            if options.ignore.ignores_folder(&name, depth) {
                stats.dirs_skipped += 1;
                options.verbose(&format!(
                    "skipped {} (ignored at depth {depth})",
                    source.display()
                ));
                return Ok(());
            }
            // Directories being walked, resolved; a revisit means a link loop
            let resolved = fs::canonicalize(source).classify(Category::File, source)?;
            if ancestors.contains(&resolved) {
                return Err(Error::at_path(
                    Category::File,
                    "ELOOP",
                    "Symbolic link loop",
                    source,
                ));
            }
            if !access::exists(destination) {
                access::make_dir(destination, true)?;
                stats.dirs_created += 1;
            }
            ancestors.push(resolved);
            let walked = copy_children(source, destination, depth, options, stats, ancestors);
            ancestors.pop();
            walked
        }
        EntryKind::Other => Err(Error::invalid_type(source)),
    }
}

fn copy_children(
    source: &Path,
    destination: &Path,
    depth: usize,
    options: &CopyOptions,
    stats: &mut CopyStats,
    ancestors: &mut Vec<PathBuf>,
) -> Result<()> {
    for entry in access::read_dir(source, false)? {
        copy_entry(
            &source.join(&entry),
            &destination.join(&entry),
            depth + 1,
            options,
            stats,
            ancestors,
        )?;
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
