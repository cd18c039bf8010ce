//! Single file copy.
//!
//! Files are written to a temporary sibling of the destination and renamed
//! into place, so an interrupted copy never leaves a partial file behind.

use crate::error::{Category, IoResultExt, Result};
use crate::options::CopyOptions;
use filetime::{FileTime, set_file_times};
use std::fs::{self, File, Metadata};
use std::io;
use std::path::Path;

/// Copy one regular file atomically, replacing whatever file is at `dst`.
///
/// Returns the number of bytes copied.
pub(crate) fn copy_leaf(src: &Path, dst: &Path, options: &CopyOptions) -> Result<u64> {
    let src_meta = fs::metadata(src).classify(Category::File, src)?;
    let mut src_file = File::open(src).classify(Category::File, src)?;

    let dst_parent = match dst.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp_file =
        tempfile::NamedTempFile::new_in(dst_parent).classify(Category::File, dst_parent)?;

    let bytes_copied = io::copy(&mut src_file, temp_file.as_file_mut())
        .classify(Category::File, dst)?;

    // Ensure data is on disk before rename
    if options.fsync {
        temp_file.as_file().sync_all().classify(Category::File, dst)?;
    }

    if options.preserve_permissions {
        fs::set_permissions(temp_file.path(), src_meta.permissions())
            .classify(Category::File, dst)?;
    }

    temp_file
        .persist(dst)
        .map_err(|e| e.error)
        .classify(Category::File, dst)?;

    if options.preserve_timestamps {
        if let Err(e) = preserve_timestamps(&src_meta, dst) {
            options.warn(&format!(
                "could not preserve timestamps on {}: {e}",
                dst.display()
            ));
        }
    }

    Ok(bytes_copied)
}

/// Set `dst`'s access and modification times from the source metadata.
pub(crate) fn preserve_timestamps(src_meta: &Metadata, dst: &Path) -> io::Result<()> {
    let atime = FileTime::from_last_access_time(src_meta);
    let mtime = FileTime::from_last_modification_time(src_meta);
    set_file_times(dst, atime, mtime)
}
