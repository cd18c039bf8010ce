//! # fskit
//!
//! Copy, move, rename and delete files and directory trees, with every
//! failure reported as one classified, path-annotated [`Error`].
//!
//! ## Core Features
//!
//! - **Recursive copy with ignore rules**: skip folders, files or extensions by
//!   exact name or regex; names compare case- and accent-insensitively
//! - **Atomic writes**: files are written to a temp file and renamed into place
//! - **Cross-device rename**: [`rename`] falls back to copy + delete on `EXDEV`
//! - **Move with backup**: [`move_path`] parks a replaced file in a sibling
//!   `backup/` directory instead of overwriting it
//! - **Classified errors**: namespaced codes (`FILE_ENOENT`,
//!   `DIRECTORY_ENOTEMPTY`), user-facing messages, and `path` / `oldPath` /
//!   `newPath` context that survives every layer of a recursive operation
//!
//! ## Quick Start with Builder API
//!
//! ```no_run
//! use fskit::CopyBuilder;
//!
//! let stats = CopyBuilder::new("project", "backup/project")
//!     .ignore_folder("node_modules")
//!     .ignore_extension("log")
//!     .run()?;
//! println!("Copied {} files ({} bytes)", stats.files_copied, stats.bytes_copied);
//! # Ok::<(), fskit::Error>(())
//! ```
//!
//! ## Function API
//!
//! ```no_run
//! use fskit::{copy, delete_dir, move_path, CopyOptions, IgnoreRules};
//! use std::path::Path;
//!
//! let rules = IgnoreRules::new()
//!     .with_folder_regex(r"^target$")?
//!     .with_depth(2);
//! copy(Path::new("src"), Path::new("dst"), &CopyOptions::default().with_ignore(rules))?;
//!
//! move_path(Path::new("inbox/report.pdf"), Path::new("docs/report.pdf"))?;
//! delete_dir(Path::new("dst"), true)?;
//! # Ok::<(), fskit::Error>(())
//! ```
//!
//! ## Handling Errors
//!
//! ```no_run
//! use fskit::{delete_dir, ErrorData};
//! use std::path::Path;
//!
//! if let Err(e) = delete_dir(Path::new("reports"), false) {
//!     if e.is("ENOTEMPTY") {
//!         eprintln!("{}", e.display_message());
//!     }
//!     eprintln!("code={} path={:?}", e.code(), e.data().get(ErrorData::PATH));
//! }
//! ```
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialize [`Error`]; Serialize/Deserialize [`EntryInfo`] and [`MoveOptions`] |
//! | `full` | Enable all optional features |

#![cfg_attr(docsrs, feature(doc_cfg))]

mod access;
mod builder;
mod copy;
mod delete;
mod error;
mod options;
mod relocate;
mod rename;
mod utils;

pub use access::{
    EntryInfo, EntryKind, TypedEntry, exists, exists_accessible, is_directory,
    is_directory_empty, is_file, lstat, make_dir, make_link, read_dir, read_dir_typed, read_file,
    read_to_string, real_path, stat, write_file,
};
pub use builder::CopyBuilder;
pub use copy::{CopyStats, IgnoreRules, Pattern, copy, normalize_name};
pub use delete::{delete_dir, delete_file};
pub use error::{
    Category, Context, Error, ErrorData, IoResultExt, Raw, Result, classify, strip_namespace,
};
pub use options::{CopyOptions, MoveOptions};
pub use relocate::{move_path, move_with};
pub use rename::{rename, rename_plain};
pub use utils::{
    MAX_FILENAME_LEN, digest_hex, extension_from_mime, extension_from_path,
    extension_from_signature, is_extension, is_filename, is_path, md5_hex, mime_from_file,
    sanitize_filename,
};
