//! Configuration options for copy and move operations.
//!
//! This module provides [`CopyOptions`] for the recursive copy engine and
//! [`MoveOptions`] for the move engine.
//!
//! # Example
//!
//! ```
//! use fskit::{CopyOptions, IgnoreRules, MoveOptions};
//!
//! let options = CopyOptions::default()
//!     .with_ignore(IgnoreRules::new().with_folder("node_modules"))
//!     .without_fsync();
//!
//! let moving = MoveOptions::default().with_backup_dir(".previous");
//! ```

use crate::copy::IgnoreRules;

/// Options for copy operations.
///
/// Use [`Default::default()`] to get sensible defaults, then customize
/// using the builder methods.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `ignore` | empty, depth 1 | Nothing is skipped |
/// | `preserve_permissions` | `true` | Copy file permissions |
/// | `preserve_timestamps` | `true` | Copy file timestamps (mtime/atime) |
/// | `fsync` | `true` | Sync to disk before the atomic rename |
#[derive(Debug, Clone)]
pub struct CopyOptions {
    /// Which entries the copy engine skips
    pub ignore: IgnoreRules,

    /// Whether to preserve file permissions (default: true)
    pub preserve_permissions: bool,

    /// Whether to preserve file timestamps (default: true)
    ///
    /// Failing to set timestamps is reported through the warning handler
    /// and does not fail the copy.
    pub preserve_timestamps: bool,

    /// Whether to sync files to disk before they are renamed into place
    /// (default: true)
    pub fsync: bool,

    /// Callback for warnings (optional)
    ///
    /// If not set, warnings are logged via `tracing`.
    pub warn_handler: Option<fn(&str)>,

    /// Callback for per-entry progress lines (optional)
    ///
    /// If not set, entries are logged at debug level via `tracing`.
    pub verbose_handler: Option<fn(&str)>,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            ignore: IgnoreRules::default(),
            preserve_permissions: true,
            preserve_timestamps: true,
            fsync: true,
            warn_handler: None,
            verbose_handler: None,
        }
    }
}

impl CopyOptions {
    /// Replace the ignore rules
    #[must_use]
    pub fn with_ignore(mut self, ignore: IgnoreRules) -> Self {
        self.ignore = ignore;
        self
    }

    /// Create options with a warning handler
    #[must_use]
    pub fn with_warn_handler(mut self, handler: fn(&str)) -> Self {
        self.warn_handler = Some(handler);
        self
    }

    /// Create options with a handler receiving one line per copied entry
    #[must_use]
    pub fn with_verbose_handler(mut self, handler: fn(&str)) -> Self {
        self.verbose_handler = Some(handler);
        self
    }

    /// Disable fsync for faster (but less durable) copies
    #[must_use]
    pub fn without_fsync(mut self) -> Self {
        self.fsync = false;
        self
    }

    /// Disable timestamp preservation
    #[must_use]
    pub fn without_timestamps(mut self) -> Self {
        self.preserve_timestamps = false;
        self
    }

    /// Disable permission preservation
    ///
    /// Copied files then use the default umask permissions.
    #[must_use]
    pub fn without_permissions(mut self) -> Self {
        self.preserve_permissions = false;
        self
    }

    pub(crate) fn warn(&self, msg: &str) {
        if let Some(handler) = self.warn_handler {
            handler(msg);
        } else {
            tracing::warn!("{}", msg);
        }
    }

    pub(crate) fn verbose(&self, msg: &str) {
        if let Some(handler) = self.verbose_handler {
            handler(msg);
        } else {
            tracing::debug!("{}", msg);
        }
    }
}

/// Options for [`move_with`](crate::move_with).
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `backup_dir` | `"backup"` | Sibling directory receiving replaced files |
/// | `cross_device_fallback` | `true` | Copy + delete when a rename crosses filesystems |
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MoveOptions {
    /// Name of the directory, next to the destination, that receives a
    /// file about to be replaced
    pub backup_dir: String,

    /// Whether a rename that fails with `EXDEV` falls back to copy + delete
    pub cross_device_fallback: bool,
}

impl MoveOptions {
    /// Default name of the backup directory.
    pub const DEFAULT_BACKUP_DIR: &'static str = "backup";

    /// Set the backup directory name
    #[must_use]
    pub fn with_backup_dir(mut self, name: impl Into<String>) -> Self {
        self.backup_dir = name.into();
        self
    }

    /// Surface `EXDEV` instead of falling back to copy + delete
    #[must_use]
    pub fn without_cross_device_fallback(mut self) -> Self {
        self.cross_device_fallback = false;
        self
    }
}

impl Default for MoveOptions {
    fn default() -> Self {
        Self {
            backup_dir: Self::DEFAULT_BACKUP_DIR.to_owned(),
            cross_device_fallback: true,
        }
    }
}
