//! Builder API for ergonomic copying operations.
//!
//! The builder pattern provides a fluent interface for configuring and
//! executing a copy. This is often more convenient than manually
//! constructing [`CopyOptions`] and [`IgnoreRules`].
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use fskit::CopyBuilder;
//!
//! let stats = CopyBuilder::new("src", "dst").run()?;
//! println!("Copied {} files", stats.files_copied);
//! # Ok::<(), fskit::Error>(())
//! ```
//!
//! ## With Ignore Rules
//!
//! ```no_run
//! use fskit::CopyBuilder;
//!
//! let stats = CopyBuilder::new("project", "archive/project")
//!     .ignore_folder("node_modules")
//!     .ignore_folder("target")
//!     .ignore_extension("log")
//!     .ignore_file_regex(r"^\.env")
//!     .ignore_depth(2)
//!     .no_fsync()
//!     .run()?;
//!
//! println!("Skipped {} files", stats.files_skipped);
//! # Ok::<(), fskit::Error>(())
//! ```

use crate::copy::{CopyStats, IgnoreRules, Pattern, copy};
use crate::error::{Error, Result};
use crate::options::CopyOptions;
use std::path::{Path, PathBuf};

/// A builder for configuring and executing copy operations.
///
/// Invalid regular expressions don't fail the chain; the first one is
/// reported by [`CopyBuilder::run`] before anything is copied.
#[derive(Debug)]
pub struct CopyBuilder {
    src: PathBuf,
    dst: PathBuf,
    options: CopyOptions,
    invalid_pattern: Option<Error>,
}

impl CopyBuilder {
    /// Create a new `CopyBuilder` with the given source and destination paths.
    ///
    /// Uses default options (no ignore rules, fsync, preserve timestamps and
    /// permissions).
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Self {
        Self {
            src: src.as_ref().to_path_buf(),
            dst: dst.as_ref().to_path_buf(),
            options: CopyOptions::default(),
            invalid_pattern: None,
        }
    }

    fn map_rules(mut self, update: impl FnOnce(IgnoreRules) -> IgnoreRules) -> Self {
        let rules = std::mem::take(&mut self.options.ignore);
        self.options.ignore = update(rules);
        self
    }

    fn try_map_rules(self, update: impl FnOnce(IgnoreRules) -> Result<IgnoreRules>) -> Self {
        let mut this = self;
        let rules = std::mem::take(&mut this.options.ignore);
        match update(rules.clone()) {
            Ok(updated) => this.options.ignore = updated,
            Err(e) => {
                this.options.ignore = rules;
                this.invalid_pattern.get_or_insert(e);
            }
        }
        this
    }

    /// Skip folders whose normalized name equals `name`.
    #[must_use]
    pub fn ignore_folder(self, name: &str) -> Self {
        self.map_rules(|rules| rules.with_folder(Pattern::exact(name)))
    }

    /// Skip folders whose name matches the regular expression `expr`.
    #[must_use]
    pub fn ignore_folder_regex(self, expr: &str) -> Self {
        self.try_map_rules(|rules| rules.with_folder_regex(expr))
    }

    /// Skip files whose normalized name equals `name`.
    #[must_use]
    pub fn ignore_file(self, name: &str) -> Self {
        self.map_rules(|rules| rules.with_file(Pattern::exact(name)))
    }

    /// Skip files whose name matches the regular expression `expr`.
    #[must_use]
    pub fn ignore_file_regex(self, expr: &str) -> Self {
        self.try_map_rules(|rules| rules.with_file_regex(expr))
    }

    /// Skip files with this extension (leading dot optional).
    #[must_use]
    pub fn ignore_extension(self, extension: &str) -> Self {
        self.map_rules(|rules| rules.with_extension(extension))
    }

    /// Deepest level, counted from the source, at which folder rules apply.
    ///
    /// Default is 1: the source itself and its immediate children.
    #[must_use]
    pub fn ignore_depth(self, depth: usize) -> Self {
        self.map_rules(|rules| rules.with_depth(depth))
    }

    /// Disable fsync for faster (but less durable) copies.
    #[must_use]
    pub fn no_fsync(mut self) -> Self {
        self.options = self.options.without_fsync();
        self
    }

    /// Don't preserve file timestamps.
    #[must_use]
    pub fn no_timestamps(mut self) -> Self {
        self.options = self.options.without_timestamps();
        self
    }

    /// Don't preserve file permissions.
    #[must_use]
    pub fn no_permissions(mut self) -> Self {
        self.options = self.options.without_permissions();
        self
    }

    /// Set a handler for warnings.
    #[must_use]
    pub fn on_warning(mut self, handler: fn(&str)) -> Self {
        self.options = self.options.with_warn_handler(handler);
        self
    }

    /// Set a handler receiving one line per copied or skipped entry.
    #[must_use]
    pub fn verbose(mut self, handler: fn(&str)) -> Self {
        self.options = self.options.with_verbose_handler(handler);
        self
    }

    /// Get the current options (for inspection).
    #[must_use]
    pub fn options(&self) -> &CopyOptions {
        &self.options
    }

    /// Execute the copy.
    ///
    /// # Errors
    ///
    /// `FILE_EINVALIDPATTERN` when a regular expression given to the builder
    /// didn't compile; otherwise see [`copy`](crate::copy()).
    pub fn run(self) -> Result<CopyStats> {
        if let Some(e) = self.invalid_pattern {
            return Err(e);
        }
        copy(&self.src, &self.dst, &self.options)
    }
}

// =============================================================================
// Tests
// =============================================================================
