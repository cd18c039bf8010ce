//! Classified errors for fskit.
//!
//! Every operation in this crate fails with the same [`Error`] type: a
//! classified error carrying a [`Category`], a namespaced code such as
//! `FILE_ENOENT`, the original diagnostic text, a user-facing message, and
//! an [`ErrorData`] map of contextual values (`path`, `oldPath`, `newPath`).
//!
//! Errors are classified once, where a primitive fails or a precondition is
//! violated, and are then *annotated* by each enclosing layer rather than
//! replaced. See [`ErrorData::merge`] for the merge rule.
//!
//! # Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | `ENOENT` | Not found |
//! | `EEXIST` | Already exists |
//! | `ENOTDIR` | Not a directory |
//! | `ENOTEMPTY` | Directory not empty |
//! | `EACCES` / `EPERM` | Permission denied |
//! | `EBUSY` | Resource busy |
//! | `EXDEV` | Cross-device link |
//! | `EINVALIDTYPE` | Entry is neither a file nor a directory |
//! | `EUNKNOWN` | Anything else |
//!
//! Other platform codes pass through unchanged with the generic message.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

mod templates;

pub(crate) use templates::message_for;

/// Result type for fskit operations.
///
/// This is a type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Which family of operation produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    /// File-level operations (copy, move, rename, read, write).
    File,
    /// Directory-level operations (listing, creation, removal).
    Directory,
}

impl Category {
    const ALL: [Category; 2] = [Category::File, Category::Directory];

    /// The code prefix for this category, without the trailing underscore.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::File => "FILE",
            Self::Directory => "DIRECTORY",
        }
    }

    /// Namespace a bare or already-namespaced code under this category.
    ///
    /// A code carrying this category's prefix is returned as-is; a code
    /// carrying the other category's prefix is re-prefixed.
    #[must_use]
    pub fn namespace(self, code: &str) -> String {
        format!("{}_{}", self.prefix(), strip_namespace(code))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::File => "file",
            Self::Directory => "directory",
        })
    }
}

/// Strip a recognized `FILE_` / `DIRECTORY_` prefix from a code.
#[must_use]
pub fn strip_namespace(code: &str) -> &str {
    Category::ALL
        .iter()
        .find_map(|category| {
            code.strip_prefix(category.prefix())
                .and_then(|rest| rest.strip_prefix('_'))
        })
        .unwrap_or(code)
}

/// Ordered key/value context attached to an [`Error`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorData {
    entries: Vec<(String, String)>,
}

impl ErrorData {
    /// Key for the path a primitive failed on.
    pub const PATH: &'static str = "path";
    /// Key for the source of a transfer.
    pub const OLD_PATH: &'static str = "oldPath";
    /// Key for the destination of a transfer.
    pub const NEW_PATH: &'static str = "newPath";

    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Data for a transfer step: `oldPath` and `newPath`.
    #[must_use]
    pub fn transfer(old_path: &Path, new_path: &Path) -> Self {
        Self::new()
            .with_path(Self::OLD_PATH, old_path)
            .with_path(Self::NEW_PATH, new_path)
    }

    /// Builder form of [`ErrorData::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Builder form of [`ErrorData::set`] for a path value.
    #[must_use]
    pub fn with_path(self, key: impl Into<String>, path: &Path) -> Self {
        self.with(key, path.display().to_string())
    }

    /// Insert a value, replacing an existing value for the same key in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge data from an enclosing layer into this (inner) map.
    ///
    /// Keys already present keep the inner value, except `oldPath` and
    /// `newPath`, which always take the outer value.
    pub fn merge(&mut self, outer: ErrorData) {
        for (key, value) in outer.entries {
            let outer_wins = key == Self::OLD_PATH || key == Self::NEW_PATH;
            if outer_wins || self.get(&key).is_none() {
                self.set(key, value);
            }
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ErrorData {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Optional classification hints supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Code for string inputs (default `EUNKNOWN`).
    pub code: Option<String>,
    /// User-facing message for string inputs.
    pub user_message: Option<String>,
    /// Contextual data carried onto the error.
    pub data: ErrorData,
}

impl Context {
    /// Empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the user-facing message.
    #[must_use]
    pub fn with_user_message(mut self, message: impl Into<String>) -> Self {
        self.user_message = Some(message.into());
        self
    }

    /// Add a data entry.
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.set(key, value);
        self
    }

    /// Add a path data entry.
    #[must_use]
    pub fn with_path(mut self, key: impl Into<String>, path: &Path) -> Self {
        self.data.set(key, path.display().to_string());
        self
    }
}

/// Input to [`classify`].
#[derive(Debug)]
pub enum Raw {
    /// Already classified; passes through.
    Classified(Error),
    /// A diagnostic message; the code comes from the [`Context`].
    Message(String),
    /// A platform failure, optionally tied to the path it happened on.
    Io {
        /// The platform error.
        error: io::Error,
        /// Path the failure concerns.
        path: Option<PathBuf>,
    },
}

impl From<Error> for Raw {
    fn from(error: Error) -> Self {
        Self::Classified(error)
    }
}

impl From<io::Error> for Raw {
    fn from(error: io::Error) -> Self {
        Self::Io { error, path: None }
    }
}

impl From<String> for Raw {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<&str> for Raw {
    fn from(message: &str) -> Self {
        Self::Message(message.to_owned())
    }
}

/// A classified filesystem error.
///
/// Display shows the original diagnostic text; use
/// [`Error::user_message`] for the human-readable form.
#[derive(Error, Debug)]
#[error("{message}")]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Error {
    category: Category,
    code: String,
    message: String,
    user_message: Option<String>,
    data: ErrorData,
    #[source]
    #[cfg_attr(feature = "serde", serde(skip))]
    source: Option<io::Error>,
}

/// Classify a raw failure into an [`Error`].
///
/// - [`Raw::Classified`] keeps its code and messages; only the context
///   data is merged in.
/// - [`Raw::Message`] takes its code from `context.code` (default
///   `EUNKNOWN`) and carries the context's user message and data verbatim.
/// - [`Raw::Io`] resolves the platform code and renders the user message
///   from the static template table.
pub fn classify(raw: impl Into<Raw>, context: Context, category: Category) -> Error {
    match raw.into() {
        Raw::Classified(error) => error.annotate(context.data),
        Raw::Message(message) => {
            let code = context.code.as_deref().unwrap_or(templates::UNKNOWN);
            Error {
                category,
                code: category.namespace(code),
                message,
                user_message: context.user_message,
                data: context.data,
                source: None,
            }
        }
        Raw::Io { error, path } => {
            let code = templates::errno_name(&error);
            let user_message = templates::render(&templates::Failure {
                code,
                path: path.as_deref(),
            });
            let mut data = context.data;
            if let Some(path) = &path {
                data.merge(ErrorData::new().with_path(ErrorData::PATH, path));
            }
            Error {
                category,
                code: category.namespace(code),
                message: error.to_string(),
                user_message: Some(user_message),
                data,
                source: Some(error),
            }
        }
    }
}

impl Error {
    /// Build an error from a message and a bare code, with a rendered user
    /// message and `path` in the data.
    pub(crate) fn at_path(category: Category, code: &str, message: &str, path: &Path) -> Self {
        classify(
            message,
            Context::new()
                .with_code(code)
                .with_user_message(message_for(code, Some(path)))
                .with_path(ErrorData::PATH, path),
            category,
        )
    }

    /// Not-found precondition failure.
    pub(crate) fn not_found(category: Category, path: &Path) -> Self {
        let message = match category {
            Category::File => "File not found",
            Category::Directory => "Directory not found",
        };
        Self::at_path(category, "ENOENT", message, path)
    }

    /// The entry is neither a file nor a directory.
    pub(crate) fn invalid_type(path: &Path) -> Self {
        Self::at_path(Category::File, "EINVALIDTYPE", "Invalid file type", path)
    }

    /// An ignore pattern failed to compile.
    pub(crate) fn invalid_pattern(pattern: &str, reason: impl fmt::Display) -> Self {
        classify(
            format!("Invalid ignore pattern {pattern:?}: {reason}"),
            Context::new()
                .with_code("EINVALIDPATTERN")
                .with_user_message(message_for("EINVALIDPATTERN", None))
                .with_data("pattern", pattern),
            Category::File,
        )
    }

    /// Category of the failing operation.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Namespaced code, e.g. `FILE_ENOENT`.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Code without its namespace, e.g. `ENOENT`.
    #[must_use]
    pub fn bare_code(&self) -> &str {
        strip_namespace(&self.code)
    }

    /// Whether the bare code equals `code` (`"ENOENT"`, `"EXDEV"`, ...).
    #[must_use]
    pub fn is(&self, code: &str) -> bool {
        self.bare_code() == strip_namespace(code)
    }

    /// Original diagnostic text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Human-readable message, if one was resolved.
    #[must_use]
    pub fn user_message(&self) -> Option<&str> {
        self.user_message.as_deref()
    }

    /// The user message, falling back to the diagnostic text.
    #[must_use]
    pub fn display_message(&self) -> &str {
        self.user_message.as_deref().unwrap_or(&self.message)
    }

    /// Contextual data accumulated across layers.
    #[must_use]
    pub fn data(&self) -> &ErrorData {
        &self.data
    }

    /// Underlying platform error, when the failure came from the OS.
    #[must_use]
    pub fn io_error(&self) -> Option<&io::Error> {
        self.source.as_ref()
    }

    /// Merge an enclosing layer's data into this error.
    #[must_use]
    pub fn annotate(mut self, outer: ErrorData) -> Self {
        self.data.merge(outer);
        self
    }

    /// Record `path` under `key`, replacing any value already there.
    #[must_use]
    pub(crate) fn with_path(mut self, key: &str, path: &Path) -> Self {
        self.data.set(key, path.display().to_string());
        self
    }

    /// Annotate with `oldPath`/`newPath` for a transfer step.
    #[must_use]
    pub fn in_transfer(self, old_path: &Path, new_path: &Path) -> Self {
        self.annotate(ErrorData::transfer(old_path, new_path))
    }
}

/// Whether a platform error reports a rename across filesystems.
pub(crate) fn is_cross_device(error: &io::Error) -> bool {
    templates::errno_name(error) == "EXDEV"
}

/// Classify `io::Result` failures at the call site.
pub trait IoResultExt<T> {
    /// Classify an I/O failure on `path` under `category`.
    fn classify(self, category: Category, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn classify(self, category: Category, path: &Path) -> Result<T> {
        self.map_err(|error| {
            classify(
                Raw::Io {
                    error,
                    path: Some(path.to_path_buf()),
                },
                Context::new(),
                category,
            )
        })
    }
}
