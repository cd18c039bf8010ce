//! Recursive copy.
//!
//! This module provides the copy engine, its ignore rules, and the atomic
//! single-file copy it is built on.

mod dir;
mod file;
mod ignore;

// Re-export public API
pub use dir::{CopyStats, copy};
pub use ignore::{IgnoreRules, Pattern, normalize_name};
