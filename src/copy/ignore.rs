//! Ignore rules for the recursive copy engine.
//!
//! Names are compared after [`normalize_name`], so `Node_Modules`,
//! `node-modules` and `nodemodules` all match the same exact pattern, and
//! `Café` matches `cafe`.
//!
//! | Rule | Applies to | Matched against |
//! |------|------------|-----------------|
//! | folder | directories at depth `<= depth` | normalized name (regex: also raw name) |
//! | file | files at any depth | normalized name (regex: also raw name) |
//! | extension | files at any depth | normalized final extension |
//!
//! Depth counts from the copy root, which is depth `0`. The default depth
//! of `1` means folder rules apply to the root and its immediate children.

use crate::error::{Error, Result};
use regex::Regex;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Fold a name into its comparison form.
///
/// Decomposes to NFD, drops combining marks, lowercases, drops everything
/// that is neither alphanumeric nor whitespace, collapses whitespace runs
/// and trims.
///
/// ```
/// use fskit::normalize_name;
///
/// assert_eq!(normalize_name("Node_Modules"), "nodemodules");
/// assert_eq!(normalize_name("  Café  Notes "), "cafe notes");
/// ```
#[must_use]
pub fn normalize_name(value: &str) -> String {
    let folded: String = value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A single name pattern.
///
/// Exact patterns are normalized once at construction. Regex patterns are
/// tested against both the normalized and the raw entry name.
#[derive(Debug, Clone)]
pub struct Pattern(Matcher);

#[derive(Debug, Clone)]
enum Matcher {
    Exact(String),
    Regex(Regex),
}

impl Pattern {
    /// Pattern matching names equal to `text` after normalization.
    #[must_use]
    pub fn exact(text: &str) -> Self {
        Self(Matcher::Exact(normalize_name(text)))
    }

    /// Pattern matching names accepted by the regular expression `expr`.
    ///
    /// # Errors
    ///
    /// `FILE_EINVALIDPATTERN` when `expr` doesn't compile.
    pub fn regex(expr: &str) -> Result<Self> {
        Regex::new(expr)
            .map(Self::from)
            .map_err(|e| Error::invalid_pattern(expr, e))
    }

    fn matches(&self, raw: &str, normalized: &str) -> bool {
        match &self.0 {
            Matcher::Exact(expected) => expected == normalized,
            Matcher::Regex(re) => re.is_match(normalized) || re.is_match(raw),
        }
    }
}

impl From<&str> for Pattern {
    fn from(text: &str) -> Self {
        Self::exact(text)
    }
}

impl From<String> for Pattern {
    fn from(text: String) -> Self {
        Self::exact(&text)
    }
}

impl From<Regex> for Pattern {
    fn from(re: Regex) -> Self {
        Self(Matcher::Regex(re))
    }
}

/// Which entries a copy skips.
///
/// # Example
///
/// ```
/// use fskit::IgnoreRules;
///
/// let rules = IgnoreRules::new()
///     .with_folder("node_modules")
///     .with_file_regex(r"^\.env")?
///     .with_extension("log")
///     .with_depth(2);
///
/// assert!(rules.ignores_folder("Node-Modules", 2));
/// assert!(!rules.ignores_folder("node_modules", 3));
/// assert!(rules.ignores_file(".env.local"));
/// assert!(rules.ignores_file("debug.LOG"));
/// # Ok::<(), fskit::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    folders: Vec<Pattern>,
    files: Vec<Pattern>,
    extensions: Vec<String>,
    depth: usize,
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self {
            folders: Vec::new(),
            files: Vec::new(),
            extensions: Vec::new(),
            depth: Self::DEFAULT_DEPTH,
        }
    }
}

impl IgnoreRules {
    /// Deepest level, counted from the copy root, at which folder rules apply
    /// unless overridden.
    pub const DEFAULT_DEPTH: usize = 1;

    /// Empty rules with the default depth.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip folders matching `pattern`
    #[must_use]
    pub fn with_folder(mut self, pattern: impl Into<Pattern>) -> Self {
        self.folders.push(pattern.into());
        self
    }

    /// Skip folders whose name matches the regular expression `expr`
    ///
    /// # Errors
    ///
    /// `FILE_EINVALIDPATTERN` when `expr` doesn't compile.
    pub fn with_folder_regex(self, expr: &str) -> Result<Self> {
        Ok(self.with_folder(Pattern::regex(expr)?))
    }

    /// Skip files matching `pattern`
    #[must_use]
    pub fn with_file(mut self, pattern: impl Into<Pattern>) -> Self {
        self.files.push(pattern.into());
        self
    }

    /// Skip files whose name matches the regular expression `expr`
    ///
    /// # Errors
    ///
    /// `FILE_EINVALIDPATTERN` when `expr` doesn't compile.
    pub fn with_file_regex(self, expr: &str) -> Result<Self> {
        Ok(self.with_file(Pattern::regex(expr)?))
    }

    /// Skip files with this extension. A leading dot is optional.
    #[must_use]
    pub fn with_extension(mut self, extension: &str) -> Self {
        let normalized = normalize_name(extension);
        if !normalized.is_empty() && !self.extensions.contains(&normalized) {
            self.extensions.push(normalized);
        }
        self
    }

    /// Set the deepest level at which folder rules apply
    #[must_use]
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Deepest level at which folder rules apply.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Normalized extensions being skipped.
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Whether no rule is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty() && self.extensions.is_empty()
    }

    /// Whether a folder named `name` at `depth` is skipped.
    #[must_use]
    pub fn ignores_folder(&self, name: &str, depth: usize) -> bool {
        if depth > self.depth || self.folders.is_empty() {
            return false;
        }
        let normalized = normalize_name(name);
        self.folders.iter().any(|p| p.matches(name, &normalized))
    }

    /// Whether a file named `name` is skipped.
    #[must_use]
    pub fn ignores_file(&self, name: &str) -> bool {
        if !self.files.is_empty() {
            let normalized = normalize_name(name);
            if self.files.iter().any(|p| p.matches(name, &normalized)) {
                return true;
            }
        }
        if self.extensions.is_empty() {
            return false;
        }
        Path::new(name)
            .extension()
            .map(|ext| normalize_name(&ext.to_string_lossy()))
            .is_some_and(|ext| self.extensions.contains(&ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Node_Modules"), "nodemodules");
        assert_eq!(normalize_name("node-modules"), "nodemodules");
        assert_eq!(normalize_name("Relatório Final.PDF"), "relatorio finalpdf");
        assert_eq!(normalize_name("  a \t b  "), "a b");
        assert_eq!(normalize_name("Ærø"), "ærø");
        assert_eq!(normalize_name("---"), "");
    }

    #[test]
    fn test_exact_folder_is_case_and_accent_insensitive() {
        let rules = IgnoreRules::new().with_folder("Configurações");
        assert!(rules.ignores_folder("configuracoes", 1));
        assert!(rules.ignores_folder("CONFIGURAÇÕES", 0));
        assert!(!rules.ignores_folder("config", 1));
    }

    #[test]
    fn test_folder_depth_threshold() {
        let rules = IgnoreRules::new().with_folder("cache");
        assert_eq!(rules.depth(), 1);
        assert!(rules.ignores_folder("cache", 0));
        assert!(rules.ignores_folder("cache", 1));
        assert!(!rules.ignores_folder("cache", 2));

        let rules = rules.with_depth(3);
        assert!(rules.ignores_folder("cache", 3));
        assert!(!rules.ignores_folder("cache", 4));
    }

    #[test]
    fn test_file_rules_ignore_depth() {
        let rules = IgnoreRules::new().with_file("Thumbs.db").with_depth(0);
        assert!(rules.ignores_file("thumbs.db"));
        assert!(rules.ignores_file("THUMBS_DB"));
        assert!(!rules.ignores_file("thumbs.dat"));
    }

    #[test]
    fn test_regex_matches_raw_or_normalized() {
        let rules = IgnoreRules::new()
            .with_file_regex(r"^\.env")
            .unwrap()
            .with_folder_regex(r"^build\d+$")
            .unwrap();
        assert!(rules.ignores_file(".env.production"));
        assert!(!rules.ignores_file("env.txt"));
        assert!(rules.ignores_folder("Build-42", 1));
        assert!(!rules.ignores_folder("builder", 1));
    }

    #[test]
    fn test_invalid_regex_is_classified() {
        let err = IgnoreRules::new().with_file_regex("(unclosed").unwrap_err();
        assert_eq!(err.code(), "FILE_EINVALIDPATTERN");
        assert_eq!(err.data().get("pattern"), Some("(unclosed"));
    }

    #[test]
    fn test_extension_rules() {
        let rules = IgnoreRules::new().with_extension(".TMP").with_extension("log");
        assert_eq!(rules.extensions(), ["tmp", "log"]);
        assert!(rules.ignores_file("scratch.tmp"));
        assert!(rules.ignores_file("app.Log"));
        assert!(!rules.ignores_file("tmp"));
        assert!(!rules.ignores_file("archive.tar.gz"));
    }

    #[test]
    fn test_empty_rules_ignore_nothing() {
        let rules = IgnoreRules::default();
        assert!(rules.is_empty());
        assert!(!rules.ignores_file("anything.txt"));
        assert!(!rules.ignores_folder("anything", 0));
    }
}
