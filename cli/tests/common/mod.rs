//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A test fixture that provides source and destination directories.
pub struct TestFixture {
    pub src: TempDir,
    pub dst: TempDir,
}

impl TestFixture {
    /// Create a new test fixture with fresh source and destination directories.
    pub fn new() -> Self {
        Self {
            src: TempDir::new().expect("Failed to create temp source dir"),
            dst: TempDir::new().expect("Failed to create temp dest dir"),
        }
    }

    /// Path inside the source directory.
    pub fn src_path(&self, relative: &str) -> PathBuf {
        self.src.path().join(relative)
    }

    /// Path inside the destination directory.
    pub fn dst_path(&self, relative: &str) -> PathBuf {
        self.dst.path().join(relative)
    }

    /// Write a file under the source directory, creating parents.
    pub fn write_src(&self, relative: &str, content: &str) -> PathBuf {
        write_file(&self.src_path(relative), content)
    }

    /// Write a file under the destination directory, creating parents.
    pub fn write_dst(&self, relative: &str, content: &str) -> PathBuf {
        write_file(&self.dst_path(relative), content)
    }

    /// Create a small project tree with the usual noise in it:
    ///
    /// ```text
    /// src/
    ///   README.md
    ///   app.log
    ///   .env.local
    ///   lib/main.rs
    ///   lib/cache/blob.bin
    ///   node_modules/pkg/index.js
    /// ```
    pub fn create_project(&self) {
        self.write_src("README.md", "# project");
        self.write_src("app.log", "log line");
        self.write_src(".env.local", "SECRET=1");
        self.write_src("lib/main.rs", "fn main() {}");
        self.write_src("lib/cache/blob.bin", "blob");
        self.write_src("node_modules/pkg/index.js", "module.exports = {}");
    }

    /// Count all files in a directory recursively.
    pub fn count_files_recursive(&self, dir: &Path) -> usize {
        let mut count = 0;
        if dir.is_dir() {
            for entry in fs::read_dir(dir).expect("Failed to read directory") {
                let entry = entry.expect("Failed to read entry");
                let path = entry.path();
                if path.is_dir() {
                    count += self.count_files_recursive(&path);
                } else {
                    count += 1;
                }
            }
        }
        count
    }

    /// Check if a file exists and has the expected content.
    pub fn assert_file_content(&self, path: &Path, expected: &str) {
        assert!(path.exists(), "File does not exist: {:?}", path);
        let actual = fs::read_to_string(path).expect("Failed to read file");
        assert_eq!(actual, expected, "File content mismatch");
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `content` to `path`, creating parent directories.
pub fn write_file(path: &Path, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create directory");
    }
    fs::write(path, content).expect("Failed to write file");
    path.to_path_buf()
}

/// Parse the single JSON document a command printed.
pub fn parse_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("Output is not valid JSON")
}
