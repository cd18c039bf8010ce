//! Copy integration tests for the fsk CLI.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::{TestFixture, parse_json};
use predicates::prelude::*;

#[test]
fn test_copy_single_file() {
    let fx = TestFixture::new();
    let src = fx.write_src("note.txt", "hello world");
    let dst = fx.dst_path("nested/dir/note.txt");

    cargo_bin_cmd!("fsk")
        .arg("copy")
        .arg(&src)
        .arg(&dst)
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied 1 files"));

    fx.assert_file_content(&dst, "hello world");
    assert!(src.exists(), "copy must leave the source in place");
}

#[test]
fn test_copy_tree() {
    let fx = TestFixture::new();
    fx.create_project();
    let dst = fx.dst_path("out");

    cargo_bin_cmd!("fsk")
        .arg("copy")
        .arg(fx.src.path())
        .arg(&dst)
        .assert()
        .success();

    assert_eq!(fx.count_files_recursive(&dst), 6);
    fx.assert_file_content(&dst.join("lib/main.rs"), "fn main() {}");
}

#[test]
fn test_copy_with_ignore_rules() {
    let fx = TestFixture::new();
    fx.create_project();
    let dst = fx.dst_path("out");

    cargo_bin_cmd!("fsk")
        .arg("copy")
        .arg(fx.src.path())
        .arg(&dst)
        .args(["--ignore-folder", "Node_Modules"])
        .args(["--ignore-ext", ".LOG"])
        .args(["--ignore-regex-file", r"^\.env"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied 3 files"))
        .stdout(predicate::str::contains("ignored 3"));

    assert!(!dst.join("node_modules").exists());
    assert!(!dst.join("app.log").exists());
    assert!(!dst.join(".env.local").exists());
    assert!(dst.join("lib/cache/blob.bin").exists());
}

#[test]
fn test_copy_ignore_depth_controls_nested_folders() {
    let fx = TestFixture::new();
    fx.create_project();

    // cache sits two levels below the source; the default depth of 1 keeps it
    let shallow = fx.dst_path("shallow");
    cargo_bin_cmd!("fsk")
        .arg("copy")
        .arg(fx.src.path())
        .arg(&shallow)
        .args(["--ignore-folder", "cache"])
        .assert()
        .success();
    assert!(shallow.join("lib/cache/blob.bin").exists());

    let deep = fx.dst_path("deep");
    cargo_bin_cmd!("fsk")
        .arg("copy")
        .arg(fx.src.path())
        .arg(&deep)
        .args(["--ignore-folder", "cache", "--ignore-depth", "2"])
        .assert()
        .success();
    assert!(!deep.join("lib/cache").exists());
    assert!(deep.join("lib/main.rs").exists());
}

#[test]
fn test_copy_ignore_folder_regex() {
    let fx = TestFixture::new();
    fx.write_src("build-1/out.bin", "1");
    fx.write_src("build-2/out.bin", "2");
    fx.write_src("src/lib.rs", "// lib");
    let dst = fx.dst_path("out");

    cargo_bin_cmd!("fsk")
        .arg("copy")
        .arg(fx.src.path())
        .arg(&dst)
        .args(["--ignore-regex-folder", r"^build\d+$"])
        .assert()
        .success();

    assert!(!dst.join("build-1").exists());
    assert!(!dst.join("build-2").exists());
    assert!(dst.join("src/lib.rs").exists());
}

#[test]
fn test_copy_json_stats() {
    let fx = TestFixture::new();
    fx.create_project();
    let dst = fx.dst_path("out");

    let output = cargo_bin_cmd!("fsk")
        .arg("--json")
        .arg("copy")
        .arg(fx.src.path())
        .arg(&dst)
        .args(["--ignore-ext", "log", "--no-sync"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stats = parse_json(&output.stdout);
    assert_eq!(stats["files_copied"], 5);
    assert_eq!(stats["files_skipped"], 1);
    assert!(stats["bytes_copied"].as_u64().unwrap() > 0);
}

#[test]
fn test_copy_verbose_lists_entries() {
    let fx = TestFixture::new();
    fx.write_src("a.txt", "a");
    fx.write_src("b.tmp", "b");

    cargo_bin_cmd!("fsk")
        .arg("-v")
        .arg("copy")
        .arg(fx.src.path())
        .arg(fx.dst_path("out"))
        .args(["--ignore-ext", "tmp"])
        .assert()
        .success()
        .stderr(predicate::str::contains("copied "))
        .stderr(predicate::str::contains("skipped "));
}

#[test]
fn test_copy_invalid_regex_is_input_error() {
    let fx = TestFixture::new();
    fx.write_src("a.txt", "a");
    let dst = fx.dst_path("out");

    cargo_bin_cmd!("fsk")
        .arg("copy")
        .arg(fx.src.path())
        .arg(&dst)
        .args(["--ignore-regex-file", "(unclosed"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error[FILE_EINVALIDPATTERN]"));

    assert!(!dst.exists());
}
