//! Error reporting tests for the fsk CLI.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::{TestFixture, parse_json};
use predicates::prelude::*;

#[test]
fn test_missing_source_reports_code_and_message() {
    let fx = TestFixture::new();

    cargo_bin_cmd!("fsk")
        .arg("copy")
        .arg(fx.src_path("does-not-exist"))
        .arg(fx.dst_path("out"))
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("error[FILE_ENOENT]: "))
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_rm_non_empty_dir_requires_recursive() {
    let fx = TestFixture::new();
    fx.write_src("full/inner.txt", "x");

    cargo_bin_cmd!("fsk")
        .arg("rm")
        .arg(fx.src_path("full"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[DIRECTORY_ENOTEMPTY]"));

    assert!(fx.src_path("full/inner.txt").exists());
}

#[test]
fn test_rm_missing_path() {
    let fx = TestFixture::new();

    cargo_bin_cmd!("fsk")
        .arg("rm")
        .arg(fx.src_path("ghost"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[FILE_ENOENT]"));
}

#[test]
fn test_json_error_carries_transfer_paths() {
    let fx = TestFixture::new();
    let src = fx.src_path("missing.txt");
    let dst = fx.dst_path("target.txt");

    let output = cargo_bin_cmd!("fsk")
        .arg("--json")
        .arg("move")
        .arg(&src)
        .arg(&dst)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let value = parse_json(&output.stderr);
    let error = &value["error"];
    assert_eq!(error["code"], "FILE_ENOENT");
    assert_eq!(error["category"], "file");
    assert_eq!(error["data"]["path"], src.display().to_string());
    assert_eq!(error["data"]["oldPath"], src.display().to_string());
    assert_eq!(error["data"]["newPath"], dst.display().to_string());
}

#[test]
fn test_json_error_for_invalid_pattern() {
    let fx = TestFixture::new();
    fx.write_src("a.txt", "a");

    let output = cargo_bin_cmd!("fsk")
        .args(["--json", "copy"])
        .arg(fx.src.path())
        .arg(fx.dst_path("out"))
        .args(["--ignore-regex-folder", "[z-a]"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let value = parse_json(&output.stderr);
    assert_eq!(value["error"]["code"], "FILE_EINVALIDPATTERN");
    assert_eq!(value["error"]["data"]["pattern"], "[z-a]");
}

#[test]
fn test_unknown_mime_is_input_error() {
    cargo_bin_cmd!("fsk")
        .args(["mime", "nothing.zzz"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error[INVALID_INPUT]"));
}

#[test]
fn test_unknown_subcommand_fails() {
    cargo_bin_cmd!("fsk").arg("frobnicate").assert().failure();
}
