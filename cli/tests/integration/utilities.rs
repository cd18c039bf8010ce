//! sanitize, mime, ext, hash and check integration tests for the fsk CLI.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::{TestFixture, parse_json};
use predicates::prelude::*;

#[test]
fn test_sanitize() {
    cargo_bin_cmd!("fsk")
        .args(["sanitize", "re: <draft>?.txt"])
        .assert()
        .success()
        .stdout("re draft.txt\n");
}

#[test]
fn test_sanitize_reserved_name_is_empty() {
    cargo_bin_cmd!("fsk")
        .args(["sanitize", "COM1.log"])
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn test_mime_from_extension_and_path() {
    cargo_bin_cmd!("fsk")
        .args(["mime", ".PNG"])
        .assert()
        .success()
        .stdout("image/png\n");

    cargo_bin_cmd!("fsk")
        .args(["mime", "docs/readme.md"])
        .assert()
        .success()
        .stdout("text/markdown\n");
}

#[test]
fn test_mime_to_extension() {
    cargo_bin_cmd!("fsk")
        .args(["mime", "--to-ext", "image/jpeg"])
        .assert()
        .success()
        .stdout("jpg\n");

    cargo_bin_cmd!("fsk")
        .args(["mime", "--to-ext", "application/x-unknown"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No known extension"));
}

#[test]
fn test_ext_from_signature() {
    let fx = TestFixture::new();
    let file = fx.src_path("mystery");
    std::fs::write(&file, b"%PDF-1.7\n%binary").unwrap();

    cargo_bin_cmd!("fsk")
        .arg("ext")
        .arg(&file)
        .assert()
        .success()
        .stdout("pdf\n");
}

#[test]
fn test_ext_unknown_signature() {
    let fx = TestFixture::new();
    let file = fx.write_src("plain.txt", "just text");

    cargo_bin_cmd!("fsk")
        .arg("ext")
        .arg(&file)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error[INVALID_INPUT]"));
}

#[test]
fn test_ext_by_name() {
    let output = cargo_bin_cmd!("fsk")
        .args(["--json", "ext", "--by-name", "photos/Cat.JPG"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(parse_json(&output.stdout)["extension"], "jpg");
}

#[test]
fn test_hash_defaults_to_md5() {
    cargo_bin_cmd!("fsk")
        .args(["hash", "abc"])
        .assert()
        .success()
        .stdout("900150983cd24fb0d6963f7d28e17f72\n");
}

#[test]
fn test_hash_sha256() {
    cargo_bin_cmd!("fsk")
        .args(["hash", "--sha256", "abc"])
        .assert()
        .success()
        .stdout("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad\n");
}

#[test]
fn test_hash_json() {
    let output = cargo_bin_cmd!("fsk")
        .args(["--json", "hash", "abc"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(parse_json(&output.stdout)["md5"], "900150983cd24fb0d6963f7d28e17f72");
}

#[test]
fn test_check() {
    cargo_bin_cmd!("fsk")
        .args(["check", "report.pdf"])
        .assert()
        .success()
        .stdout("path: false\nfilename: true\nextension: false\n");

    let output = cargo_bin_cmd!("fsk")
        .args(["check", "--json", "/etc/hosts"])
        .output()
        .unwrap();
    let value = parse_json(&output.stdout);
    assert_eq!(value["path"], true);
    assert_eq!(value["filename"], false);
}
