//! Move and rename integration tests for the fsk CLI.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::{TestFixture, parse_json};
use predicates::prelude::*;

#[test]
fn test_move_file() {
    let fx = TestFixture::new();
    let src = fx.write_src("report.pdf", "v1");
    let dst = fx.dst_path("docs/report.pdf");

    cargo_bin_cmd!("fsk")
        .arg("move")
        .arg(&src)
        .arg(&dst)
        .assert()
        .success()
        .stdout(predicate::str::contains("moved "));

    assert!(!src.exists());
    fx.assert_file_content(&dst, "v1");
}

#[test]
fn test_move_backs_up_existing_file() {
    let fx = TestFixture::new();
    let src = fx.write_src("report.pdf", "v2");
    let dst = fx.write_dst("docs/report.pdf", "v1");

    cargo_bin_cmd!("fsk")
        .arg("move")
        .arg(&src)
        .arg(&dst)
        .assert()
        .success();

    fx.assert_file_content(&dst, "v2");
    fx.assert_file_content(&fx.dst_path("docs/backup/report.pdf"), "v1");
}

#[test]
fn test_move_custom_backup_dir() {
    let fx = TestFixture::new();
    let src = fx.write_src("a.txt", "new");
    let dst = fx.write_dst("a.txt", "old");

    cargo_bin_cmd!("fsk")
        .arg("move")
        .arg(&src)
        .arg(&dst)
        .args(["--backup-dir", ".previous"])
        .assert()
        .success();

    fx.assert_file_content(&fx.dst_path(".previous/a.txt"), "old");
}

#[test]
fn test_move_tree() {
    let fx = TestFixture::new();
    fx.create_project();
    let dst = fx.dst_path("moved");

    cargo_bin_cmd!("fsk")
        .arg("move")
        .arg(fx.src.path())
        .arg(&dst)
        .assert()
        .success();

    assert!(!fx.src.path().exists());
    assert_eq!(fx.count_files_recursive(&dst), 6);
}

#[test]
fn test_rename() {
    let fx = TestFixture::new();
    let src = fx.write_src("draft.txt", "text");
    let dst = fx.src_path("final.txt");

    cargo_bin_cmd!("fsk")
        .arg("rename")
        .arg(&src)
        .arg(&dst)
        .arg("--no-fallback")
        .assert()
        .success()
        .stdout(predicate::str::contains("renamed "));

    assert!(!src.exists());
    fx.assert_file_content(&dst, "text");
}

#[test]
fn test_rename_json_output() {
    let fx = TestFixture::new();
    let src = fx.write_src("a.txt", "a");
    let dst = fx.dst_path("b.txt");

    let output = cargo_bin_cmd!("fsk")
        .args(["rename", "--json"])
        .arg(&src)
        .arg(&dst)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value = parse_json(&output.stdout);
    assert_eq!(value["action"], "renamed");
    assert_eq!(value["target"], dst.display().to_string());
}

#[test]
fn test_rename_missing_source() {
    let fx = TestFixture::new();

    cargo_bin_cmd!("fsk")
        .arg("rename")
        .arg(fx.src_path("ghost.txt"))
        .arg(fx.dst_path("x.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[FILE_ENOENT]"));
}
