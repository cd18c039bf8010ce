//! rm, mkdir, stat and ls integration tests for the fsk CLI.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::{TestFixture, parse_json};
use predicates::prelude::*;

#[test]
fn test_rm_file() {
    let fx = TestFixture::new();
    let file = fx.write_src("old.txt", "x");

    cargo_bin_cmd!("fsk")
        .arg("rm")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted "));

    assert!(!file.exists());
}

#[test]
fn test_rm_empty_dir_without_recursive() {
    let fx = TestFixture::new();
    let dir = fx.src_path("empty");
    std::fs::create_dir(&dir).unwrap();

    cargo_bin_cmd!("fsk").arg("rm").arg(&dir).assert().success();

    assert!(!dir.exists());
}

#[test]
fn test_rm_recursive() {
    let fx = TestFixture::new();
    fx.create_project();
    let target = fx.src_path("node_modules");

    cargo_bin_cmd!("fsk")
        .args(["rm", "-r"])
        .arg(&target)
        .assert()
        .success();

    assert!(!target.exists());
    assert!(fx.src_path("README.md").exists());
}

#[test]
fn test_mkdir_with_parents() {
    let fx = TestFixture::new();
    let dir = fx.dst_path("a/b/c");

    cargo_bin_cmd!("fsk")
        .args(["mkdir", "-p"])
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("created "));
    assert!(dir.is_dir());

    // an existing directory is not an error
    cargo_bin_cmd!("fsk")
        .arg("mkdir")
        .arg(&dir)
        .assert()
        .success();
}

#[test]
fn test_mkdir_without_parents_fails() {
    let fx = TestFixture::new();

    cargo_bin_cmd!("fsk")
        .arg("mkdir")
        .arg(fx.dst_path("missing/child"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[DIRECTORY_ENOENT]"));
}

#[test]
fn test_mkdir_over_file_fails() {
    let fx = TestFixture::new();
    let file = fx.write_dst("taken", "x");

    cargo_bin_cmd!("fsk")
        .arg("mkdir")
        .arg(&file)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[DIRECTORY_EEXIST]"));
}

#[test]
fn test_stat_file() {
    let fx = TestFixture::new();
    let file = fx.write_src("data.bin", "12345");

    cargo_bin_cmd!("fsk")
        .arg("stat")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("kind: file"))
        .stdout(predicate::str::contains("size: 5"))
        .stdout(predicate::str::contains("symlink: false"));
}

#[test]
fn test_stat_json() {
    let fx = TestFixture::new();

    let output = cargo_bin_cmd!("fsk")
        .arg("--json")
        .arg("stat")
        .arg(fx.src.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let info = parse_json(&output.stdout);
    assert_eq!(info["kind"], "directory");
    assert_eq!(info["is_symlink"], false);
}

#[cfg(unix)]
#[test]
fn test_stat_no_follow_reports_symlink() {
    let fx = TestFixture::new();
    let target = fx.write_src("target.txt", "t");
    let link = fx.src_path("link");
    std::os::unix::fs::symlink(&target, &link).unwrap();

    cargo_bin_cmd!("fsk")
        .arg("stat")
        .arg(&link)
        .arg("--no-follow")
        .assert()
        .success()
        .stdout(predicate::str::contains("kind: symlink"))
        .stdout(predicate::str::contains("symlink: true"));

    cargo_bin_cmd!("fsk")
        .arg("stat")
        .arg(&link)
        .assert()
        .success()
        .stdout(predicate::str::contains("kind: file"));
}

#[test]
fn test_ls_top_level_sorted() {
    let fx = TestFixture::new();
    fx.write_src("b.txt", "b");
    fx.write_src("a.txt", "a");
    fx.write_src("sub/c.txt", "c");

    cargo_bin_cmd!("fsk")
        .arg("ls")
        .arg(fx.src.path())
        .assert()
        .success()
        .stdout("a.txt\nb.txt\nsub\n");
}

#[test]
fn test_ls_recursive_json() {
    let fx = TestFixture::new();
    fx.write_src("a.txt", "a");
    fx.write_src("sub/c.txt", "c");

    let output = cargo_bin_cmd!("fsk")
        .args(["--json", "ls", "-R"])
        .arg(fx.src.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let names: Vec<String> = parse_json(&output.stdout)
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().replace('\\', "/"))
        .collect();
    assert!(names.contains(&"a.txt".to_owned()));
    assert!(names.contains(&"sub".to_owned()));
    assert!(names.contains(&"sub/c.txt".to_owned()));
}

#[test]
fn test_ls_missing_directory() {
    let fx = TestFixture::new();

    cargo_bin_cmd!("fsk")
        .arg("ls")
        .arg(fx.src_path("nope"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ENOENT"));
}
