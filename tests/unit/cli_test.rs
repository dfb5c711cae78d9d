//! CLI tests that need no repository

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::common::fixtures::hosted_notebook;

fn nbrebase() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("nbrebase"));
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_version() {
    nbrebase()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nbrebase"));
}

#[test]
fn test_version_json() {
    nbrebase()
        .args(["--json", "version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"version\""));
}

#[test]
fn test_help() {
    nbrebase()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rebase"))
        .stdout(predicate::str::contains("normalize"));
}

#[test]
fn test_no_args_shows_info() {
    nbrebase()
        .assert()
        .success()
        .stdout(predicate::str::contains("nbrebase --help"));
}

#[test]
fn test_normalize_check_then_write() {
    let dir = TempDir::new().unwrap();
    let nb = dir.path().join("lesson.ipynb");
    std::fs::write(&nb, hosted_notebook(&["print(1)"])).unwrap();

    nbrebase()
        .current_dir(dir.path())
        .args(["normalize", "--check", "lesson.ipynb"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("would change"));
    assert_eq!(std::fs::read_to_string(&nb).unwrap(), hosted_notebook(&["print(1)"]));

    nbrebase()
        .current_dir(dir.path())
        .args(["normalize", "lesson.ipynb"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 1 notebook(s) normalized"));

    nbrebase()
        .current_dir(dir.path())
        .args(["normalize", "--check", "lesson.ipynb"])
        .assert()
        .success();

    let text = std::fs::read_to_string(&nb).unwrap();
    assert!(text.ends_with("}\n"));
    assert!(!text.contains("\"outputId\""));
}

#[test]
fn test_normalize_walks_directories_and_skips_hidden() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("a/b")).unwrap();
    std::fs::create_dir_all(dir.path().join(".ipynb_checkpoints")).unwrap();
    std::fs::write(dir.path().join("a/one.ipynb"), hosted_notebook(&["1"])).unwrap();
    std::fs::write(dir.path().join("a/b/two.ipynb"), hosted_notebook(&["2"])).unwrap();
    std::fs::write(dir.path().join("a/readme.md"), "text").unwrap();
    let hidden = dir.path().join(".ipynb_checkpoints/one-checkpoint.ipynb");
    std::fs::write(&hidden, hosted_notebook(&["1"])).unwrap();

    let output = nbrebase()
        .current_dir(dir.path())
        .args(["--json", "normalize", "."])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["files"].as_array().unwrap().len(), 2);
    assert_eq!(std::fs::read_to_string(hidden).unwrap(), hosted_notebook(&["1"]));
}

#[test]
fn test_normalize_badge_only_keeps_ids() {
    let dir = TempDir::new().unwrap();
    let nb = dir.path().join("lesson.ipynb");
    std::fs::write(&nb, hosted_notebook(&["x"])).unwrap();

    nbrebase()
        .current_dir(dir.path())
        .args(["normalize", "--badge-only", "lesson.ipynb"])
        .assert()
        .success();

    let text = std::fs::read_to_string(&nb).unwrap();
    assert!(!text.contains("colab.research.google.com"));
    assert!(text.contains("\"outputId\""));
}

#[test]
fn test_normalize_rejects_non_notebook() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "{}").unwrap();
    nbrebase()
        .current_dir(dir.path())
        .args(["normalize", "notes.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected a .ipynb file"));
}

#[test]
fn test_verify_equivalent_and_different() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.ipynb");
    let b = dir.path().join("b.ipynb");
    let c = dir.path().join("c.ipynb");
    std::fs::write(&a, hosted_notebook(&["x = 1"])).unwrap();
    std::fs::write(&b, hosted_notebook(&["x = 1"])).unwrap();
    std::fs::write(&c, hosted_notebook(&["x = 2"])).unwrap();

    nbrebase()
        .current_dir(dir.path())
        .args(["verify", "a.ipynb", "b.ipynb"])
        .assert()
        .success()
        .stdout(predicate::str::contains("equivalent"));

    nbrebase()
        .current_dir(dir.path())
        .args(["verify", "a.ipynb", "c.ipynb"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("differ"));
}

#[test]
fn test_verify_ignore_badge_after_normalize() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.ipynb");
    let b = dir.path().join("b.ipynb");
    std::fs::write(&a, hosted_notebook(&["y = 3"])).unwrap();
    std::fs::write(&b, hosted_notebook(&["y = 3"])).unwrap();

    nbrebase().current_dir(dir.path()).args(["normalize", "b.ipynb"]).assert().success();
    nbrebase()
        .current_dir(dir.path())
        .args(["verify", "--ignore-badge", "a.ipynb", "b.ipynb"])
        .assert()
        .success();
}

#[test]
fn test_explicit_config_must_exist() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.ipynb"), hosted_notebook(&["1"])).unwrap();
    nbrebase()
        .current_dir(dir.path())
        .args(["-C", "missing.toml", "normalize", "a.ipynb"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.toml"));
}
