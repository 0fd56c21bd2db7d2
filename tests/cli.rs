use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn asyarrange() -> Command {
    Command::cargo_bin("asyarrange").unwrap()
}

#[test]
fn arranges_folder_in_plain_mode() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("a.asy"), "size(5);\n").unwrap();
    fs::write(root.join("a.pdf"), "%PDF").unwrap();

    asyarrange()
        .arg(root)
        .args(["--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved file: a.asy to:"))
        .stdout(predicate::str::contains("Moved file: a.pdf to:"));

    assert!(root.join("size5").join("a.asy").is_file());
    assert!(root.join("size5").join("a.pdf").is_file());
}

#[test]
fn missing_folder_exits_with_unavailable_code() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing");

    asyarrange()
        .arg(&missing)
        .args(["--output-format", "plain"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("does not exist or is empty"));

    assert!(!missing.exists());
}

#[test]
fn dry_run_leaves_files_in_place() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("a.asy"), "size(5);\n").unwrap();

    asyarrange()
        .arg(root)
        .args(["--dry-run", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would move file: a.asy"));

    assert!(root.join("a.asy").is_file());
    assert!(!root.join("size5").exists());
}

#[test]
fn json_report_lists_moves() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("a.asy"), "size(12);\n").unwrap();

    asyarrange()
        .arg(root)
        .args(["--output-format", "json", "--no-banner"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"completed\""))
        .stdout(predicate::str::contains("\"size\": \"12\""));
}

#[test]
fn move_collision_exits_with_warning_code() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir(root.join("size5")).unwrap();
    fs::write(root.join("size5").join("a.asy"), "size(5);\n").unwrap();
    fs::write(root.join("a.asy"), "size(5);\n").unwrap();

    asyarrange()
        .arg(root)
        .args(["--output-format", "plain"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Move file: a.asy failed."));

    assert!(root.join("a.asy").is_file());
}

#[test]
fn quiet_mode_prints_nothing_on_success() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("a.asy"), "size(5);\n").unwrap();

    asyarrange()
        .arg(root)
        .args(["-q", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn generate_config_writes_sample() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("asyarrange.toml");

    asyarrange()
        .arg("--generate-config")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("artifact_extension = \"pdf\""));
}

#[test]
fn invalid_extension_is_a_startup_error() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.asy"), "size(5);\n").unwrap();

    asyarrange()
        .arg(temp_dir.path())
        .args(["--artifact-ext", "asy"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));

    assert!(temp_dir.path().join("a.asy").is_file());
}
