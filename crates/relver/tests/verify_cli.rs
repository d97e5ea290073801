//! Integration tests for the `verify` command.
//!
//! Each test drives the compiled binary against a manifest in a temp
//! directory, the way the external orchestrator would invoke it.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

fn write_manifest(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("Cargo.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn version_flag_rewrites_manifest() {
    let tmp = TempDir::new().unwrap();
    let manifest = write_manifest(&tmp, "name = \"pkg\"\nversion = \"1.2.3\"\n");

    cmd()
        .current_dir(tmp.path())
        .args(["verify", "--version", "2.0.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2.0.0"));

    assert_eq!(
        fs::read_to_string(&manifest).unwrap(),
        "name = \"pkg\"\nversion = \"2.0.0\"\n"
    );
}

#[test]
fn v_prefixed_version_accepted() {
    let tmp = TempDir::new().unwrap();
    let manifest = write_manifest(&tmp, "version = \"0.0.1\"\n");

    cmd()
        .current_dir(tmp.path())
        .args(["verify", "--version", "v1.0.0"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&manifest).unwrap(),
        "version = \"1.0.0\"\n"
    );
}

#[test]
fn context_file_with_decision_rewrites() {
    let tmp = TempDir::new().unwrap();
    let manifest = write_manifest(&tmp, "version = \"1.0.0\"\n");
    let context = tmp.path().join("context.json");
    fs::write(
        &context,
        r#"{"next_release": {"version": "1.1.0"}, "branch": "main"}"#,
    )
    .unwrap();

    cmd()
        .current_dir(tmp.path())
        .args(["verify", "--context", "context.json"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&manifest).unwrap(),
        "version = \"1.1.0\"\n"
    );
}

#[test]
fn context_without_decision_is_noop() {
    let tmp = TempDir::new().unwrap();
    let manifest = write_manifest(&tmp, "version = \"0.0.1\"\n");
    let context = tmp.path().join("context.json");
    fs::write(&context, r#"{"next_release": null}"#).unwrap();

    cmd()
        .current_dir(tmp.path())
        .args(["verify", "--context", "context.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No release decision"));

    assert_eq!(
        fs::read_to_string(&manifest).unwrap(),
        "version = \"0.0.1\"\n"
    );
}

#[test]
fn no_decision_succeeds_even_without_manifest() {
    // The manifest is never read when the orchestrator withholds a release.
    let tmp = TempDir::new().unwrap();

    cmd()
        .current_dir(tmp.path())
        .arg("verify")
        .assert()
        .success()
        .stdout(predicate::str::contains("No release decision"));
}

#[test]
fn context_from_stdin() {
    let tmp = TempDir::new().unwrap();
    let manifest = write_manifest(&tmp, "version = \"1.0.0\"\n");

    cmd()
        .current_dir(tmp.path())
        .args(["verify", "--context", "-"])
        .write_stdin(r#"{"next_release": {"version": "3.0.0"}}"#)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&manifest).unwrap(),
        "version = \"3.0.0\"\n"
    );
}

#[test]
fn only_first_version_field_rewritten() {
    let tmp = TempDir::new().unwrap();
    let manifest = write_manifest(
        &tmp,
        "version = \"0.1.0\"\n[dependencies]\nserde = { version = \"1.0\" }\n",
    );

    cmd()
        .current_dir(tmp.path())
        .args(["verify", "--version", "0.2.0"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&manifest).unwrap(),
        "version = \"0.2.0\"\n[dependencies]\nserde = { version = \"1.0\" }\n"
    );
}

#[test]
fn missing_version_field_warns_and_preserves_file() {
    let tmp = TempDir::new().unwrap();
    let manifest = write_manifest(&tmp, "description = \"x\"\n");

    cmd()
        .current_dir(tmp.path())
        .args(["verify", "--version", "1.0.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no version field"));

    assert_eq!(
        fs::read_to_string(&manifest).unwrap(),
        "description = \"x\"\n"
    );
}

#[test]
fn missing_version_field_fails_with_strict_flag() {
    let tmp = TempDir::new().unwrap();
    write_manifest(&tmp, "description = \"x\"\n");

    cmd()
        .current_dir(tmp.path())
        .args(["verify", "--version", "1.0.0", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no version field"));
}

#[test]
fn strict_mode_from_config_file() {
    let tmp = TempDir::new().unwrap();
    write_manifest(&tmp, "description = \"x\"\n");
    fs::write(
        tmp.path().join(".relver.toml"),
        "[release]\nstrict = true\n",
    )
    .unwrap();

    cmd()
        .current_dir(tmp.path())
        .args(["verify", "--version", "1.0.0"])
        .assert()
        .failure();
}

#[test]
fn manifest_path_from_config_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("pyproject.toml"), "version = \"0.9.0\"\n").unwrap();
    fs::write(
        tmp.path().join(".relver.toml"),
        "[release]\nmanifest = \"pyproject.toml\"\n",
    )
    .unwrap();

    cmd()
        .current_dir(tmp.path())
        .args(["verify", "--version", "1.0.0"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(tmp.path().join("pyproject.toml")).unwrap(),
        "version = \"1.0.0\"\n"
    );
}

#[test]
fn unreadable_manifest_fails_the_run() {
    let tmp = TempDir::new().unwrap();
    // No manifest written at all.

    cmd()
        .current_dir(tmp.path())
        .args(["verify", "--version", "1.0.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn invalid_context_json_fails() {
    let tmp = TempDir::new().unwrap();
    write_manifest(&tmp, "version = \"1.0.0\"\n");
    let context = tmp.path().join("context.json");
    fs::write(&context, "{not json").unwrap();

    cmd()
        .current_dir(tmp.path())
        .args(["verify", "--context", "context.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid verify context"));
}

#[test]
fn version_and_context_flags_conflict() {
    cmd()
        .args(["verify", "--version", "1.0.0", "--context", "ctx.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn json_output_reports_outcome() {
    let tmp = TempDir::new().unwrap();
    write_manifest(&tmp, "version = \"1.2.3\"\n");

    let output = cmd()
        .current_dir(tmp.path())
        .args(["--json", "verify", "--version", "2.0.0"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("verify --json should output valid JSON");

    assert_eq!(json["status"], "updated");
    assert_eq!(json["previous"], "1.2.3");
    assert_eq!(json["version"], "2.0.0");
}

#[test]
fn json_output_for_skipped_run() {
    let tmp = TempDir::new().unwrap();

    let output = cmd()
        .current_dir(tmp.path())
        .args(["--json", "verify"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["status"], "skipped");
}

#[test]
fn rerun_with_same_version_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let manifest = write_manifest(&tmp, "name = \"pkg\"\nversion = \"1.0.0\"\n");

    for _ in 0..2 {
        cmd()
            .current_dir(tmp.path())
            .args(["verify", "--version", "2.0.0"])
            .assert()
            .success();
    }

    assert_eq!(
        fs::read_to_string(&manifest).unwrap(),
        "name = \"pkg\"\nversion = \"2.0.0\"\n"
    );
}
