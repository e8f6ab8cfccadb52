//! Tests for `envi capture`.

use crate::support::*;
use std::fs;

#[test]
fn test_capture_writes_store_document() {
    let t = Test::package("my-app");
    t.write(".env", SAMPLE_ENV);
    t.write("apps/web/.env.local", SAMPLE_ENV_LOCAL);

    let output = t.capture();
    assert_success(&output);
    assert_stderr_contains(&output, "captured 2 files");

    let stored = fs::read_to_string(t.store_path("my-app")).unwrap();
    assert!(stored.contains("__envi_version = 1"));
    assert!(stored.contains("path = \".env\""));
    assert!(stored.contains("path = \"apps/web/.env.local\""));
    assert!(stored.contains("postgres://localhost/mydb"));
}

#[test]
fn test_capture_redacts_default_variables() {
    let t = Test::package("my-app");
    t.write(".env", SAMPLE_ENV);

    let output = t.capture();
    assert_success(&output);
    assert_stderr_contains(&output, "redacted GITHUB_PAT");

    let path = t.store_path("my-app");
    assert_file_excludes(&path, "ghp_local_token");
    assert!(fs::read_to_string(path).unwrap().contains("__envi_redacted__"));
}

#[test]
fn test_capture_twice_reports_no_changes() {
    let t = Test::package("my-app");
    t.write(".env", SAMPLE_ENV);

    assert_success(&t.capture());
    let before = fs::read_to_string(t.store_path("my-app")).unwrap();

    let output = t.capture();
    assert_success(&output);
    assert_stderr_contains(&output, "no changes");
    assert_eq!(fs::read_to_string(t.store_path("my-app")).unwrap(), before);
}

#[test]
fn test_capture_detects_changes() {
    let t = Test::package("my-app");
    t.write(".env", "A=1\n");
    assert_success(&t.capture());

    t.write(".env", "A=2\n");
    let output = t.capture();
    assert_success(&output);
    assert_stderr_contains(&output, "captured 1 file");
}

#[test]
fn test_capture_scoped_package_uses_subdirectory() {
    let t = Test::package("@acme/web");
    t.write(".env", "A=1\n");

    assert_success(&t.capture());
    assert!(t.store_path("@acme/web").is_file());
    assert!(t.home.path().join(".envi/store/@acme/web.toml").is_file());
}

#[test]
fn test_capture_without_manifest_uses_folder_name() {
    let t = Test::repo();
    t.write(".env", "A=1\n");

    let output = t.capture();
    assert_success(&output);
    assert_stderr_contains(&output, "using the folder name");
    assert!(t.store_path(&t.folder_name()).is_file());
}

#[test]
fn test_capture_uses_cargo_manifest_name() {
    let t = Test::repo();
    t.write("Cargo.toml", "[package]\nname = \"rusty\"\nversion = \"0.1.0\"\n");
    t.write(".env", "A=1\n");

    assert_success(&t.capture());
    assert!(t.store_path("rusty").is_file());
}

#[test]
fn test_capture_skips_node_modules() {
    let t = Test::package("my-app");
    t.write(".env", "A=1\n");
    t.write("node_modules/dep/.env", "DEP=1\n");

    assert_success(&t.capture());
    assert_file_excludes(&t.store_path("my-app"), "node_modules");
}

#[test]
fn test_capture_without_env_files_warns() {
    let t = Test::package("my-app");

    let output = t.capture();
    assert_success(&output);
    assert_stderr_contains(&output, "no .env files found");
    assert!(!t.store_path("my-app").exists());
}

#[test]
fn test_capture_from_subdirectory_finds_root() {
    let t = Test::package("my-app");
    t.write(".env", "A=1\n");
    fs::create_dir_all(t.path("src/deep")).unwrap();

    let output = t
        .cmd()
        .current_dir(t.path("src/deep"))
        .arg("capture")
        .output()
        .unwrap();
    assert_success(&output);
    assert!(t.store_path("my-app").is_file());
}

#[test]
fn test_capture_outside_repository_is_cancelled() {
    let t = Test::new();
    t.write("package.json", &package_json("loose"));
    t.write(".env", "A=1\n");

    let output = t.capture();
    assert_failure(&output);
    assert_stderr_contains(&output, "cancelled");
    assert!(!t.store_path("loose").exists());

    let output = t.run(&["capture", "--yes"]);
    assert_success(&output);
    assert!(t.store_path("loose").is_file());
}

#[test]
fn test_capture_names_unreadable_env_file() {
    let t = Test::package("my-app");
    t.write(".env", "A=1\n");
    fs::write(t.path(".env.local"), b"NAME=caf\xE9\n").unwrap();

    let output = t.capture();
    assert_failure(&output);
    assert_stderr_contains(&output, "cannot read");
    assert_stderr_contains(&output, ".env.local");
    assert!(!t.store_path("my-app").exists());
}
