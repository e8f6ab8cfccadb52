//! Tests for `envi restore`.

use crate::support::*;
use std::fs;

#[test]
fn test_restore_recreates_deleted_files() {
    let t = Test::package("my-app");
    t.write(".env", "# db\nDATABASE_URL=postgres://localhost/mydb\n\nPORT=3000\n");
    t.write("apps/api/.env.test", "TEST=1\n");
    assert_success(&t.capture());

    fs::remove_file(t.path(".env")).unwrap();
    fs::remove_dir_all(t.path("apps")).unwrap();

    let output = t.restore();
    assert_success(&output);
    assert_stderr_contains(&output, "restored 2 files");
    assert_eq!(
        t.read(".env"),
        "# db\nDATABASE_URL=postgres://localhost/mydb\n\nPORT=3000\n"
    );
    assert_eq!(t.read("apps/api/.env.test"), "TEST=1\n");
}

#[test]
fn test_restore_unchanged_files() {
    let t = Test::package("my-app");
    t.write(".env", "A='quoted'\n");
    assert_success(&t.capture());

    let output = t.restore();
    assert_success(&output);
    assert_stderr_contains(&output, "1 file unchanged");
    assert_eq!(t.read(".env"), "A='quoted'\n");
}

#[test]
fn test_restore_skips_changed_files_without_force() {
    let t = Test::package("my-app");
    t.write(".env", "A=stored\n");
    assert_success(&t.capture());
    t.write(".env", "A=local\n");

    let output = t.restore();
    assert_success(&output);
    assert_stderr_contains(&output, "skipped 1 file");
    assert_eq!(t.read(".env"), "A=local\n");

    let output = t.restore_force();
    assert_success(&output);
    assert_eq!(t.read(".env"), "A=stored\n");
}

#[test]
fn test_restore_keeps_local_redacted_values() {
    let t = Test::package("my-app");
    t.write(".env", "GITHUB_PAT=ghp_original\nA=1\n");
    assert_success(&t.capture());

    t.write(".env", "GITHUB_PAT=ghp_rotated\nA=2\n");
    assert_success(&t.restore_force());

    assert_eq!(t.read(".env"), "GITHUB_PAT=ghp_rotated\nA=1\n");
}

#[test]
fn test_restore_new_file_leaves_placeholder() {
    let t = Test::package("my-app");
    t.write(".env", "GITHUB_PAT=ghp_original\n");
    assert_success(&t.capture());
    fs::remove_file(t.path(".env")).unwrap();

    let output = t.restore();
    assert_success(&output);
    assert_stderr_contains(&output, "left redacted");
    assert_eq!(t.read(".env"), "GITHUB_PAT=__envi_redacted__\n");
}

#[cfg(unix)]
#[test]
fn test_restored_files_are_private() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::package("my-app");
    t.write(".env", "A=1\n");
    assert_success(&t.capture());
    fs::remove_file(t.path(".env")).unwrap();
    assert_success(&t.restore());

    let mode = fs::metadata(t.path(".env")).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
}

#[test]
fn test_restore_without_capture_fails() {
    let t = Test::package("my-app");

    let output = t.restore();
    assert_failure(&output);
    assert_stderr_contains(&output, "no stored configuration");
    assert_stderr_contains(&output, "envi capture");
}

#[test]
fn test_restore_leaves_unreadable_file_untouched() {
    let t = Test::package("my-app");
    t.write(".env", "GITHUB_PAT=ghp_real_secret\n");
    assert_success(&t.capture());

    let original: &[u8] = b"GITHUB_PAT=ghp_real_secret\nNAME=caf\xE9\n";
    fs::write(t.path(".env"), original).unwrap();

    let output = t.restore_force();
    assert_failure(&output);
    assert_stderr_contains(&output, "cannot read");
    assert_eq!(fs::read(t.path(".env")).unwrap(), original);
}
