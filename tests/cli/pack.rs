//! Tests for `envi pack` and `envi unpack`.

use crate::support::*;
use std::fs;

/// A teammate's checkout of the same project on another machine.
fn teammate(name: &str) -> Test {
    let t = Test::package(name);
    t.write(".env", "STALE=1\n");
    t
}

#[test]
fn test_pack_with_manifest_and_unpack_elsewhere() {
    let alice = Test::package("my-app");
    alice.write(".env", "DATABASE_URL=postgres://db\nPORT=3000\n");
    alice.write("apps/web/.env.local", "DEBUG=true\n");

    let blob = packed_blob(&alice.pack(None));
    assert_stderr_contains(&alice.pack(None), "encrypted with package.json");

    let bob = teammate("my-app");
    let output = bob.unpack(&blob, None);
    assert_success(&output);
    assert_stderr_contains(&output, "decrypted with package.json");
    assert_stderr_contains(&output, "decrypted 2 files");

    assert_eq!(bob.read("apps/web/.env.local"), "DEBUG=true\n");
    assert!(bob.store_path("my-app").is_file());
}

#[test]
fn test_unpack_does_not_overwrite_changed_files_without_force() {
    let alice = Test::package("my-app");
    alice.write(".env", "A=from-alice\n");
    let blob = packed_blob(&alice.pack(None));

    let bob = teammate("my-app");
    let output = bob.unpack(&blob, None);
    assert_success(&output);
    assert_stderr_contains(&output, "skipped 1 file");
    assert_eq!(bob.read(".env"), "STALE=1\n");

    let output = bob
        .cmd()
        .args(["unpack", "--yes", "--force"])
        .write_stdin(blob)
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(bob.read(".env"), "A=from-alice\n");
}

#[test]
fn test_pack_with_secret_requires_same_secret() {
    let alice = Test::repo();
    alice.write(".env", "TOKEN=abc\n");
    let blob = packed_blob(&alice.pack(Some(SECRET)));

    let bob = Test::repo();
    let output = bob.unpack(&blob, Some("wrong secret!"));
    assert_failure(&output);
    assert_stderr_contains(&output, "wrong secret or corrupted blob");
    assert_stderr_contains(&output, "--secret");
    assert!(!bob.path(".env").exists());

    let output = bob.unpack(&blob, Some(SECRET));
    assert_success(&output);
    assert_eq!(bob.read(".env"), "TOKEN=abc\n");
}

#[test]
fn test_secret_from_environment() {
    let alice = Test::repo();
    alice.write(".env", "TOKEN=abc\n");
    let output = alice
        .cmd()
        .arg("pack")
        .env("ENVI_SECRET", SECRET)
        .output()
        .unwrap();
    let blob = packed_blob(&output);

    let bob = Test::repo();
    let output = bob
        .cmd()
        .args(["unpack", "--yes"])
        .env("ENVI_SECRET", SECRET)
        .write_stdin(blob)
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(bob.read(".env"), "TOKEN=abc\n");
}

#[test]
fn test_changed_manifest_cannot_decrypt() {
    let alice = Test::package("my-app");
    alice.write(".env", "A=1\n");
    let blob = packed_blob(&alice.pack(None));

    let bob = Test::repo();
    bob.write("package.json", "{ \"name\": \"my-app\", \"version\": \"2.0.0\" }\n");
    let output = bob.unpack(&blob, None);
    assert_failure(&output);
    assert_stderr_contains(&output, "could not decrypt with package.json");
    assert_stderr_contains(&output, "wrong secret or corrupted blob");
}

#[test]
fn test_pack_without_manifest_or_secret_fails() {
    let t = Test::repo();
    t.write(".env", "A=1\n");

    let output = t.pack(None);
    assert_failure(&output);
    assert_stderr_contains(&output, "no secret available");
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_pack_never_includes_redacted_values() {
    let alice = Test::package("my-app");
    alice.write(".env", "GITHUB_PAT=ghp_secret_value\nA=1\n");
    let blob = packed_blob(&alice.pack(None));

    let bob = Test::package("my-app");
    assert_success(&bob.unpack(&blob, None));
    assert_eq!(bob.read(".env"), "GITHUB_PAT=__envi_redacted__\nA=1\n");
    assert_file_excludes(&bob.store_path("my-app"), "ghp_secret_value");
}

#[test]
fn test_unpack_fills_redacted_from_local_file() {
    let alice = Test::package("my-app");
    alice.write(".env", "GITHUB_PAT=ghp_alice\nA=1\n");
    let blob = packed_blob(&alice.pack(None));

    let bob = Test::package("my-app");
    bob.write(".env", "GITHUB_PAT=ghp_bob\nA=0\n");
    let output = bob
        .cmd()
        .args(["unpack", "--yes", "--force"])
        .write_stdin(blob)
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(bob.read(".env"), "GITHUB_PAT=ghp_bob\nA=1\n");
}

#[test]
fn test_unpack_tolerates_mangled_blob() {
    let alice = Test::package("my-app");
    alice.write(".env", "A=1\n");
    let blob = packed_blob(&alice.pack(None));

    let mangled: String = blob
        .lines()
        .map(|line| format!("    > {}\r\n", line))
        .collect::<String>()
        .replace("> ", "");
    let bob = Test::package("my-app");
    let output = bob.unpack(&format!("Here you go:\n{}\nthanks", mangled), None);
    assert_success(&output);
    assert_eq!(bob.read(".env"), "A=1\n");
}

#[test]
fn test_unpack_from_argument_and_file() {
    let alice = Test::repo();
    alice.write(".env", "A=1\n");
    let out_file = alice.path("blob.txt");
    let output = alice
        .cmd()
        .args(["pack", "--secret", SECRET, "--output"])
        .arg(&out_file)
        .output()
        .unwrap();
    assert_success(&output);
    assert!(stdout(&output).is_empty());
    let blob = fs::read_to_string(&out_file).unwrap();

    let bob = Test::repo();
    let output = bob
        .cmd()
        .args(["unpack", "--yes", "--secret", SECRET, "--file"])
        .arg(&out_file)
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(bob.read(".env"), "A=1\n");

    let carol = Test::repo();
    let output = carol
        .cmd()
        .args(["unpack", "--yes", "--secret", SECRET])
        .arg(blob.trim())
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(carol.read(".env"), "A=1\n");
}

#[test]
fn test_unpack_invalid_blob() {
    let t = Test::package("my-app");

    let output = t.unpack("this is not a blob", None);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid blob");
}

#[test]
fn test_pack_without_env_files_fails() {
    let t = Test::package("my-app");

    let output = t.pack(None);
    assert_failure(&output);
    assert_stderr_contains(&output, "no .env files found");
}

#[test]
fn test_verbose_pack_names_cipher() {
    let t = Test::package("my-app");
    t.write(".env", "A=1\n");

    let output = t.run(&["--verbose", "pack"]);
    assert_success(&output);
    assert_stderr_contains(&output, "aes-256-gcm");
}

#[cfg(target_os = "linux")]
#[test]
fn test_pack_clipboard_falls_back_to_stdout() {
    let t = Test::package("my-app");
    t.write(".env", "A=1\n");

    let output = t.run(&["pack", "--clipboard"]);
    let blob = packed_blob(&output);
    assert_stderr_contains(&output, "clipboard unavailable");

    let bob = Test::package("my-app");
    assert_success(&bob.unpack(&blob, None));
    assert_eq!(bob.read(".env"), "A=1\n");
}

#[cfg(target_os = "linux")]
#[test]
fn test_unpack_clipboard_without_display_fails() {
    let t = Test::package("my-app");

    let output = t.run(&["unpack", "--yes", "--clipboard"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "clipboard unavailable");
    assert_stderr_contains(&output, "--file");
}
