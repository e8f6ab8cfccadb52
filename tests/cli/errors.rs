//! Tests for error handling and CLI flags.

use crate::support::*;

#[test]
fn test_help_lists_commands() {
    let t = Test::new();

    let output = t.run(&["--help"]);
    assert_success(&output);
    for command in ["capture", "restore", "pack", "unpack", "clear", "config"] {
        assert_stdout_contains(&output, command);
    }
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.run(&["unknown-command"]);
    assert_failure(&output);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.run(&["--version"]);
    assert_success(&output);
    assert_stdout_contains(&output, "envi");
}

#[test]
fn test_verbose_emits_debug_logs() {
    let t = Test::package("my-app");
    t.write(".env", "A=1\n");

    let output = t.run(&["--verbose", "capture"]);
    assert_success(&output);
    assert_stderr_contains(&output, "DEBUG");
}

#[test]
fn test_log_filter_from_environment() {
    let t = Test::package("my-app");
    t.write(".env", "A=1\n");

    let output = t.cmd().arg("capture").env("ENVI_LOG", "envi=trace").output().unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "TRACE");
}

#[test]
fn test_logs_never_contain_values() {
    let t = Test::package("my-app");
    t.write(".env", "TOKEN=super-secret-value\n");

    let output = t.cmd().arg("pack").env("ENVI_LOG", "envi=trace").output().unwrap();
    assert_success(&output);
    assert!(!stderr(&output).contains("super-secret-value"));
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    let output = t.run(&["completions", "bash"]);
    assert_success(&output);
    assert_stdout_contains(&output, "envi");
    assert_stdout_contains(&output, "unpack");
}
