//! Human-mode end-to-end tests.

use crate::common::assertions::{assert_no_ansi, assert_not_json};
use crate::common::cli::CliRunner;
use crate::common::fixtures::{ThemeDir, arg};
use crate::common::init_test_logging;

#[test]
fn human_quick_start() {
    init_test_logging();
    let cli = CliRunner::new();
    cli.run(&[])
        .assert_success()
        .assert_stdout_contains("QUICK START")
        .assert_stdout_contains("hexflat transform");
}

#[test]
fn human_version_is_not_json() {
    init_test_logging();
    let cli = CliRunner::new();
    let result = cli.run(&["version"]);
    result.assert_success().assert_stdout_contains("hexflat");
    assert_not_json(&result.stdout);
    result.assert_stdout_contains("rustc:");
}

#[test]
fn human_overlay_line() {
    let cli = CliRunner::new().with_env("NO_COLOR", "1");
    let result = cli.run(&["overlay", "#FF000080"]);
    result
        .assert_success()
        .assert_stdout_matches(r"Overlay: #FF000080 over #0E1017 -> .*#87080B");
    assert_no_ansi(&result.stdout);
}

#[test]
fn human_overlay_quiet_prints_only_result() {
    let cli = CliRunner::new();
    let result = cli.run(&["-q", "overlay", "FF000080"]);
    result.assert_success();
    assert_eq!(result.stdout, "87080B\n");
}

#[test]
fn human_scan_lists_pointers() {
    let dir = ThemeDir::new();
    let input = dir.sample_theme();
    let cli = CliRunner::new().with_env("NO_COLOR", "1");

    let result = cli.run(&["scan", arg(&input)]);
    result
        .assert_success()
        .assert_stdout_contains("5 transparent color(s)")
        .assert_stdout_contains("/colors/panel.border")
        .assert_stdout_contains("#11151C80 ->");
    assert_no_ansi(&result.stdout);
}

#[test]
fn human_check_failure() {
    let cli = CliRunner::new().with_stdin(r##"{"list": ["#00000080"]}"##);
    let result = cli.run(&["check", "-"]);
    assert_eq!(result.exit_code, 1);
    result
        .assert_stdout_contains("[FAIL]")
        .assert_stdout_contains("/list/0")
        .assert_stderr_contains("Error:")
        .assert_stderr_contains("Hint:");
}

#[test]
fn human_check_ok() {
    let cli = CliRunner::new().with_stdin(r##"{"a": "#0E1017"}"##);
    cli.run(&["check", "-"])
        .assert_success()
        .assert_stdout_contains("[OK]");
}

#[test]
fn human_error_has_hint() {
    let cli = CliRunner::new();
    let result = cli.run(&["overlay", "12345"]);
    assert_eq!(result.exit_code, 1);
    result
        .assert_stderr_contains("Invalid hex color '12345'")
        .assert_stderr_contains("Hint:");
    assert_no_ansi(&result.stderr);
}

#[test]
fn human_config_path_without_file() {
    let cli = CliRunner::new();
    cli.run(&["config", "--path"])
        .assert_success()
        .assert_stdout_contains("no config file");
}

#[test]
fn completions_are_generated() {
    let cli = CliRunner::new();
    cli.run(&["completions", "bash"])
        .assert_success()
        .assert_stdout_contains("hexflat");
}

#[test]
fn human_background_alpha_is_reported() {
    let cli = CliRunner::new().with_env("NO_COLOR", "1");
    let result = cli.run(&["overlay", "FF000080", "--background", "0E101780"]);
    result
        .assert_success()
        .assert_stdout_contains("87080B")
        .assert_stderr_contains("Warning:")
        .assert_stderr_contains("Ignoring alpha channel 80 of --background");
}

#[test]
fn human_opaque_background_has_no_warning() {
    let cli = CliRunner::new();
    let result = cli.run(&["overlay", "FF000080", "--background", "0E1017FF"]);
    result.assert_success();
    assert!(result.stderr.is_empty(), "unexpected stderr: {}", result.stderr);
}
