//! Robot-mode end-to-end tests.

use serde_json::json;

use crate::common::cli::CliRunner;
use crate::common::fixtures::{SAMPLE_TRANSPARENT_COUNT, ThemeDir, arg};
use crate::common::init_test_logging;

#[test]
fn robot_quick_start_outputs_json() {
    init_test_logging();
    let cli = CliRunner::new();
    let result = cli.run(&["--robot"]);
    result
        .assert_success()
        .assert_json_field("/tool", &json!("hexflat"));
    assert!(result.json().get("commands").is_some());
    assert!(result.json().get("output_modes").is_some());
}

#[test]
fn robot_version_outputs_json() {
    init_test_logging();
    let cli = CliRunner::new();
    let result = cli.run(&["version", "--format=json"]);
    result.assert_success();
    assert_eq!(
        result.json()["version"].as_str(),
        Some(env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn robot_compact_is_single_line() {
    let cli = CliRunner::new();
    let result = cli.run(&["--format", "json-compact", "overlay", "FF000080"]);
    result.assert_success();
    assert_eq!(result.stdout.trim().lines().count(), 1);
    result.assert_json_field("/result", &json!("87080B"));
}

#[test]
fn robot_overlay_report() {
    let cli = CliRunner::new();
    cli.run_robot(&["overlay", "#FF000080"])
        .assert_success()
        .assert_json_field("/input", &json!("#FF000080"))
        .assert_json_field("/background", &json!("#0E1017"))
        .assert_json_field("/alpha", &json!(128))
        .assert_json_field("/result", &json!("#87080B"))
        .assert_json_field("/rgb", &json!("#87080B"));
}

#[test]
fn robot_overlay_with_background() {
    let cli = CliRunner::new();
    cli.run_robot(&["overlay", "00000000", "--background", "FFFFFF"])
        .assert_success()
        .assert_json_field("/result", &json!("FFFFFF"));
}

#[test]
fn robot_overlay_invalid_color_errors_on_stderr() {
    let cli = CliRunner::new();
    let result = cli.run_robot(&["overlay", "#XYZ"]);
    result.assert_failure().assert_stdout_is_empty();
    assert_eq!(result.exit_code, 1);

    let err = result.stderr_json();
    assert_eq!(err["error"], true);
    assert_eq!(err["recoverable"], true);
    assert!(err["message"].as_str().unwrap().contains("#XYZ"));
    assert!(err["suggestion"].is_string());
}

#[test]
fn robot_scan_lists_replacements() {
    let dir = ThemeDir::new();
    let input = dir.sample_theme();
    let cli = CliRunner::new();

    let result = cli.run_robot(&["scan", arg(&input)]);
    result
        .assert_success()
        .assert_json_field("/count", &json!(SAMPLE_TRANSPARENT_COUNT))
        .assert_json_array_len("/replacements", SAMPLE_TRANSPARENT_COUNT)
        .assert_json_field("/boundary", &json!("strict"));

    let first = &result.json()["replacements"][0];
    assert_eq!(first["pointer"], "/colors/editor.selectionBackground");
    assert_eq!(first["offset"], 0);
    assert_eq!(first["original"], "#409FFF4D");
    assert_eq!(first["replacement"], "#1D3B5D");
}

#[test]
fn robot_scan_from_stdin() {
    let cli = CliRunner::new().with_stdin(r##"{"panel": "1px solid #11151C80"}"##);
    cli.run_robot(&["scan", "-"])
        .assert_success()
        .assert_json_field("/input", &json!("-"))
        .assert_json_field("/replacements/0/pointer", &json!("/panel"))
        .assert_json_field("/replacements/0/offset", &json!(10));
}

#[test]
fn robot_transform_report() {
    let dir = ThemeDir::new();
    let input = dir.sample_theme();
    let output = dir.path().join("flat.json");
    let cli = CliRunner::new();

    cli.run_robot(&["transform", arg(&input), arg(&output)])
        .assert_success()
        .assert_json_field("/count", &json!(SAMPLE_TRANSPARENT_COUNT))
        .assert_json_field("/dry_run", &json!(false))
        .assert_json_field("/output", &json!(arg(&output)));
    assert!(output.exists());
}

#[test]
fn robot_check_clean_document() {
    let cli = CliRunner::new().with_stdin(r##"{"a": "#0E1017", "b": "#0E1017FF"}"##);
    cli.run_robot(&["check", "-"])
        .assert_success()
        .assert_json_field("/ok", &json!(true))
        .assert_json_field("/transparent_count", &json!(0));
}

#[test]
fn robot_check_fails_on_transparent_colors() {
    let dir = ThemeDir::new();
    let input = dir.sample_theme();
    let cli = CliRunner::new();

    let result = cli.run_robot(&["check", arg(&input)]);
    assert_eq!(result.exit_code, 1);
    result
        .assert_json_field("/ok", &json!(false))
        .assert_json_field("/transparent_count", &json!(SAMPLE_TRANSPARENT_COUNT));

    let err = result.stderr_json();
    assert!(
        err["message"]
            .as_str()
            .unwrap()
            .contains("transparent color")
    );
}

#[test]
fn robot_missing_input_error() {
    let cli = CliRunner::new();
    let result = cli.run_robot(&["scan", "missing.json"]);
    assert_eq!(result.exit_code, 1);
    let err = result.stderr_json();
    assert_eq!(err["recoverable"], true);
    assert!(err["message"].as_str().unwrap().contains("missing.json"));
}

#[test]
fn robot_config_defaults() {
    let cli = CliRunner::new();
    let result = cli.run_robot(&["config"]);
    result
        .assert_success()
        .assert_json_field("/settings/background", &json!("#0E1017"))
        .assert_json_field("/settings/indent", &json!(4))
        .assert_json_field("/settings/boundary", &json!("strict"));
    assert!(result.json().get("source").is_none());
}

#[test]
fn robot_init_then_config() {
    let cli = CliRunner::new();
    cli.run_robot(&["init"]).assert_success();

    let path = cli.config_home().join("hexflat").join("config.toml");
    assert!(path.exists());

    cli.run_robot(&["config"])
        .assert_success()
        .assert_json_field("/source", &json!(path.to_str().unwrap()));

    // A second init refuses to overwrite.
    let again = cli.run_robot(&["init"]);
    assert_eq!(again.exit_code, 1);
    assert!(
        again.stderr_json()["suggestion"]
            .as_str()
            .unwrap()
            .contains("--force")
    );
    cli.run_robot(&["init", "--force"]).assert_success();
}

#[test]
fn robot_explicit_config_via_env() {
    let dir = ThemeDir::new();
    let config = dir.write("custom.yaml", "background: FFFFFF\nboundary: greedy\n");
    let cli = CliRunner::new().with_env("HEXFLAT_CONFIG", arg(&config));

    cli.run_robot(&["config"])
        .assert_success()
        .assert_json_field("/settings/background", &json!("#FFFFFF"))
        .assert_json_field("/settings/boundary", &json!("greedy"));
}

#[test]
fn robot_missing_explicit_config() {
    let cli = CliRunner::new();
    let result = cli.run_robot(&["--config", "nope.toml", "config"]);
    assert_eq!(result.exit_code, 1);
    assert!(
        result.stderr_json()["message"]
            .as_str()
            .unwrap()
            .contains("nope.toml")
    );
}

#[test]
fn robot_background_alpha_warning_on_stderr() {
    let cli = CliRunner::new().with_stdin(r##"{"a": "#FF000080"}"##);
    let result = cli.run_robot(&["scan", "-", "--background", "#0E101700"]);
    result
        .assert_success()
        .assert_json_field("/background", &json!("#0E1017"))
        .assert_json_field("/replacements/0/replacement", &json!("#87080B"));

    let warning = result.stderr_json();
    assert_eq!(warning["warning"], true);
    assert!(
        warning["message"]
            .as_str()
            .unwrap()
            .contains("Ignoring alpha channel 00")
    );
}
