//! End-to-end tests for `hexflat transform`.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;

use crate::common::fixtures::{ThemeDir, arg};
use crate::common::init_test_logging;

/// The binary, isolated from any config file or environment of the host.
fn hexflat(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_hexflat"));
    cmd.current_dir(dir)
        .env_remove("HEXFLAT_CONFIG")
        .env_remove("HEXFLAT_FORMAT")
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn transform_writes_flattened_file() {
    init_test_logging();
    let dir = ThemeDir::new();
    let input = dir.sample_theme();
    let output = dir.path().join("flat.json");

    hexflat(dir.path())
        .args(["transform", arg(&input), arg(&output)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Flattened 5 color(s)"));

    let flat = dir.read_json("flat.json");
    assert_eq!(flat["colors"]["editor.selectionBackground"], "#1D3B5D");
    assert_eq!(flat["colors"]["editor.background"], "#0B0E14");
}

#[test]
fn transform_output_uses_four_space_indent_and_newline() {
    let dir = ThemeDir::new();
    let input = dir.write("in.json", r##"{"a":"#FF000080","b":[1,true,null]}"##);
    let output = dir.path().join("out.json");

    hexflat(dir.path())
        .args(["transform", arg(&input), arg(&output)])
        .assert()
        .success();

    let text = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        text,
        "{\n    \"a\": \"#87080B\",\n    \"b\": [\n        1,\n        true,\n        null\n    ]\n}\n"
    );
}

#[test]
fn transform_stdin_to_stdout() {
    let dir = ThemeDir::new();
    hexflat(dir.path())
        .args(["transform", "-", "-"])
        .write_stdin(r##"{"bg": "FF000080"}"##)
        .assert()
        .success()
        .stdout("{\n    \"bg\": \"87080B\"\n}\n");
}

#[test]
fn transform_indent_flag() {
    let dir = ThemeDir::new();
    hexflat(dir.path())
        .args(["transform", "--indent", "2", "-", "-"])
        .write_stdin(r#"{"a": {"b": 1}}"#)
        .assert()
        .success()
        .stdout("{\n  \"a\": {\n    \"b\": 1\n  }\n}\n");
}

#[test]
fn transform_custom_background() {
    let dir = ThemeDir::new();
    hexflat(dir.path())
        .args(["transform", "--background", "#FFFFFF", "-", "-"])
        .write_stdin(r##"["#00000000"]"##)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"#FFFFFF\""));
}

#[test]
fn transform_background_from_local_config() {
    let dir = ThemeDir::new();
    let _ = dir.write("hexflat.toml", "background = \"#FFFFFF\"\nindent = 0\n");
    hexflat(dir.path())
        .args(["transform", "-", "-"])
        .write_stdin(r##"["#00000000"]"##)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"#FFFFFF\""));
}

#[test]
fn transform_dry_run_leaves_no_output() {
    let dir = ThemeDir::new();
    let input = dir.sample_theme();
    let output = dir.path().join("never.json");

    hexflat(dir.path())
        .args(["transform", "--dry-run", arg(&input), arg(&output)])
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN"))
        .stdout(predicate::str::contains("#409FFF4D -> #1D3B5D"));

    assert!(!output.exists());
}

#[test]
fn transform_in_place() {
    let dir = ThemeDir::new();
    let input = dir.sample_theme();

    hexflat(dir.path())
        .args(["transform", "--in-place", arg(&input)])
        .assert()
        .success();

    let flat = dir.read_json("theme.json");
    assert_eq!(flat["tokenColors"][0]["settings"]["foreground"].as_str().unwrap().len(), 6);
}

#[test]
fn transform_in_place_rejects_stdin() {
    let dir = ThemeDir::new();
    hexflat(dir.path())
        .args(["transform", "--in-place", "-"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--in-place"));
}

#[test]
fn transform_missing_input_exits_1() {
    let dir = ThemeDir::new();
    let output = dir.path().join("out.json");
    hexflat(dir.path())
        .args(["transform", "does-not-exist.json", arg(&output)])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Input file not found"));
    assert!(!output.exists());
}

#[test]
fn transform_invalid_json_exits_1() {
    let dir = ThemeDir::new();
    let input = dir.write("bad.json", "{\"a\": ");
    let output = dir.path().join("out.json");
    hexflat(dir.path())
        .args(["transform", arg(&input), arg(&output)])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse"));
    assert!(!output.exists());
}

#[test]
fn transform_invalid_background_fails() {
    let dir = ThemeDir::new();
    hexflat(dir.path())
        .args(["transform", "--background", "#12", "-", "-"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn transform_greedy_boundary() {
    let dir = ThemeDir::new();
    let input = json!({"v": "123456789"}).to_string();

    hexflat(dir.path())
        .args(["transform", "-", "-"])
        .write_stdin(input.clone())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"123456789\""));

    hexflat(dir.path())
        .args(["transform", "--boundary", "greedy", "-", "-"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"123456789\"").not());
}

#[test]
fn flatten_alias() {
    let dir = ThemeDir::new();
    hexflat(dir.path())
        .args(["flatten", "-", "-"])
        .write_stdin(r##"{"a": "#FF000080"}"##)
        .assert()
        .success()
        .stdout(predicate::str::contains("#87080B"));
}
