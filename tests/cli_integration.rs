//! Integration tests for the tokencheck binary.
//!
//! These tests run the real CLI against token files in temporary
//! directories.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const VALID: &str = r##"{
  "color": {
    "$type": "color",
    "text": { "$type": "color", "$value": "#1a1a1a" },
    "red": { "$type": "color", "$value": { "colorSpace": "srgb", "components": [1, 0, 0] } }
  }
}"##;

const CYCLIC: &str = r#"{
  "color": {
    "primary": { "$type": "color", "$value": "{color.secondary}" },
    "secondary": { "$type": "color", "$value": "{color.primary}" }
  }
}"#;

const THEMED: &str = r##"{
  "foreground": {
    "primary": { "$type": "color", "$value": "#000000" },
    "muted": { "$type": "color", "$value": "#888888" }
  },
  "background": {
    "primary": { "$type": "color", "$value": "#ffffff" }
  }
}"##;

/// Get a command for running tokencheck in an isolated directory.
fn tokencheck(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tokencheck").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("TOKENCHECK_CONFIG")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .env("HOME", dir.path());
    cmd
}

#[test]
fn version_flag_works() {
    let dir = TempDir::new().unwrap();
    tokencheck(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tokencheck"));
}

#[test]
fn valid_file_exits_zero() {
    let dir = TempDir::new().unwrap();
    dir.child("tokens.json").write_str(VALID).unwrap();

    tokencheck(&dir)
        .args(["check", "tokens.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tokens.json: valid"))
        .stdout(predicate::str::contains("Errors: 0"));
}

#[test]
fn cycle_exits_one() {
    let dir = TempDir::new().unwrap();
    dir.child("tokens.json").write_str(CYCLIC).unwrap();

    tokencheck(&dir)
        .args(["check", "tokens.json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[circular-reference]"))
        .stdout(predicate::str::contains(
            "color.primary -> color.secondary -> color.primary",
        ));
}

#[test]
fn any_invalid_file_fails_the_run() {
    let dir = TempDir::new().unwrap();
    dir.child("good.json").write_str(VALID).unwrap();
    dir.child("bad.json").write_str(CYCLIC).unwrap();

    tokencheck(&dir)
        .args(["check", "good.json", "bad.json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("good.json: valid"))
        .stdout(predicate::str::contains("bad.json: invalid"));
}

#[test]
fn malformed_json_is_reported_not_crashed() {
    let dir = TempDir::new().unwrap();
    dir.child("broken.json").write_str("{ \"a\": ").unwrap();

    tokencheck(&dir)
        .args(["check", "broken.json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[parse]"));
}

#[test]
fn missing_file_exits_two() {
    let dir = TempDir::new().unwrap();
    tokencheck(&dir)
        .args(["check", "nope.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nope.json"));
}

#[test]
fn json_output_is_machine_readable() {
    let dir = TempDir::new().unwrap();
    dir.child("tokens.json").write_str(CYCLIC).unwrap();

    let output = tokencheck(&dir)
        .args(["check", "tokens.json", "--json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entry = &parsed[0];
    assert_eq!(entry["file"], "tokens.json");
    assert_eq!(entry["isValid"], false);
    assert_eq!(entry["errors"][0]["kind"], "circular-reference");
    assert!(entry["errors"][0]["id"]
        .as_str()
        .unwrap()
        .starts_with("circular-reference:"));
}

#[test]
fn profile_flag_accepts_extended_types() {
    let dir = TempDir::new().unwrap();
    dir.child("tokens.json")
        .write_str(r#"{ "o": { "$type": "opacity", "$value": 0.5 } }"#)
        .unwrap();

    tokencheck(&dir)
        .args(["check", "tokens.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[non-standard-type]"));

    tokencheck(&dir)
        .args(["check", "tokens.json", "--profile", "permissive"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Warnings: 0"));
}

#[test]
fn contrast_flag_checks_derived_pairs() {
    let dir = TempDir::new().unwrap();
    dir.child("theme.json").write_str(THEMED).unwrap();

    tokencheck(&dir)
        .args(["check", "theme.json", "--contrast"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Contrast: 1 of 2 pairs passed, 1 failed"))
        .stdout(predicate::str::contains("increase contrast by ~"));

    tokencheck(&dir)
        .args(["check", "theme.json", "--level", "AA_LARGE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contrast: 2 of 2 pairs passed"));
}

#[test]
fn config_file_enables_contrast() {
    let dir = TempDir::new().unwrap();
    dir.child("theme.json").write_str(THEMED).unwrap();
    dir.child("tokencheck.toml")
        .write_str(
            r#"
[contrast]
level = "AAA_NORMAL"
"#,
        )
        .unwrap();

    tokencheck(&dir)
        .args(["check", "theme.json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("needs 7:1 (AAA_NORMAL)"));
}

#[test]
fn invalid_config_exits_two() {
    let dir = TempDir::new().unwrap();
    dir.child("tokens.json").write_str(VALID).unwrap();
    dir.child("tokencheck.toml")
        .write_str(r#"profile = "lenient""#)
        .unwrap();

    tokencheck(&dir)
        .args(["check", "tokens.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("lenient"));
}

#[test]
fn custom_schema_flag() {
    let dir = TempDir::new().unwrap();
    dir.child("tokens.json").write_str(VALID).unwrap();
    dir.child("tiny.schema.json")
        .write_str(r#"{ "type": "object", "maxProperties": 0 }"#)
        .unwrap();

    tokencheck(&dir)
        .args(["check", "tokens.json", "--schema", "tiny.schema.json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[schema]"));
}

#[test]
fn contrast_command() {
    let dir = TempDir::new().unwrap();
    tokencheck(&dir)
        .args(["contrast", "#767676", "#ffffff"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PASS"))
        .stdout(predicate::str::contains("4.54:1"));

    tokencheck(&dir)
        .args(["contrast", "#777777", "#ffffff", "--level", "AAA_NORMAL"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FAIL"));

    tokencheck(&dir)
        .args(["contrast", "red", "#ffffff"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a hex color"));
}

#[test]
fn config_command_shows_resolution() {
    let dir = TempDir::new().unwrap();
    tokencheck(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("source: (defaults)"))
        .stdout(predicate::str::contains("profile: strict"))
        .stdout(predicate::str::contains("contrast: off"));

    dir.child("custom.toml")
        .write_str(
            r##"
profile = "permissive"

[[contrast.pairs]]
foreground = "color.text"
background = "#ffffff"
"##,
        )
        .unwrap();
    tokencheck(&dir)
        .args(["--config", "custom.toml", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("profile: permissive"))
        .stdout(predicate::str::contains("color.text on #ffffff (AA_NORMAL)"));
}

#[test]
fn completion_generates_script() {
    let dir = TempDir::new().unwrap();
    tokencheck(&dir)
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tokencheck"));
}
