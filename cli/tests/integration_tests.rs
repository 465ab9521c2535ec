use std::fs;
use std::path::PathBuf;
use std::process::Output;

use tempfile::TempDir;

/// The file-opener declaration used by most tests.
fn write_declaration(dir: &TempDir) -> PathBuf {
    let yaml = r#"program: test
description: Open files for reading or writing.
terminator: true
positional:
  min: 1
  max: 100
  args:
    - name: FILES
      description: List of files to open
parameters:
  - long: read
    short: r
    description: Read
  - long: write
    short: w
    description: Write
  - long: save
    short: s
    variadic: true
    arg_name: FILE
    description: Save, or save to another file(s)
  - long: verbose
    short: v
    description: Use this flag to set verbose level
  - short: E
    min: 1
    arg_name: ENCODING
    description: Set encoding
  - short: D
    kind: leading
    arg_name: KEY=VALUE
    description: Define a property
"#;
    let path = dir.path().join("test.yml");
    fs::write(&path, yaml).expect("failed to write declaration");
    path
}

fn flagtrie(args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_flagtrie"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run flagtrie")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn parse_prints_matched_parameters_and_positionals() {
    let dir = tempfile::tempdir().unwrap();
    let decl = write_declaration(&dir);

    let output = flagtrie(&[
        "parse",
        "--decl",
        decl.to_str().unwrap(),
        "--",
        "-rvv",
        "--wri",
        "-E",
        "utf8",
        "-Dmode=fast",
        "notes.txt",
    ]);

    assert!(output.status.success(), "parse should succeed");
    let report = stdout_json(&output);
    assert_eq!(report["program"], "test");
    assert_eq!(report["positionals"], serde_json::json!(["notes.txt"]));

    let parameters = report["parameters"].as_array().unwrap();
    let find = |name: &str| {
        parameters
            .iter()
            .find(|entry| entry["long"] == name || entry["short"] == name)
            .unwrap_or_else(|| panic!("{name} missing from report"))
    };
    assert_eq!(find("verbose")["count"], 2);
    assert_eq!(find("write")["count"], 1);
    assert_eq!(find("E")["values"], serde_json::json!(["utf8"]));
    assert_eq!(find("D")["values"], serde_json::json!(["mode=fast"]));
    assert_eq!(parameters.len(), 5, "only matched parameters are listed");
}

#[test]
fn parse_terminator_passes_dashed_tokens_through() {
    let dir = tempfile::tempdir().unwrap();
    let decl = write_declaration(&dir);

    let output = flagtrie(&[
        "parse",
        "--decl",
        decl.to_str().unwrap(),
        "--",
        "-r",
        "--",
        "-weird-name.txt",
    ]);

    assert!(output.status.success());
    let report = stdout_json(&output);
    assert_eq!(report["positionals"], serde_json::json!(["-weird-name.txt"]));
}

#[test]
fn parse_yaml_output() {
    let dir = tempfile::tempdir().unwrap();
    let decl = write_declaration(&dir);

    let output = flagtrie(&[
        "parse",
        "--decl",
        decl.to_str().unwrap(),
        "--format",
        "yaml",
        "--program",
        "opener",
        "--",
        "--save",
        "a",
        "b",
        "-r",
        "c",
    ]);

    assert!(output.status.success());
    let report: serde_yaml::Value = serde_yaml::from_slice(&output.stdout).unwrap();
    assert_eq!(report["program"].as_str(), Some("opener"));
    let read = &report["parameters"][0];
    assert_eq!(read["long"].as_str(), Some("read"));
    let save = &report["parameters"][1];
    assert_eq!(save["values"][1].as_str(), Some("b"));
}

#[test]
fn parse_ambiguous_prefix_fails_with_usage() {
    let dir = tempfile::tempdir().unwrap();
    let decl = dir.path().join("ambiguous.json");
    let json = serde_json::json!({
        "program": "tool",
        "parameters": [
            { "long": "list" },
            { "long": "license" }
        ]
    });
    fs::write(&decl, serde_json::to_string_pretty(&json).unwrap())
        .expect("failed to write declaration");

    let output = flagtrie(&["parse", "--decl", decl.to_str().unwrap(), "--", "--li"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error: --li is ambiguous (could be --license, --list)"),
        "unexpected stderr: {stderr}"
    );
    assert!(stderr.contains("usage: tool [OPTIONS...]"));
}

#[test]
fn parse_missing_positional_fails() {
    let dir = tempfile::tempdir().unwrap();
    let decl = write_declaration(&dir);

    let output = flagtrie(&["parse", "--decl", decl.to_str().unwrap(), "--", "-r"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn parse_unreadable_declaration_fails() {
    let dir = tempfile::tempdir().unwrap();

    let output = flagtrie(&[
        "parse",
        "--decl",
        dir.path().join("missing.yml").to_str().unwrap(),
        "--",
        "-r",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load"));
}

// ---------------------------------------------------------------------------
// help / check
// ---------------------------------------------------------------------------

#[test]
fn help_prints_usage_and_options() {
    let dir = tempfile::tempdir().unwrap();
    let decl = write_declaration(&dir);

    let output = flagtrie(&["help", "--decl", decl.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("usage: test [OPTIONS...] FILES...\n"));
    assert!(stdout.contains("Open files for reading or writing."));
    assert!(stdout.contains("  -s, --save [FILE]      Save, or save to another file(s)"));
    assert!(stdout.contains("  -DKEY=VALUE            Define a property"));
}

#[test]
fn help_respects_custom_indent() {
    let dir = tempfile::tempdir().unwrap();
    let decl = write_declaration(&dir);

    let output = flagtrie(&["help", "--decl", decl.to_str().unwrap(), "--indent", "16"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("  -r, --read    Read\n"));
}

#[test]
fn check_reports_parameter_count() {
    let dir = tempfile::tempdir().unwrap();
    let decl = write_declaration(&dir);

    let output = flagtrie(&["check", "--decl", decl.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("6 parameter(s), 1..100 positional argument(s)"));
}

#[test]
fn check_rejects_duplicate_spelling() {
    let dir = tempfile::tempdir().unwrap();
    let decl = dir.path().join("dup.yml");
    fs::write(
        &decl,
        "parameters:\n  - long: help\n    short: h\n  - long: hold\n    short: h\n",
    )
    .expect("failed to write declaration");

    let output = flagtrie(&["check", "--decl", decl.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("parameter -h already registered"), "unexpected stderr: {stderr}");
}

#[test]
fn verbose_logs_scan_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let decl = write_declaration(&dir);

    let output = flagtrie(&[
        "--verbose",
        "parse",
        "--decl",
        decl.to_str().unwrap(),
        "--",
        "--rea",
        "a.txt",
    ]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Expanded abbreviated flag"), "unexpected stderr: {stderr}");
    stdout_json(&output);
}
