use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

const DEFINITION: &str = r#"
command: fetch
summary: Download a resource
options:
  - short: o
    long: output
    value: required
    value_name: FILE
    description: Write to FILE
  - short: v
    long: verbose
    description: Print progress
  - short: l
    long: level
    value: optional
    value_name: N
    description: Compression level
use_cases:
  - args:
      - { name: OPTIONS, optional: true, multiple: true }
      - { name: URL }
    summary: Fetch URL
"#;

fn write_definition(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("failed to write definition");
    path
}

fn optparse(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_optparse"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run optparse")
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn parse_prints_positionals_and_options_as_json() {
    let dir = TempDir::new().unwrap();
    let definition = write_definition(&dir, "fetch.yaml", DEFINITION);

    let output = optparse(&[
        "parse",
        "--definition",
        definition.to_str().unwrap(),
        "--",
        "-vo",
        "out.txt",
        "http://example.com",
        "--level",
    ]);
    assert!(output.status.success(), "parse should succeed");

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["positionals"], serde_json::json!(["http://example.com"]));
    assert_eq!(
        report["options"],
        serde_json::json!([
            { "name": "-o,--output", "value": "out.txt" },
            { "name": "-v,--verbose", "value": null },
            { "name": "-l,--level", "value": null },
        ])
    );
}

#[test]
fn parse_supports_yaml_output() {
    let dir = TempDir::new().unwrap();
    let definition = write_definition(&dir, "fetch.yml", DEFINITION);

    let output = optparse(&[
        "parse",
        "--definition",
        definition.to_str().unwrap(),
        "--format",
        "yaml",
        "--",
        "--output=a.txt",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("positionals: []"), "got: {stdout}");
    assert!(stdout.contains("value: a.txt"), "got: {stdout}");
}

#[test]
fn parse_failure_exits_with_code_two() {
    let dir = TempDir::new().unwrap();
    let definition = write_definition(&dir, "fetch.yaml", DEFINITION);

    for args in [vec!["--output"], vec!["-x"], vec!["-v", "-v"], vec!["--verbose=1"]] {
        let mut argv = vec!["parse", "--definition", definition.to_str().unwrap(), "--"];
        argv.extend(args.iter().copied());
        let output = optparse(&argv);
        assert_eq!(output.status.code(), Some(2), "args: {args:?}");
        let stderr = String::from_utf8(output.stderr).unwrap();
        assert!(
            stderr.contains("error: could not parse command line"),
            "got: {stderr}"
        );
    }
}

#[test]
fn parse_tolerates_unknown_options_when_configured() {
    let dir = TempDir::new().unwrap();
    let yaml = "command: x\nconfig:\n  tolerate_unknown_options: true\noptions:\n  - short: h\n";
    let definition = write_definition(&dir, "tolerant.yaml", yaml);

    let output = optparse(&[
        "parse",
        "--definition",
        definition.to_str().unwrap(),
        "--",
        "hoge",
        "-T",
        "fuga",
    ]);
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["positionals"], serde_json::json!(["hoge", "fuga"]));
    assert_eq!(report["options"], serde_json::json!([]));
}

// ---------------------------------------------------------------------------
// usage / check
// ---------------------------------------------------------------------------

#[test]
fn usage_renders_definition() {
    let dir = TempDir::new().unwrap();
    let definition = write_definition(&dir, "fetch.yaml", DEFINITION);

    let output = optparse(&["usage", "--definition", definition.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Download a resource\n\
         \n\
         Usage: fetch [OPTIONS]... URL  Fetch URL\n\
         \n\
         Arguments:\n  \
         -o, --output FILE  Write to FILE\n  \
         -v, --verbose      Print progress\n  \
         -l, --level [N]    Compression level\n"
    );
}

#[test]
fn check_reports_option_count() {
    let dir = TempDir::new().unwrap();
    let definition = write_definition(&dir, "fetch.json", &json_definition());

    let output = optparse(&["check", "--definition", definition.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(
        stdout.contains("Definition 'fetch' is valid: 2 option(s) registered."),
        "got: {stdout}"
    );
}

#[test]
fn check_rejects_duplicate_options() {
    let dir = TempDir::new().unwrap();
    let yaml = "command: x\noptions:\n  - short: a\n  - short: b\n    long: bee\n  - long: bee\n";
    let definition = write_definition(&dir, "dup.yaml", yaml);

    let output = optparse(&["check", "--definition", definition.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("option already registered"), "got: {stderr}");
}

#[test]
fn check_rejects_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let definition = write_definition(&dir, "def.toml", "command = 'x'");

    let output = optparse(&["check", "--definition", definition.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn verbose_logs_parse_abort_to_stderr() {
    let dir = TempDir::new().unwrap();
    let definition = write_definition(&dir, "fetch.yaml", DEFINITION);

    let output = optparse(&[
        "--verbose",
        "parse",
        "--definition",
        definition.to_str().unwrap(),
        "--",
        "--nope",
    ]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Parse aborted"), "got: {stderr}");
    assert!(output.stdout.is_empty());
}

fn json_definition() -> String {
    serde_json::json!({
        "command": "fetch",
        "options": [
            { "short": "o", "long": "output", "value": "required" },
            { "long": "quiet" }
        ]
    })
    .to_string()
}
