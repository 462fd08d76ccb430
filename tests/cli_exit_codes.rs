use std::process::{Command, Output};

use tempfile::TempDir;
use webprint_lib::WebprintOutput;

fn run_webprint(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_webprint"))
        .args(args)
        .output()
        .expect("run webprint")
}

fn parse_json(stdout: &[u8]) -> serde_json::Value {
    serde_json::from_slice(stdout).expect("output should be valid JSON")
}

fn write_page(dir: &TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, "<html><body>page</body></html>").expect("write page");
    path
}

#[test]
fn invalid_url_exits_nonzero_with_error_payload() {
    let output = run_webprint(&["--source", "https://exa mple.com/cv", "--format", "json"]);

    assert_eq!(output.status.code(), Some(1));
    match serde_json::from_slice(&output.stdout).expect("error payload should be valid JSON") {
        WebprintOutput::Error(err) => {
            assert!(
                err.error.message.contains("Invalid URL"),
                "expected invalid URL message, got: {}",
                err.error.message
            );
        }
        other => panic!("expected error payload, got {:?}", other),
    }
}

#[test]
fn missing_local_file_exits_nonzero() {
    let output = run_webprint(&["--source", "definitely-missing.html", "--format", "json"]);

    assert_eq!(output.status.code(), Some(1));
    let err = parse_json(&output.stdout);
    assert_eq!(err.get("mode").and_then(|v| v.as_str()), Some("error"));
    assert_eq!(err["error"]["category"], "config");
    let message = err["error"]["message"]
        .as_str()
        .unwrap_or_default()
        .to_ascii_lowercase();
    assert!(
        message.contains("not found"),
        "message should describe the missing file, got: {message}"
    );
}

#[test]
fn unsupported_extension_is_a_config_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("page.txt");
    std::fs::write(&path, "plain text").expect("write file");

    let output = run_webprint(&["--source", path.to_str().unwrap(), "--format", "json"]);

    assert_eq!(output.status.code(), Some(1));
    let err = parse_json(&output.stdout);
    assert_eq!(err["error"]["category"], "config");
    let message = err["error"]["message"]
        .as_str()
        .unwrap_or_default()
        .to_ascii_lowercase();
    assert!(
        message.contains("extension"),
        "message should mention the unsupported extension, got: {message}"
    );
}

#[test]
fn unreadable_config_file_is_fatal() {
    let dir = TempDir::new().expect("tempdir");
    let cfg_path = dir.path().join("webprint.toml");
    std::fs::write(&cfg_path, "cleanup_selector = [not valid").expect("write config");

    let output = run_webprint(&[
        "--config",
        cfg_path.to_str().unwrap(),
        "--source",
        "page.html",
        "--format",
        "json",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let err = parse_json(&output.stdout);
    assert_eq!(err.get("mode").and_then(|v| v.as_str()), Some("error"));
    let message = err["error"]["message"]
        .as_str()
        .unwrap_or_default()
        .to_ascii_lowercase();
    assert!(
        message.contains("failed to read config"),
        "message should point at the config file, got: {message}"
    );
}

#[test]
fn invalid_config_values_are_fatal() {
    let dir = TempDir::new().expect("tempdir");
    let cfg_path = dir.path().join("webprint.toml");
    std::fs::write(&cfg_path, "cleanup_selector = \"\"\n").expect("write config");

    let output = run_webprint(&[
        "--config",
        cfg_path.to_str().unwrap(),
        "--format",
        "json",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let err = parse_json(&output.stdout);
    assert_eq!(err["error"]["category"], "config");
    let message = err["error"]["message"]
        .as_str()
        .unwrap_or_default()
        .to_ascii_lowercase();
    assert!(
        message.contains("invalid config"),
        "message should flag the config as invalid, got: {message}"
    );
    let remediation = err["error"]["remediation"]
        .as_str()
        .unwrap_or_default()
        .to_ascii_lowercase();
    assert!(
        remediation.contains("--cleanup-selector"),
        "expected selector remediation, got: {remediation}"
    );
}

#[test]
fn nonexistent_chrome_binary_reports_launch_error() {
    let dir = TempDir::new().expect("tempdir");
    let page = write_page(&dir, "page.html");
    let out_path = dir.path().join("page.pdf");

    let output = run_webprint(&[
        "--source",
        page.to_str().unwrap(),
        "--output",
        out_path.to_str().unwrap(),
        "--chrome",
        "/definitely/not/chrome",
        "--format",
        "json",
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!out_path.exists(), "no PDF may be written on launch failure");
    let err = parse_json(&output.stdout);
    assert_eq!(err.get("mode").and_then(|v| v.as_str()), Some("error"));
    assert_eq!(err["error"]["category"], "launch");
    assert!(
        err["error"]["remediation"]
            .as_str()
            .is_some_and(|r| !r.is_empty()),
        "launch errors should carry a remediation hint"
    );
}

#[test]
fn pretty_errors_stay_json_when_piped() {
    let output = run_webprint(&["--source", "definitely-missing.html", "--format", "pretty"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        output.stderr.is_empty(),
        "pretty errors should write JSON to stdout when piped"
    );
    let err = parse_json(&output.stdout);
    assert_eq!(err.get("mode").and_then(|v| v.as_str()), Some("error"));
}

#[test]
fn report_flag_writes_error_payload_to_file() {
    let dir = TempDir::new().expect("tempdir");
    let report_path = dir.path().join("report.json");

    let output = run_webprint(&[
        "--source",
        "definitely-missing.html",
        "--format",
        "json",
        "--report",
        report_path.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        output.stdout.is_empty(),
        "when writing to a report file, stdout should stay empty"
    );
    let content = std::fs::read_to_string(&report_path).expect("read report file");
    let err: serde_json::Value = serde_json::from_str(&content).expect("report should be JSON");
    assert_eq!(err.get("mode").and_then(|v| v.as_str()), Some("error"));
    assert_eq!(err["error"]["category"], "config");
}

#[test]
fn verbose_prints_effective_config_to_stderr() {
    let output = run_webprint(&[
        "--source",
        "definitely-missing.html",
        "--format",
        "json",
        "--verbose",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Effective config"),
        "verbose mode should log the effective config, got: {stderr}"
    );
    assert!(
        stderr.contains("cleanup-selector=.download-pdf"),
        "effective config should include the default selector, got: {stderr}"
    );
}

#[test]
fn cli_flags_override_config_values() {
    let dir = TempDir::new().expect("tempdir");
    let cfg_path = dir.path().join("webprint.toml");
    std::fs::write(
        &cfg_path,
        "source = \"config-page.html\"\ncleanup_selector = \".from-config\"\n",
    )
    .expect("write config");

    let output = run_webprint(&[
        "--config",
        cfg_path.to_str().unwrap(),
        "--source",
        "cli-page.html",
        "--cleanup-selector",
        ".from-cli",
        "--format",
        "json",
        "--verbose",
    ]);

    assert_eq!(output.status.code(), Some(1), "missing source should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("source=cli-page.html"),
        "CLI source should win over config, got: {stderr}"
    );
    assert!(
        stderr.contains("cleanup-selector=.from-cli"),
        "CLI selector should win over config, got: {stderr}"
    );
    let err = parse_json(&output.stdout);
    let message = err["error"]["message"]
        .as_str()
        .unwrap_or_default()
        .to_ascii_lowercase();
    assert!(
        message.contains("cli-page.html"),
        "error should reference the CLI source, got: {message}"
    );
}

#[test]
fn config_source_is_used_when_no_flag_is_given() {
    let dir = TempDir::new().expect("tempdir");
    let cfg_path = dir.path().join("webprint.toml");
    std::fs::write(&cfg_path, "source = \"config-page.html\"\n").expect("write config");

    let output = run_webprint(&[
        "--config",
        cfg_path.to_str().unwrap(),
        "--format",
        "json",
    ]);

    assert_eq!(output.status.code(), Some(1), "missing source should fail");
    let err = parse_json(&output.stdout);
    let message = err["error"]["message"]
        .as_str()
        .unwrap_or_default()
        .to_ascii_lowercase();
    assert!(
        message.contains("config-page.html"),
        "error should reference the config source, got: {message}"
    );
}
