use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

fn cargo_bin() -> PathBuf {
    if let Some(path) = option_env!("CARGO_BIN_EXE_edm") {
        return PathBuf::from(path);
    }

    let target_dir = env::var("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| repo_root().join("target"));
    let executable_name = format!("edm{}", std::env::consts::EXE_SUFFIX);
    let fallback = target_dir.join("debug").join(executable_name);

    if fallback.exists() {
        return fallback;
    }

    panic!(
        "CARGO_BIN_EXE_edm is not set and fallback binary was not found at {}",
        fallback.display()
    );
}

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn unique_temp_path(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time after epoch")
        .as_nanos();
    let counter = TEMP_FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
    let filename = format!(
        "edm-cli-{name}-{}-{nanos}-{counter}.json",
        std::process::id()
    );
    env::temp_dir().join(filename)
}

fn write_temp_file(name: &str, content: &str) -> PathBuf {
    let path = unique_temp_path(name);
    fs::write(&path, content).expect("temporary file should be writable");
    path
}

fn run_edm(args: &[&str]) -> Output {
    Command::new(cargo_bin())
        .args(args)
        .output()
        .expect("run edm")
}

#[test]
fn check_command_succeeds_on_valid_document() {
    let input = write_temp_file(
        "check-valid",
        r#"{
            "$Version": "4.0",
            "Acme": {
                "Thing": {"$Kind": "ComplexType", "Name": {}}
            }
        }"#,
    );

    let output = run_edm(&["check", input.to_string_lossy().as_ref()]);

    assert!(
        output.status.success(),
        "expected check to succeed; stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).expect("stdout should be UTF-8");
    assert!(stdout.contains("ok: 1 element(s)"));
}

#[test]
fn check_command_fails_on_missing_version() {
    let input = write_temp_file("check-no-version", r#"{"Acme": {}}"#);

    let output = run_edm(&["check", input.to_string_lossy().as_ref()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("$Version"));
}

#[test]
fn check_without_reference_loading_reports_a_warning() {
    let input = write_temp_file(
        "check-no-references",
        r#"{
            "$Version": "4.0",
            "$Reference": {
                "https://example.org/unreachable.json": {
                    "$Include": [{"$Namespace": "Remote.Vocab"}]
                }
            },
            "Acme": {}
        }"#,
    );

    let output = run_edm(&["--no-references", "check", input.to_string_lossy().as_ref()]);

    assert!(
        output.status.success(),
        "expected check to succeed with loading disabled; stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).expect("stdout should be UTF-8");
    assert!(stdout.contains("warning"));
    assert!(stdout.contains("https://example.org/unreachable.json"));
}
