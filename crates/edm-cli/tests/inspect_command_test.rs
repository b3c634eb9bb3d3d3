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

fn unique_temp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time after epoch")
        .as_nanos();
    let counter = TEMP_FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = env::temp_dir().join(format!(
        "edm-cli-{name}-{}-{nanos}-{counter}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("temporary directory should be creatable");
    dir
}

fn run_edm(args: &[&str]) -> Output {
    Command::new(cargo_bin())
        .args(args)
        .output()
        .expect("run edm")
}

#[test]
fn inspect_command_prints_model_summary() {
    let dir = unique_temp_dir("inspect-summary");
    let input = dir.join("catalog.json");
    fs::write(
        &input,
        r#"{
            "$Version": "4.01",
            "Catalog": {
                "$Alias": "C",
                "Product": {
                    "$Kind": "EntityType",
                    "$Key": ["Id"],
                    "Id": {"$Type": "Edm.Int32"}
                }
            }
        }"#,
    )
    .expect("input file should be writable");

    let output = run_edm(&["inspect", input.to_string_lossy().as_ref()]);

    assert!(
        output.status.success(),
        "expected inspect to succeed; stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).expect("stdout should be UTF-8");
    assert!(stdout.contains("version: 4.01"));
    assert!(stdout.contains("namespace: Catalog"));
    assert!(stdout.contains("alias: C -> Catalog"));
    assert!(stdout.contains("Catalog.Product"));
}

#[test]
fn inspect_resolves_references_next_to_the_input() {
    let dir = unique_temp_dir("inspect-references");
    fs::write(
        dir.join("vocab.json"),
        r#"{
            "$Version": "4.0",
            "Shared.Vocab": {
                "Note": {"$Kind": "Term"}
            }
        }"#,
    )
    .expect("referenced file should be writable");
    let input = dir.join("main.json");
    fs::write(
        &input,
        r#"{
            "$Version": "4.0",
            "$Reference": {
                "https://example.org/schemas/vocab.json": {
                    "$Include": [{"$Namespace": "Shared.Vocab"}]
                }
            },
            "Main": {}
        }"#,
    )
    .expect("input file should be writable");

    let output = run_edm(&["inspect", input.to_string_lossy().as_ref()]);

    assert!(
        output.status.success(),
        "expected inspect to succeed; stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).expect("stdout should be UTF-8");
    assert!(stdout.contains("referenced: https://example.org/schemas/vocab.json"));
}

#[test]
fn inspect_fails_on_missing_file() {
    let dir = unique_temp_dir("inspect-missing");
    let input = dir.join("does-not-exist.json");

    let output = run_edm(&["inspect", input.to_string_lossy().as_ref()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"));
}
