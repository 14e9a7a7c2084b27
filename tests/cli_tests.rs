//! CLI integration tests.
//!
//! Runs the `keymix` binary as a subprocess.

#![cfg(feature = "cli")]

use std::process::Command;

const HELLO_DIGEST: &str = "acdf0ee77fa27fa7ec2f0cbebb11f2243c9b779f3cc4a19fbeaa2b42";

fn run(args: &[&str]) -> (i32, Vec<u8>, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_keymix"))
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .unwrap_or_else(|e| panic!("Failed to spawn keymix: {}", e));

    let code = output.status.code().unwrap_or(-1);
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (code, output.stdout, stderr)
}

fn run_ok(args: &[&str]) -> String {
    let (code, stdout, stderr) = run(args);
    assert_eq!(code, 0, "keymix {:?} failed: {}", args, stderr);
    String::from_utf8(stdout).unwrap()
}

// ============================================================================
// hash
// ============================================================================

#[test]
fn test_hash_text_input() {
    let stdout = run_ok(&["hash", "--input", "hello", "--key", "test-key"]);
    assert_eq!(stdout.trim(), HELLO_DIGEST);
}

#[test]
fn test_hash_defaults_to_testing_key() {
    let stdout = run_ok(&["hash", "--input", "hello"]);
    assert_eq!(stdout.trim(), HELLO_DIGEST);
}

#[test]
fn test_hash_hex_input() {
    let stdout = run_ok(&["hash", "--input-hex", "68656c6c6f"]);
    assert_eq!(stdout.trim(), HELLO_DIGEST);
}

#[test]
fn test_hash_raw_encoding() {
    let (code, stdout, _) = run(&["hash", "--input", "hello", "--encoding", "raw"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.len(), 28);
    assert_eq!(hex::encode(&stdout), HELLO_DIGEST);
}

#[test]
fn test_hash_json() {
    let stdout = run_ok(&["hash", "--input", "hello", "--format", "json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["digest"], HELLO_DIGEST);
    assert_eq!(value["function"], "keymix::default");
    assert_eq!(value["input_len"], 5);
}

#[test]
fn test_hash_empty_key_fails() {
    let (code, _, stderr) = run(&["hash", "--input", "hello", "--key", ""]);
    assert_eq!(code, 1);
    assert!(stderr.contains("invalid key"), "stderr: {}", stderr);
}

#[test]
fn test_hash_bad_hex_fails() {
    let (code, _, stderr) = run(&["hash", "--input-hex", "zz"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("invalid --input-hex"), "stderr: {}", stderr);
}

// ============================================================================
// analyze
// ============================================================================

#[test]
fn test_analyze_json_report() {
    let stdout = run_ok(&[
        "analyze", "--input", "hello world!", "--count", "500", "--trials", "50", "--seed", "42",
        "--format", "json",
    ]);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(value["function"], "keymix::default");
    assert_eq!(value["key"], "test-key");
    assert_eq!(value["seed"], 42);
    assert_eq!(value["avalanche"]["distances"].as_array().unwrap().len(), 50);
    assert!(value["avalanche"]["average"].as_f64().unwrap() > 0.2 * 224.0);
    let diffusion = value["diffusion"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&diffusion));
    assert_eq!(value["collision"]["collisions"], 0);
    assert_eq!(value["collision"]["iterations"], 500);
    assert_eq!(value["preimage"]["outcome"], "not_found");
    assert_eq!(value["preimage"]["tries_exhausted"], 500);
}

#[test]
fn test_analyze_is_reproducible_with_seed() {
    let args = [
        "analyze", "--input", "abcdefgh", "--count", "200", "--trials", "30", "--seed", "7",
        "--format", "json",
    ];
    assert_eq!(run_ok(&args), run_ok(&args));
}

#[test]
fn test_analyze_text_report() {
    let stdout = run_ok(&[
        "analyze", "--input", "hello", "--count", "100", "--trials", "20", "--seed", "1",
    ]);
    assert!(stdout.contains("Avalanche:"));
    assert!(stdout.contains("Diffusion:"));
    assert!(stdout.contains("Collisions: 0 of 100"));
    assert!(stdout.contains("Preimage:   not found after 100 tries"));
}

#[test]
fn test_analyze_snapshot_variant() {
    let stdout = run_ok(&[
        "analyze", "--function", "snapshot", "--input", "hello", "--count", "50", "--trials",
        "10", "--seed", "3", "--format", "json",
    ]);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["function"], "keymix::snapshot");
}

#[test]
fn test_analyze_reads_config_file() {
    let path = std::env::temp_dir().join(format!("keymix-cli-{}.json", std::process::id()));
    std::fs::write(&path, r#"{"key": "from-file", "seed": 9, "trials": 12}"#).unwrap();

    let stdout = run_ok(&[
        "analyze",
        "--config",
        path.to_str().unwrap(),
        "--input",
        "hello",
        "--count",
        "20",
        "--format",
        "json",
    ]);
    std::fs::remove_file(&path).ok();

    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["key"], "from-file");
    assert_eq!(value["seed"], 9);
    assert_eq!(value["trials"], 12);
    assert_eq!(value["iterations"], 20);
}

#[test]
fn test_unknown_module_fails() {
    let (code, _, stderr) = run(&["analyze", "--module", "./hash.js", "--input", "x"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("cannot resolve module"), "stderr: {}", stderr);
}

#[test]
fn test_unknown_export_fails() {
    let (code, _, stderr) = run(&["hash", "--function", "missing", "--input", "x"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("has no export named 'missing'"), "stderr: {}", stderr);
}

// ============================================================================
// list
// ============================================================================

#[test]
fn test_list() {
    let stdout = run_ok(&["list"]);
    let names: Vec<&str> = stdout.lines().collect();
    assert_eq!(names, vec!["keymix::default", "keymix::hash", "keymix::snapshot"]);
}
