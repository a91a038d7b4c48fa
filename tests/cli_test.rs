//! Tests for the integrity-check binary

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(args: &[&str], store: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_integrity-check"))
        .args(args)
        .arg("--no-color")
        .arg("--store")
        .arg(store)
        .env_remove("RUST_LOG")
        .env_remove("INTEGRITY_STORE")
        .output()
        .expect("binary should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_missing_arguments_exit_non_zero() {
    let output = Command::new(env!("CARGO_BIN_EXE_integrity-check"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn test_unknown_command_exit_non_zero() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(&["verify", "/tmp"], &temp_dir.path().join("hashes.json"));
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("verify"));
}

#[test]
fn test_init_check_update_cycle() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("a");
    fs::create_dir(&root).unwrap();
    let x = root.join("x");
    fs::write(&x, b"hello").unwrap();
    let store = temp_dir.path().join("hashes.json");
    let root_arg = root.to_str().unwrap();

    let output = run(&["init", root_arg], &store);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Successfully hashed 1 file(s)."));
    let document = fs::read_to_string(&store).unwrap();
    assert!(document.contains(
        "\"2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824\""
    ));

    let output = run(&["check", root_arg], &store);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains(&format!("{}: Unmodified", x.display())));
    assert!(text.contains("Summary: 1 unmodified, 0 modified"));

    fs::write(&x, b"hello!").unwrap();
    let output = run(&["check", root_arg], &store);
    let text = stdout(&output);
    assert!(text.contains(&format!("{}: Modified (Hash mismatch)", x.display())));
    assert!(text.contains("Summary: 0 unmodified, 1 modified"));

    let output = run(&["update", root_arg], &store);
    assert!(output.status.success());
    assert!(stdout(&output).contains(&format!("{}: Hash updated successfully", x.display())));

    let output = run(&["check", root_arg], &store);
    assert!(stdout(&output).contains("Summary: 1 unmodified, 0 modified"));
}

#[test]
fn test_missing_path_exits_non_zero_without_touching_store() {
    let temp_dir = TempDir::new().unwrap();
    let store = temp_dir.path().join("hashes.json");
    let missing = temp_dir.path().join("nowhere");

    let output = run(&["init", missing.to_str().unwrap()], &store);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("Error: path does not exist"));
    assert!(!store.exists());
}

#[test]
fn test_corrupt_store_exits_non_zero() {
    let temp_dir = TempDir::new().unwrap();
    let store = temp_dir.path().join("hashes.json");
    fs::write(&store, "garbage").unwrap();
    let file = temp_dir.path().join("f.txt");
    fs::write(&file, b"data").unwrap();

    let output = run(&["check", file.to_str().unwrap()], &store);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("is corrupt"));
}

#[test]
fn test_report_option_writes_file() {
    let temp_dir = TempDir::new().unwrap();
    let store = temp_dir.path().join("hashes.json");
    let file = temp_dir.path().join("f.txt");
    fs::write(&file, b"data").unwrap();
    let report = temp_dir.path().join("report.txt");

    let output = run(
        &["init", file.to_str().unwrap(), "--report", report.to_str().unwrap()],
        &store,
    );
    assert!(output.status.success());
    let content = fs::read_to_string(&report).unwrap();
    assert!(content.contains("Command: init"));
    assert!(content.contains("Recorded: 1"));
}
