//! Integration tests for the DataVault CLI.
//!
//! The interactive shell needs a terminal, so these tests cover the
//! non-interactive surface (--help, version, keygen) and config errors.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use predicates::prelude::*;

/// Helper: get a Command pointing at the datavault binary.
fn datavault() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("datavault").expect("binary should exist")
}

#[test]
fn help_flag_shows_usage() {
    datavault()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Passkey-protected encrypted data vault",
        ))
        .stdout(predicate::str::contains("shell"))
        .stdout(predicate::str::contains("keygen"));
}

#[test]
fn version_flag_shows_version() {
    datavault()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("datavault"));
}

#[test]
fn no_args_shows_help() {
    datavault()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn keygen_prints_a_32_byte_key() {
    let output = datavault().arg("keygen").output().expect("run keygen");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let line = stdout.lines().next().expect("a key line");
    let decoded = BASE64.decode(line.trim()).expect("valid base64");
    assert_eq!(decoded.len(), 32);
}

#[test]
fn keygen_prints_a_new_key_each_time() {
    let first = datavault().arg("keygen").output().unwrap().stdout;
    let second = datavault().arg("keygen").output().unwrap().stdout;
    assert_ne!(first, second);
}

#[test]
fn shell_with_invalid_config_fails() {
    let tmp = TempDir::new().unwrap();
    tmp.child(".datavault.toml")
        .write_str("not valid {{toml")
        .unwrap();

    datavault()
        .args(["--config", tmp.path().to_str().unwrap(), "shell"])
        .env_remove("DATAVAULT_KEY")
        .env_remove("DATAVAULT_MASTER_PASSWORD")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file error"));
}

#[test]
fn shell_with_malformed_key_fails() {
    let tmp = TempDir::new().unwrap();

    datavault()
        .args(["--config", tmp.path().to_str().unwrap(), "shell"])
        .env("DATAVAULT_KEY", "c2hvcnQ=")
        .assert()
        .failure()
        .stderr(predicate::str::contains("key must be exactly 32 bytes"));
}
