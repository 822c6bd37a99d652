//! End-to-end CLI checks.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

#[test]
fn version_prints_crate_version() {
    Command::cargo_bin("marquee")
        .unwrap()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("marquee "));
}

#[test]
fn validate_accepts_a_well_formed_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[server]
host = "127.0.0.1"
port = 3000

[tmdb]
api_key = "key-a"

[omdb]
api_key = "key-b"

[catalog]
max_attempts = 5
retry_delay_secs = 5
"#
    )
    .unwrap();

    Command::cargo_bin("marquee")
        .unwrap()
        .args(["validate"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("127.0.0.1:3000"))
        .stdout(predicate::str::contains("5 attempts"));
}

#[test]
fn validate_rejects_port_zero() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[server]\nport = 0").unwrap();

    Command::cargo_bin("marquee")
        .unwrap()
        .args(["validate"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("port"));
}

#[test]
fn validate_rejects_malformed_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[server\nport = ").unwrap();

    Command::cargo_bin("marquee")
        .unwrap()
        .args(["validate"])
        .arg(file.path())
        .assert()
        .failure();
}
