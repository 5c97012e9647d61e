use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::time::Duration;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("bf").unwrap();
    cmd.timeout(Duration::from_secs(5)).env_remove("RUST_LOG");
    cmd
}

fn config_file(content: &str) -> tempfile::NamedTempFile {
    let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
    write!(tf, "{}", content).unwrap();
    tf
}

#[test]
fn snapshot_shows_power_of_two_cells() {
    cargo_bin()
        .env("BF_CONFIG", "/nonexistent/bf.toml")
        .args(["-t", "2", "++>+"])
        .assert()
        .success()
        .stdout(predicate::str::contains(">>> Tape Snapshot: [2, 1, 0, 0]\n"));
}

#[test]
fn snapshot_sees_circular_writes() {
    // Moving left from cell 0 lands on the last cell, outside the window
    cargo_bin()
        .env("BF_CONFIG", "/nonexistent/bf.toml")
        .args(["-t", "1", "<+>>+"])
        .assert()
        .success()
        .stdout(predicate::str::contains(">>> Tape Snapshot: [0, 1]\n"));
}

#[test]
fn cells_wrap_modulo_255() {
    cargo_bin()
        .env("BF_CONFIG", "/nonexistent/bf.toml")
        .args(["-t", "1", "->+[-]-"])
        .assert()
        .success()
        .stdout(predicate::str::contains(">>> Tape Snapshot: [254, 254]\n"));
}

#[test]
fn zero_or_negative_hides_snapshot() {
    for n in ["0", "-3"] {
        cargo_bin()
            .env("BF_CONFIG", "/nonexistent/bf.toml")
            .args(["-t", n, "+"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Tape Snapshot").not());
    }
}

#[test]
fn config_supplies_defaults() {
    let cfg = config_file("[run]\ntape_output = 1\nio_mode = \"dynamic\"\n");
    cargo_bin()
        .env("BF_CONFIG", cfg.path())
        .arg("+++.")
        .assert()
        .success()
        .stdout(predicate::str::contains("[o]: \u{3}\n"))
        .stdout(predicate::str::contains(">>> Tape Snapshot: [3, 0]\n"));
}

#[test]
fn flags_override_config() {
    let cfg = config_file("[run]\ntape_output = 1\n");
    cargo_bin()
        .env("BF_CONFIG", cfg.path())
        .args(["-t", "0", "+"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tape Snapshot").not());
}
