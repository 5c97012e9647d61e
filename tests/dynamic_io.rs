use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("bf").unwrap();
    cmd.timeout(Duration::from_secs(5))
        .env("BF_CONFIG", "/nonexistent/bf.toml")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn annotated_mode_prompts_and_labels_output() {
    cargo_bin()
        .args(["-d", ",.,."])
        .write_stdin("Qx\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[i]: [o]: Q\n[i]: [o]: \0\n"))
        .stdout(predicate::str::contains(">>> Output").not());
}

#[test]
fn clean_mode_prints_raw_characters() {
    cargo_bin()
        .args(["-c", ",.+."])
        .write_stdin("a\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("ab\n"))
        .stdout(predicate::str::contains("[o]").not())
        .stdout(predicate::str::contains("[i]").not());
}

#[test]
fn clean_mode_wins_when_both_flags_are_given() {
    cargo_bin()
        .args(["-d", "-c", ",."])
        .write_stdin("k\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[o]").not())
        .stdout(predicate::str::contains("k"));
}

#[test]
fn escapes_are_decoded_in_dynamic_input() {
    cargo_bin()
        .args(["-d", "-t", "1", ","])
        .write_stdin("\\t\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(">>> Tape Snapshot: [9, 0]"));
}

#[test]
fn closed_stdin_reads_as_zero() {
    cargo_bin()
        .args(["-c", "-t", "1", "+,"])
        .assert()
        .success()
        .stdout(predicate::str::contains(">>> Tape Snapshot: [0, 0]"));
}
