// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

mod common;
use common::*;
use yare::parameterized;

#[test]
fn help_lists_commands() {
    let temp = TempDir::new().unwrap();
    tmv(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("spaces"))
        .stdout(predicate::str::contains("migrate"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    tmv(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("tmv "));
}

#[parameterized(
    bash = { "bash" },
    zsh = { "zsh" },
    fish = { "fish" },
)]
fn completion_generates_script(shell: &str) {
    let temp = TempDir::new().unwrap();
    tmv(&temp)
        .args(["completion", shell])
        .assert()
        .success()
        .stdout(predicate::str::contains("tmv"));
}

#[test]
fn missing_subcommand_fails() {
    let temp = TempDir::new().unwrap();
    tmv(&temp).assert().failure();
}

#[test]
fn spaces_without_tokens_is_not_logged_in() {
    let temp = TempDir::new().unwrap();
    write_config(&temp, false);

    tmv(&temp)
        .arg("spaces")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: not logged in"))
        .stderr(predicate::str::contains("tmv login"));
}

#[test]
fn missing_application_keys_cancel_without_input() {
    let temp = TempDir::new().unwrap();

    tmv(&temp)
        .arg("spaces")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Client id: "))
        .stderr(predicate::str::contains("error: operation cancelled"));
}

#[test]
fn application_keys_from_prompt_are_saved() {
    let temp = TempDir::new().unwrap();

    tmv(&temp)
        .arg("spaces")
        .write_stdin("my-id\nmy-secret\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));

    let saved = std::fs::read_to_string(temp.path().join("config.toml")).unwrap();
    assert!(saved.contains("client_id = \"my-id\""));
    assert!(saved.contains("client_secret = \"my-secret\""));
}

#[test]
fn migrate_rejects_bad_ticket_file() {
    let temp = TempDir::new().unwrap();
    let list = temp.path().join("tickets.txt");
    std::fs::write(&list, "12\n\nseven\n").unwrap();

    tmv(&temp)
        .args(["migrate", "old", "new", "--tickets"])
        .arg(&list)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: line 3: invalid ticket number 'seven'"));
}

#[test]
fn migrate_unreachable_host_reports_transport_failure() {
    let temp = TempDir::new().unwrap();
    write_config(&temp, true);

    tmv(&temp)
        .args(["migrate", "old", "new"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("status 0"));
}

#[test]
fn log_file_receives_logs() {
    let temp = TempDir::new().unwrap();
    write_config(&temp, true);
    let log = temp.path().join("tmv.log");

    tmv(&temp)
        .args(["spaces", "--verbose", "--log-file"])
        .arg(&log)
        .assert()
        .failure();

    assert!(log.exists());
}

#[test]
fn unopenable_log_file_warns_and_logs_to_stderr() {
    let temp = TempDir::new().unwrap();
    write_config(&temp, true);
    let log = temp.path().join("missing").join("tmv.log");

    tmv(&temp)
        .args(["spaces", "--log-file"])
        .arg(&log)
        .assert()
        .failure()
        .stderr(predicate::str::contains("warning: cannot open log file"));

    assert!(!log.exists());
}
