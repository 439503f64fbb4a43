//! Integration tests for the `fleet-console` binary entry point.
//!
//! Drives the console over piped stdin on an ephemeral loopback port.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;

const LOOPBACK: [&str; 4] = ["--listen-host", "127.0.0.1", "--listen-port", "0"];

#[test]
fn quit_command_exits_cleanly() {
    let mut command = cargo_bin_cmd!("fleet-console");
    command.args(LOOPBACK).write_stdin("q\n");
    command.assert().success().stdout(contains("> "));
}

#[test]
fn closed_input_exits_cleanly() {
    let mut command = cargo_bin_cmd!("fleet-console");
    command.args(LOOPBACK).write_stdin("");
    command.assert().success();
}

#[test]
fn list_without_devices_reports_no_client() {
    let mut command = cargo_bin_cmd!("fleet-console");
    command.args(LOOPBACK).write_stdin("list\nq\n");
    command.assert().success().stdout(contains("No client."));
}

#[test]
fn requests_to_unknown_devices_are_refused() {
    let mut command = cargo_bin_cmd!("fleet-console");
    command.args(LOOPBACK).write_stdin("read 0 /3/0\nq\n");
    command
        .assert()
        .success()
        .stdout(contains("Error: 4.04 (Not Found)"));
}

#[test]
fn help_lists_commands() {
    let mut command = cargo_bin_cmd!("fleet-console");
    command.args(LOOPBACK).write_stdin("help\nq\n");
    command
        .assert()
        .success()
        .stdout(contains("observe"))
        .stdout(contains("Type 'help [COMMAND]' for more details on a command."));
}

#[test]
fn unknown_flag_prints_usage_and_exits_successfully() {
    let mut command = cargo_bin_cmd!("fleet-console");
    command.arg("--no-such-flag").write_stdin("");
    command.assert().success().stderr(contains("fleet-console:"));
}

#[test]
fn unsupported_block_size_exits_with_failure() {
    let mut command = cargo_bin_cmd!("fleet-console");
    command
        .args(LOOPBACK)
        .args(["--block-size", "100"])
        .write_stdin("q\n");
    command
        .assert()
        .failure()
        .stderr(contains("invalid configuration"));
}
