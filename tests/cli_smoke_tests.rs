use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

mod common;

const BIN_NAME: &str = "zenbudget_cli";

fn script_command() -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("ZENBUDGET_CLI_SCRIPT", "1")
        .env("ZENBUDGET_HOME", common::scratch_dir());
    cmd
}

#[test]
fn help_prints_the_command_overview() {
    script_command()
        .write_stdin("help\nexit\n")
        .assert()
        .success()
        .stdout(contains("Available commands").and(contains("import")));
}

#[test]
fn help_with_a_command_shows_usage() {
    script_command()
        .write_stdin("help budget\nexit\n")
        .assert()
        .success()
        .stdout(contains("Help: budget").and(contains("budget set <category> <amount>")));
}

#[test]
fn version_reports_schema_and_data_directory() {
    script_command()
        .write_stdin("version\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("ZenBudget")
                .and(contains("Schema version"))
                .and(contains("Data directory")),
        );
}

#[test]
fn typos_get_a_suggestion() {
    script_command()
        .write_stdin("lst\nexit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `lst`").and(contains("Suggestion: `list`?")));
}

#[test]
fn bad_arguments_point_at_help() {
    script_command()
        .write_stdin("add expense\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("usage: add expense")
                .and(contains("Use `help <command>` for usage details.")),
        );
}
