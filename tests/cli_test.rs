use std::path::{Path, PathBuf};

use assert_cmd::Command;
use lumbung::types::{COLUMN_EMAIL_SIZE, COLUMN_USERNAME_SIZE, TABLE_MAX_ROWS};
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn create_db_path() -> PathBuf {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    temp_file.path().to_path_buf()
}

fn run_commands_with_db<T: AsRef<str>>(commands: &[T], db_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lumbung").expect("Failed to run command");
    cmd.arg(db_path.to_str().expect("Invalid path"));
    let input = commands
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join("\n");
    cmd.write_stdin(input);
    cmd
}

fn run_commands<T: AsRef<str>>(commands: &[T]) -> Command {
    run_commands_with_db(commands, &create_db_path())
}

#[test]
fn it_inserts_and_retrieves_a_row() {
    let mut cmd = run_commands(&["insert 1 user1 person1@example.com", "select", ".exit"]);

    let expected = [
        "db > Executed",
        "db > (1 user1 person1@example.com)",
        "Executed",
        "db > ",
    ]
    .join("\n");

    cmd.assert().success().stdout(expected);
}

#[test]
fn it_runs_in_memory_without_a_path_argument() {
    let mut cmd = Command::cargo_bin("lumbung").expect("Failed to run command");
    cmd.write_stdin("insert 1 user1 person1@example.com\nselect\n.exit");

    let expected = [
        "db > Executed",
        "db > (1 user1 person1@example.com)",
        "Executed",
        "db > ",
    ]
    .join("\n");

    cmd.assert().success().stdout(expected);
}

#[test]
fn it_prints_error_message_when_table_is_full() {
    let mut commands = Vec::new();
    for i in 0..TABLE_MAX_ROWS + 1 {
        commands.push(format!("insert {i} user{i} person{i}@example.com"));
    }
    commands.push(".exit".to_string());

    let mut cmd = run_commands(&commands);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("db > Error: Table full"));
}

#[test]
fn it_allows_inserting_strings_that_are_the_maximum_length() {
    let long_username = "a".repeat(COLUMN_USERNAME_SIZE);
    let long_email = "a".repeat(COLUMN_EMAIL_SIZE);

    let commands = [
        format!("insert 1 {long_username} {long_email}"),
        String::from("select"),
        String::from(".exit"),
    ];
    let mut cmd = run_commands(&commands);

    let expected = [
        String::from("db > Executed"),
        format!("db > (1 {long_username} {long_email})"),
        String::from("Executed"),
        String::from("db > "),
    ]
    .join("\n");

    cmd.assert().success().stdout(expected);
}

#[test]
fn it_prints_error_message_if_strings_are_too_long() {
    let long_username = "a".repeat(COLUMN_USERNAME_SIZE + 1);

    let commands = [
        format!("insert 1 {long_username} person1@example.com"),
        String::from("select"),
        String::from(".exit"),
    ];
    let mut cmd = run_commands(&commands);

    let expected = [
        "db > String is too long. Maximum size is 32 for username",
        "db > Executed",
        "db > ",
    ]
    .join("\n");

    cmd.assert().success().stdout(expected);
}

#[test]
fn it_prints_error_message_if_id_is_negative() {
    let mut cmd = run_commands(&["insert -1 user1 person1@example.com", "select", ".exit"]);

    let expected = ["db > ID must be a positive integer", "db > Executed", "db > "].join("\n");

    cmd.assert().success().stdout(expected);
}

#[test]
fn it_reports_unrecognized_statements_and_meta_commands() {
    let mut cmd = run_commands(&["delete 1", ".foo", ".exit"]);

    let expected = [
        "db > Unrecognized keyword at start of 'delete 1'",
        "db > Unrecognized command .foo",
        "db > ",
    ]
    .join("\n");

    cmd.assert().success().stdout(expected);
}

#[test]
fn it_shows_help_text() {
    let mut cmd = run_commands(&[".help", ".exit"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Available commands:"));
}

#[test]
fn it_keeps_data_after_closing_connection() {
    let db_path = create_db_path();

    let mut cmd =
        run_commands_with_db(&["insert 1 user1 person1@example.com", ".exit"], &db_path);
    let expected = ["db > Executed", "db > "].join("\n");
    cmd.assert().success().stdout(expected);

    let mut cmd = run_commands_with_db(&["select", ".exit"], &db_path);
    let expected = [
        "db > (1 user1 person1@example.com)\nExecuted",
        "db > ",
    ]
    .join("\n");
    cmd.assert().success().stdout(expected);
}

#[test]
fn it_keeps_ten_rows_in_order_across_restarts() {
    let db_path = create_db_path();

    let mut commands = Vec::new();
    let mut lines = Vec::new();
    for i in 0..10 {
        commands.push(format!("insert {i} user{i} person{i}@example.com"));
        lines.push(format!("({i} user{i} person{i}@example.com)"));
    }
    commands.push(".exit".to_string());

    let mut cmd = run_commands_with_db(&commands, &db_path);
    cmd.assert().success();

    let mut cmd = run_commands_with_db(&["select", ".exit"], &db_path);
    let expected = format!("db > {}\nExecuted\ndb > ", lines.join("\n"));
    cmd.assert().success().stdout(expected);
}
