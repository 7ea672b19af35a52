// Interactive session tests: feed stdin, check the conversation

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use std::fs;

fn new_cmd(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("yarr").unwrap();
    cmd.env("HOME", temp_dir.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_chat_greets_and_says_farewell() {
    let temp_dir = TempDir::new().unwrap();
    new_cmd(&temp_dir)
        .write_stdin("bye\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ahoy, matey!"))
        .stdout(predicate::str::contains("Fair winds"));
}

#[test]
fn test_chat_default_location_is_created() {
    let temp_dir = TempDir::new().unwrap();
    new_cmd(&temp_dir).arg("chat").write_stdin("todo read book\nbye\n").assert().success();
    assert!(temp_dir.path().join(".yarr").join("tasks.db").exists());
}

#[test]
fn test_chat_full_conversation() {
    let temp_dir = TempDir::new().unwrap();
    let script = "todo read book\n\
                  deadline submit report /by 20/12/2024 1800\n\
                  mark 1\n\
                  list\n\
                  bye\n";
    new_cmd(&temp_dir)
        .arg("chat")
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("1.[T][X] read book"))
        .stdout(predicate::str::contains("2.[D][ ] submit report (by: Dec 20 2024 18:00)"));
}

#[test]
fn test_chat_recovers_from_errors() {
    let temp_dir = TempDir::new().unwrap();
    let script = "xyz\nmark abc\ndelete 99\ntodo still here\nlist\nbye\n";
    new_cmd(&temp_dir)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("cannot fathom"))
        .stdout(predicate::str::contains("'abc'"))
        .stdout(predicate::str::contains("task 99"))
        .stdout(predicate::str::contains("1.[T][ ] still here"));
}

#[test]
fn test_chat_stops_reading_after_bye() {
    let temp_dir = TempDir::new().unwrap();
    new_cmd(&temp_dir)
        .write_stdin("bye\ntodo never added\n")
        .assert()
        .success();

    new_cmd(&temp_dir)
        .write_stdin("list\nbye\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Yer log be empty"));
}

#[test]
fn test_chat_state_persists_between_runs() {
    let temp_dir = TempDir::new().unwrap();
    // End of input without bye still keeps what was saved
    new_cmd(&temp_dir).write_stdin("todo read book\ntodo buy rum\n").assert().success();

    new_cmd(&temp_dir)
        .write_stdin("delete 1\nlist\nbye\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1.[T][ ] buy rum"));
}

#[test]
fn test_chat_survives_unreadable_ledger() {
    let temp_dir = TempDir::new().unwrap();
    let ledger = temp_dir.path().join(".yarr").join("tasks.db");
    fs::create_dir_all(ledger.parent().unwrap()).unwrap();
    let garbage = b"this be no ledger, just barnacles and brine".repeat(200);
    fs::write(&ledger, &garbage).unwrap();

    new_cmd(&temp_dir)
        .write_stdin("list\ntodo read book\nlist\nbye\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("ship's log be damaged"))
        .stdout(predicate::str::contains("Ahoy, matey!"))
        .stdout(predicate::str::contains("Yer log be empty"))
        .stdout(predicate::str::contains("Beware!"))
        .stdout(predicate::str::contains("1.[T][ ] read book"))
        .stdout(predicate::str::contains("Fair winds"));

    // The unreadable file is left as it was
    assert_eq!(fs::read(&ledger).unwrap(), garbage);
}

#[test]
fn test_chat_tolerates_invalid_utf8_input() {
    let temp_dir = TempDir::new().unwrap();
    let script: &[u8] = b"todo read book\ntodo \xff\xfe bad\nlist\nbye\n";
    new_cmd(&temp_dir)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("1.[T][ ] read book"))
        .stdout(predicate::str::contains("2.[T][ ] \u{fffd}\u{fffd} bad"))
        .stdout(predicate::str::contains("Fair winds"));
}
