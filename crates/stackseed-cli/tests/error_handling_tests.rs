//! Exit codes and error messages.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn stackseed(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("stackseed").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn invalid_database_choice_exits_2_and_creates_nothing() {
    let home = TempDir::new().unwrap();

    stackseed(home.path())
        .args([
            "new", "demo", "--backend", "1", "--database", "3", "--db-name", "demo_db", "--yes",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("database"))
        .stderr(predicate::str::contains("1 (SQL), 2 (MongoDB)"));

    assert!(!home.path().join("demo").exists());
}

#[test]
fn missing_value_without_terminal_exits_2() {
    let home = TempDir::new().unwrap();

    stackseed(home.path())
        .args(["new", "demo", "--backend", "fastapi", "--database", "sql"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--db-name"));

    assert!(!home.path().join("demo").exists());
}

#[test]
fn traversal_name_is_rejected() {
    let home = TempDir::new().unwrap();

    stackseed(home.path())
        .args([
            "new", "../escape", "--backend", "1", "--database", "1", "--db-name", "db", "--yes",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("project name"));

    assert!(!home.path().parent().unwrap().join("escape").exists());
}

#[test]
fn non_empty_root_exits_2_and_is_untouched() {
    let home = TempDir::new().unwrap();
    let root = home.path().join("demo");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("notes.txt"), "keep me").unwrap();

    stackseed(home.path())
        .args([
            "new", "demo", "--backend", "fastapi", "--database", "sql", "--db-name", "demo_db",
            "--yes",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    assert!(!root.join("log").exists());
    assert!(!root.join("frontend").exists());
    assert_eq!(fs::read_to_string(root.join("notes.txt")).unwrap(), "keep me");
}

#[test]
fn unknown_config_key_exits_3() {
    let home = TempDir::new().unwrap();
    stackseed(home.path())
        .args(["config", "get", "defaults.language"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn missing_explicit_config_file_exits_4() {
    let home = TempDir::new().unwrap();
    stackseed(home.path())
        .args(["--config", "does-not-exist.toml", "list"])
        .assert()
        .code(4);
}

#[test]
fn unknown_subcommand_exits_2() {
    let home = TempDir::new().unwrap();
    stackseed(home.path()).arg("deploy").assert().code(2);
}

#[test]
fn verbose_error_output_omits_the_hint() {
    let home = TempDir::new().unwrap();
    stackseed(home.path())
        .args(["-v", "config", "get", "nope"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Use -v / --verbose").not());
}
