use assert_cmd::Command;
use chrono::{Datelike, Local};
use predicates::prelude::*;
use std::{error::Error, fs};
use tempfile::TempDir;

fn tracker(temp: &TempDir) -> Result<Command, Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("expense_tracker")?;
    cmd.current_dir(temp.path())
        .env("NO_COLOR", "1")
        .env("EXPENSE_TRACKER_CONFIG", temp.path().join("config.json"))
        .env_remove("EXPENSE_TRACKER_FILE")
        .env_remove("RUST_LOG");
    Ok(cmd)
}

#[test]
fn add_list_and_summary_round_trip() -> Result<(), Box<dyn Error>> {
    let temp = TempDir::new()?;
    let year = Local::now().year();

    tracker(&temp)?
        .args(["add", "--description", "Coffee", "--amount", "3.5"])
        .arg("--date")
        .arg(format!("{year}-01-10"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense added successfully (ID: 1)"));

    tracker(&temp)?
        .args(["add", "--description", "Lunch", "--amount", "1200"])
        .arg("--date")
        .arg(format!("{year}-01-15"))
        .assert()
        .success()
        .stdout(predicate::str::contains("(ID: 2)"));

    tracker(&temp)?
        .arg("list")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Description")
                .and(predicate::str::contains("₱3.50"))
                .and(predicate::str::contains("₱1,200.00")),
        );

    tracker(&temp)?
        .args(["summary", "--month", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total expenses for January: ₱1203.5"));

    assert!(temp.path().join("expenses.json").exists());
    Ok(())
}

#[test]
fn empty_list_reports_no_data() -> Result<(), Box<dyn Error>> {
    let temp = TempDir::new()?;
    tracker(&temp)?
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found."));
    Ok(())
}

#[test]
fn invalid_input_exits_non_zero() -> Result<(), Box<dyn Error>> {
    let temp = TempDir::new()?;
    tracker(&temp)?
        .args(["add", "--description", "   ", "--amount", "4"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: Invalid description"));

    tracker(&temp)?
        .args(["update", "--id", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("At least one of"));
    Ok(())
}

#[test]
fn unknown_ids_are_not_errors() -> Result<(), Box<dyn Error>> {
    let temp = TempDir::new()?;
    tracker(&temp)?
        .args(["delete", "--id", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense ID not found"));
    Ok(())
}

#[test]
fn corruption_aborts_and_preserves_evidence() -> Result<(), Box<dyn Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("expenses.json"), "[oops")?;

    tracker(&temp)?
        .arg("list")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Aborted: Corrupted data detected"));

    tracker(&temp)?
        .arg("list")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Inspection needed"));
    Ok(())
}

#[test]
fn file_flag_selects_storage_location() -> Result<(), Box<dyn Error>> {
    let temp = TempDir::new()?;
    let custom = temp.path().join("books/2024.json");
    tracker(&temp)?
        .arg("--file")
        .arg(&custom)
        .args(["add", "--description", "Book", "--amount", "20"])
        .assert()
        .success();
    assert!(custom.exists());
    assert!(!temp.path().join("expenses.json").exists());
    Ok(())
}

#[test]
fn invalid_month_is_reported() -> Result<(), Box<dyn Error>> {
    let temp = TempDir::new()?;
    tracker(&temp)?
        .args(["summary", "--month", "13"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid month: 13"));
    Ok(())
}

#[test]
fn no_command_prints_help() -> Result<(), Box<dyn Error>> {
    let temp = TempDir::new()?;
    tracker(&temp)?
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
    Ok(())
}
