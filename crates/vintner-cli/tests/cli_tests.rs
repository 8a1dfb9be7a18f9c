use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color and the test database
fn vintner_cmd(db_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vintner").expect("Failed to find vintner binary");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path);
    cmd
}

/// Add a bottle and return its id, read back through `export`.
fn add_bottle(db_path: &Path, name: &str, start: &str) -> String {
    vintner_cmd(db_path)
        .args(["add", "6", "--name", name, "--start-date", start])
        .assert()
        .success();

    let output = vintner_cmd(db_path).arg("export").output().unwrap();
    let bottles: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    bottles
        .iter()
        .find(|b| b["name"] == name)
        .and_then(|b| b["id"].as_str())
        .expect("exported bottle should have an id")
        .to_string()
}

#[test]
fn test_cli_add_bottle() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    vintner_cmd(&db_path)
        .args(["add", "6", "--name", "Cherry", "--start-date", "2024-05-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created bottle with ID:"))
        .stdout(predicate::str::contains("# Cherry"))
        .stdout(predicate::str::contains("Final volume: 25.00 l"))
        .stdout(predicate::str::contains("Подготовка сусла"));
}

#[test]
fn test_cli_add_rejects_zero_mass() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    vintner_cmd(&db_path)
        .args(["add", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid mass"));
}

#[test]
fn test_cli_empty_dashboard_is_default() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    vintner_cmd(&db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("## Завтра"))
        .stdout(predicate::str::contains("Нет задач на завтра."));
}

#[test]
fn test_cli_complete_in_order() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let id = add_bottle(&db_path, "Plum", "2024-05-01");

    vintner_cmd(&db_path)
        .args(["complete", &id, "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("day 1 is still pending"));

    vintner_cmd(&db_path)
        .args(["complete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed day 1"));

    vintner_cmd(&db_path)
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("### Day 1. Подготовка сусла (✓)"))
        .stdout(predicate::str::contains("## Status"));
}

#[test]
fn test_cli_archive_and_dashboard() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let id = add_bottle(&db_path, "Quince", "2024-05-01");

    vintner_cmd(&db_path)
        .args(["archive", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved to archive"));

    vintner_cmd(&db_path)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("## Архив (1)"))
        .stdout(predicate::str::contains("Quince"));

    vintner_cmd(&db_path)
        .args(["unarchive", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored from archive"));
}

#[test]
fn test_cli_delete_requires_confirm() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let id = add_bottle(&db_path, "Apple", "2024-05-01");

    vintner_cmd(&db_path)
        .args(["delete", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--confirm"));

    vintner_cmd(&db_path)
        .args(["delete", &id, "--confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted bottle 'Apple'"));

    vintner_cmd(&db_path)
        .args(["show", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_cli_import_legacy_dump() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let dump = temp_dir.path().join("dump.json");
    std::fs::write(
        &dump,
        r#"{ "bottles_data": [
            { "id": 1714564800000, "name": "Old", "mass": "3", "notes": "kept",
              "startDate": "2024-05-01T12:00:00.000Z", "steps": [] }
        ] }"#,
    )
    .unwrap();

    vintner_cmd(&db_path)
        .arg("import")
        .arg(&dump)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 bottle(s)"));

    vintner_cmd(&db_path)
        .args(["show", "1714564800000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Old (ID: 1714564800000)"))
        .stdout(predicate::str::contains("kept"));
}

#[test]
fn test_cli_export_to_file() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let out = temp_dir.path().join("out.json");
    add_bottle(&db_path, "Pear", "2024-05-01");

    vintner_cmd(&db_path)
        .arg("export")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 bottle(s)"));

    let bottles: Vec<Value> =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(bottles.len(), 1);
    assert_eq!(bottles[0]["steps"].as_array().unwrap().len(), 3);
}
