use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Binary isolated from the user's config and database
fn trainer(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("coach-trainer").unwrap();
    cmd.env("COACH_TRAINER_CONFIG", home.path().join("config.toml"))
        .env("COACH_TRAINER_DB_PATH", home.path().join("data"))
        .env_remove("COACH_TRAINER_SNAPSHOT")
        .env("RUST_LOG", "warn");
    cmd
}

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("coach-trainer").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Trainer dashboard"))
        .stdout(predicate::str::contains("dashboard"))
        .stdout(predicate::str::contains("templates"));
}

#[test]
fn test_version_command() {
    let mut cmd = Command::cargo_bin("coach-trainer").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_completions_command() {
    let mut cmd = Command::cargo_bin("coach-trainer").unwrap();
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_coach-trainer"));
}

#[test]
fn test_today_from_snapshot() {
    let home = TempDir::new().unwrap();

    trainer(&home)
        .arg("--snapshot")
        .arg(fixture("today.json"))
        .arg("today")
        .assert()
        .success()
        .stdout(predicate::str::contains("Marta"))
        .stdout(predicate::str::contains("1/3"))
        .stdout(predicate::str::contains("completion rate 50%"))
        .stdout(predicate::str::contains("Ana Lopez"))
        .stdout(predicate::str::contains("Studio A"))
        .stdout(predicate::str::contains("9:00 AM"));
}

#[test]
fn test_today_with_missing_snapshot_fails() {
    let home = TempDir::new().unwrap();

    trainer(&home)
        .arg("--snapshot")
        .arg(home.path().join("nope.json"))
        .arg("today")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to load data"));
}

#[test]
fn test_clients_search() {
    let home = TempDir::new().unwrap();

    trainer(&home)
        .arg("--snapshot")
        .arg(fixture("today.json"))
        .args(["clients", "--search", "ana"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Your Clients (2)"))
        .stdout(predicate::str::contains("Ana Lopez"))
        .stdout(predicate::str::contains("Beto Ruiz").not());
}

#[test]
fn test_template_import_show_delete() {
    let home = TempDir::new().unwrap();

    trainer(&home)
        .args(["templates", "import"])
        .arg(fixture("templates.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 template(s)"));

    trainer(&home)
        .args(["templates", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Leg Day"))
        .stdout(predicate::str::contains("Push Day"));

    trainer(&home)
        .args(["templates", "show", "t-push"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bench Press"))
        .stdout(predicate::str::contains("10 reps"))
        .stdout(predicate::str::contains("1h 15m"));

    trainer(&home)
        .args(["templates", "delete", "t-legs", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Template deleted successfully"));

    trainer(&home)
        .args(["templates", "show", "t-legs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template Not Found"));
}

#[test]
fn test_config_init_respects_force() {
    let home = TempDir::new().unwrap();

    trainer(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration initialized"));

    assert!(home.path().join("config.toml").exists());

    trainer(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    trainer(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("base_url"));
}
