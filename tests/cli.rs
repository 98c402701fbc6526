use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tally(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.env("TALLY_CLI_DATA_DIR", dir.path());
    cmd
}

fn created_id(output: &[u8]) -> String {
    let stdout = String::from_utf8_lossy(output);
    stdout
        .lines()
        .find_map(|line| line.strip_prefix("Created transaction: "))
        .map(|id| id.trim().to_string())
        .expect("transaction id in output")
}

#[test]
fn calc_respects_precedence() {
    let dir = TempDir::new().unwrap();
    tally(&dir)
        .args(["calc", "2+3*4"])
        .assert()
        .success()
        .stdout("14\n");
}

#[test]
fn calc_reports_division_by_zero() {
    let dir = TempDir::new().unwrap();
    tally(&dir)
        .args(["calc", "10/0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot divide by zero"));
}

#[test]
fn calc_rounds_to_cents_on_request() {
    let dir = TempDir::new().unwrap();
    tally(&dir)
        .args(["calc", "--money", "-10/3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-$3.33 (-333 cents)"));
}

#[test]
fn held_transaction_can_be_confirmed() {
    let dir = TempDir::new().unwrap();

    let output = tally(&dir)
        .args([
            "txn", "add", "Checking", "-12.50-2.5", "-D", "Parking", "--date", "2024-05-01",
            "--pending",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let id = created_id(&output.stdout);

    tally(&dir)
        .args(["balance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-$15.00 (1)"));

    tally(&dir)
        .args(["txn", "confirm", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Confirmed transaction"));

    tally(&dir)
        .args(["txn", "confirm", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not held pending"));

    tally(&dir)
        .args(["balance", "Checking"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-$15.00").and(predicate::str::contains("(1)").not()));
}

#[test]
fn future_transaction_cannot_be_confirmed_yet() {
    let dir = TempDir::new().unwrap();

    let output = tally(&dir)
        .args([
            "txn", "add", "Checking", "-99", "--date", "2999-01-01", "--pending",
        ])
        .output()
        .unwrap();
    let id = created_id(&output.stdout);

    tally(&dir)
        .args(["txn", "confirm", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be confirmed yet"));

    tally(&dir)
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending (1)").and(predicate::str::contains("Upcoming")));
}

#[test]
fn zero_amount_is_rejected() {
    let dir = TempDir::new().unwrap();
    tally(&dir)
        .args(["txn", "add", "Checking", "5-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be zero"));
}

#[test]
fn delete_and_restore_through_trash() {
    let dir = TempDir::new().unwrap();

    let output = tally(&dir)
        .args(["txn", "add", "Cash", "-4", "-D", "Snack", "--date", "2024-01-10"])
        .output()
        .unwrap();
    let id = created_id(&output.stdout);

    tally(&dir).args(["txn", "delete", &id]).assert().success();

    tally(&dir)
        .args(["txn", "trash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Trash (1)").and(predicate::str::contains("Snack")));

    tally(&dir)
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout("No transactions found.\n");

    tally(&dir).args(["txn", "restore", &id]).assert().success();

    tally(&dir)
        .args(["history", "--limit", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("RESTORE Transaction"));
}

#[test]
fn recurring_sync_generates_transactions() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args([
            "recurring", "add", "Checking", "-1200", "--every", "monthly", "--start",
            "2024-01-01", "--end", "2024-03-15", "-D", "Rent",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created recurring transaction"));

    tally(&dir)
        .args(["recurring", "sync"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created 3 transaction(s)"));

    tally(&dir)
        .args(["recurring", "sync"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created 0 transaction(s)"));

    tally(&dir)
        .args(["balance", "Checking"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-$3600.00"));
}

#[test]
fn unknown_transaction_is_reported() {
    let dir = TempDir::new().unwrap();
    tally(&dir)
        .args(["txn", "show", "txn-deadbeef"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Transaction not found"));
}

#[test]
fn watch_syncs_after_configured_debounce() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.json"), r#"{"sync_debounce_ms": 100}"#).unwrap();

    tally(&dir)
        .args([
            "recurring", "add", "Checking", "-1200", "--every", "monthly", "--start",
            "2024-01-01", "--end", "2024-03-15", "-D", "Rent",
        ])
        .assert()
        .success();

    tally(&dir)
        .arg("watch")
        .write_stdin("background\nactive\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("created 3 transaction(s)"));

    tally(&dir)
        .args(["balance", "Checking"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-$3600.00"));
}

#[test]
fn invalid_date_format_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.json"), r#"{"date_format": "%Y-%Q"}"#).unwrap();

    tally(&dir)
        .args(["txn", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date_format"));
}

#[test]
fn launch_sync_generates_before_listing() {
    let dir = TempDir::new().unwrap();

    tally(&dir)
        .args([
            "recurring", "add", "Cash", "-25", "--every", "weekly", "--start", "2024-02-01",
            "--end", "2024-02-20", "-D", "Allowance",
        ])
        .assert()
        .success();

    tally(&dir)
        .env("RUST_LOG", "debug")
        .args(["txn", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Confirmed (3)").and(predicate::str::contains("Allowance")))
        .stderr(predicate::str::contains("Launch sync created 3 transaction(s)"));
}
