use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::{prelude::PredicateBooleanExt, str::contains};
use std::{fs, path::Path};
use tempfile::tempdir;

const DOCUMENT_FILE: &str = "expense_tracker_multi_v1.json";

fn cli(home: impl AsRef<Path>) -> Command {
    let mut cmd = Command::cargo_bin("expense_tracker_cli").unwrap();
    cmd.env("EXPENSE_TRACKER_HOME", home.as_ref())
        .env("NO_COLOR", "1")
        .env("TZ", "UTC")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn script_mode_records_and_summarizes() {
    let home = tempdir().unwrap();
    let script = "\
add Salary 3000 income Salary 2025-01-03
add Rent 900 expense Bills 2025-01-05
add \"Pizza night\" 45.50 expense 2025-01-09
summary
exit
summary
";

    cli(home.path())
        .write_stdin(script)
        .assert()
        .success()
        .stdout(
            contains("Added income `Salary` $3,000.00 in Salary")
                .and(contains("Added expense `Pizza night` $45.50 in Food"))
                .and(contains("Balance:          $2,054.50"))
                .and(contains("Total expense:    $945.50")),
        );

    let stored = fs::read_to_string(home.path().join(DOCUMENT_FILE)).unwrap();
    assert!(stored.contains("\"currentProfile\": \"Me\""));
    assert!(stored.contains("\"type\": \"income\""));
}

#[test]
fn single_command_mode_persists_between_runs() {
    let home = tempdir().unwrap();
    cli(home.path())
        .args(["add", "Uber ride", "18", "expense"])
        .assert()
        .success()
        .stdout(contains("in Transport"));

    cli(home.path())
        .args(["list", "--search", "uber"])
        .assert()
        .success()
        .stdout(contains("Uber ride").and(contains("Page 1 of 1 (1 matching)")));
}

#[test]
fn unknown_command_suggests_closest_match() {
    let home = tempdir().unwrap();
    cli(home.path())
        .write_stdin("sumary\n")
        .assert()
        .failure()
        .stdout(contains("Unknown command `sumary`").and(contains("Did you mean `summary`?")));
}

#[test]
fn invalid_input_is_reported_and_script_continues() {
    let home = tempdir().unwrap();
    let script = "\
add Lunch abc expense
add \"\" 10 expense
add Lunch 0 expense
add Refund -50 expense
quick refund -20
months -2
add Lunch 12 expense Food 2025-02-01
list
";
    cli(home.path())
        .write_stdin(script)
        .assert()
        .failure()
        .stdout(
            contains("`abc` is not a valid amount")
                .and(contains("Enter a name"))
                .and(contains("Enter a valid positive amount"))
                .and(contains("Window size must not be negative, got -2"))
                .and(contains("Page 1 of 1 (1 matching)")),
        );
}

#[test]
fn unparsable_line_fails_the_run_but_later_lines_execute() {
    let home = tempdir().unwrap();
    cli(home.path())
        .write_stdin("add \"Lunch 12 expense\nsummary\n")
        .assert()
        .failure()
        .stdout(contains("Could not parse line").and(contains("Transactions:     0")));
}

#[test]
fn budgets_goals_and_assistant_answers() {
    let home = tempdir().unwrap();
    let script = "\
goal Holiday 1000
budget Food 100
add Salary 400 income Salary 2025-03-01
add Groceries 150 expense Food 2025-03-02
budgets
goals
ask What is my balance?
ask how much spent on food
suggest Netflix subscription
";
    cli(home.path())
        .write_stdin(script)
        .assert()
        .success()
        .stdout(
            contains("Food is over budget by $50.00")
                .and(contains("150%"))
                .and(contains("40%"))
                .and(contains("Your current balance is $250.00."))
                .and(contains("You spent $150.00 on food."))
                .and(contains("Suggested category: Entertainment")),
        );
}

#[test]
fn profiles_are_isolated_and_clear_needs_confirmation() {
    let home = tempdir().unwrap();
    let script = "\
add Coffee 4 expense Food 2025-01-01
profile Work
add Laptop 1200 expense Shopping 2025-01-02
summary
profile
clear
clear --yes
profile Me
summary
";
    cli(home.path())
        .write_stdin(script)
        .assert()
        .failure()
        .stdout(
            contains("Active profile: Work")
                .and(contains("Total expense:    $1,200.00"))
                .and(contains("* Work"))
                .and(contains("Re-run as `clear --yes`"))
                .and(contains("Cleared profile Work"))
                .and(contains("Total expense:    $4.00")),
        );
}

#[test]
fn export_and_import_round_trip_between_profiles() {
    let home = tempdir().unwrap();
    let json_path = home.path().join("me.json");
    let csv_path = home.path().join("me.csv");
    let script = format!(
        "add Salary 2000 income Salary 2025-01-01\n\
         add Metro 30 expense Transport 2025-01-02\n\
         export-json {json}\n\
         export-csv {csv}\n\
         profile Copy\n\
         import {json}\n\
         import {json}\n\
         summary\n",
        json = json_path.display(),
        csv = csv_path.display()
    );
    cli(home.path())
        .write_stdin(script)
        .assert()
        .success()
        .stdout(
            contains("Imported 2 transactions")
                .and(contains("Imported 0 transactions"))
                .and(contains("Skipped 2 entries that are already in this profile"))
                .and(contains("Balance:          $1,970.00")),
        );

    let csv = fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("\"id\",\"name\",\"amount\",\"type\",\"category\",\"timestamp\""));
    assert!(csv.contains("\"Metro\",\"30\",\"expense\",\"Transport\""));
}

#[test]
fn saves_leave_backups_behind() {
    let home = tempdir().unwrap();
    let script = "\
add One 1 expense
add Two 2 expense
backups
";
    cli(home.path())
        .write_stdin(script)
        .assert()
        .success()
        .stdout(contains("Backups").and(contains("expense_tracker_multi_v1_")));
}

#[test]
fn config_changes_are_persisted() {
    let home = tempdir().unwrap();
    cli(home.path())
        .args(["config", "currency", "eur"])
        .assert()
        .success()
        .stdout(contains("Set currency = EUR"));

    cli(home.path())
        .write_stdin("config page_size 0\nadd Tea 3 expense Food 2025-01-01\n")
        .assert()
        .failure()
        .stdout(contains("Invalid value `0` for `page_size`").and(contains("3.00 EUR")));

    assert!(home.path().join("config").join("config.json").exists());
}

#[test]
fn dates_and_months_follow_the_local_time_zone() {
    let home = tempdir().unwrap();
    cli(home.path())
        .env("TZ", "IST-5:30")
        .write_stdin("add Chai 2 expense Food 2025-02-01\nlist --month 2 --year 2025\n")
        .assert()
        .success()
        .stdout(contains("2025-02-01").and(contains("Page 1 of 1 (1 matching)")));

    cli(home.path())
        .env("TZ", "IST-5:30")
        .args(["list", "--month", "1", "--year", "2025"])
        .assert()
        .success()
        .stdout(contains("No transactions found."));

    // Local midnight is stored as the UTC instant 2025-01-31T18:30:00Z.
    let stored = fs::read_to_string(home.path().join(DOCUMENT_FILE)).unwrap();
    assert!(stored.contains("1738348200000"));
}

#[test]
fn locale_changes_number_separators() {
    let home = tempdir().unwrap();
    cli(home.path())
        .write_stdin(
            "config locale de-DE\nconfig currency eur\nadd Miete 1234.5 expense Bills 2025-01-05\nconfig history_months 1201\n",
        )
        .assert()
        .failure()
        .stdout(
            contains("Amounts now display as 1.234,50 USD")
                .and(contains("1.234,50 EUR"))
                .and(contains("Invalid value `1201` for `history_months`")),
        );
}

#[test]
fn help_and_version_describe_the_tool() {
    let home = tempdir().unwrap();
    cli(home.path())
        .write_stdin("help\nhelp forecast\nversion\n")
        .assert()
        .success()
        .stdout(
            contains("Available commands")
                .and(contains("Usage: forecast [months]"))
                .and(contains("Expense Tracker")),
        );
}

#[test]
fn export_json_writes_the_active_profile() {
    let home = assert_fs::TempDir::new().unwrap();
    let export = home.child("rent.json");
    cli(home.path())
        .write_stdin(format!(
            "add Rent 900 expense Bills 2025-01-05\nexport-json {}\n",
            export.path().display()
        ))
        .assert()
        .success();

    export.assert(predicates::path::exists());
    export.assert(contains("\"name\": \"Rent\""));
    export.assert(contains("\"category\": \"Bills\""));
    home.child(DOCUMENT_FILE).assert(predicates::path::is_file());
    home.close().unwrap();
}

#[test]
fn unreadable_document_is_reported_and_kept_aside() {
    let home = tempdir().unwrap();
    fs::write(home.path().join(DOCUMENT_FILE), "{ broken").unwrap();

    cli(home.path())
        .arg("summary")
        .assert()
        .success()
        .stdout(contains("Stored data could not be read"))
        .stderr(contains("stored document is malformed"));

    for name in ["One", "Two", "Three", "Four", "Five", "Six", "Seven"] {
        cli(home.path()).args(["add", name, "1", "expense"]).assert().success();
    }
    let preserved: Vec<_> = fs::read_dir(home.path())
        .unwrap()
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("corrupt"))
        .collect();
    assert_eq!(preserved.len(), 1);
    assert_eq!(fs::read_to_string(&preserved[0]).unwrap(), "{ broken");
}
