mod common;

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

/// Runs the shell in script mode against `home`, pinned to 2024-06-15.
fn tally(home: &Path, input: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("tally_cli")
        .unwrap()
        .env("TALLY_HOME", home)
        .env("TALLY_CLI_SCRIPT", "1")
        .env("TALLY_CLI_TODAY", "2024-06-15")
        .env("NO_COLOR", "1")
        .write_stdin(input.to_string())
        .assert()
}

#[test]
fn help_lists_commands() {
    let home = common::temp_base();
    tally(&home, "help\nexit\n")
        .success()
        .stdout(contains("Available commands"))
        .stdout(contains("calendar"))
        .stdout(contains("expand"));
}

#[test]
fn help_groups_commands_and_shows_period_forms() {
    let home = common::temp_base();
    tally(&home, "help\nhelp cal\nhelp activity\n")
        .success()
        .stdout(contains("Views:").and(contains("Records:")).and(contains("Shell:")))
        .stdout(contains("Help: calendar"))
        .stdout(contains("Also: cal"))
        .stdout(contains("month <YYYY-MM> | custom <from> <to>"))
        .stdout(contains("<amount> is a positive magnitude; income or expense decides the sign"));
}

#[test]
fn quit_alias_stops_processing() {
    let home = common::temp_base();
    tally(&home, "quit\nhelp\n")
        .success()
        .stdout(contains("Available commands").not());
}

#[test]
fn unknown_command_gets_a_suggestion() {
    let home = common::temp_base();
    tally(&home, "calender\n")
        .success()
        .stdout(contains("Unknown command `calender`"))
        .stdout(contains("Suggestion: `calendar`?"));
}

#[test]
fn bad_arguments_print_usage_hint() {
    let home = common::temp_base();
    tally(&home, "period month\nactivity add expense -4 Coffee\n")
        .success()
        .stdout(contains("usage: month <YYYY-MM>"))
        .stdout(contains("invalid amount `-4`; amounts are positive magnitudes"))
        .stdout(contains("Use `help <command>` for usage details."));
}

#[test]
fn period_resolves_selected_month() {
    let home = common::temp_base();
    tally(&home, "period month 2024-02\nperiod last-week\n")
        .success()
        .stdout(contains("2024-02-01 to 2024-02-29 (29 days)"))
        .stdout(contains("Last week: 2024-06-03 to 2024-06-09 (7 days)"));
}

#[test]
fn activity_combines_bills_and_transactions() {
    let home = common::temp_base();
    let script = "\
bills add Rent 900 monthly 2024-01-05 --category Housing
activity add expense 45.50 Weekly groceries --date 2024-06-03 --category Food
activity
calendar
";
    tally(&home, script)
        .success()
        .stdout(contains("Recurring bill `Rent` added"))
        .stdout(contains("Recorded expense of 45.50 USD on 2024-06-03"))
        .stdout(contains("Weekly groceries [Food]"))
        .stdout(contains("Expense 945.50 USD"))
        .stdout(contains("Spending by category"))
        .stdout(contains("Housing"));

    tally(&home, "bills\n")
        .success()
        .stdout(contains("Rent"))
        .stdout(contains("next 2024-07-05"));
}

#[test]
fn activity_json_is_machine_readable() {
    let home = common::temp_base();
    let output = tally(&home, "activity last-month --json\n")
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("valid json");
    assert_eq!(value["period"]["from"], "2024-05-01");
    assert_eq!(value["period"]["to"], "2024-05-31");
    assert_eq!(value["period"]["selector"], "last-month");
    assert_eq!(value["activities"].as_array().map(Vec::len), Some(0));
}

#[test]
fn saved_plan_shows_up_in_activity() {
    let home = common::temp_base();
    let script = "\
plan expense 100 quarterly 2024-01-15 Insurance --save
activity custom 2024-01-01 2024-12-31
";
    tally(&home, script)
        .success()
        .stdout(contains("Saved 4 planned entries."))
        .stdout(contains("Insurance (4/4)"))
        .stdout(contains("Expense 400.00 USD"));
}

#[test]
fn oversized_plan_horizon_is_reported_not_fatal() {
    let home = common::temp_base();
    tally(
        &home,
        "plan expense 1 monthly 2024-01-01 Rent --months 2147483647\nperiod today\n",
    )
    .success()
    .stdout(contains("exceeds the maximum of 1200"))
    .stdout(contains("Today: 2024-06-15 to 2024-06-15"));
}

#[test]
fn goals_can_be_added_and_advised() {
    let home = common::temp_base();
    let script = "\
goals add Trip 1200 --saved 300 --deadline 2024-12-31
goals
goals advise trip
";
    tally(&home, script)
        .success()
        .stdout(contains("Goal `Trip` added."))
        .stdout(contains("300.00 USD of 1200.00 USD (25%)"))
        .stdout(contains("Save 150.00 per month to reach Trip by 2024-12-31."));
}

#[test]
fn config_changes_persist_between_runs() {
    let home = common::temp_base();
    tally(&home, "config set currency eur\nconfig set default_period last-week\n")
        .success()
        .stdout(contains("Set currency to EUR."));

    let saved = fs::read_to_string(home.join("config.json")).expect("config written");
    assert!(saved.contains("\"EUR\""));

    tally(&home, "config show\n")
        .success()
        .stdout(contains("EUR"))
        .stdout(contains("last-week"));

    tally(&home, "config set currency euro\n")
        .success()
        .stdout(contains("three-letter").and(contains("hint:")));
}

#[test]
fn exit_stops_processing() {
    let home = common::temp_base();
    tally(&home, "exit\nhelp\n")
        .success()
        .stdout(contains("Available commands").not());
}
