mod common;

use assert_cmd::Command;
use chrono::{Days, Utc};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

use common::temp_home;

fn script_cmd(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("care_booking_cli").unwrap();
    cmd.env("CARE_BOOKING_CLI_SCRIPT", "1")
        .env("CARE_BOOKING_HOME", home)
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "off");
    cmd
}

fn tomorrow() -> String {
    Utc::now()
        .date_naive()
        .checked_add_days(Days::new(1))
        .unwrap()
        .format("%Y-%m-%d")
        .to_string()
}

#[test]
fn script_mode_books_an_appointment() {
    let home = temp_home();
    let input = format!(
        "book\n\
         set specialty dermatology\n\
         next\n\
         set doctor dr-brown\n\
         next\n\
         set date {}\n\
         set time \"09:00 AM\"\n\
         next\n\
         set firstName Ana\n\
         set lastName Silva\n\
         set email ana@example.com\n\
         set phone 555-0100\n\
         submit\n\
         exit\n",
        tomorrow()
    );

    script_cmd(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Appointment booked."))
        .stdout(contains("Appointment ID: APT-"))
        .stdout(contains("Dr. Emily Brown"));
}

#[test]
fn blocked_steps_explain_the_missing_input() {
    let home = temp_home();
    script_cmd(&home)
        .write_stdin("book\nnext\nset specialty cardiology\nnext\nnext\nback\nback\nexit\n")
        .assert()
        .success()
        .stdout(contains("Cannot continue yet: choose a specialty."))
        .stdout(contains("Cannot continue yet: choose a doctor."))
        .stdout(contains("cannot go back from step 1"));
}

#[test]
fn status_json_exposes_the_draft() {
    let home = temp_home();
    script_cmd(&home)
        .write_stdin("book\nset specialty general\nstatus --json\nexit\n")
        .assert()
        .success()
        .stdout(contains("\"specialtyId\": \"general\""))
        .stdout(contains("\"canAdvance\": true"));
}

#[test]
fn config_changes_are_persisted() {
    let home = temp_home();
    script_cmd(&home)
        .write_stdin("config set booking_horizon_days 7\nconfig set booking_horizon_days 0\nexit\n")
        .assert()
        .success()
        .stdout(contains("Configuration updated: booking_horizon_days = 7"))
        .stdout(contains("between 1 and 365"));

    let json = std::fs::read_to_string(home.join("config.json")).unwrap();
    assert!(json.contains("\"booking_horizon_days\": 7"));
}

#[test]
fn unknown_commands_get_a_suggestion() {
    let home = temp_home();
    script_cmd(&home)
        .write_stdin("bokk\nexit\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `bokk`").and(contains("Suggestion: `book`?")));
}

#[test]
fn symptom_checker_runs_from_the_shell() {
    let home = temp_home();
    script_cmd(&home)
        .write_stdin(
            "symptom start\n\
             symptom toggle chest pain\n\
             symptom next\n\
             symptom severity severe\n\
             symptom next\n\
             symptom duration hours\n\
             symptom analyze\n\
             exit\n",
        )
        .assert()
        .success()
        .stdout(contains("Added Chest Pain (1 selected)."))
        .stdout(contains("High priority"))
        .stdout(contains("Common Cold"));
}
