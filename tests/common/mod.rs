#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use care_booking::{
    booking::{BookingField, BookingWizard},
    catalog::Catalog,
    clock::FixedClock,
};
use chrono::{Days, NaiveDate};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Calendar day every wizard test treats as "today".
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid fixed date")
}

pub fn days_from_today(days: u64) -> String {
    today()
        .checked_add_days(Days::new(days))
        .expect("date in range")
        .format("%Y-%m-%d")
        .to_string()
}

pub fn wizard() -> BookingWizard {
    BookingWizard::new(Catalog::standard(), Arc::new(FixedClock::new(today())))
}

/// Wizard already past the specialty and doctor steps, sitting on date/time.
pub fn wizard_at_date_time() -> BookingWizard {
    let mut wizard = wizard();
    wizard
        .set_field(BookingField::SpecialtyId, "dermatology")
        .expect("set specialty");
    wizard.advance().expect("leave step 1");
    wizard
        .set_field(BookingField::DoctorId, "dr-brown")
        .expect("set doctor");
    wizard.advance().expect("leave step 2");
    wizard
}

pub fn fill_contact(wizard: &mut BookingWizard) {
    for (field, value) in [
        (BookingField::FirstName, "Ana"),
        (BookingField::LastName, "Silva"),
        (BookingField::Email, "ana@example.com"),
        (BookingField::Phone, "555-0100"),
    ] {
        wizard.set_field(field, value).expect("set contact field");
    }
}

/// Creates an isolated application home for CLI runs.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}
