use std::sync::Arc;

use chrono::{Days, NaiveDate};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::wizard::FlowStep;

use super::{BookingDraft, BookingField, BookingStep};

/// Input format of the date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a gate does not hold. Rendered to explain a disabled control.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateFailure {
    #[error("choose a specialty")]
    SpecialtyMissing,
    #[error("`{0}` is not an offered specialty")]
    UnknownSpecialty(String),
    #[error("choose a doctor")]
    DoctorMissing,
    #[error("`{doctor}` is not available for `{specialty}`")]
    DoctorNotOffered { doctor: String, specialty: String },
    #[error("choose a date")]
    DateMissing,
    #[error("`{0}` is not a valid date (use YYYY-MM-DD)")]
    DateUnparseable(String),
    #[error("date must be on or after {earliest}")]
    DateTooEarly { earliest: NaiveDate },
    #[error("date must be on or before {latest}")]
    DateTooLate { latest: NaiveDate },
    #[error("choose a time slot")]
    TimeMissing,
    #[error("`{0}` is not an available time slot")]
    UnknownTimeSlot(String),
    #[error("{} is required", .0.label())]
    Missing(BookingField),
}

/// Inclusive range of dates a booking may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

impl DateWindow {
    /// Tomorrow through `today + horizon_days`.
    pub fn after(today: NaiveDate, horizon_days: u32) -> Self {
        Self {
            earliest: today.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX),
            latest: today
                .checked_add_days(Days::new(u64::from(horizon_days)))
                .unwrap_or(NaiveDate::MAX),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.earliest <= date && date <= self.latest
    }
}

/// Per-step predicates evaluated against a draft and the current day.
///
/// Nothing is cached: callers pass `today` on every check so a session that
/// crosses midnight sees the window move.
#[derive(Debug, Clone)]
pub struct StepGates {
    catalog: Arc<Catalog>,
    horizon_days: u32,
}

impl StepGates {
    pub fn new(catalog: Arc<Catalog>, horizon_days: u32) -> Self {
        Self {
            catalog,
            horizon_days,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    pub fn date_window(&self, today: NaiveDate) -> DateWindow {
        DateWindow::after(today, self.horizon_days)
    }

    /// Evaluates the single gate owned by `step`.
    pub fn check(
        &self,
        step: BookingStep,
        draft: &BookingDraft,
        today: NaiveDate,
    ) -> Result<(), GateFailure> {
        match step {
            BookingStep::Specialty => self.check_specialty(draft),
            BookingStep::Doctor => self.check_doctor(draft),
            BookingStep::DateTime => self.check_date_time(draft, today),
            BookingStep::Contact => check_contact(draft),
        }
    }

    /// Submission re-checks every step in order, reporting the first failure.
    ///
    /// This is stricter than the contact gate alone: fields stay editable on
    /// every step, and a date chosen earlier falls out of the window once the
    /// day it was picked on has passed.
    pub fn check_submission(
        &self,
        draft: &BookingDraft,
        today: NaiveDate,
    ) -> Result<(), GateFailure> {
        BookingStep::ORDER
            .iter()
            .try_for_each(|step| self.check(*step, draft, today))
    }

    fn check_specialty(&self, draft: &BookingDraft) -> Result<(), GateFailure> {
        let specialty = draft.specialty_id.trim();
        if specialty.is_empty() {
            return Err(GateFailure::SpecialtyMissing);
        }
        if self.catalog.specialty(specialty).is_none() {
            return Err(GateFailure::UnknownSpecialty(specialty.to_string()));
        }
        Ok(())
    }

    fn check_doctor(&self, draft: &BookingDraft) -> Result<(), GateFailure> {
        let doctor = draft.doctor_id.trim();
        if doctor.is_empty() {
            return Err(GateFailure::DoctorMissing);
        }
        let specialty = draft.specialty_id.trim();
        if !self.catalog.offers_doctor(specialty, doctor) {
            return Err(GateFailure::DoctorNotOffered {
                doctor: doctor.to_string(),
                specialty: specialty.to_string(),
            });
        }
        Ok(())
    }

    fn check_date_time(&self, draft: &BookingDraft, today: NaiveDate) -> Result<(), GateFailure> {
        let raw_date = draft.date.trim();
        if raw_date.is_empty() {
            return Err(GateFailure::DateMissing);
        }
        let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT)
            .map_err(|_| GateFailure::DateUnparseable(raw_date.to_string()))?;
        let window = self.date_window(today);
        if date < window.earliest {
            return Err(GateFailure::DateTooEarly {
                earliest: window.earliest,
            });
        }
        if date > window.latest {
            return Err(GateFailure::DateTooLate {
                latest: window.latest,
            });
        }

        let time = draft.time.trim();
        if time.is_empty() {
            return Err(GateFailure::TimeMissing);
        }
        if !self.catalog.has_time_slot(time) {
            return Err(GateFailure::UnknownTimeSlot(time.to_string()));
        }
        Ok(())
    }
}

fn check_contact(draft: &BookingDraft) -> Result<(), GateFailure> {
    const REQUIRED: [BookingField; 4] = [
        BookingField::FirstName,
        BookingField::LastName,
        BookingField::Email,
        BookingField::Phone,
    ];
    match REQUIRED.into_iter().find(|field| !draft.is_set(*field)) {
        Some(field) => Err(GateFailure::Missing(field)),
        None => Ok(()),
    }
}
