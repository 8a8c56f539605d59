use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Doctor};
use crate::clock::Clock;
use crate::config::DEFAULT_BOOKING_HORIZON_DAYS;
use crate::wizard::{Advance, FlowStep, WizardAction, WizardError};

use super::{BookingDraft, BookingField, BookingStep, DateWindow, GateFailure, StepGates};

pub type BookingAdvance = Advance<BookingStep, GateFailure>;

/// Result of a submission attempt made from the contact step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The finished draft, handed to the confirmation collaborator.
    Completed(BookingDraft),
    Blocked(GateFailure),
}

/// State machine behind the step-by-step appointment form.
///
/// Holds the active step and the accumulated draft for a single booking
/// session. Gate failures are ordinary outcomes; only contract violations
/// (moving past either end, submitting early, acting on a closed wizard)
/// come back as [`WizardError`].
pub struct BookingWizard {
    gates: StepGates,
    clock: Arc<dyn Clock>,
    step: BookingStep,
    draft: BookingDraft,
    closed: bool,
}

impl BookingWizard {
    pub fn new(catalog: Arc<Catalog>, clock: Arc<dyn Clock>) -> Self {
        Self::with_horizon(catalog, clock, DEFAULT_BOOKING_HORIZON_DAYS)
    }

    pub fn with_horizon(catalog: Arc<Catalog>, clock: Arc<dyn Clock>, horizon_days: u32) -> Self {
        debug!(horizon_days, "booking wizard started");
        Self {
            gates: StepGates::new(catalog, horizon_days),
            clock,
            step: BookingStep::first(),
            draft: BookingDraft::default(),
            closed: false,
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn catalog(&self) -> &Catalog {
        self.gates.catalog()
    }

    /// Selectable dates as of now.
    pub fn date_window(&self) -> DateWindow {
        self.gates.date_window(self.clock.today())
    }

    /// Doctors offered for the currently selected specialty.
    pub fn doctors_on_offer(&self) -> &[Doctor] {
        self.gates.catalog().doctors_for(self.draft.specialty_id.trim())
    }

    /// Writes `value` into `field`, whichever step is active.
    ///
    /// Changing the specialty drops a chosen doctor the new specialty does
    /// not offer.
    pub fn set_field(&mut self, field: BookingField, value: &str) -> Result<(), WizardError> {
        self.ensure_open()?;
        let value = value.trim();

        if field == BookingField::SpecialtyId && self.draft.specialty_id != value {
            let doctor = self.draft.doctor_id.trim();
            if !doctor.is_empty() && !self.gates.catalog().offers_doctor(value, doctor) {
                debug!(doctor, specialty = value, "specialty changed; clearing doctor");
                self.draft.doctor_id.clear();
            }
        }

        let slot = self.draft.slot_mut(field);
        if slot.as_str() != value {
            *slot = value.to_string();
            debug!(field = %field, step = self.step.number(), "draft field updated");
        }
        Ok(())
    }

    /// Same as [`Self::set_field`] but resolves the field from its presentation name.
    pub fn set_field_named(&mut self, name: &str, value: &str) -> Result<BookingField, WizardError> {
        let field: BookingField = name.parse()?;
        self.set_field(field, value)?;
        Ok(field)
    }

    /// Reason the active step's gate fails, if it does.
    pub fn advance_blocker(&self) -> Option<GateFailure> {
        self.gates
            .check(self.step, &self.draft, self.clock.today())
            .err()
    }

    pub fn can_advance(&self) -> bool {
        !self.closed && !self.step.is_last() && self.advance_blocker().is_none()
    }

    /// Reason submission is not possible yet, if the wizard is on the contact step.
    pub fn submit_blocker(&self) -> Option<GateFailure> {
        self.gates
            .check_submission(&self.draft, self.clock.today())
            .err()
    }

    pub fn can_submit(&self) -> bool {
        !self.closed && self.step.is_last() && self.submit_blocker().is_none()
    }

    pub fn advance(&mut self) -> Result<BookingAdvance, WizardError> {
        self.ensure_open()?;
        let Some(next) = self.step.next() else {
            return Err(self.violation(WizardAction::Advance));
        };
        if let Some(reason) = self.advance_blocker() {
            debug!(step = self.step.number(), %reason, "advance blocked");
            return Ok(Advance::Blocked(reason));
        }
        debug!(from = self.step.number(), to = next.number(), "advanced");
        self.step = next;
        Ok(Advance::Moved(next))
    }

    /// Moves back one step. Values entered on later steps are kept.
    pub fn retreat(&mut self) -> Result<BookingStep, WizardError> {
        self.ensure_open()?;
        let Some(previous) = self.step.previous() else {
            return Err(self.violation(WizardAction::Retreat));
        };
        debug!(from = self.step.number(), to = previous.number(), "retreated");
        self.step = previous;
        Ok(previous)
    }

    /// Completes the booking from the contact step and closes the wizard.
    pub fn submit(&mut self) -> Result<Submission, WizardError> {
        self.ensure_open()?;
        if !self.step.is_last() {
            return Err(self.violation(WizardAction::Submit));
        }
        if let Some(reason) = self.submit_blocker() {
            debug!(%reason, "submission blocked");
            return Ok(Submission::Blocked(reason));
        }
        self.closed = true;
        let draft = std::mem::take(&mut self.draft);
        info!(
            specialty = %draft.specialty_id,
            doctor = %draft.doctor_id,
            date = %draft.date,
            "booking submitted"
        );
        Ok(Submission::Completed(draft))
    }

    fn ensure_open(&self) -> Result<(), WizardError> {
        if self.closed {
            warn!("operation attempted on a completed booking wizard");
            Err(WizardError::Closed)
        } else {
            Ok(())
        }
    }

    fn violation(&self, action: WizardAction) -> WizardError {
        let err = WizardError::invalid_state(action, self.step);
        warn!(%err, "booking wizard contract violation");
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;

    fn wizard() -> BookingWizard {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        BookingWizard::new(Catalog::standard(), Arc::new(FixedClock::new(today)))
    }

    fn wizard_at_contact() -> BookingWizard {
        let mut wizard = wizard();
        wizard.set_field(BookingField::SpecialtyId, "general").unwrap();
        wizard.advance().unwrap();
        wizard.set_field(BookingField::DoctorId, "dr-white").unwrap();
        wizard.advance().unwrap();
        wizard.set_field(BookingField::Date, "2026-10-25").unwrap();
        wizard.set_field(BookingField::Time, "02:30 PM").unwrap();
        wizard.advance().unwrap();
        assert_eq!(wizard.step(), BookingStep::Contact);
        wizard
    }

    #[test]
    fn starts_on_specialty_with_empty_draft() {
        let wizard = wizard();
        assert_eq!(wizard.step(), BookingStep::Specialty);
        assert_eq!(wizard.draft(), &BookingDraft::default());
        assert!(!wizard.can_advance());
        assert!(!wizard.can_submit());
    }

    #[test]
    fn blocked_advance_leaves_step_unchanged() {
        let mut wizard = wizard();
        let outcome = wizard.advance().unwrap();
        assert_eq!(outcome, Advance::Blocked(GateFailure::SpecialtyMissing));
        assert_eq!(wizard.step(), BookingStep::Specialty);
    }

    #[test]
    fn retreat_keeps_later_values() {
        let mut wizard = wizard_at_contact();
        wizard.set_field(BookingField::FirstName, "Ana").unwrap();
        assert_eq!(wizard.retreat().unwrap(), BookingStep::DateTime);
        assert_eq!(wizard.retreat().unwrap(), BookingStep::Doctor);
        assert_eq!(wizard.draft().first_name, "Ana");
        assert_eq!(wizard.draft().time, "02:30 PM");
        assert!(wizard.advance().unwrap().is_moved());
        assert!(wizard.advance().unwrap().is_moved());
        assert_eq!(wizard.step(), BookingStep::Contact);
    }

    #[test]
    fn submit_before_contact_step_is_invalid_state() {
        let mut wizard = wizard();
        assert_eq!(
            wizard.submit(),
            Err(WizardError::InvalidState {
                action: WizardAction::Submit,
                step: 1,
                label: "Choose Specialty",
            })
        );
    }

    #[test]
    fn submit_with_missing_contact_is_blocked() {
        let mut wizard = wizard_at_contact();
        wizard.set_field(BookingField::FirstName, "Ana").unwrap();
        assert_eq!(
            wizard.submit().unwrap(),
            Submission::Blocked(GateFailure::Missing(BookingField::LastName))
        );
        assert!(!wizard.is_closed());
        assert_eq!(wizard.draft().first_name, "Ana");
    }

    #[test]
    fn editing_an_earlier_field_on_contact_step_blocks_submission() {
        let mut wizard = wizard_at_contact();
        for (field, value) in [
            (BookingField::FirstName, "Ana"),
            (BookingField::LastName, "Silva"),
            (BookingField::Email, "ana@example.com"),
            (BookingField::Phone, "555-0100"),
        ] {
            wizard.set_field(field, value).unwrap();
        }
        assert!(wizard.can_submit());
        wizard.set_field(BookingField::SpecialtyId, "pediatrics").unwrap();
        assert_eq!(wizard.draft().doctor_id, "");
        assert!(!wizard.can_submit());
        assert_eq!(wizard.submit_blocker(), Some(GateFailure::DoctorMissing));
    }

    #[test]
    fn completed_wizard_rejects_further_operations() {
        let mut wizard = wizard_at_contact();
        for (field, value) in [
            (BookingField::FirstName, "Ana"),
            (BookingField::LastName, "Silva"),
            (BookingField::Email, "ana@example.com"),
            (BookingField::Phone, "555-0100"),
        ] {
            wizard.set_field(field, value).unwrap();
        }
        assert!(matches!(wizard.submit(), Ok(Submission::Completed(_))));
        assert!(wizard.is_closed());
        assert!(!wizard.can_submit());
        assert_eq!(wizard.submit(), Err(WizardError::Closed));
        assert_eq!(wizard.retreat(), Err(WizardError::Closed));
        assert_eq!(
            wizard.set_field(BookingField::Reason, "again"),
            Err(WizardError::Closed)
        );
    }

    #[test]
    fn same_specialty_keeps_doctor() {
        let mut wizard = wizard();
        wizard.set_field(BookingField::SpecialtyId, "cardiology").unwrap();
        wizard.set_field(BookingField::DoctorId, "dr-williams").unwrap();
        wizard.set_field(BookingField::SpecialtyId, "cardiology").unwrap();
        assert_eq!(wizard.draft().doctor_id, "dr-williams");
    }

    #[test]
    fn doctors_on_offer_follow_specialty() {
        let mut wizard = wizard();
        assert!(wizard.doctors_on_offer().is_empty());
        wizard.set_field(BookingField::SpecialtyId, "orthopedics").unwrap();
        let ids: Vec<&str> = wizard
            .doctors_on_offer()
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, ["dr-wilson", "dr-miller"]);
    }

    #[test]
    fn set_field_named_reports_unknown_names() {
        let mut wizard = wizard();
        assert_eq!(
            wizard.set_field_named("doctor", "dr-davis"),
            Ok(BookingField::DoctorId)
        );
        assert_eq!(
            wizard.set_field_named("insurer", "acme"),
            Err(WizardError::UnknownField("insurer".into()))
        );
    }

    #[test]
    fn values_are_trimmed() {
        let mut wizard = wizard();
        wizard
            .set_field(BookingField::SpecialtyId, "  dermatology ")
            .unwrap();
        assert_eq!(wizard.draft().specialty_id, "dermatology");
        assert!(wizard.can_advance());
    }
}
