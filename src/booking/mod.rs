//! Appointment-booking wizard: draft model, step gates, controller and the
//! confirmation hand-off.

mod confirmation;
mod controller;
mod draft;
mod gates;
mod step;

pub use confirmation::Confirmation;
pub use controller::{BookingAdvance, BookingWizard, Submission};
pub use draft::{BookingDraft, BookingField};
pub use gates::{DateWindow, GateFailure, StepGates, DATE_FORMAT};
pub use step::BookingStep;
