#![doc(test(attr(deny(warnings))))]

//! Care Booking provides the flow-control core of a healthcare portal: the
//! appointment-booking wizard with its step gates, the confirmation hand-off,
//! the symptom checker questionnaire, and a scriptable CLI that drives them.

pub mod booking;
pub mod catalog;
pub mod cli;
pub mod clock;
pub mod config;
pub mod errors;
pub mod symptoms;
pub mod utils;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Care Booking tracing initialized.");
    });
}
