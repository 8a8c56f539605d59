use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::catalog::Catalog;

use super::{BookingDraft, DATE_FORMAT};

const ID_PREFIX: &str = "APT-";
const ID_LEN: usize = 9;

/// Presentation-ready summary of a submitted booking.
///
/// The appointment identifier is for display only and carries no uniqueness
/// guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub appointment_id: String,
    pub specialty: String,
    pub doctor: String,
    pub date: String,
    pub time: String,
    pub patient: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Confirmation {
    pub fn prepare(draft: &BookingDraft, catalog: &Catalog) -> Self {
        let specialty = catalog
            .specialty(&draft.specialty_id)
            .map(|specialty| specialty.name.clone())
            .unwrap_or_else(|| draft.specialty_id.clone());
        let doctor = catalog
            .doctor(&draft.doctor_id)
            .map(|doctor| doctor.name.clone())
            .unwrap_or_else(|| draft.doctor_id.clone());
        let reason = Some(draft.reason.trim())
            .filter(|reason| !reason.is_empty())
            .map(str::to_string);

        Self {
            appointment_id: generate_appointment_id(),
            specialty,
            doctor,
            date: long_date(&draft.date),
            time: draft.time.clone(),
            patient: format!("{} {}", draft.first_name, draft.last_name),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            reason,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Appointment ID: {}", self.appointment_id),
            format!("Specialty     : {}", self.specialty),
            format!("Doctor        : {}", self.doctor),
            format!("Date          : {}", self.date),
            format!("Time          : {}", self.time),
            format!("Patient       : {}", self.patient),
            format!("Email         : {}", self.email),
            format!("Phone         : {}", self.phone),
        ];
        if let Some(reason) = &self.reason {
            lines.push(format!("Reason        : {}", reason));
        }
        lines
    }
}

fn generate_appointment_id() -> String {
    let token: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(ID_LEN)
        .collect();
    format!("{}{}", ID_PREFIX, token.to_ascii_uppercase())
}

/// `2026-10-20` becomes `Tuesday, October 20, 2026`; unparseable input is returned as-is.
fn long_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map(|date| date.format("%A, %B %-d, %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
