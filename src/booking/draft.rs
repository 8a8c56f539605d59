use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::wizard::WizardError;

/// Every value the booking form collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingField {
    SpecialtyId,
    DoctorId,
    Date,
    Time,
    FirstName,
    LastName,
    Email,
    Phone,
    Reason,
}

impl BookingField {
    pub const ALL: [BookingField; 9] = [
        BookingField::SpecialtyId,
        BookingField::DoctorId,
        BookingField::Date,
        BookingField::Time,
        BookingField::FirstName,
        BookingField::LastName,
        BookingField::Email,
        BookingField::Phone,
        BookingField::Reason,
    ];

    /// Canonical presentation name, e.g. `specialtyId`.
    pub fn key(self) -> &'static str {
        match self {
            BookingField::SpecialtyId => "specialtyId",
            BookingField::DoctorId => "doctorId",
            BookingField::Date => "date",
            BookingField::Time => "time",
            BookingField::FirstName => "firstName",
            BookingField::LastName => "lastName",
            BookingField::Email => "email",
            BookingField::Phone => "phone",
            BookingField::Reason => "reason",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BookingField::SpecialtyId => "Specialty",
            BookingField::DoctorId => "Doctor",
            BookingField::Date => "Date",
            BookingField::Time => "Time",
            BookingField::FirstName => "First name",
            BookingField::LastName => "Last name",
            BookingField::Email => "Email",
            BookingField::Phone => "Phone number",
            BookingField::Reason => "Reason for visit",
        }
    }
}

impl fmt::Display for BookingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for BookingField {
    type Err = WizardError;

    /// Accepts `specialtyId`, `specialty_id`, `specialty` and the like, ignoring case.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();
        let field = match normalized.as_str() {
            "specialtyid" | "specialty" => BookingField::SpecialtyId,
            "doctorid" | "doctor" => BookingField::DoctorId,
            "date" => BookingField::Date,
            "time" => BookingField::Time,
            "firstname" => BookingField::FirstName,
            "lastname" => BookingField::LastName,
            "email" => BookingField::Email,
            "phone" => BookingField::Phone,
            "reason" => BookingField::Reason,
            _ => return Err(WizardError::UnknownField(raw.trim().to_string())),
        };
        Ok(field)
    }
}

/// Partially-filled booking record. Empty strings mean "not set yet".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub specialty_id: String,
    pub doctor_id: String,
    pub date: String,
    pub time: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub reason: String,
}

impl BookingDraft {
    pub fn get(&self, field: BookingField) -> &str {
        match field {
            BookingField::SpecialtyId => &self.specialty_id,
            BookingField::DoctorId => &self.doctor_id,
            BookingField::Date => &self.date,
            BookingField::Time => &self.time,
            BookingField::FirstName => &self.first_name,
            BookingField::LastName => &self.last_name,
            BookingField::Email => &self.email,
            BookingField::Phone => &self.phone,
            BookingField::Reason => &self.reason,
        }
    }

    pub fn is_set(&self, field: BookingField) -> bool {
        !self.get(field).trim().is_empty()
    }

    pub(crate) fn slot_mut(&mut self, field: BookingField) -> &mut String {
        match field {
            BookingField::SpecialtyId => &mut self.specialty_id,
            BookingField::DoctorId => &mut self.doctor_id,
            BookingField::Date => &mut self.date,
            BookingField::Time => &mut self.time,
            BookingField::FirstName => &mut self.first_name,
            BookingField::LastName => &mut self.last_name,
            BookingField::Email => &mut self.email,
            BookingField::Phone => &mut self.phone,
            BookingField::Reason => &mut self.reason,
        }
    }
}
