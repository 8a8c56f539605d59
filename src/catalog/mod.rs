//! Read-only lookup tables for specialties, doctors and bookable time slots.
//!
//! A [`Catalog`] is built once and shared through `Arc` with every controller
//! that validates against it, so tests can substitute their own fixtures.

mod fixtures;

use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::Serialize;

static STANDARD: Lazy<Arc<Catalog>> = Lazy::new(|| Arc::new(fixtures::standard()));

/// Medical specialty offered by the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Specialty {
    pub id: String,
    pub name: String,
}

impl Specialty {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Practitioner bookable under exactly one specialty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub years_experience: u8,
    pub rating: f32,
}

impl Doctor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, years: u8, rating: f32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            years_experience: years,
            rating,
        }
    }
}

#[derive(Debug, Clone)]
struct SpecialtyEntry {
    specialty: Specialty,
    doctors: Vec<Doctor>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<SpecialtyEntry>,
    time_slots: Vec<String>,
}

impl Catalog {
    /// Builds a catalog from `(specialty, doctors)` pairs; order is preserved.
    pub fn new(entries: Vec<(Specialty, Vec<Doctor>)>, time_slots: Vec<String>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(specialty, doctors)| SpecialtyEntry { specialty, doctors })
                .collect(),
            time_slots,
        }
    }

    /// Shared instance holding the portal's built-in fixtures.
    pub fn standard() -> Arc<Catalog> {
        Arc::clone(&STANDARD)
    }

    pub fn specialties(&self) -> impl Iterator<Item = &Specialty> {
        self.entries.iter().map(|entry| &entry.specialty)
    }

    pub fn specialty(&self, id: &str) -> Option<&Specialty> {
        self.entry(id).map(|entry| &entry.specialty)
    }

    /// Doctors offered under `specialty_id`; unknown specialties yield an empty slice.
    pub fn doctors_for(&self, specialty_id: &str) -> &[Doctor] {
        self.entry(specialty_id)
            .map(|entry| entry.doctors.as_slice())
            .unwrap_or(&[])
    }

    pub fn offers_doctor(&self, specialty_id: &str, doctor_id: &str) -> bool {
        self.doctors_for(specialty_id)
            .iter()
            .any(|doctor| doctor.id == doctor_id)
    }

    pub fn doctor(&self, id: &str) -> Option<&Doctor> {
        self.entries
            .iter()
            .flat_map(|entry| entry.doctors.iter())
            .find(|doctor| doctor.id == id)
    }

    pub fn time_slots(&self) -> &[String] {
        &self.time_slots
    }

    pub fn has_time_slot(&self, slot: &str) -> bool {
        self.time_slots.iter().any(|candidate| candidate == slot)
    }

    fn entry(&self, specialty_id: &str) -> Option<&SpecialtyEntry> {
        self.entries
            .iter()
            .find(|entry| entry.specialty.id == specialty_id)
    }
}
