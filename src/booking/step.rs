use std::fmt;

use crate::wizard::FlowStep;

use super::BookingField;

/// The four screens of the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStep {
    Specialty,
    Doctor,
    DateTime,
    Contact,
}

impl FlowStep for BookingStep {
    const ORDER: &'static [Self] = &[
        BookingStep::Specialty,
        BookingStep::Doctor,
        BookingStep::DateTime,
        BookingStep::Contact,
    ];

    fn label(self) -> &'static str {
        match self {
            BookingStep::Specialty => "Choose Specialty",
            BookingStep::Doctor => "Select Doctor",
            BookingStep::DateTime => "Choose Date & Time",
            BookingStep::Contact => "Personal Information",
        }
    }
}

impl BookingStep {
    /// Fields rendered while this step is active.
    pub fn fields(self) -> &'static [BookingField] {
        match self {
            BookingStep::Specialty => &[BookingField::SpecialtyId],
            BookingStep::Doctor => &[BookingField::DoctorId],
            BookingStep::DateTime => &[BookingField::Date, BookingField::Time],
            BookingStep::Contact => &[
                BookingField::FirstName,
                BookingField::LastName,
                BookingField::Email,
                BookingField::Phone,
                BookingField::Reason,
            ],
        }
    }
}

impl fmt::Display for BookingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Step {} of {} – {}",
            self.number(),
            Self::total(),
            self.label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_numbered_one_to_four() {
        let numbers: Vec<u8> = BookingStep::ORDER.iter().map(|s| s.number()).collect();
        assert_eq!(numbers, [1, 2, 3, 4]);
        assert_eq!(BookingStep::first(), BookingStep::Specialty);
        assert!(BookingStep::Contact.is_last());
    }

    #[test]
    fn every_field_belongs_to_exactly_one_step() {
        for field in BookingField::ALL {
            let owners = BookingStep::ORDER
                .iter()
                .filter(|step| step.fields().contains(&field))
                .count();
            assert_eq!(owners, 1, "{field} should be rendered by one step");
        }
    }

    #[test]
    fn display_includes_progress() {
        assert_eq!(
            BookingStep::DateTime.to_string(),
            "Step 3 of 4 – Choose Date & Time"
        );
    }
}
