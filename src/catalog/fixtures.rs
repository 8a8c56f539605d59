use super::{Catalog, Doctor, Specialty};

const TIME_SLOTS: [&str; 12] = [
    "09:00 AM", "09:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM", "02:00 PM",
    "02:30 PM", "03:00 PM", "03:30 PM", "04:00 PM", "04:30 PM",
];

pub(super) fn standard() -> Catalog {
    let entries = vec![
        (
            Specialty::new("cardiology", "Cardiology"),
            vec![
                Doctor::new("dr-williams", "Dr. Sarah Williams", 15, 4.9),
                Doctor::new("dr-johnson", "Dr. Michael Johnson", 12, 4.8),
            ],
        ),
        (
            Specialty::new("dermatology", "Dermatology"),
            vec![
                Doctor::new("dr-brown", "Dr. Emily Brown", 10, 4.9),
                Doctor::new("dr-davis", "Dr. James Davis", 8, 4.7),
            ],
        ),
        (
            Specialty::new("orthopedics", "Orthopedics"),
            vec![
                Doctor::new("dr-wilson", "Dr. Robert Wilson", 18, 4.8),
                Doctor::new("dr-miller", "Dr. Lisa Miller", 14, 4.9),
            ],
        ),
        (
            Specialty::new("pediatrics", "Pediatrics"),
            vec![
                Doctor::new("dr-garcia", "Dr. Maria Garcia", 11, 4.9),
                Doctor::new("dr-martinez", "Dr. Carlos Martinez", 9, 4.8),
            ],
        ),
        (
            Specialty::new("psychiatry", "Psychiatry"),
            vec![
                Doctor::new("dr-anderson", "Dr. Jennifer Anderson", 13, 4.8),
                Doctor::new("dr-taylor", "Dr. David Taylor", 16, 4.9),
            ],
        ),
        (
            Specialty::new("general", "General Medicine"),
            vec![
                Doctor::new("dr-white", "Dr. Thomas White", 20, 4.8),
                Doctor::new("dr-lewis", "Dr. Patricia Lewis", 17, 4.9),
            ],
        ),
    ];

    Catalog::new(
        entries,
        TIME_SLOTS.iter().map(|slot| slot.to_string()).collect(),
    )
}
