use care_booking::{
    symptoms::{DurationOption, Severity, SymptomChecker, SymptomGate, SymptomStep, Urgency},
    wizard::{Advance, WizardError},
};

fn checker_at_duration(severity: Severity) -> SymptomChecker {
    let mut checker = SymptomChecker::new();
    checker.toggle_symptom("fever").unwrap();
    checker.toggle_symptom("Sore Throat").unwrap();
    assert!(checker.advance().unwrap().is_moved());
    checker.set_severity(severity).unwrap();
    assert!(checker.advance().unwrap().is_moved());
    checker
}

#[test]
fn gates_block_each_step_until_answered() {
    let mut checker = SymptomChecker::new();
    assert_eq!(
        checker.advance().unwrap(),
        Advance::Blocked(SymptomGate::NoSymptoms)
    );

    checker.toggle_symptom("Headache").unwrap();
    checker.advance().unwrap();
    assert_eq!(
        checker.advance().unwrap(),
        Advance::Blocked(SymptomGate::SeverityMissing)
    );

    checker.set_severity(Severity::Mild).unwrap();
    checker.advance().unwrap();
    assert_eq!(checker.step(), SymptomStep::Duration);
    assert_eq!(
        checker.analyze().unwrap(),
        Advance::Blocked(SymptomGate::DurationMissing)
    );
}

#[test]
fn severe_symptoms_raise_urgency() {
    let mut checker = checker_at_duration(Severity::Severe);
    checker.set_duration(DurationOption::Days).unwrap();
    assert_eq!(
        checker.analyze().unwrap(),
        Advance::Moved(SymptomStep::Results)
    );

    let assessment = checker.assessment().unwrap();
    assert_eq!(assessment.urgency, Urgency::High);
    assert_eq!(assessment.conditions[0].name, "Common Cold");
    assert_eq!(assessment.recommendations.len(), 4);
}

#[test]
fn moderate_symptoms_stay_low_urgency() {
    let mut checker = checker_at_duration(Severity::Moderate);
    checker.set_duration("weeks".parse().unwrap()).unwrap();
    checker.analyze().unwrap();
    assert_eq!(checker.assessment().unwrap().urgency, Urgency::Low);
}

#[test]
fn results_are_read_only_until_reset() {
    let mut checker = checker_at_duration(Severity::Mild);
    checker.set_duration(DurationOption::Hours).unwrap();
    checker.analyze().unwrap();

    assert!(matches!(
        checker.toggle_symptom("Cough"),
        Err(WizardError::InvalidState { .. })
    ));
    assert!(checker.retreat().is_err());

    checker.reset();
    assert_eq!(checker.step(), SymptomStep::Symptoms);
    assert!(checker.selected().is_empty());
    assert!(checker.assessment().is_none());
}

#[test]
fn unknown_answers_are_rejected() {
    let mut checker = SymptomChecker::new();
    assert!(matches!(
        checker.toggle_symptom("Hiccups"),
        Err(WizardError::UnknownOption { kind: "symptom", .. })
    ));
    assert!("extreme".parse::<Severity>().is_err());
    assert!("forever".parse::<DurationOption>().is_err());
}
