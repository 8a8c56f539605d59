use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::wizard::{Advance, FlowStep, WizardAction, WizardError};

use super::Assessment;

pub const COMMON_SYMPTOMS: [&str; 15] = [
    "Headache",
    "Fever",
    "Cough",
    "Sore Throat",
    "Fatigue",
    "Nausea",
    "Dizziness",
    "Chest Pain",
    "Shortness of Breath",
    "Stomach Pain",
    "Back Pain",
    "Joint Pain",
    "Skin Rash",
    "Vomiting",
    "Diarrhea",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymptomStep {
    Symptoms,
    Severity,
    Duration,
    Results,
}

impl FlowStep for SymptomStep {
    const ORDER: &'static [Self] = &[
        SymptomStep::Symptoms,
        SymptomStep::Severity,
        SymptomStep::Duration,
        SymptomStep::Results,
    ];

    fn label(self) -> &'static str {
        match self {
            SymptomStep::Symptoms => "What symptoms are you experiencing?",
            SymptomStep::Severity => "How severe are your symptoms?",
            SymptomStep::Duration => "How long have you had these symptoms?",
            SymptomStep::Results => "Results",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Mild, Severity::Moderate, Severity::Severe];

    pub fn key(self) -> &'static str {
        match self {
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Severity::Mild => "Barely noticeable, doesn't interfere with daily activities",
            Severity::Moderate => "Noticeable but manageable, some impact on daily activities",
            Severity::Severe => "Significantly impacts daily activities, hard to ignore",
        }
    }
}

impl FromStr for Severity {
    type Err = WizardError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|severity| severity.key() == normalized)
            .ok_or_else(|| WizardError::UnknownOption {
                kind: "severity",
                value: raw.trim().to_string(),
            })
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationOption {
    Hours,
    Days,
    Week,
    Weeks,
    Months,
}

impl DurationOption {
    pub const ALL: [DurationOption; 5] = [
        DurationOption::Hours,
        DurationOption::Days,
        DurationOption::Week,
        DurationOption::Weeks,
        DurationOption::Months,
    ];

    pub fn key(self) -> &'static str {
        match self {
            DurationOption::Hours => "hours",
            DurationOption::Days => "days",
            DurationOption::Week => "week",
            DurationOption::Weeks => "weeks",
            DurationOption::Months => "months",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DurationOption::Hours => "A few hours",
            DurationOption::Days => "1-3 days",
            DurationOption::Week => "About a week",
            DurationOption::Weeks => "Several weeks",
            DurationOption::Months => "Several months",
        }
    }
}

impl FromStr for DurationOption {
    type Err = WizardError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|option| option.key() == normalized)
            .ok_or_else(|| WizardError::UnknownOption {
                kind: "duration",
                value: raw.trim().to_string(),
            })
    }
}

impl fmt::Display for DurationOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SymptomGate {
    #[error("select at least one symptom")]
    NoSymptoms,
    #[error("choose how severe the symptoms are")]
    SeverityMissing,
    #[error("choose how long the symptoms have lasted")]
    DurationMissing,
}

pub type SymptomAdvance = Advance<SymptomStep, SymptomGate>;

/// Drives the symptom questionnaire.
#[derive(Debug, Clone)]
pub struct SymptomChecker {
    step: SymptomStep,
    selected: Vec<&'static str>,
    severity: Option<Severity>,
    duration: Option<DurationOption>,
    assessment: Option<Assessment>,
}

impl Default for SymptomChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl SymptomChecker {
    pub fn new() -> Self {
        Self {
            step: SymptomStep::first(),
            selected: Vec::new(),
            severity: None,
            duration: None,
            assessment: None,
        }
    }

    pub fn step(&self) -> SymptomStep {
        self.step
    }

    /// Selected symptoms in the order they were picked.
    pub fn selected(&self) -> &[&'static str] {
        &self.selected
    }

    pub fn severity(&self) -> Option<Severity> {
        self.severity
    }

    pub fn duration(&self) -> Option<DurationOption> {
        self.duration
    }

    pub fn assessment(&self) -> Option<&Assessment> {
        self.assessment.as_ref()
    }

    /// Adds or removes a symptom; returns whether it is now selected.
    pub fn toggle_symptom(&mut self, name: &str) -> Result<bool, WizardError> {
        self.ensure_editable()?;
        let wanted = name.trim();
        let symptom = COMMON_SYMPTOMS
            .into_iter()
            .find(|candidate| candidate.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| WizardError::UnknownOption {
                kind: "symptom",
                value: wanted.to_string(),
            })?;

        if let Some(index) = self.selected.iter().position(|s| *s == symptom) {
            self.selected.remove(index);
            debug!(symptom, "symptom deselected");
            Ok(false)
        } else {
            self.selected.push(symptom);
            debug!(symptom, "symptom selected");
            Ok(true)
        }
    }

    pub fn set_severity(&mut self, severity: Severity) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.severity = Some(severity);
        Ok(())
    }

    pub fn set_duration(&mut self, duration: DurationOption) -> Result<(), WizardError> {
        self.ensure_editable()?;
        self.duration = Some(duration);
        Ok(())
    }

    /// Gate guarding the move out of the active step.
    pub fn blocker(&self) -> Option<SymptomGate> {
        match self.step {
            SymptomStep::Symptoms if self.selected.is_empty() => Some(SymptomGate::NoSymptoms),
            SymptomStep::Severity if self.severity.is_none() => Some(SymptomGate::SeverityMissing),
            SymptomStep::Duration if self.duration.is_none() => Some(SymptomGate::DurationMissing),
            _ => None,
        }
    }

    pub fn can_advance(&self) -> bool {
        matches!(self.step, SymptomStep::Symptoms | SymptomStep::Severity)
            && self.blocker().is_none()
    }

    pub fn can_analyze(&self) -> bool {
        self.step == SymptomStep::Duration && self.blocker().is_none()
    }

    /// Moves from symptoms to severity, or severity to duration.
    ///
    /// Leaving the duration step goes through [`Self::analyze`].
    pub fn advance(&mut self) -> Result<SymptomAdvance, WizardError> {
        let next = match self.step {
            SymptomStep::Symptoms => SymptomStep::Severity,
            SymptomStep::Severity => SymptomStep::Duration,
            SymptomStep::Duration | SymptomStep::Results => {
                return Err(self.violation(WizardAction::Advance))
            }
        };
        if let Some(gate) = self.blocker() {
            return Ok(Advance::Blocked(gate));
        }
        self.step = next;
        Ok(Advance::Moved(next))
    }

    pub fn retreat(&mut self) -> Result<SymptomStep, WizardError> {
        let previous = match self.step {
            SymptomStep::Severity => SymptomStep::Symptoms,
            SymptomStep::Duration => SymptomStep::Severity,
            SymptomStep::Symptoms | SymptomStep::Results => {
                return Err(self.violation(WizardAction::Retreat))
            }
        };
        self.step = previous;
        Ok(previous)
    }

    /// Produces the assessment and shows the results step.
    pub fn analyze(&mut self) -> Result<SymptomAdvance, WizardError> {
        if self.step != SymptomStep::Duration {
            return Err(self.violation(WizardAction::Analyze));
        }
        let severity = match (self.severity, self.duration) {
            (Some(severity), Some(_)) => severity,
            (None, _) => return Ok(Advance::Blocked(SymptomGate::SeverityMissing)),
            (Some(_), None) => return Ok(Advance::Blocked(SymptomGate::DurationMissing)),
        };
        let assessment = Assessment::evaluate(severity);
        debug!(
            symptoms = self.selected.len(),
            urgency = ?assessment.urgency,
            "symptoms analyzed"
        );
        self.assessment = Some(assessment);
        self.step = SymptomStep::Results;
        Ok(Advance::Moved(SymptomStep::Results))
    }

    /// Clears every answer and returns to the first step.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn ensure_editable(&self) -> Result<(), WizardError> {
        if self.step == SymptomStep::Results {
            Err(self.violation(WizardAction::Edit))
        } else {
            Ok(())
        }
    }

    fn violation(&self, action: WizardAction) -> WizardError {
        let err = WizardError::invalid_state(action, self.step);
        warn!(%err, "symptom checker contract violation");
        err
    }
}
