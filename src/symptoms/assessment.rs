use serde::Serialize;

use super::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionSeverity {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PossibleCondition {
    pub name: &'static str,
    /// Likelihood in percent.
    pub probability: u8,
    pub severity: ConditionSeverity,
}

/// Outcome of a symptom check. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub conditions: Vec<PossibleCondition>,
    pub recommendations: Vec<&'static str>,
    pub urgency: Urgency,
}

impl Assessment {
    /// Fixed-rule assessment: the same candidate conditions every time, with
    /// urgency raised only for severe symptoms.
    pub fn evaluate(severity: Severity) -> Self {
        let conditions = vec![
            PossibleCondition {
                name: "Common Cold",
                probability: 85,
                severity: ConditionSeverity::Low,
            },
            PossibleCondition {
                name: "Flu",
                probability: 60,
                severity: ConditionSeverity::Moderate,
            },
            PossibleCondition {
                name: "Allergies",
                probability: 45,
                severity: ConditionSeverity::Low,
            },
        ];
        let recommendations = vec![
            "Get plenty of rest",
            "Stay hydrated",
            "Consider over-the-counter pain relievers",
            "Monitor symptoms for worsening",
        ];
        let urgency = if severity == Severity::Severe {
            Urgency::High
        } else {
            Urgency::Low
        };
        Self {
            conditions,
            recommendations,
            urgency,
        }
    }

    pub fn needs_prompt_care(&self) -> bool {
        self.urgency == Urgency::High
    }
}
