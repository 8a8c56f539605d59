//! Symptom checker: a fixed-rule four-step questionnaire ending in a mock
//! assessment.

mod assessment;
mod checker;

pub use assessment::{Assessment, ConditionSeverity, PossibleCondition, Urgency};
pub use checker::{
    DurationOption, Severity, SymptomAdvance, SymptomChecker, SymptomGate, SymptomStep,
    COMMON_SYMPTOMS,
};
