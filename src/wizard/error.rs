use std::fmt;

use thiserror::Error;

/// Navigation intents a presentation layer may forward to a wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    Advance,
    Retreat,
    Submit,
    Analyze,
    Edit,
}

impl fmt::Display for WizardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WizardAction::Advance => "advance",
            WizardAction::Retreat => "go back",
            WizardAction::Submit => "submit",
            WizardAction::Analyze => "analyze",
            WizardAction::Edit => "edit answers",
        };
        f.write_str(label)
    }
}

/// Contract violations raised by wizard controllers.
///
/// A failing gate is never reported through this type; see [`super::Advance`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("cannot {action} from step {step} ({label})")]
    InvalidState {
        action: WizardAction,
        step: u8,
        label: &'static str,
    },
    #[error("wizard is already completed; start a new one")]
    Closed,
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("unknown {kind} `{value}`")]
    UnknownOption { kind: &'static str, value: String },
}

impl WizardError {
    pub(crate) fn invalid_state<S: super::FlowStep>(action: WizardAction, step: S) -> Self {
        WizardError::InvalidState {
            action,
            step: step.number(),
            label: step.label(),
        }
    }
}
