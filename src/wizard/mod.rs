//! Building blocks shared by the linear wizards: step ordering, transition
//! outcomes and the contract-violation error type.

mod error;
mod flow;

pub use error::{WizardAction, WizardError};
pub use flow::{Advance, FlowStep};
