// academy-service/src/services/form_flow.rs
use crate::models::ServiceError;
use serde::Serialize;

// Shared submission flow: a form is edited, a submit intent opens a
// confirmation step, and only an explicit confirm reaches the terminal
// state. Used by the admissions form and the sign-out dialog.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    #[serde(rename = "editing")]
    Editing,
    #[serde(rename = "confirm_pending")]
    ConfirmPending,
    #[serde(rename = "submitted")]
    Submitted,
}

#[derive(Debug)]
pub struct FormFlow {
    state: FormState,
}

impl FormFlow {
    pub fn new() -> Self {
        Self {
            state: FormState::Editing,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    // Open the confirmation step. Guards against one-click submission:
    // nothing is performed until confirm().
    pub fn request_submit(&mut self) -> Result<(), ServiceError> {
        match self.state {
            FormState::Editing => {
                self.state = FormState::ConfirmPending;
                Ok(())
            }
            FormState::ConfirmPending => Err(ServiceError::Conflict(
                "A submission is already awaiting confirmation".to_string(),
            )),
            FormState::Submitted => Err(ServiceError::Conflict(
                "This form has already been submitted".to_string(),
            )),
        }
    }

    // Perform the pending submission
    pub fn confirm(&mut self) -> Result<(), ServiceError> {
        match self.state {
            FormState::ConfirmPending => {
                self.state = FormState::Submitted;
                Ok(())
            }
            _ => Err(ServiceError::Conflict(
                "No submission is awaiting confirmation".to_string(),
            )),
        }
    }

    // Back out of the confirmation step. No data is discarded.
    pub fn cancel(&mut self) -> Result<(), ServiceError> {
        match self.state {
            FormState::ConfirmPending => {
                self.state = FormState::Editing;
                Ok(())
            }
            _ => Err(ServiceError::Conflict(
                "No submission is awaiting confirmation".to_string(),
            )),
        }
    }

    // Return to editing, the page-reload equivalent
    pub fn reset(&mut self) {
        self.state = FormState::Editing;
    }
}

impl Default for FormFlow {
    fn default() -> Self {
        Self::new()
    }
}
