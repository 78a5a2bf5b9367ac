use crate::prediction::{FormInput, PredictionResult};

/// Fixed message shown for every failed prediction request.
pub const PREDICTION_ERROR_MESSAGE: &str = "Error predicting CKD. Please try again.";

/// Where the current prediction session stands.
///
/// A single enum keeps "has a result" and "has an error" mutually exclusive.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Idle,
    /// Request in flight; any previous result or error is gone.
    Submitting,
    Succeeded(PredictionResult),
    Failed(String),
}

impl SessionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            Self::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Form values plus the session they belong to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PredictionFormState {
    pub input: FormInput,
    pub session: SessionState,
}
