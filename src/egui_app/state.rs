//! Shared state types for the egui UI.

mod prediction;
mod status;

pub use prediction::*;
pub use status::*;

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct UiState {
    pub prediction: PredictionFormState,
    pub status: StatusBarState,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            prediction: PredictionFormState::default(),
            status: StatusBarState::idle(),
        }
    }
}
