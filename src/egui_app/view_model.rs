//! Helpers to convert controller state into render-ready view structs.
//!
//! Nothing here is stored: every view is recomputed from [`PredictionFormState`]
//! so the renderer and the command-line front end show the same text.

use crate::egui_app::state::{PredictionFormState, SessionState};
use crate::prediction::PredictionResult;

pub const SUBMIT_LABEL: &str = "Predict";
pub const SUBMITTING_LABEL: &str = "Predicting...";
pub const RESULT_HEADING: &str = "Prediction Result";
pub const ERROR_HEADING: &str = "Error";

/// Everything the form needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct PredictionView {
    pub submit_label: &'static str,
    /// True when the submit control should accept a click.
    pub can_submit: bool,
    pub outcome: Option<OutcomePanel>,
}

/// The single panel shown under the form, if any.
#[derive(Clone, Debug, PartialEq)]
pub enum OutcomePanel {
    Result(ResultPanel),
    Error(ErrorPanel),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultPanel {
    pub heading: &'static str,
    pub has_ckd: bool,
    /// Probability as a percentage with two decimals, e.g. `87.00%`.
    pub probability: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ErrorPanel {
    pub heading: &'static str,
    pub message: String,
}

impl PredictionView {
    pub fn result(&self) -> Option<&ResultPanel> {
        match &self.outcome {
            Some(OutcomePanel::Result(panel)) => Some(panel),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorPanel> {
        match &self.outcome {
            Some(OutcomePanel::Error(panel)) => Some(panel),
            _ => None,
        }
    }
}

/// Build the view for the current state.
///
/// `busy` covers a request that is still draining after a reset; the submit
/// control stays disabled until it completes.
pub fn prediction_view(state: &PredictionFormState, busy: bool) -> PredictionView {
    let submitting = state.session.is_submitting();
    let outcome = match &state.session {
        SessionState::Idle | SessionState::Submitting => None,
        SessionState::Succeeded(result) => Some(OutcomePanel::Result(result_panel(result))),
        SessionState::Failed(message) => Some(OutcomePanel::Error(ErrorPanel {
            heading: ERROR_HEADING,
            message: message.clone(),
        })),
    };
    PredictionView {
        submit_label: if submitting {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        },
        can_submit: !submitting && !busy && state.input.is_complete(),
        outcome,
    }
}

/// Render a probability in `[0, 1]` as a percentage with two decimals.
pub fn format_probability(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

fn result_panel(result: &PredictionResult) -> ResultPanel {
    let has_ckd = result.has_ckd();
    let probability = format_probability(result.probability);
    let verdict = if has_ckd { "has CKD" } else { "does not have CKD" };
    ResultPanel {
        heading: RESULT_HEADING,
        has_ckd,
        message: format!("The patient {verdict} with a probability of {probability}."),
        probability,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::egui_app::state::PREDICTION_ERROR_MESSAGE;
    use crate::prediction::FormInput;
    use crate::prediction::api::PredictionData;

    fn prediction(classification: &str, probability: f64) -> PredictionResult {
        PredictionResult {
            data: PredictionData {
                classification: classification.to_string(),
            },
            probability,
        }
    }

    fn complete_form() -> FormInput {
        FormInput {
            sg: "1.02".into(),
            al: "3".into(),
            sc: "1.2".into(),
            hemo: "13.5".into(),
            pcv: "40".into(),
            htn: "0".into(),
        }
    }

    fn state(session: SessionState) -> PredictionFormState {
        PredictionFormState {
            input: complete_form(),
            session,
        }
    }

    #[test]
    fn positive_classification_reads_has_ckd() {
        let view = prediction_view(&state(SessionState::Succeeded(prediction("0", 0.87))), false);
        let panel = view.result().unwrap();
        assert!(panel.has_ckd);
        assert_eq!(panel.probability, "87.00%");
        assert_eq!(
            panel.message,
            "The patient has CKD with a probability of 87.00%."
        );
        assert!(view.error().is_none());
    }

    #[test]
    fn other_classification_reads_does_not_have_ckd() {
        let view = prediction_view(&state(SessionState::Succeeded(prediction("1", 0.12))), false);
        let panel = view.result().unwrap();
        assert!(!panel.has_ckd);
        assert_eq!(
            panel.message,
            "The patient does not have CKD with a probability of 12.00%."
        );
    }

    #[test]
    fn failure_shows_only_the_error_panel() {
        let view = prediction_view(
            &state(SessionState::Failed(PREDICTION_ERROR_MESSAGE.to_string())),
            false,
        );
        assert!(view.result().is_none());
        let panel = view.error().unwrap();
        assert_eq!(panel.heading, "Error");
        assert_eq!(panel.message, "Error predicting CKD. Please try again.");
    }

    #[test]
    fn submitting_hides_panels_and_relabels_submit() {
        let view = prediction_view(&state(SessionState::Submitting), true);
        assert_eq!(view.submit_label, "Predicting...");
        assert!(!view.can_submit);
        assert!(view.outcome.is_none());
    }

    #[test]
    fn submit_requires_a_complete_form_and_an_idle_backend() {
        assert!(prediction_view(&state(SessionState::Idle), false).can_submit);
        assert!(!prediction_view(&state(SessionState::Idle), true).can_submit);

        let empty = PredictionFormState::default();
        let view = prediction_view(&empty, false);
        assert_eq!(view.submit_label, "Predict");
        assert!(!view.can_submit);
    }

    #[test]
    fn probability_formatting_rounds_to_two_decimals() {
        assert_eq!(format_probability(0.0), "0.00%");
        assert_eq!(format_probability(1.0), "100.00%");
        assert_eq!(format_probability(0.123456), "12.35%");
    }
}
