use super::jobs::{JobMessage, PredictionJobResult};
use super::*;
use crate::egui_app::state::PREDICTION_ERROR_MESSAGE;

impl EguiController {
    /// Apply every finished background job to the UI state.
    ///
    /// Call once per frame; never blocks.
    pub fn poll_background_jobs(&mut self) {
        while let Ok(message) = self.runtime.jobs.try_recv_message() {
            match message {
                JobMessage::PredictionFinished(message) => self.handle_prediction_finished(message),
            }
        }
    }

    fn handle_prediction_finished(&mut self, message: PredictionJobResult) {
        self.runtime.jobs.clear_prediction();
        if self.runtime.active_request != Some(message.request_id) {
            tracing::debug!(
                "Dropping result of superseded prediction request {}",
                message.request_id
            );
            return;
        }
        self.runtime.active_request = None;
        match message.result {
            Ok(result) => {
                tracing::info!(
                    "Prediction {} received: classification={} probability={}",
                    message.request_id,
                    result.data.classification,
                    result.probability
                );
                self.ui.prediction.session = SessionState::Succeeded(result);
                self.set_status("Prediction received", StatusTone::Info);
            }
            Err(err) => {
                tracing::warn!("Prediction request {} failed: {err}", message.request_id);
                self.ui.prediction.session =
                    SessionState::Failed(PREDICTION_ERROR_MESSAGE.to_string());
                self.set_status("Prediction failed", StatusTone::Error);
            }
        }
    }
}
