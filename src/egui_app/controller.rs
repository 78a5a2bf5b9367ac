//! Prediction form controller.
//!
//! Owns the form values and the session state, and runs at most one
//! prediction request at a time on a background thread.

mod background_jobs;
mod jobs;

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::egui_app::state::{SessionState, StatusBarState, UiState};
use crate::egui_app::ui::style::StatusTone;
use crate::egui_app::view_model::{self, PredictionView};
use crate::prediction::{FormField, FormInput, HttpPredictionBackend, PredictionBackend};

use jobs::{ControllerJobs, PredictionJob};

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(10);

struct ControllerRuntime {
    jobs: ControllerJobs,
    /// Id of the request whose answer the session is waiting for.
    active_request: Option<u64>,
}

/// Maintains app state and bridges the prediction backend to the egui UI.
pub struct EguiController {
    pub ui: UiState,
    runtime: ControllerRuntime,
}

impl EguiController {
    pub fn new(backend: Arc<dyn PredictionBackend>) -> Self {
        Self {
            ui: UiState::default(),
            runtime: ControllerRuntime {
                jobs: ControllerJobs::new(backend),
                active_request: None,
            },
        }
    }

    /// Build a controller that talks to the configured HTTP backend.
    pub fn from_config(config: &AppConfig) -> Self {
        let backend = HttpPredictionBackend::new(&config.backend_url);
        tracing::info!("Prediction endpoint: {}", backend.endpoint());
        Self::new(Arc::new(backend))
    }

    pub fn form(&self) -> &FormInput {
        &self.ui.prediction.input
    }

    pub fn session(&self) -> &SessionState {
        &self.ui.prediction.session
    }

    /// True while a request is in flight, including one orphaned by a reset.
    pub fn is_busy(&self) -> bool {
        self.ui.prediction.session.is_submitting() || self.runtime.jobs.prediction_in_progress()
    }

    /// Render-ready view of the current state.
    pub fn view(&self) -> PredictionView {
        view_model::prediction_view(&self.ui.prediction, self.is_busy())
    }

    /// Overwrite one form field with the raw widget value.
    pub fn update_field(&mut self, field: FormField, raw: impl Into<String>) {
        self.ui.prediction.input.set(field, raw);
    }

    /// Restore the default form and return to `Idle`.
    ///
    /// A request still in flight keeps running but its answer is discarded.
    pub fn reset(&mut self) {
        if self.runtime.active_request.take().is_some() {
            tracing::debug!("Reset while a prediction was in flight; its result will be dropped");
        }
        self.ui.prediction.input = FormInput::default();
        self.ui.prediction.session = SessionState::Idle;
        self.ui.status = StatusBarState::idle();
    }

    /// Post the current form to the backend.
    ///
    /// Returns `false` without issuing a request while another one is still in
    /// flight. The form itself is not re-validated here.
    pub fn submit(&mut self) -> bool {
        if self.is_busy() {
            tracing::debug!("Ignoring submit while a prediction is in flight");
            return false;
        }
        let request_id = self.runtime.jobs.next_prediction_id();
        let input = self.ui.prediction.input.clone();
        self.ui.prediction.session = SessionState::Submitting;
        self.runtime.active_request = Some(request_id);
        self.set_status("Predicting...", StatusTone::Busy);
        tracing::info!("Submitting prediction request {request_id}");
        self.runtime
            .jobs
            .begin_prediction(PredictionJob { request_id, input })
    }

    /// Poll until the in-flight request settles or `max_wait` elapses.
    ///
    /// Only bounds the caller's wait; the request itself is never cancelled.
    /// Returns `true` once nothing is in flight.
    pub fn wait_for_prediction(&mut self, max_wait: Duration) -> bool {
        let deadline = Instant::now() + max_wait;
        loop {
            self.poll_background_jobs();
            if !self.is_busy() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            std::thread::sleep(WAIT_POLL_INTERVAL);
        }
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status = StatusBarState::with_tone(text, tone);
    }
}
