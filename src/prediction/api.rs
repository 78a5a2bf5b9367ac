//! Client for the remote CKD prediction endpoint.

use serde::{Deserialize, Serialize};

use crate::config::BackendUrl;
use crate::http_client::{self, BodyError};
use crate::prediction::form::FormInput;

/// Path of the prediction endpoint relative to the configured base URL.
pub const PREDICT_PATH: &str = "/api/ckd/predict";

/// Largest prediction response body read into memory.
pub const MAX_PREDICTION_RESPONSE_BYTES: usize = 256 * 1024;

/// Classification code the backend uses for a CKD-positive prediction.
pub const CKD_POSITIVE_CLASSIFICATION: &str = "0";

/// Decoded prediction payload returned by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub data: PredictionData,
    /// Probability in `[0, 1]` reported alongside the classification.
    pub probability: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionData {
    pub classification: String,
}

impl PredictionResult {
    /// True when the backend classified the input as CKD-positive.
    pub fn has_ckd(&self) -> bool {
        self.data.classification == CKD_POSITIVE_CLASSIFICATION
    }
}

/// Reasons a prediction request can fail.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },
    #[error("Response too large: {0}")]
    ResponseTooLarge(String),
    #[error("JSON error: {0}")]
    Json(String),
}

/// Something that can turn a filled form into a prediction.
///
/// Implementations are moved into a worker thread, so they must be shareable.
pub trait PredictionBackend: Send + Sync {
    fn predict(&self, input: &FormInput) -> Result<PredictionResult, PredictError>;
}

/// Prediction backend reached over HTTP with the shared ureq agent.
#[derive(Clone, Debug)]
pub struct HttpPredictionBackend {
    endpoint: String,
}

impl HttpPredictionBackend {
    pub fn new(base_url: &BackendUrl) -> Self {
        Self {
            endpoint: base_url.endpoint(PREDICT_PATH),
        }
    }

    /// Full URL the form is posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl PredictionBackend for HttpPredictionBackend {
    fn predict(&self, input: &FormInput) -> Result<PredictionResult, PredictError> {
        let request = http_client::agent()
            .post(&self.endpoint)
            .set("Accept", "application/json")
            .set("Content-Type", "application/json");

        let response = match request.send_json(input) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = read_body_limited(response).unwrap_or_else(|err| err.to_string());
                return Err(PredictError::Status { code, body });
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(PredictError::Transport(err.to_string()));
            }
        };

        let body = read_body_limited(response)?;
        tracing::info!("Prediction response: {}", body.trim());
        parse_prediction_response(&body)
    }
}

fn read_body_limited(response: ureq::Response) -> Result<String, PredictError> {
    http_client::read_text_capped(response, MAX_PREDICTION_RESPONSE_BYTES).map_err(|err| match err {
        BodyError::TooLarge { .. } => PredictError::ResponseTooLarge(err.to_string()),
        BodyError::Read(_) => PredictError::Transport(err.to_string()),
        BodyError::NotUtf8(_) => PredictError::Json(err.to_string()),
    })
}

fn parse_prediction_response(body: &str) -> Result<PredictionResult, PredictError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(PredictError::Json("Empty response body".to_string()));
    }
    serde_json::from_str(trimmed).map_err(|err| PredictError::Json(format!("{err}: {trimmed}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend_for(url: &str) -> HttpPredictionBackend {
        HttpPredictionBackend::new(&BackendUrl::parse(url).unwrap())
    }

    #[test]
    fn parses_positive_prediction_and_ignores_extra_fields() {
        let parsed = parse_prediction_response(
            r#"{ "data": { "classification": "0", "model": "rf" }, "probability": 0.87, "ok": true }"#,
        )
        .unwrap();
        assert!(parsed.has_ckd());
        assert_eq!(parsed.probability, 0.87);
    }

    #[test]
    fn any_other_classification_is_negative() {
        for code in ["1", "2", "ckd"] {
            let body = format!(r#"{{ "data": {{ "classification": "{code}" }}, "probability": 0.5 }}"#);
            assert!(!parse_prediction_response(&body).unwrap().has_ckd());
        }
    }

    #[test]
    fn rejects_malformed_bodies() {
        assert!(matches!(
            parse_prediction_response("  "),
            Err(PredictError::Json(_))
        ));
        assert!(matches!(
            parse_prediction_response(r#"{ "probability": 0.2 }"#),
            Err(PredictError::Json(_))
        ));
        assert!(matches!(
            parse_prediction_response("<html>oops</html>"),
            Err(PredictError::Json(_))
        ));
    }

    #[test]
    fn endpoint_joins_base_url_and_path() {
        let backend = backend_for("http://localhost:5000/");
        assert_eq!(backend.endpoint(), "http://localhost:5000/api/ckd/predict");
    }
}
