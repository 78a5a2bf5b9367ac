//! CKD prediction form model and the client for the remote prediction endpoint.

pub mod api;
pub mod form;

pub use api::{HttpPredictionBackend, PredictError, PredictionBackend, PredictionResult};
pub use form::{FieldKind, FieldProblem, FieldSpec, FormField, FormFieldError, FormInput};
