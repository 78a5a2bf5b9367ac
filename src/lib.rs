//! CKD prediction form: state machine, backend client and egui front end.

/// Application directory resolution.
pub mod app_dirs;
/// Backend URL configuration.
pub mod config;
/// egui front end and the prediction form controller.
pub mod egui_app;
/// Shared HTTP agent.
mod http_client;
/// Tracing setup.
pub mod logging;
/// Form model and prediction endpoint client.
pub mod prediction;
