//! egui front end for the CKD prediction form.

/// Controller that owns the form and session state.
pub mod controller;
/// Shared state types consumed by the renderer.
pub mod state;
/// egui renderer.
pub mod ui;
/// Derived, render-ready views of the state.
pub mod view_model;
