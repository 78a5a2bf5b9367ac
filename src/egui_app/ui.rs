//! egui renderer for the prediction form.

mod form_panel;
mod outcome_panel;
pub mod style;

use std::time::Duration;

use crate::config::AppConfig;
use crate::egui_app::controller::EguiController;
use eframe::egui::{self, Frame, RichText};

/// Smallest window size that still fits the two-column form.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(560.0, 640.0);

const SUBMITTING_REPAINT_INTERVAL: Duration = Duration::from_millis(50);
const CONTENT_WIDTH: f32 = 640.0;

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
}

impl EguiApp {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_controller(EguiController::from_config(config))
    }

    pub fn with_controller(controller: EguiController) -> Self {
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::light();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(Frame::new().fill(palette.bg_secondary).inner_margin(6.0))
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(&status.badge_label)
                            .strong()
                            .color(status.badge_color),
                    );
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_muted));
                });
            });
    }

    fn render_header(&self, ui: &mut egui::Ui) {
        let palette = style::palette();
        ui.vertical_centered(|ui| {
            ui.add_space(16.0);
            ui.label(
                RichText::new("Chronic Kidney Disease Predictor")
                    .size(28.0)
                    .strong()
                    .color(palette.accent_teal),
            );
            ui.add_space(4.0);
            ui.label(
                RichText::new(
                    "Assess the risk of Chronic Kidney Disease (CKD) from six medical measurements.",
                )
                .color(palette.text_muted),
            );
            ui.add_space(16.0);
        });
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_background_jobs();
        self.render_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(CONTENT_WIDTH);
                    self.render_header(ui);
                    self.render_form_panel(ui);
                    self.render_outcome_panel(ui);
                });
            });
        });
        if self.controller.is_busy() {
            ctx.request_repaint_after(SUBMITTING_REPAINT_INTERVAL);
        }
    }
}
