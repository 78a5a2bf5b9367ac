use super::EguiApp;
use super::style;
use crate::egui_app::view_model::OutcomePanel;
use eframe::egui::{self, Color32, Frame, RichText, Stroke};

impl EguiApp {
    /// Render the result or error panel; at most one exists at a time.
    pub(super) fn render_outcome_panel(&self, ui: &mut egui::Ui) {
        let Some(outcome) = self.controller.view().outcome else {
            return;
        };
        let palette = style::palette();
        let (heading, message, fill, accent) = match &outcome {
            OutcomePanel::Result(panel) => (
                panel.heading,
                panel.message.as_str(),
                palette.accent_teal_soft,
                palette.accent_teal,
            ),
            OutcomePanel::Error(panel) => (
                panel.heading,
                panel.message.as_str(),
                palette.danger_soft,
                palette.danger,
            ),
        };
        ui.add_space(20.0);
        outcome_frame(fill, accent).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(heading).size(20.0).strong().color(accent));
            ui.add_space(6.0);
            ui.label(RichText::new(message).color(palette.text_primary));
        });
    }
}

fn outcome_frame(fill: Color32, accent: Color32) -> Frame {
    Frame::new()
        .fill(fill)
        .stroke(Stroke::new(1.0, accent))
        .corner_radius(8)
        .inner_margin(16.0)
}
