use super::EguiApp;
use super::style;
use crate::prediction::{FieldKind, FormField};
use eframe::egui::{self, Frame, RichText};

const FIELD_WIDTH: f32 = 260.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FormAction {
    None,
    Submit,
    Reset,
}

impl EguiApp {
    /// Render the six inputs and the Predict/Reset controls.
    pub(super) fn render_form_panel(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let mut action = FormAction::None;
        Frame::new()
            .fill(palette.bg_secondary)
            .stroke(style::panel_border())
            .corner_radius(8)
            .inner_margin(20.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new("Enter Your Details")
                        .size(22.0)
                        .color(palette.text_primary),
                );
                ui.add_space(12.0);
                egui::Grid::new("prediction_form_grid")
                    .num_columns(2)
                    .spacing([24.0, 12.0])
                    .show(ui, |ui| {
                        for (index, field) in FormField::ALL.into_iter().enumerate() {
                            self.render_field(ui, field);
                            if index % 2 == 1 {
                                ui.end_row();
                            }
                        }
                    });
                ui.add_space(16.0);
                action = self.render_form_buttons(ui);
            });

        match action {
            FormAction::None => {}
            FormAction::Submit => {
                self.controller.submit();
            }
            FormAction::Reset => self.controller.reset(),
        }
    }

    fn render_field(&mut self, ui: &mut egui::Ui, field: FormField) {
        let palette = style::palette();
        let spec = field.spec();
        let submitting = self.controller.session().is_submitting();
        let mut value = self.controller.form().value(field).to_string();
        let mut changed = false;
        ui.vertical(|ui| {
            ui.label(RichText::new(spec.label).color(palette.text_muted));
            match spec.kind {
                FieldKind::Number { .. } => {
                    let mut edit = egui::TextEdit::singleline(&mut value)
                        .id_salt(field.key())
                        .desired_width(FIELD_WIDTH);
                    if let Some(placeholder) = spec.placeholder {
                        edit = edit.hint_text(placeholder);
                    }
                    changed = ui.add_enabled(!submitting, edit).changed();
                    if let Some(problem) = spec
                        .problem(&value)
                        .filter(|_| !value.is_empty())
                    {
                        ui.label(
                            RichText::new(problem.hint())
                                .small()
                                .color(palette.danger),
                        );
                    }
                }
                FieldKind::Choice(choices) => {
                    let selected = choices
                        .iter()
                        .find(|(choice, _)| *choice == value)
                        .map(|(_, label)| *label)
                        .unwrap_or_default();
                    ui.add_enabled_ui(!submitting, |ui| {
                        egui::ComboBox::from_id_salt(field.key())
                            .width(FIELD_WIDTH)
                            .selected_text(selected)
                            .show_ui(ui, |ui| {
                                for (choice, label) in choices {
                                    if ui
                                        .selectable_label(value == *choice, *label)
                                        .clicked()
                                    {
                                        value = choice.to_string();
                                        changed = true;
                                    }
                                }
                            });
                    });
                }
            }
        });
        if changed {
            self.controller.update_field(field, value);
        }
    }

    fn render_form_buttons(&self, ui: &mut egui::Ui) -> FormAction {
        let palette = style::palette();
        let view = self.controller.view();
        let mut action = FormAction::None;
        ui.horizontal(|ui| {
            let predict = egui::Button::new(
                RichText::new(view.submit_label)
                    .strong()
                    .color(egui::Color32::WHITE),
            )
            .fill(palette.accent_teal)
            .min_size(egui::vec2(160.0, 32.0));
            if ui.add_enabled(view.can_submit, predict).clicked() {
                action = FormAction::Submit;
            }
            ui.add_space(8.0);
            let reset = egui::Button::new("Reset").min_size(egui::vec2(120.0, 32.0));
            if ui.add(reset).clicked() {
                action = FormAction::Reset;
            }
        });
        action
    }
}
