#![deny(missing_docs)]

//! Entry point for the egui-based CKD Predictor UI.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use ckd_predictor::config;
use ckd_predictor::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use ckd_predictor::logging::{self, LogTarget};
use eframe::egui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init(LogTarget::Desktop) {
        eprintln!("Logging disabled: {err}");
    }

    let startup = config::load().map_err(|err| {
        tracing::error!("Failed to load configuration: {err}");
        err.to_string()
    });

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([720.0, 820.0])
        .with_min_inner_size(MIN_VIEWPORT_SIZE);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "CKD Predictor",
        native_options,
        Box::new(move |_cc| match startup {
            Ok(config) => Ok(Box::new(EguiApp::new(&config))),
            Err(message) => Ok(Box::new(LaunchError { message })),
        }),
    )?;
    Ok(())
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start CKD Predictor");
                ui.label(&self.message);
            });
        });
    }
}
