#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use sketchpad::{Settings, SketchApp};

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let settings = Settings::from_env().unwrap_or_else(|err| {
        log::error!("{err}, falling back to default settings");
        Settings::default()
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Sketchpad")
            .with_inner_size([settings.canvas_width as f32 + 220.0, settings.canvas_height as f32 + 40.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sketchpad",
        native_options,
        Box::new(|cc| Ok(Box::new(SketchApp::new(cc, settings)))),
    )
}
