use egui::Slider;

use crate::SketchApp;
use crate::style::{DEFAULT_COLOR, ShapeKind, color_to_hex, parse_color};

pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Tools");
            ui.separator();

            let tools = app.tools().clone();

            // Shape selection
            let active_shape = tools.shape();
            for shape in ShapeKind::ALL {
                if ui.selectable_label(active_shape == shape, shape.label()).clicked() && active_shape != shape {
                    log::info!("Shape selected from UI: {}", shape);
                    tools.set_shape(shape);
                }
            }

            ui.separator();

            // Color picker
            ui.horizontal(|ui| {
                ui.label("Color:");
                let mut color = parse_color(&tools.color()).unwrap_or(DEFAULT_COLOR);
                if egui::color_picker::color_edit_button_srgba(ui, &mut color, egui::color_picker::Alpha::Opaque)
                    .changed()
                {
                    tools.set_color(&color_to_hex(color));
                }
            });

            // Stroke width slider
            ui.horizontal(|ui| {
                ui.label("Width:");
                let mut width = tools.width();
                if ui.add(Slider::new(&mut width, 1.0..=50.0)).changed() {
                    tools.set_width(width);
                }
            });

            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("🗑 Clear").clicked() {
                    app.clear();
                }
                if ui.button("💾 Save").clicked() {
                    app.export_drawing();
                }
            });

            let theme_label = if app.dark_mode() { "☀ Light theme" } else { "🌙 Dark theme" };
            if ui.button(theme_label).clicked() {
                app.toggle_theme(ctx);
            }

            if let Some(status) = app.status() {
                ui.separator();
                ui.label(status);
            }

            ui.separator();
            ui.label(format!("State: {}", app.controller().state().name()));
        });
}
