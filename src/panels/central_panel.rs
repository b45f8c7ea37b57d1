use egui::{Color32, Rect, Sense, Vec2, pos2};

use crate::SketchApp;
use crate::surface::{Layer, Surface};

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let (input, textures, controller) = app.canvas_parts();

        let native = controller.committed().size();
        let display = fit_size(native, ui.available_size());
        let (canvas_rect, response) = ui.allocate_exact_size(display, Sense::drag());

        // Handle input before painting so this frame shows its effects
        for event in input.process_input(ctx, canvas_rect, response.hovered()) {
            controller.handle(event);
        }

        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
        let painter = ui.painter_at(canvas_rect);
        painter.rect_filled(canvas_rect, 0.0, Color32::WHITE);

        // Committed pixels first, the preview overlay on top
        let committed = textures.texture_for(ctx, Layer::Committed, controller.committed()).id();
        painter.image(committed, canvas_rect, uv, Color32::WHITE);
        let preview = textures.texture_for(ctx, Layer::Preview, controller.preview()).id();
        painter.image(preview, canvas_rect, uv, Color32::WHITE);
    });
}

/// Largest size with the surface's aspect ratio that fits in `available`,
/// never larger than the native size
fn fit_size(native: Vec2, available: Vec2) -> Vec2 {
    if native.x <= 0.0 || native.y <= 0.0 {
        return Vec2::ZERO;
    }
    let scale = (available.x / native.x).min(available.y / native.y).clamp(0.0, 1.0);
    native * scale
}
