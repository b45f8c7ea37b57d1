use egui::{Pos2, Rect, Vec2};

/// Converts a pointer position in screen coordinates into surface pixels.
///
/// The surface may be shown larger or smaller than its native pixel size,
/// so the offset inside the rendered `bounds` is rescaled by
/// `surface_size / bounds.size()` on each axis.
///
/// An axis with a zero or non-finite rendered extent uses a scale of 1.0.
pub fn map_pointer(client: Pos2, surface_size: Vec2, bounds: Rect) -> Pos2 {
    let scale = Vec2::new(
        axis_scale(surface_size.x, bounds.width()),
        axis_scale(surface_size.y, bounds.height()),
    );
    let offset = client - bounds.min;
    Pos2::new(offset.x * scale.x, offset.y * scale.y)
}

fn axis_scale(native: f32, rendered: f32) -> f32 {
    let scale = native / rendered;
    if scale.is_finite() { scale } else { 1.0 }
}

/// Euclidean distance from a point to the segment `a`-`b`
pub fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
