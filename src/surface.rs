use egui::{Color32, Pos2, Rect, Vec2};
use image::{Rgba, RgbaImage};

use crate::geometry::distance_to_segment;
use crate::style::Style;

/// Which of the two stacked surfaces a draw targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Permanent pixels; the only state that gets exported
    Committed,
    /// Transparent overlay for the in-progress shape
    Preview,
}

/// Minimal drawing interface shared by the committed and preview surfaces.
///
/// All strokes use round caps. Geometry outside the surface is clipped.
pub trait Surface {
    /// Native pixel dimensions
    fn size(&self) -> Vec2;

    /// Stroke the segment `from`-`to`
    fn stroke_line(&mut self, from: Pos2, to: Pos2, style: &Style);

    /// Stroke the outline of an axis-aligned rectangle
    fn stroke_rect(&mut self, rect: Rect, style: &Style);

    /// Stroke a full circle
    fn stroke_circle(&mut self, center: Pos2, radius: f32, style: &Style);

    /// Reset every pixel to transparent
    fn clear(&mut self);

    /// Bumped on every mutation
    fn version(&self) -> u64;
}

/// In-memory RGBA surface
#[derive(Clone)]
pub struct RasterSurface {
    pixels: RgbaImage,
    version: u64,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.pixels.width())
            .field("height", &self.pixels.height())
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
            version: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color32 {
        let [r, g, b, a] = self.pixels.get_pixel(x, y).0;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    /// True when the pixel has any coverage at all
    pub fn is_painted(&self, x: u32, y: u32) -> bool {
        self.pixels.get_pixel(x, y).0[3] > 0
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.pixels().all(|p| p.0[3] == 0)
    }

    /// Coordinates of every painted pixel, row-major
    pub fn painted_pixels(&self) -> Vec<(u32, u32)> {
        self.pixels
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[3] > 0)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    /// Paints every pixel whose center is within `radius` of the geometry
    /// described by `distance`, looking only inside `bounds`.
    fn cover<F>(&mut self, bounds: Rect, radius: f32, color: Color32, distance: F)
    where
        F: Fn(Pos2) -> f32,
    {
        let Some((min_x, min_y, max_x, max_y)) = self.clip(bounds.expand(radius)) else {
            return;
        };
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                if distance(center) <= radius {
                    self.blend_pixel(x, y, color);
                }
            }
        }
    }

    /// Pixel range of `rect` that lies on the surface
    fn clip(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        if self.pixels.width() == 0 || self.pixels.height() == 0 {
            return None;
        }
        if !rect.min.x.is_finite() || !rect.min.y.is_finite() || !rect.max.x.is_finite() || !rect.max.y.is_finite() {
            return None;
        }
        let max_w = (self.pixels.width() - 1) as f32;
        let max_h = (self.pixels.height() - 1) as f32;
        if rect.max.x < 0.0 || rect.max.y < 0.0 || rect.min.x > max_w + 1.0 || rect.min.y > max_h + 1.0 {
            return None;
        }
        let min_x = rect.min.x.floor().clamp(0.0, max_w) as u32;
        let min_y = rect.min.y.floor().clamp(0.0, max_h) as u32;
        let max_x = rect.max.x.ceil().clamp(0.0, max_w) as u32;
        let max_y = rect.max.y.ceil().clamp(0.0, max_h) as u32;
        Some((min_x, min_y, max_x, max_y))
    }

    /// Source-over blend of `color` onto the pixel at (x, y)
    fn blend_pixel(&mut self, x: u32, y: u32, color: Color32) {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        if a == 0 {
            return;
        }
        let dst = self.pixels.get_pixel(x, y).0;
        let src_a = a as f32 / 255.0;
        let dst_a = dst[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return;
        }
        let blend = |src: u8, dst: u8| {
            let src_f = src as f32 / 255.0;
            let dst_f = dst as f32 / 255.0;
            ((src_f * src_a + dst_f * dst_a * (1.0 - src_a)) / out_a * 255.0)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        self.pixels.put_pixel(
            x,
            y,
            Rgba([
                blend(r, dst[0]),
                blend(g, dst[1]),
                blend(b, dst[2]),
                (out_a * 255.0).round() as u8,
            ]),
        );
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(self.pixels.width() as f32, self.pixels.height() as f32)
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2, style: &Style) {
        self.cover(Rect::from_two_pos(from, to), style.radius(), style.color, |p| {
            distance_to_segment(p, from, to)
        });
        self.version += 1;
    }

    fn stroke_rect(&mut self, rect: Rect, style: &Style) {
        // Normalize so rectangles dragged "backwards" cover the same pixels
        let rect = Rect::from_two_pos(rect.min, rect.max);
        let corners = [rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()];
        self.cover(rect, style.radius(), style.color, |p| {
            (0..4)
                .map(|i| distance_to_segment(p, corners[i], corners[(i + 1) % 4]))
                .fold(f32::INFINITY, f32::min)
        });
        self.version += 1;
    }

    fn stroke_circle(&mut self, center: Pos2, radius: f32, style: &Style) {
        let radius = radius.abs();
        let bounds = Rect::from_center_size(center, Vec2::splat(radius * 2.0));
        self.cover(bounds, style.radius(), style.color, |p| (p.distance(center) - radius).abs());
        self.version += 1;
    }

    fn clear(&mut self) {
        self.pixels.pixels_mut().for_each(|p| *p = Rgba([0, 0, 0, 0]));
        self.version += 1;
    }

    fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn style(width: f32) -> Style {
        Style {
            color: Color32::BLACK,
            width,
        }
    }

    #[test]
    fn test_new_surface_is_blank() {
        let surface = RasterSurface::new(16, 8);
        assert!(surface.is_blank());
        assert_eq!(surface.size(), Vec2::new(16.0, 8.0));
    }

    #[test]
    fn test_line_covers_its_endpoints() {
        let mut surface = RasterSurface::new(32, 32);
        surface.stroke_line(pos2(4.5, 4.5), pos2(20.5, 4.5), &style(2.0));
        assert!(surface.is_painted(4, 4));
        assert!(surface.is_painted(20, 4));
        assert!(surface.is_painted(12, 4));
        assert!(!surface.is_painted(12, 10));
    }

    #[test]
    fn test_round_caps_extend_past_endpoints() {
        let mut surface = RasterSurface::new(32, 32);
        surface.stroke_line(pos2(10.5, 10.5), pos2(20.5, 10.5), &style(6.0));
        assert!(surface.is_painted(8, 10));
        assert!(surface.is_painted(22, 10));
        // corner of the bounding square is outside the round cap
        assert!(!surface.is_painted(7, 7));
    }

    #[test]
    fn test_clipping_drops_offscreen_geometry() {
        let mut surface = RasterSurface::new(10, 10);
        surface.stroke_line(pos2(-50.0, -50.0), pos2(-40.0, -40.0), &style(2.0));
        assert!(surface.is_blank());
        surface.stroke_line(pos2(-5.0, 5.5), pos2(5.0, 5.5), &style(2.0));
        assert!(surface.is_painted(0, 5));
    }

    #[test]
    fn test_clear_resets_pixels_and_bumps_version() {
        let mut surface = RasterSurface::new(10, 10);
        surface.stroke_circle(pos2(5.0, 5.0), 3.0, &style(1.0));
        let version = surface.version();
        assert!(!surface.is_blank());
        surface.clear();
        assert!(surface.is_blank());
        assert!(surface.version() > version);
    }

    #[test]
    fn test_opaque_stroke_replaces_color() {
        let mut surface = RasterSurface::new(10, 10);
        let red = Style {
            color: Color32::RED,
            width: 4.0,
        };
        surface.stroke_line(pos2(5.5, 0.0), pos2(5.5, 10.0), &style(4.0));
        surface.stroke_line(pos2(5.5, 0.0), pos2(5.5, 10.0), &red);
        assert_eq!(surface.pixel(5, 5), Color32::RED);
    }
}
