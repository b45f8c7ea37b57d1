use std::rc::Rc;

use egui::{Color32, Pos2, Rect, pos2, vec2};
use sketchpad::export::encode_png;
use sketchpad::raster;
use sketchpad::{Controller, RasterSurface, ShapeKind, Style, Surface, ToolConfig};

const SIZE: u32 = 100;

/// Rendered at native size, so screen points map 1:1 to surface pixels
fn native_bounds() -> Rect {
    Rect::from_min_size(Pos2::ZERO, vec2(SIZE as f32, SIZE as f32))
}

fn controller(shape: ShapeKind, color: &str, width: f32) -> Controller {
    let tools = Rc::new(ToolConfig::new(color, width, shape));
    Controller::with_size(SIZE, SIZE, tools)
}

fn drag(controller: &mut Controller, points: &[Pos2]) {
    let bounds = native_bounds();
    let (first, rest) = points.split_first().expect("drag needs a start point");
    controller.pointer_down(*first, bounds);
    for p in rest {
        controller.pointer_move(*p, bounds);
    }
}

fn release(controller: &mut Controller, at: Pos2) {
    controller.pointer_up(at, native_bounds());
}

#[test]
fn test_rectangle_scenario() {
    let mut c = controller(ShapeKind::Rectangle, "#000000", 2.0);
    drag(&mut c, &[pos2(10.0, 10.0), pos2(30.0, 20.0), pos2(60.0, 40.0)]);
    release(&mut c, pos2(60.0, 40.0));

    let committed = c.committed();
    assert!(committed.is_painted(10, 10));
    assert!(committed.is_painted(35, 10));
    assert!(committed.is_painted(10, 25));
    assert!(committed.is_painted(60, 25));
    assert!(committed.is_painted(35, 40));
    assert!(!committed.is_painted(35, 25), "outline must not be filled");
    assert!(!committed.is_painted(80, 80));
    assert_eq!(committed.pixel(35, 10), Color32::BLACK);

    assert!(c.preview().is_blank());
    assert!(c.state().is_idle());
}

#[test]
fn test_circle_scenario() {
    let mut c = controller(ShapeKind::Circle, "#000000", 2.0);
    drag(&mut c, &[pos2(0.0, 0.0), pos2(12.0, 3.0)]);
    release(&mut c, pos2(30.0, 0.0));

    let committed = c.committed();
    // on the ring of radius 30 around the origin
    assert!(committed.is_painted(29, 0));
    assert!(committed.is_painted(0, 29));
    assert!(committed.is_painted(21, 21));
    // inside and outside the ring
    assert!(!committed.is_painted(10, 10));
    assert!(!committed.is_painted(30, 30));
    assert!(c.preview().is_blank());
}

#[test]
fn test_preview_holds_only_latest_frame() {
    let mut c = controller(ShapeKind::Line, "#ff0000", 3.0);
    let anchor = pos2(50.0, 50.0);
    c.pointer_down(anchor, native_bounds());

    for p in [pos2(90.0, 50.0), pos2(50.0, 90.0), pos2(10.0, 10.0)] {
        c.pointer_move(p, native_bounds());

        let mut expected = RasterSurface::new(SIZE, SIZE);
        raster::line(&mut expected, anchor, p, &Style::resolve("#ff0000", 3.0));
        assert_eq!(c.preview().image(), expected.image());
        assert!(c.committed().is_blank(), "shape previews never touch committed pixels");
    }
}

#[test]
fn test_commit_ignores_intermediate_moves() {
    let mut wandering = controller(ShapeKind::Rectangle, "#00ff00", 4.0);
    drag(
        &mut wandering,
        &[pos2(20.0, 20.0), pos2(95.0, 5.0), pos2(3.0, 97.0), pos2(70.0, 70.0)],
    );
    release(&mut wandering, pos2(60.0, 45.0));

    let mut direct = controller(ShapeKind::Rectangle, "#00ff00", 4.0);
    drag(&mut direct, &[pos2(20.0, 20.0)]);
    release(&mut direct, pos2(60.0, 45.0));

    assert_eq!(wandering.committed().image(), direct.committed().image());
}

#[test]
fn test_leave_abandons_shape() {
    let mut c = controller(ShapeKind::Freehand, "#000000", 2.0);
    drag(&mut c, &[pos2(5.0, 5.0), pos2(40.0, 5.0)]);
    release(&mut c, pos2(40.0, 5.0));
    let before = c.committed().clone();

    c.tools().set_shape(ShapeKind::Circle);
    drag(&mut c, &[pos2(50.0, 50.0), pos2(70.0, 50.0), pos2(80.0, 50.0)]);
    assert!(!c.preview().is_blank());
    c.pointer_leave();

    assert_eq!(c.committed().image(), before.image());
    assert!(c.preview().is_blank());
    assert!(c.state().is_idle());

    // a release after leaving does not reopen the shape
    release(&mut c, pos2(80.0, 50.0));
    assert_eq!(c.committed().image(), before.image());
}

#[test]
fn test_freehand_is_union_of_segments() {
    let style = Style::resolve("#0000ff", 3.0);
    let points = [pos2(10.0, 10.0), pos2(20.0, 30.0), pos2(45.0, 35.0), pos2(70.0, 12.0)];

    let mut c = controller(ShapeKind::Freehand, "#0000ff", 3.0);
    c.pointer_down(points[0], native_bounds());
    let preview_version = c.preview().version();
    for p in &points[1..] {
        c.pointer_move(*p, native_bounds());
        assert!(c.preview().is_blank());
        assert_eq!(c.preview().version(), preview_version);
    }
    release(&mut c, points[3]);

    let mut expected = RasterSurface::new(SIZE, SIZE);
    for pair in points.windows(2) {
        raster::freehand_segment(&mut expected, pair[0], pair[1], &style);
    }
    assert_eq!(c.committed().image(), expected.image());
    assert!(c.preview().is_blank());
}

#[test]
fn test_color_change_mid_stroke_affects_next_segment_only() {
    let mut c = controller(ShapeKind::Freehand, "#000000", 2.0);
    drag(&mut c, &[pos2(10.5, 10.5), pos2(40.5, 10.5)]);
    c.tools().set_color("#ff0000");
    c.pointer_move(pos2(40.5, 60.5), native_bounds());
    release(&mut c, pos2(40.5, 60.5));

    assert_eq!(c.committed().pixel(25, 10), Color32::BLACK);
    assert_eq!(c.committed().pixel(40, 35), Color32::RED);
}

#[test]
fn test_invalid_tool_values_fall_back_to_defaults() {
    let mut c = controller(ShapeKind::Line, "not-a-color", 0.0);
    drag(&mut c, &[pos2(10.5, 50.5)]);
    release(&mut c, pos2(90.5, 50.5));

    assert_eq!(c.committed().pixel(50, 50), Color32::BLACK);
    assert!(!c.committed().is_painted(50, 53));
}

#[test]
fn test_clear_mid_drag_discards_gesture() {
    let mut c = controller(ShapeKind::Rectangle, "#000000", 2.0);
    drag(&mut c, &[pos2(5.0, 5.0), pos2(20.0, 20.0)]);
    release(&mut c, pos2(20.0, 20.0));
    drag(&mut c, &[pos2(30.0, 30.0), pos2(60.0, 60.0)]);
    assert!(!c.preview().is_blank());

    c.clear();
    assert!(c.committed().is_blank());
    assert!(c.preview().is_blank());
    assert!(c.state().is_idle());

    release(&mut c, pos2(60.0, 60.0));
    assert!(c.committed().is_blank());
}

#[test]
fn test_events_without_press_are_noops() {
    let mut c = controller(ShapeKind::Line, "#000000", 2.0);
    c.pointer_move(pos2(10.0, 10.0), native_bounds());
    c.pointer_up(pos2(20.0, 20.0), native_bounds());
    c.pointer_leave();
    assert!(c.committed().is_blank());
    assert!(c.preview().is_blank());
    assert_eq!(c.committed().version(), 0);
}

#[test]
fn test_reentry_does_not_resume_freehand() {
    let mut c = controller(ShapeKind::Freehand, "#000000", 2.0);
    drag(&mut c, &[pos2(10.0, 10.0), pos2(20.0, 10.0)]);
    c.pointer_leave();
    let before = c.committed().clone();

    c.pointer_move(pos2(80.0, 80.0), native_bounds());
    assert_eq!(c.committed().image(), before.image());
    assert!(!c.committed().is_painted(50, 45), "no segment joins the old path to the re-entry point");
}

#[test]
fn test_scaled_rendering_maps_to_surface_pixels() {
    let mut c = controller(ShapeKind::Line, "#000000", 2.0);
    // drawn at half size, offset on screen
    let bounds = Rect::from_min_size(pos2(200.0, 100.0), vec2(50.0, 50.0));
    c.pointer_down(pos2(205.0, 125.0), bounds);
    c.pointer_up(pos2(245.0, 125.0), bounds);

    // (10, 50) to (90, 50) in surface space
    assert!(c.committed().is_painted(50, 50));
    assert!(c.committed().is_painted(12, 50));
    assert!(!c.committed().is_painted(50, 30));
    assert_eq!(c.map(bounds.center(), bounds), pos2(50.0, 50.0));
}

#[test]
fn test_export_contains_only_committed_pixels() {
    let mut c = controller(ShapeKind::Line, "#000000", 2.0);
    drag(&mut c, &[pos2(10.5, 10.5)]);
    release(&mut c, pos2(90.5, 10.5));
    c.tools().set_shape(ShapeKind::Rectangle);
    drag(&mut c, &[pos2(20.0, 20.0), pos2(80.0, 80.0)]);
    assert!(!c.preview().is_blank());

    let png = encode_png(c.committed()).unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (SIZE, SIZE));
    assert_eq!(&decoded, c.committed().image());
    assert_eq!(decoded.get_pixel(50, 80).0[3], 0, "preview rectangle must not be exported");
}

#[test]
fn test_degenerate_shapes_do_not_fail() {
    for kind in ShapeKind::ALL {
        let mut c = controller(kind, "#000000", 2.0);
        drag(&mut c, &[pos2(50.0, 50.0), pos2(50.0, 50.0)]);
        release(&mut c, pos2(50.0, 50.0));
        assert!(c.state().is_idle());
        assert!(c.preview().is_blank());
    }

    let mut surface = RasterSurface::new(SIZE, SIZE);
    raster::rectangle(&mut surface, pos2(30.0, 30.0), pos2(30.0, 30.0), &Style::default());
    raster::circle(&mut surface, pos2(60.0, 60.0), 0.0, &Style::default());
    assert!(surface.painted_pixels().len() < 16);
}

#[test]
fn test_shape_switch_mid_drag_uses_live_kind() {
    let mut c = controller(ShapeKind::Line, "#000000", 2.0);
    drag(&mut c, &[pos2(50.0, 50.0)]);
    c.tools().set_shape(ShapeKind::Circle);
    c.pointer_move(pos2(70.0, 50.0), native_bounds());
    release(&mut c, pos2(80.0, 50.0));

    // ring of radius 30 around the press point
    assert!(c.committed().is_painted(50, 79));
    assert!(c.committed().is_painted(20, 49));
    // no line from the press point to the release point
    assert!(!c.committed().is_painted(65, 49));
    assert!(c.preview().is_blank());
}
