//! Drawing rules for each shape kind.
//!
//! Every rule is a pure function of its geometry and a [`Style`]; the
//! only side effect is the draw call on the target surface.

use egui::{Pos2, Rect};

use crate::style::{ShapeKind, Style};
use crate::surface::Surface;

/// One finished mark, described by its geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// A single freehand sample-to-sample segment
    Segment { from: Pos2, to: Pos2 },
    /// Outline with corners at the two points, in either order
    Rectangle { corner: Pos2, opposite: Pos2 },
    Circle { center: Pos2, radius: f32 },
    Line { from: Pos2, to: Pos2 },
}

impl Shape {
    /// The shape a gesture of `kind` describes between `anchor` and `current`
    pub fn from_drag(kind: ShapeKind, anchor: Pos2, current: Pos2) -> Self {
        match kind {
            ShapeKind::Freehand => Shape::Segment {
                from: anchor,
                to: current,
            },
            ShapeKind::Rectangle => Shape::Rectangle {
                corner: anchor,
                opposite: current,
            },
            ShapeKind::Circle => Shape::Circle {
                center: anchor,
                radius: anchor.distance(current),
            },
            ShapeKind::Line => Shape::Line {
                from: anchor,
                to: current,
            },
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, style: &Style) {
        match *self {
            Shape::Segment { from, to } => freehand_segment(surface, from, to, style),
            Shape::Rectangle { corner, opposite } => rectangle(surface, corner, opposite, style),
            Shape::Circle { center, radius } => circle(surface, center, radius, style),
            Shape::Line { from, to } => line(surface, from, to, style),
        }
    }
}

/// Segment between two consecutive pointer samples, without smoothing
pub fn freehand_segment(surface: &mut dyn Surface, from: Pos2, to: Pos2, style: &Style) {
    surface.stroke_line(from, to, style);
}

/// Outline of the rectangle spanned by two opposite corners
pub fn rectangle(surface: &mut dyn Surface, corner: Pos2, opposite: Pos2, style: &Style) {
    surface.stroke_rect(Rect::from_two_pos(corner, opposite), style);
}

pub fn circle(surface: &mut dyn Surface, center: Pos2, radius: f32, style: &Style) {
    surface.stroke_circle(center, radius, style);
}

pub fn line(surface: &mut dyn Surface, from: Pos2, to: Pos2, style: &Style) {
    surface.stroke_line(from, to, style);
}
