//! The pointer-driven gesture state machine.
//!
//! Transitions are pure functions: each takes the current state and an
//! input and returns the next state plus the draw effects to apply. The
//! controller owns the surfaces and applies the effects in order.
//!
//! # State Transitions
//!
//! ```text
//!            down                      move
//!   ┌──────┐ ────────► ┌──────────────┐ ◄─┐
//!   │ Idle │           │    Active    │ ──┘
//!   └──────┘ ◄──────── └──────────────┘
//!            up (commit) / leave (discard) / clear
//! ```
//!
//! Events that do not fit the current state (a move while idle, a second
//! down while active) produce no effects and leave the state unchanged.
use egui::Pos2;

use crate::raster::Shape;
use crate::style::{ShapeKind, Style};
use crate::surface::Layer;

/// A press-drag interaction in progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    /// Kind used by the most recent draw. The toolbar may change it
    /// mid-gesture; each move and the release use the live value.
    pub kind: ShapeKind,
    /// Where the button went down
    pub anchor: Pos2,
    /// Most recent pointer sample
    pub last: Pos2,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Active(Gesture),
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, GestureState::Active(_))
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        match self {
            GestureState::Active(gesture) => Some(gesture),
            GestureState::Idle => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GestureState::Idle => "Idle",
            GestureState::Active(_) => "Active",
        }
    }
}

/// A single mutation of one of the two surfaces
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawEffect {
    ClearPreview,
    ClearCommitted,
    Draw { layer: Layer, shape: Shape, style: Style },
}

/// Result of feeding one input to the state machine
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub next: GestureState,
    pub effects: Vec<DrawEffect>,
}

impl Transition {
    fn unchanged(state: GestureState) -> Self {
        Self {
            next: state,
            effects: Vec::new(),
        }
    }
}

/// Button pressed at `point`. Starts a gesture of `kind` when idle.
///
/// A freehand path opens at the anchor; nothing is painted until the
/// first move supplies a second point.
pub fn on_pointer_down(state: GestureState, point: Pos2, kind: ShapeKind) -> Transition {
    match state {
        GestureState::Idle => Transition {
            next: GestureState::Active(Gesture {
                kind,
                anchor: point,
                last: point,
            }),
            effects: Vec::new(),
        },
        GestureState::Active(_) => Transition::unchanged(state),
    }
}

/// Pointer moved to `point` with the button held, drawing as `kind`.
///
/// Freehand paints the segment from the previous sample straight onto the
/// committed surface. Shapes replace the preview with a single frame from
/// the anchor. Switching from a shape to freehand mid-gesture drops the
/// stale preview frame first.
pub fn on_pointer_move(state: GestureState, point: Pos2, kind: ShapeKind, style: Style) -> Transition {
    let GestureState::Active(gesture) = state else {
        return Transition::unchanged(state);
    };

    let effects = if kind.is_freehand() {
        let segment = DrawEffect::Draw {
            layer: Layer::Committed,
            shape: Shape::Segment {
                from: gesture.last,
                to: point,
            },
            style,
        };
        if gesture.kind.is_freehand() {
            vec![segment]
        } else {
            vec![DrawEffect::ClearPreview, segment]
        }
    } else {
        vec![
            DrawEffect::ClearPreview,
            DrawEffect::Draw {
                layer: Layer::Preview,
                shape: Shape::from_drag(kind, gesture.anchor, point),
                style,
            },
        ]
    };

    Transition {
        next: GestureState::Active(Gesture {
            kind,
            anchor: gesture.anchor,
            last: point,
        }),
        effects,
    }
}

/// Button released at `point`. A shape `kind` is committed exactly once,
/// from the anchor to the release point; freehand is already on the surface.
pub fn on_pointer_up(state: GestureState, point: Pos2, kind: ShapeKind, style: Style) -> Transition {
    if state.is_idle() {
        return Transition::unchanged(state);
    }

    let mut effects = vec![DrawEffect::ClearPreview];
    if let Some(gesture) = state.gesture().filter(|_| !kind.is_freehand()) {
        effects.push(DrawEffect::Draw {
            layer: Layer::Committed,
            shape: Shape::from_drag(kind, gesture.anchor, point),
            style,
        });
    }

    Transition {
        next: GestureState::Idle,
        effects,
    }
}

/// Pointer left the canvas with the button held: abandon without commit.
pub fn on_pointer_leave(state: GestureState) -> Transition {
    match state {
        GestureState::Active(_) => Transition {
            next: GestureState::Idle,
            effects: vec![DrawEffect::ClearPreview],
        },
        GestureState::Idle => Transition::unchanged(state),
    }
}

/// Wipe both surfaces and drop any gesture in progress.
pub fn on_clear(_state: GestureState) -> Transition {
    Transition {
        next: GestureState::Idle,
        effects: vec![DrawEffect::ClearPreview, DrawEffect::ClearCommitted],
    }
}
