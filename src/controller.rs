use egui::{Pos2, Rect};
use log::{debug, info};
use std::rc::Rc;

use crate::gesture::{self, DrawEffect, GestureState, Transition};
use crate::geometry::map_pointer;
use crate::raster::Shape;
use crate::style::ToolConfig;
use crate::surface::{Layer, RasterSurface, Surface};

/// Pointer input as delivered by the host, in screen coordinates.
///
/// `bounds` is the on-screen rectangle the surfaces are currently rendered
/// into; it may differ in size from the native pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { client: Pos2, bounds: Rect },
    Move { client: Pos2, bounds: Rect },
    Up { client: Pos2, bounds: Rect },
    /// Pointer exited the canvas while the button was held
    Leave,
}

/// Owns the gesture state and is the only writer to both surfaces.
///
/// Every event is applied to completion (all draw effects executed)
/// before the call returns.
pub struct Controller<S: Surface = RasterSurface> {
    committed: S,
    preview: S,
    tools: Rc<ToolConfig>,
    state: GestureState,
}

impl<S: Surface> std::fmt::Debug for Controller<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("state", &self.state)
            .field("tools", &self.tools)
            .field("committed_version", &self.committed.version())
            .field("preview_version", &self.preview.version())
            .finish()
    }
}

impl Controller<RasterSurface> {
    /// Two blank RGBA surfaces of the given size
    pub fn with_size(width: u32, height: u32, tools: Rc<ToolConfig>) -> Self {
        Self::new(
            RasterSurface::new(width, height),
            RasterSurface::new(width, height),
            tools,
        )
    }
}

impl<S: Surface> Controller<S> {
    /// Both surfaces must have the same pixel dimensions.
    pub fn new(committed: S, preview: S, tools: Rc<ToolConfig>) -> Self {
        debug_assert_eq!(committed.size(), preview.size());
        Self {
            committed,
            preview,
            tools,
            state: GestureState::Idle,
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn tools(&self) -> &Rc<ToolConfig> {
        &self.tools
    }

    pub fn committed(&self) -> &S {
        &self.committed
    }

    pub fn preview(&self) -> &S {
        &self.preview
    }

    /// Surface-space position of a screen point
    pub fn map(&self, client: Pos2, bounds: Rect) -> Pos2 {
        map_pointer(client, self.committed.size(), bounds)
    }

    pub fn handle(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { client, bounds } => self.pointer_down(client, bounds),
            PointerEvent::Move { client, bounds } => self.pointer_move(client, bounds),
            PointerEvent::Up { client, bounds } => self.pointer_up(client, bounds),
            PointerEvent::Leave => self.pointer_leave(),
        }
    }

    pub fn pointer_down(&mut self, client: Pos2, bounds: Rect) {
        let point = self.map(client, bounds);
        let kind = self.tools.shape();
        let transition = gesture::on_pointer_down(self.state, point, kind);
        self.apply("down", transition);
    }

    pub fn pointer_move(&mut self, client: Pos2, bounds: Rect) {
        if self.state.is_idle() {
            return;
        }
        let point = self.map(client, bounds);
        let (kind, style) = (self.tools.shape(), self.tools.current_style());
        let transition = gesture::on_pointer_move(self.state, point, kind, style);
        self.apply("move", transition);
    }

    pub fn pointer_up(&mut self, client: Pos2, bounds: Rect) {
        if self.state.is_idle() {
            return;
        }
        let point = self.map(client, bounds);
        let (kind, style) = (self.tools.shape(), self.tools.current_style());
        let transition = gesture::on_pointer_up(self.state, point, kind, style);
        self.apply("up", transition);
    }

    pub fn pointer_leave(&mut self) {
        if let Some(gesture) = self.state.gesture() {
            info!("Pointer left canvas, discarding {} gesture", gesture.kind);
        }
        let transition = gesture::on_pointer_leave(self.state);
        self.apply("leave", transition);
    }

    /// Blank both surfaces and abandon any gesture, whatever the state
    pub fn clear(&mut self) {
        info!("Clearing canvas (state: {})", self.state.name());
        let transition = gesture::on_clear(self.state);
        self.apply("clear", transition);
    }

    fn apply(&mut self, input: &'static str, transition: Transition) {
        debug!(
            "{} --{}--> {} ({} effects)",
            self.state.name(),
            input,
            transition.next.name(),
            transition.effects.len()
        );
        for effect in &transition.effects {
            match effect {
                DrawEffect::ClearPreview => self.preview.clear(),
                DrawEffect::ClearCommitted => self.committed.clear(),
                DrawEffect::Draw { layer, shape, style } => {
                    let surface: &mut dyn Surface = match layer {
                        Layer::Committed => &mut self.committed,
                        Layer::Preview => &mut self.preview,
                    };
                    shape.draw(surface, style);
                    if *layer == Layer::Committed && !matches!(shape, Shape::Segment { .. }) {
                        info!("Committed {:?}", shape);
                    }
                }
            }
        }
        self.state = transition.next;
    }
}
