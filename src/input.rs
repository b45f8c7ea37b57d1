use egui::{Context, Event, PointerButton, Pos2, Rect};

use crate::controller::PointerEvent;

/// Converts raw egui pointer events into canvas [`PointerEvent`]s.
///
/// Raw events are walked in the order egui recorded them, so a down, the
/// moves and the release of one drag reach the controller in temporal
/// order even when they land in the same frame.
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Primary button currently held after a press inside the canvas
    held: bool,
    /// Whether the last known pointer position was over the canvas
    inside: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect this frame's canvas events; `canvas_rect` is where the
    /// surfaces are drawn on screen.
    ///
    /// `canvas_hovered` comes from the canvas widget's response. It is false
    /// while another layer (a popup, the color picker) sits over the canvas,
    /// and presses are only taken when it is true.
    pub fn process_input(&mut self, ctx: &Context, canvas_rect: Rect, canvas_hovered: bool) -> Vec<PointerEvent> {
        ctx.input(|input| self.translate(&input.events, canvas_rect, canvas_hovered))
    }

    /// Same as [`Self::process_input`] for an already captured event list
    pub fn translate(&mut self, raw: &[Event], canvas_rect: Rect, canvas_hovered: bool) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        for event in raw {
            match event {
                Event::PointerMoved(pos) => self.pointer_moved(*pos, canvas_rect, &mut events),
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    self.inside = canvas_rect.contains(*pos);
                    if *pressed {
                        if self.inside && canvas_hovered {
                            self.held = true;
                            events.push(PointerEvent::Down {
                                client: *pos,
                                bounds: canvas_rect,
                            });
                        }
                    } else if self.held {
                        self.held = false;
                        events.push(PointerEvent::Up {
                            client: *pos,
                            bounds: canvas_rect,
                        });
                    }
                }
                Event::PointerGone => {
                    if self.held {
                        events.push(PointerEvent::Leave);
                    }
                    self.held = false;
                    self.inside = false;
                }
                _ => {}
            }
        }
        events
    }

    fn pointer_moved(&mut self, pos: Pos2, canvas_rect: Rect, events: &mut Vec<PointerEvent>) {
        let inside = canvas_rect.contains(pos);
        if self.held {
            if inside {
                events.push(PointerEvent::Move {
                    client: pos,
                    bounds: canvas_rect,
                });
            } else if self.inside {
                // Leaving mid-drag abandons the gesture; re-entering needs a new press
                events.push(PointerEvent::Leave);
                self.held = false;
            }
        }
        self.inside = inside;
    }
}
