use egui::{Context, PointerButton, Pos2};

use crate::renderer::VectorDocument;
use crate::state::VertexRef;

mod viewport;
pub use viewport::Viewport;

/// What the pointer was over when a button went down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// A draggable vertex handle of an existing shape
    VertexHandle(VertexRef),
    /// Anything else: the canvas grid, a polygon fill, or outside the canvas
    CanvasBackground,
}

/// Pointer input consumed by the draw state machine.
///
/// Positions are screen coordinates; the state machine maps them into the
/// canvas through a [`Viewport`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button was pressed
    PointerDown { position: Pos2, target: PointerTarget },
    /// Pointer moved, with or without a button held
    PointerMove { position: Pos2 },
    /// Primary button was released
    PointerUp { position: Pos2 },
}

impl InputEvent {
    pub fn position(&self) -> Pos2 {
        match self {
            InputEvent::PointerDown { position, .. }
            | InputEvent::PointerMove { position }
            | InputEvent::PointerUp { position } => *position,
        }
    }
}

/// Handles converting raw egui input into our domain-specific InputEvents
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one frame of egui input.
    ///
    /// `canvas` is the document currently shown on the canvas; pointer-down
    /// positions are hit-tested against its vertex handles.
    pub fn process_input(
        &mut self,
        ctx: &Context,
        canvas: &VectorDocument,
        viewport: &dyn Viewport,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let Some(pos) = input.pointer.latest_pos() else {
                return;
            };

            // Moves come first so the cursor is current when a click is handled
            if Some(pos) != self.last_pointer_pos {
                events.push(InputEvent::PointerMove { position: pos });
                self.last_pointer_pos = Some(pos);
            }

            if input.pointer.button_pressed(PointerButton::Primary) {
                events.push(InputEvent::PointerDown {
                    position: pos,
                    target: hit_test(canvas, viewport, pos),
                });
            }
            if input.pointer.button_released(PointerButton::Primary) {
                events.push(InputEvent::PointerUp { position: pos });
            }
        });

        events
    }
}

/// Resolves the pointer target for a screen position.
pub fn hit_test(canvas: &VectorDocument, viewport: &dyn Viewport, pos: Pos2) -> PointerTarget {
    if !viewport.contains(pos) {
        return PointerTarget::CanvasBackground;
    }
    match canvas.handle_at(viewport.to_canvas(pos)) {
        Some(vertex) => PointerTarget::VertexHandle(vertex),
        None => PointerTarget::CanvasBackground,
    }
}
