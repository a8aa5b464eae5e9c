use egui::{Pos2, Rect};

use crate::geometry::Point;

/// Where the drawing canvas sits on screen.
///
/// The state machine only needs the canvas rectangle, so tests can pass a
/// plain [`Rect`] instead of a laid-out UI.
pub trait Viewport {
    /// Canvas rectangle in screen coordinates
    fn canvas_rect(&self) -> Rect;

    /// Translates a screen position into canvas-local coordinates
    fn to_canvas(&self, pos: Pos2) -> Point {
        let origin = self.canvas_rect().min;
        Point::new(pos.x - origin.x, pos.y - origin.y)
    }

    /// Whether a screen position lies on the canvas, edges included
    fn contains(&self, pos: Pos2) -> bool {
        self.canvas_rect().contains(pos)
    }
}

impl Viewport for Rect {
    fn canvas_rect(&self) -> Rect {
        *self
    }
}
