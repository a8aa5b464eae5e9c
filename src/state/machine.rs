//! Pointer-driven state machine that turns clicks and drags into shape edits.
//!
//! The machine never mutates the shape collection it is given. Every event
//! that changes the document yields a complete next collection, which the
//! caller stores as a whole (see `HashedValue::set`).
//!
//! # Example
//!
//! ```rust
//! use egui::{pos2, vec2, Rect};
//! use icon_editor::input::InputEvent;
//! use icon_editor::state::{DrawMode, DrawStateMachine};
//!
//! let canvas = Rect::from_min_size(pos2(0.0, 0.0), vec2(512.0, 512.0));
//! let mut machine = DrawStateMachine::default();
//!
//! let shapes = machine
//!     .handle_event(&InputEvent::PointerUp { position: pos2(10.0, 10.0) }, &[], &canvas)
//!     .unwrap();
//! assert_eq!(shapes.len(), 1);
//! assert_eq!(machine.mode(), DrawMode::Drawing);
//! ```
use crate::config::SHAPE_CLOSE_DISTANCE;
use crate::geometry::{distance, Point};
use crate::input::{InputEvent, PointerTarget, Viewport};
use crate::shape::{find_open_shape_index, Shape};
use super::{DrawMode, VertexRef};

#[derive(Debug, Clone)]
pub struct DrawStateMachine {
    mode: DrawMode,
    /// Last pointer position in canvas coordinates, drives the rubber band
    cursor: Point,
    close_distance: f32,
}

impl Default for DrawStateMachine {
    fn default() -> Self {
        Self::new(SHAPE_CLOSE_DISTANCE)
    }
}

impl DrawStateMachine {
    pub fn new(close_distance: f32) -> Self {
        Self {
            mode: DrawMode::Ready,
            cursor: Point::default(),
            close_distance,
        }
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn close_distance(&self) -> f32 {
        self.close_distance
    }

    /// Applies one pointer event.
    ///
    /// Returns the next shape collection when the event changed the document,
    /// `None` when only the mode or the cursor changed.
    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        shapes: &[Shape],
        viewport: &dyn Viewport,
    ) -> Option<Vec<Shape>> {
        match *event {
            InputEvent::PointerDown { target, .. } => {
                self.pointer_down(target);
                None
            }
            InputEvent::PointerMove { position } => {
                self.pointer_move(viewport.to_canvas(position), shapes)
            }
            InputEvent::PointerUp { position } => self.pointer_up(position, shapes, viewport),
        }
    }

    /// Realigns the mode with a collection loaded from elsewhere, such as a
    /// back/forward navigation. Any drag in progress is dropped.
    pub fn resync(&mut self, shapes: &[Shape]) {
        let mode = match find_open_shape_index(shapes) {
            Some(_) => DrawMode::Drawing,
            None => DrawMode::Ready,
        };
        self.transition_to(mode);
    }

    fn pointer_down(&mut self, target: PointerTarget) {
        if !self.mode.is_ready() {
            return;
        }
        if let PointerTarget::VertexHandle(target) = target {
            self.transition_to(DrawMode::DraggingVertex { target });
        }
    }

    fn pointer_move(&mut self, cursor: Point, shapes: &[Shape]) -> Option<Vec<Shape>> {
        self.cursor = cursor;
        let target = self.mode.drag_target()?;
        move_vertex(shapes, target, cursor)
    }

    fn pointer_up(
        &mut self,
        position: egui::Pos2,
        shapes: &[Shape],
        viewport: &dyn Viewport,
    ) -> Option<Vec<Shape>> {
        if self.mode.is_dragging() {
            self.transition_to(DrawMode::Ready);
            return None;
        }

        if !viewport.contains(position) {
            log::trace!("Ignoring release outside the canvas at {:?}", position);
            return None;
        }

        let location = viewport.to_canvas(position);
        self.cursor = location;

        let (next_shapes, mode) = append_vertex(shapes, location, self.close_distance);
        self.transition_to(mode);
        Some(next_shapes)
    }

    fn transition_to(&mut self, mode: DrawMode) {
        if self.mode != mode {
            log::debug!("Draw mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }
}

/// Adds a vertex at `location`, closing, extending or starting a shape.
///
/// Returns the next collection and the mode the editor should be in.
pub fn append_vertex(shapes: &[Shape], location: Point, close_distance: f32) -> (Vec<Shape>, DrawMode) {
    let Some(open_index) = find_open_shape_index(shapes) else {
        let mut next = shapes.to_vec();
        next.push(Shape::new(vec![location]));
        return (next, DrawMode::Drawing);
    };

    let mut mode = DrawMode::Drawing;
    let next = shapes
        .iter()
        .enumerate()
        .map(|(index, shape)| {
            if index != open_index {
                return shape.clone();
            }
            match shape.first_point() {
                // Closing needs two vertices already, so the result has at least three
                Some(first) if shape.points.len() >= 2 && distance(location, first) < close_distance => {
                    // Repeat the first point itself so first == last
                    mode = DrawMode::Ready;
                    shape.with_point(first)
                }
                _ => shape.with_point(location),
            }
        })
        .collect();

    (next, mode)
}

/// Moves one vertex to `to`. Moving either end of a closed shape moves both
/// ends so the shape stays closed.
///
/// Returns `None` when the target does not exist.
pub fn move_vertex(shapes: &[Shape], target: VertexRef, to: Point) -> Option<Vec<Shape>> {
    let shape = shapes.get(target.shape_index)?;
    if target.vertex_index >= shape.points.len() {
        return None;
    }

    let last = shape.points.len() - 1;
    let moves_both_ends = shape.is_closed() && (target.vertex_index == 0 || target.vertex_index == last);

    let moved = Shape::new(
        shape
            .points
            .iter()
            .enumerate()
            .map(|(index, &point)| {
                let is_end = index == 0 || index == last;
                if index == target.vertex_index || (moves_both_ends && is_end) {
                    to
                } else {
                    point
                }
            })
            .collect(),
    );

    let mut next = shapes.to_vec();
    next[target.shape_index] = moved;
    Some(next)
}
