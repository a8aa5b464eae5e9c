//! Projection of the shape collection into vector documents.
//!
//! Nothing here holds editor state: documents are rebuilt from the shapes,
//! the draw mode and the cursor whenever one of them changes. The same
//! document feeds the egui painter, the SVG serializer and the PNG exporter.

mod canvas;
mod painter;
mod svg;

pub use canvas::{canvas_document, outline, preview_document};
pub use painter::DocumentPainter;

use egui::Color32;

use crate::geometry::{distance, Point};
use crate::state::VertexRef;

pub const GRID_COLOR: Color32 = Color32::from_rgb(192, 192, 192);
pub const AXIS_COLOR: Color32 = Color32::BLUE;
pub const SHAPE_FILL: Color32 = Color32::from_rgb(192, 192, 192);
pub const EDGE_COLOR: Color32 = Color32::BLACK;
pub const PREVIEW_FILL: Color32 = Color32::BLACK;
pub const VERTEX_COLOR: Color32 = Color32::GRAY;
/// First vertex while the cursor is close enough to close the shape
pub const CLOSING_VERTEX_ACTIVE: Color32 = Color32::BLUE;
pub const CLOSING_VERTEX_COLOR: Color32 = Color32::from_rgb(255, 165, 0);

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Line {
        from: Point,
        to: Point,
        color: Color32,
    },
    /// Filled polygon; the outline is implicitly closed
    Polygon {
        points: Vec<Point>,
        fill: Color32,
    },
    /// Draggable vertex marker
    Handle {
        center: Point,
        radius: f32,
        fill: Color32,
        vertex: VertexRef,
    },
}

/// A flat list of drawing elements in document pixels, painted in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VectorDocument {
    pub width: u32,
    pub height: u32,
    pub elements: Vec<Element>,
}

impl VectorDocument {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn polygons(&self) -> impl Iterator<Item = (&[Point], Color32)> {
        self.elements.iter().filter_map(|element| match element {
            Element::Polygon { points, fill } => Some((points.as_slice(), *fill)),
            _ => None,
        })
    }

    /// Topmost handle under `point` (document coordinates).
    pub fn handle_at(&self, point: Point) -> Option<VertexRef> {
        self.elements.iter().rev().find_map(|element| match element {
            Element::Handle { center, radius, vertex, .. } if distance(*center, point) <= *radius => {
                Some(*vertex)
            }
            _ => None,
        })
    }
}
