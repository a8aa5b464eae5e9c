//! The interaction modes of the polygon editor.
//!
//! ```text
//!               click on canvas              click near first point
//!   ┌───────┐ ─────────────────► ┌─────────┐ ──────────────────────►  ┌───────┐
//!   │ Ready │                    │ Drawing │                          │ Ready │
//!   └───────┘                    └─────────┘ ◄─┐ click elsewhere      └───────┘
//!     │   ▲                                    └─ (append vertex)
//!     │   │ release
//!     ▼   │
//!   ┌──────────────────┐
//!   │ DraggingVertex   │ ◄── press on a vertex handle (from Ready only)
//!   └──────────────────┘
//! ```
//!
//! The drag target only exists inside `DraggingVertex`, so leaving the mode
//! always clears it.

/// Identifies one stored vertex of one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexRef {
    pub shape_index: usize,
    pub vertex_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    /// No shape in progress
    #[default]
    Ready,
    /// A shape is open and waiting for its next vertex or a closing click
    Drawing,
    /// An existing vertex follows the pointer
    DraggingVertex { target: VertexRef },
}

impl DrawMode {
    pub fn is_ready(&self) -> bool {
        matches!(self, DrawMode::Ready)
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self, DrawMode::Drawing)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DrawMode::DraggingVertex { .. })
    }

    /// The vertex being dragged, if any
    pub fn drag_target(&self) -> Option<VertexRef> {
        match self {
            DrawMode::DraggingVertex { target } => Some(*target),
            _ => None,
        }
    }

    /// Hint shown next to the canvas heading
    pub fn label(&self) -> &'static str {
        match self {
            DrawMode::Ready => "Click on canvas to start drawing",
            DrawMode::Drawing => "Click on another point to connect with the latest",
            DrawMode::DraggingVertex { .. } => "Moving a vertex of a shape",
        }
    }
}
