use crate::config::EditorConfig;
use crate::geometry::{distance, Point};
use crate::shape::{find_open_shape_index, Shape};
use crate::state::{DrawMode, VertexRef};

use super::{
    Element, VectorDocument, AXIS_COLOR, CLOSING_VERTEX_ACTIVE, CLOSING_VERTEX_COLOR, EDGE_COLOR,
    GRID_COLOR, PREVIEW_FILL, SHAPE_FILL, VERTEX_COLOR,
};

/// Vertices to draw for a shape, with the live cursor appended as the
/// rubber-band end when one is given.
pub fn outline(shape: &Shape, cursor: Option<Point>) -> Vec<Point> {
    let mut points = shape.points.clone();
    points.extend(cursor);
    points
}

/// The editable canvas: grid, shape fills, edges and vertex handles.
pub fn canvas_document(
    shapes: &[Shape],
    mode: DrawMode,
    cursor: Point,
    config: &EditorConfig,
) -> VectorDocument {
    let size = config.canvas_size;
    let mut doc = VectorDocument::new(size as u32, size as u32);

    let cells = (size / config.grid_spacing).ceil() as u32;
    for cell in 0..=cells {
        let offset = cell as f32 * config.grid_spacing;
        doc.push(Element::Line {
            from: Point::new(0.0, offset),
            to: Point::new(size, offset),
            color: GRID_COLOR,
        });
        doc.push(Element::Line {
            from: Point::new(offset, 0.0),
            to: Point::new(offset, size),
            color: GRID_COLOR,
        });
    }

    let axis = config.axis_cells as f32 * config.grid_spacing;
    doc.push(Element::Line {
        from: Point::new(0.0, axis),
        to: Point::new(size, axis),
        color: AXIS_COLOR,
    });
    doc.push(Element::Line {
        from: Point::new(axis, 0.0),
        to: Point::new(axis, size),
        color: AXIS_COLOR,
    });

    let open_index = find_open_shape_index(shapes);
    for (shape_index, shape) in shapes.iter().enumerate() {
        let rubber_band = mode.is_drawing() && open_index == Some(shape_index);
        let points = outline(shape, rubber_band.then_some(cursor));

        doc.push(Element::Polygon {
            points: points.clone(),
            fill: SHAPE_FILL,
        });
        for edge in points.windows(2) {
            doc.push(Element::Line {
                from: edge[0],
                to: edge[1],
                color: EDGE_COLOR,
            });
        }

        for (vertex_index, &center) in shape.points.iter().enumerate() {
            let fill = match vertex_index {
                0 if distance(center, cursor) < config.close_distance => CLOSING_VERTEX_ACTIVE,
                0 => CLOSING_VERTEX_COLOR,
                _ => VERTEX_COLOR,
            };
            doc.push(Element::Handle {
                center,
                radius: config.handle_radius,
                fill,
                vertex: VertexRef { shape_index, vertex_index },
            });
        }
    }

    doc
}

/// A scaled-down, fill-only rendition for a `size`×`size` preview.
pub fn preview_document(shapes: &[Shape], size: u32, config: &EditorConfig) -> VectorDocument {
    let divider = config.preview_divider(size);
    let mut doc = VectorDocument::new(size, size);
    for shape in shapes {
        doc.push(Element::Polygon {
            points: shape.points.iter().map(|point| point.scaled_down(divider)).collect(),
            fill: PREVIEW_FILL,
        });
    }
    doc
}
