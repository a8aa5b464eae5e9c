use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// An ordered list of vertices. A closed shape repeats its first point as its
/// last point; there is no separate "closed" flag.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Shape {
    pub points: Vec<Point>,
}

impl Shape {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Closed iff it has at least three points and the first equals the last.
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => self.points.len() >= 3 && first == last,
            _ => false,
        }
    }

    pub fn is_open(&self) -> bool {
        !self.is_closed()
    }

    pub fn first_point(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// Returns a copy with `point` appended.
    pub fn with_point(&self, point: Point) -> Self {
        let mut points = Vec::with_capacity(self.points.len() + 1);
        points.extend_from_slice(&self.points);
        points.push(point);
        Self { points }
    }
}

/// Index of the first open shape, or `None` when every shape is closed.
pub fn find_open_shape_index(shapes: &[Shape]) -> Option<usize> {
    shapes.iter().position(Shape::is_open)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(points: &[(f32, f32)]) -> Shape {
        Shape::new(points.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    #[test]
    fn test_closure_rule() {
        assert!(shape(&[]).is_open());
        assert!(shape(&[(1.0, 1.0)]).is_open());
        // Two equal points are still open: closing needs three.
        assert!(shape(&[(1.0, 1.0), (1.0, 1.0)]).is_open());
        assert!(shape(&[(1.0, 1.0), (5.0, 1.0), (9.0, 9.0)]).is_open());
        assert!(shape(&[(1.0, 1.0), (5.0, 1.0), (1.0, 1.0)]).is_closed());
    }

    #[test]
    fn test_find_open_shape_index() {
        assert_eq!(find_open_shape_index(&[]), None);

        let closed = shape(&[(1.0, 1.0), (5.0, 1.0), (5.0, 5.0), (1.0, 1.0)]);
        let open = shape(&[(20.0, 20.0), (30.0, 20.0)]);
        assert_eq!(find_open_shape_index(&[closed.clone()]), None);
        assert_eq!(find_open_shape_index(&[closed.clone(), open.clone()]), Some(1));
        assert_eq!(find_open_shape_index(&[open, closed]), Some(0));
    }

    #[test]
    fn test_with_point_leaves_original() {
        let original = shape(&[(1.0, 1.0)]);
        let extended = original.with_point(Point::new(2.0, 2.0));
        assert_eq!(original.points.len(), 1);
        assert_eq!(extended.points.len(), 2);
    }
}
