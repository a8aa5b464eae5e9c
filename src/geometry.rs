use egui::Pos2;
use serde::{Deserialize, Serialize};

/// A vertex position in canvas pixels, origin at the top-left of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Divides both coordinates, used to project onto smaller previews.
    pub fn scaled_down(self, divider: f32) -> Self {
        Self::new(self.x / divider, self.y / divider)
    }
}

impl From<Pos2> for Point {
    fn from(pos: Pos2) -> Self {
        Self::new(pos.x, pos.y)
    }
}

impl From<Point> for Pos2 {
    fn from(point: Point) -> Self {
        Pos2::new(point.x, point.y)
    }
}

/// Euclidean distance between two points.
pub fn distance(p1: Point, p2: Point) -> f32 {
    let a = p1.x - p2.x;
    let b = p1.y - p2.y;
    (a * a + b * b).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert_eq!(distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
        assert_eq!(distance(Point::new(7.0, 7.0), Point::new(7.0, 7.0)), 0.0);
        assert!((distance(Point::new(12.0, 11.0), Point::new(10.0, 10.0)) - 5f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_point_json_shape() {
        let json = serde_json::to_value(Point::new(10.0, 20.5)).unwrap();
        assert_eq!(json, serde_json::json!({ "x": 10.0, "y": 20.5 }));

        // Integer coordinates written by other clients still parse.
        let point: Point = serde_json::from_str(r#"{"x":10,"y":10}"#).unwrap();
        assert_eq!(point, Point::new(10.0, 10.0));
    }
}
