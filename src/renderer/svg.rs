use egui::Color32;

use super::{Element, VectorDocument};
use crate::geometry::Point;

fn hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|point| format!("{},{}", point.x, point.y))
        .collect::<Vec<_>>()
        .join(" ")
}

impl VectorDocument {
    /// Standalone SVG markup for the document.
    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height,
        );

        for element in &self.elements {
            match element {
                Element::Line { from, to, color } => svg.push_str(&format!(
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}"/>"#,
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    hex(*color)
                )),
                Element::Polygon { points, fill } => svg.push_str(&format!(
                    r#"<polygon points="{}" fill="{}"/>"#,
                    points_attr(points),
                    hex(*fill)
                )),
                Element::Handle { center, radius, fill, vertex } => svg.push_str(&format!(
                    r#"<circle cx="{}" cy="{}" r="{}" fill="{}" data-shape-index="{}" data-point-index="{}"/>"#,
                    center.x,
                    center.y,
                    radius,
                    hex(*fill),
                    vertex.shape_index,
                    vertex.vertex_index
                )),
            }
        }

        svg.push_str("</svg>");
        svg
    }
}
