use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use egui::{pos2, Color32, Context, Painter, Pos2, Rect, Stroke};

use super::{Element, VectorDocument};
use crate::geometry::Point;
use crate::raster::{rasterize, to_color_image};
use crate::texture_manager::TextureManager;

/// Paints vector documents with egui.
///
/// egui only fills convex polygons, so fills go through the rasterizer and
/// are cached as one texture per slot; lines and handles are drawn directly.
pub struct DocumentPainter {
    textures: TextureManager,
}

impl Default for DocumentPainter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentPainter {
    pub fn new() -> Self {
        Self {
            textures: TextureManager::new(16),
        }
    }

    pub fn begin_frame(&mut self) {
        self.textures.begin_frame();
    }

    /// Paints `doc` scaled into `rect`. `slot` names the fill texture.
    pub fn paint(&mut self, ctx: &Context, painter: &Painter, rect: Rect, slot: &str, doc: &VectorDocument) {
        if doc.width == 0 || doc.height == 0 {
            return;
        }
        let scale = rect.width() / doc.width as f32;
        let to_screen = |point: Point| -> Pos2 { rect.min + egui::vec2(point.x, point.y) * scale };

        painter.rect_filled(rect, 0.0, Color32::WHITE);

        // Grid and other lines before the first polygon stay underneath the fill
        let first_polygon = doc
            .elements
            .iter()
            .position(|element| matches!(element, Element::Polygon { .. }))
            .unwrap_or(doc.elements.len());

        let (underlay, overlay) = doc.elements.split_at(first_polygon);
        for element in underlay {
            paint_element(painter, element, scale, &to_screen);
        }

        if first_polygon < doc.elements.len() {
            let texture = self.textures.get_or_create_texture(
                slot,
                fill_fingerprint(doc),
                || to_color_image(&rasterize(doc)),
                ctx,
            );
            let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
            painter.image(texture, rect, uv, Color32::WHITE);
        }

        for element in overlay {
            paint_element(painter, element, scale, &to_screen);
        }
    }
}

fn paint_element(painter: &Painter, element: &Element, scale: f32, to_screen: &dyn Fn(Point) -> Pos2) {
    match element {
        Element::Line { from, to, color } => {
            painter.line_segment([to_screen(*from), to_screen(*to)], Stroke::new(1.0, *color));
        }
        // Filled through the texture
        Element::Polygon { .. } => {}
        Element::Handle { center, radius, fill, .. } => {
            painter.circle_filled(to_screen(*center), radius * scale, *fill);
        }
    }
}

/// Identifies the polygon content of a document; grid and handles are ignored.
fn fill_fingerprint(doc: &VectorDocument) -> u64 {
    let mut hasher = DefaultHasher::new();
    (doc.width, doc.height).hash(&mut hasher);
    for (points, fill) in doc.polygons() {
        fill.to_array().hash(&mut hasher);
        points.len().hash(&mut hasher);
        for point in points {
            point.x.to_bits().hash(&mut hasher);
            point.y.to_bits().hash(&mut hasher);
        }
    }
    hasher.finish()
}
