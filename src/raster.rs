//! Scanline rasterization of vector documents.
//!
//! Only polygon fills are rasterized; lines and handles are editor chrome
//! and never end up in previews or exported icons.
use image::{Rgba, RgbaImage};

use crate::geometry::Point;
use crate::renderer::VectorDocument;

/// Renders every polygon of `doc` onto a transparent image of the
/// document's size. Later polygons paint over earlier ones.
pub fn rasterize(doc: &VectorDocument) -> RgbaImage {
    let mut image = RgbaImage::new(doc.width, doc.height);
    for (points, fill) in doc.polygons() {
        let [r, g, b, a] = fill.to_srgba_unmultiplied();
        fill_polygon(&mut image, points, Rgba([r, g, b, a]));
    }
    image
}

/// Converts a rasterized image into an egui texture source.
pub fn to_color_image(image: &RgbaImage) -> egui::ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw())
}

/// Fills a polygon with the nonzero winding rule, sampling pixel centres.
///
/// The outline is closed implicitly, so an explicitly repeated first point
/// only adds a zero-length edge.
pub fn fill_polygon(image: &mut RgbaImage, points: &[Point], color: Rgba<u8>) {
    if points.len() < 3 {
        return;
    }

    let (width, height) = image.dimensions();
    let n = points.len();
    let mut crossings: Vec<(f32, i32)> = Vec::with_capacity(n);

    for y in 0..height {
        let yf = y as f32 + 0.5;
        crossings.clear();

        // Walk polygon edges (including closing edge n-1 → 0)
        for i in 0..n {
            let a = points[i];
            let b = points[(i + 1) % n];
            let direction = if a.y <= yf && b.y > yf {
                1
            } else if b.y <= yf && a.y > yf {
                -1
            } else {
                continue;
            };
            let t = (yf - a.y) / (b.y - a.y);
            crossings.push((a.x + t * (b.x - a.x), direction));
        }
        crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut winding = 0;
        for k in 0..crossings.len().saturating_sub(1) {
            winding += crossings[k].1;
            if winding == 0 {
                continue;
            }
            let start = pixel_index(crossings[k].0, width);
            let end = pixel_index(crossings[k + 1].0, width);
            for x in start..end {
                image.put_pixel(x, y, color);
            }
        }
    }
}

/// First pixel whose centre lies at or right of `x`, clamped to the image.
fn pixel_index(x: f32, width: u32) -> u32 {
    (x - 0.5).ceil().clamp(0.0, width as f32) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{Element, PREVIEW_FILL};

    fn filled(image: &RgbaImage, x: u32, y: u32) -> bool {
        image.get_pixel(x, y).0[3] > 0
    }

    #[test]
    fn test_fills_square() {
        let mut doc = VectorDocument::new(8, 8);
        doc.push(Element::Polygon {
            points: vec![
                Point::new(0.0, 0.0),
                Point::new(4.0, 0.0),
                Point::new(4.0, 4.0),
                Point::new(0.0, 4.0),
                Point::new(0.0, 0.0),
            ],
            fill: PREVIEW_FILL,
        });

        let image = rasterize(&doc);
        let count = image.pixels().filter(|pixel| pixel.0[3] > 0).count();
        assert_eq!(count, 16);
        assert!(filled(&image, 0, 0));
        assert!(filled(&image, 3, 3));
        assert!(!filled(&image, 4, 4));
        assert_eq!(image.get_pixel(1, 1), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_degenerate_polygons_draw_nothing() {
        let mut doc = VectorDocument::new(4, 4);
        doc.push(Element::Polygon {
            points: vec![Point::new(0.0, 0.0), Point::new(4.0, 4.0)],
            fill: PREVIEW_FILL,
        });
        let image = rasterize(&doc);
        assert!(image.pixels().all(|pixel| pixel.0[3] == 0));
    }

    #[test]
    fn test_clips_to_image() {
        let mut image = RgbaImage::new(4, 4);
        let points = [Point::new(-10.0, -10.0), Point::new(20.0, -10.0), Point::new(20.0, 20.0), Point::new(-10.0, 20.0)];
        fill_polygon(&mut image, &points, Rgba([255, 0, 0, 255]));
        assert!(image.pixels().all(|pixel| pixel.0 == [255, 0, 0, 255]));
    }

    #[test]
    fn test_concave_shape_leaves_notch_empty() {
        // A "U": the notch between the arms stays transparent
        let mut image = RgbaImage::new(10, 10);
        let points = [
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(3.0, 6.0),
            Point::new(7.0, 6.0),
            Point::new(7.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        fill_polygon(&mut image, &points, Rgba([0, 0, 0, 255]));
        assert!(filled(&image, 1, 2));
        assert!(!filled(&image, 5, 2));
        assert!(filled(&image, 8, 2));
        assert!(filled(&image, 5, 8));
    }
}
