//! Software-Rasterisierung der aktuellen Kartenoberfläche.
//!
//! Zeichenreihenfolge: Hintergrund, Layer-Stapel von unten nach oben
//! (Raster, dann Vektoren samt Beschriftung), zuletzt die AOI-Marker.

use anyhow::{bail, Result};
use glam::DVec2;
use image::{Rgba, RgbaImage};
use map_canvas::PixelRect;

use super::compositor::{LayerCompositor, RenderedContent};
use super::raster_source::RasterSource;
use super::style::{MarkerStyle, VectorStyle};
use super::vector_source::VectorSource;
use crate::core::{Extent, Geometry, MapView};
use crate::shared::RenderScene;

/// Rendert den aktuellen Kartenausschnitt in ein RGBA-Bild.
pub fn render_surface(compositor: &LayerCompositor, scene: &RenderScene) -> Result<RgbaImage> {
    let (view, viewport) = (&scene.view, scene.viewport_size);
    if viewport[0] == 0 || viewport[1] == 0 {
        bail!("Kartenfläche hat keine Größe ({}x{})", viewport[0], viewport[1]);
    }
    if !view.resolution.is_finite() || view.resolution <= 0.0 {
        bail!("Ungültige Kartenauflösung: {}", view.resolution);
    }

    let mut surface = RgbaImage::from_pixel(viewport[0], viewport[1], Rgba(scene.background));
    let projector = Projector { view, viewport };
    let config = compositor.config();

    for layer in compositor.rendered_layers() {
        match &layer.content {
            RenderedContent::Raster(source) => draw_raster(&mut surface, source, &projector),
            RenderedContent::Vector(source) => {
                draw_vector(&mut surface, source, &projector, &config.style)
            }
        }
    }

    draw_markers(&mut surface, compositor, &projector, &config.markers);
    Ok(surface)
}

/// Rendert und kodiert als PNG.
pub fn render_png(compositor: &LayerCompositor, scene: &RenderScene) -> Result<Vec<u8>> {
    let surface = render_surface(compositor, scene)?;
    map_canvas::encode_png(&surface)
}

struct Projector<'a> {
    view: &'a MapView,
    viewport: [u32; 2],
}

impl Projector<'_> {
    fn pixel(&self, p: DVec2) -> (f64, f64) {
        let px = self.view.map_to_pixel(p, self.viewport);
        (px.x, px.y)
    }

    fn pixels(&self, points: &[DVec2]) -> Vec<(f64, f64)> {
        points.iter().map(|p| self.pixel(*p)).collect()
    }

    /// Grobe Sichtbarkeitsprüfung mit Rand in Pixeln.
    fn overlaps(&self, extent: &Extent, margin_px: f64) -> bool {
        let visible = self
            .view
            .visible_extent(self.viewport)
            .buffered(margin_px * self.view.resolution);
        extent.min_x <= visible.max_x
            && extent.max_x >= visible.min_x
            && extent.min_y <= visible.max_y
            && extent.max_y >= visible.min_y
    }
}

fn draw_raster(surface: &mut RgbaImage, source: &RasterSource, projector: &Projector<'_>) {
    let rect = match source.bounds {
        Some(bounds) => {
            let (left, top) = projector.pixel(DVec2::new(bounds.min_x, bounds.max_y));
            let (right, bottom) = projector.pixel(DVec2::new(bounds.max_x, bounds.min_y));
            PixelRect::new(left, top, right - left, bottom - top)
        }
        None => PixelRect::covering(surface),
    };
    map_canvas::blit_scaled(surface, &source.image, rect, source.opacity);
}

fn draw_vector(
    surface: &mut RgbaImage,
    source: &VectorSource,
    projector: &Projector<'_>,
    style: &VectorStyle,
) {
    let margin = style.stroke_width + style.point_radius;
    let visible: Vec<_> = source
        .features()
        .iter()
        .filter_map(|feature| Some((feature, feature.extent()?)))
        .filter(|(_, extent)| projector.overlaps(extent, margin))
        .collect();

    for (feature, _) in &visible {
        draw_geometry(surface, &feature.geometry, projector, style);
    }

    // Beschriftungen über allen Umrissen des Layers
    let scale = style.label.scale;
    for (feature, extent) in &visible {
        let label = feature.label();
        if label.is_empty() {
            continue;
        }
        let (cx, cy) = projector.pixel(extent.center());
        let x = cx - map_canvas::text_width(&label, scale) as f64 / 2.0;
        let y = cy - map_canvas::text_height(scale) as f64 / 2.0;
        map_canvas::draw_text_outlined(
            surface,
            x.round() as i64,
            y.round() as i64,
            &label,
            style.label.color,
            style.label.outline,
            scale,
        );
    }
}

fn draw_geometry(
    surface: &mut RgbaImage,
    geometry: &Geometry,
    projector: &Projector<'_>,
    style: &VectorStyle,
) {
    match geometry {
        Geometry::Point(point) => draw_point(surface, *point, projector, style),
        Geometry::MultiPoint(points) => {
            for point in points {
                draw_point(surface, *point, projector, style);
            }
        }
        Geometry::LineString(line) => draw_line(surface, line, projector, style),
        Geometry::MultiLineString(lines) => {
            for line in lines {
                draw_line(surface, line, projector, style);
            }
        }
        Geometry::Polygon(rings) => draw_polygon(surface, rings, projector, style),
        Geometry::MultiPolygon(polygons) => {
            for rings in polygons {
                draw_polygon(surface, rings, projector, style);
            }
        }
        Geometry::GeometryCollection(parts) => {
            for part in parts {
                draw_geometry(surface, part, projector, style);
            }
        }
    }
}

fn draw_line(surface: &mut RgbaImage, line: &[DVec2], projector: &Projector<'_>, style: &VectorStyle) {
    map_canvas::draw_polyline(surface, &projector.pixels(line), style.stroke_width, style.stroke);
}

fn draw_point(surface: &mut RgbaImage, point: DVec2, projector: &Projector<'_>, style: &VectorStyle) {
    let (x, y) = projector.pixel(point);
    map_canvas::draw_filled_circle(surface, x, y, style.point_radius, style.stroke);
}

fn draw_polygon(
    surface: &mut RgbaImage,
    rings: &[Vec<DVec2>],
    projector: &Projector<'_>,
    style: &VectorStyle,
) {
    let projected: Vec<Vec<(f64, f64)>> =
        rings.iter().map(|ring| projector.pixels(ring)).collect();
    if style.has_fill() {
        map_canvas::fill_polygon(surface, &projected, style.fill);
    }
    for ring in &projected {
        map_canvas::draw_polygon_outline(surface, ring, style.stroke_width, style.stroke);
    }
}

fn draw_markers(
    surface: &mut RgbaImage,
    compositor: &LayerCompositor,
    projector: &Projector<'_>,
    style: &MarkerStyle,
) {
    let half_stroke = style.stroke_width / 2.0;
    for marker in compositor.markers().markers() {
        let (x, y) = projector.pixel(marker.position);
        map_canvas::draw_filled_circle(surface, x, y, style.radius + half_stroke, style.stroke);
        map_canvas::draw_filled_circle(surface, x, y, style.radius - half_stroke, style.fill);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BlobStore, LayerDescriptor};
    use crate::render::compositor::CompositorConfig;
    use image::{DynamicImage, ImageFormat};
    use std::io::Cursor;

    const BACKGROUND: Rgba<u8> = Rgba([242, 239, 233, 255]);

    /// Arbeits-Bezugssystem WGS84, damit Kartenkoordinaten = Pixel bleiben.
    fn compositor() -> LayerCompositor {
        let config = CompositorConfig {
            working: crate::core::SpatialReference::Wgs84,
            ..CompositorConfig::default()
        };
        LayerCompositor::new(BlobStore::new(), config)
    }

    /// 100x100 px über [0, 100]², 1 Einheit pro Pixel.
    fn scene(width: u32, height: u32) -> RenderScene {
        let mut view = MapView::new(DVec2::new(50.0, 50.0), 0.0, 0.0, 28.0);
        view.resolution = 1.0;
        RenderScene {
            view,
            viewport_size: [width, height],
            background: BACKGROUND.0,
        }
    }

    fn green_png() -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([0, 200, 0, 255])))
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    const SQUARE: &str = r#"{"type": "Feature", "properties": {"NroLot": "7"},
        "geometry": {"type": "Polygon", "coordinates": [[[20, 20], [80, 20], [80, 80], [20, 80], [20, 20]]]}}"#;

    #[test]
    fn test_zero_viewport_fails() {
        assert!(render_surface(&compositor(), &scene(0, 10)).is_err());
    }

    #[test]
    fn test_empty_map_is_background() {
        let surface = render_surface(&compositor(), &scene(100, 100)).unwrap();
        assert!(surface.pixels().all(|p| *p == BACKGROUND));
    }

    #[test]
    fn test_vector_outline_over_raster() {
        let mut compositor = compositor();
        let layers = vec![
            LayerDescriptor::vector_text("parcelles", "EPSG:4326", SQUARE),
            LayerDescriptor::raster("ortho", "EPSG:4326", green_png(), None),
        ];
        compositor.reconcile(&layers);
        let surface = render_surface(&compositor, &scene(100, 100)).unwrap();

        // Umriss bei x = 20 (Karte) → Pixel 20, Zeile 50
        let outline = surface.get_pixel(20, 50);
        assert_eq!(outline[0], 255);
        assert_eq!(outline[1], 0);
        // Innenraum abseits der Beschriftung: Raster mit 0.8 Deckkraft
        let inside = surface.get_pixel(30, 30);
        assert!(inside[1] > inside[0]);
        assert_ne!(*inside, BACKGROUND);
    }

    #[test]
    fn test_markers_are_drawn_on_top() {
        let mut compositor = compositor();
        compositor.markers_mut().add(0, DVec2::new(50.0, 50.0));
        let surface = render_surface(&compositor, &scene(100, 100)).unwrap();
        assert_eq!(*surface.get_pixel(50, 50), Rgba([255, 0, 0, 255]));
        // Weißer Rand zwischen Radius 5 und 7
        assert_eq!(*surface.get_pixel(56, 50), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_render_png_produces_png_signature() {
        let png = render_png(&compositor(), &scene(8, 8)).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
