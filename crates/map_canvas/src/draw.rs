//! Geometrische Primitive: Linien mit Strichstärke, Polygon-Umrisse, Kreise.
//!
//! Alle Koordinaten sind Pixel (f64, Ursprung oben links). Außerhalb der
//! Bildfläche liegende Pixel werden still verworfen.

use image::{Rgba, RgbaImage};

/// Mischt eine Farbe per Alpha-Blending in ein Pixel (Source-Over).
///
/// Der Alpha-Kanal von `color` bestimmt die Deckkraft. Pixel außerhalb
/// des Bildes werden ignoriert.
pub fn blend_pixel(image: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
        return;
    }
    let alpha = color[3] as f32 / 255.0;
    if alpha <= 0.0 {
        return;
    }

    let dst = image.get_pixel_mut(x as u32, y as u32);
    if alpha >= 1.0 {
        *dst = color;
        return;
    }

    let inv = 1.0 - alpha;
    let dst_alpha = dst[3] as f32 / 255.0;
    let out_alpha = alpha + dst_alpha * inv;
    for c in 0..3 {
        let blended = color[c] as f32 * alpha + dst[c] as f32 * inv;
        dst[c] = blended.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
}

/// Zeichnet einen gefüllten Kreis.
pub fn draw_filled_circle(image: &mut RgbaImage, cx: f64, cy: f64, radius: f64, color: Rgba<u8>) {
    if radius <= 0.0 {
        return;
    }
    let r2 = radius * radius;
    let min_x = (cx - radius).floor() as i64;
    let max_x = (cx + radius).ceil() as i64;
    let min_y = (cy - radius).floor() as i64;
    let max_y = (cy + radius).ceil() as i64;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            // Pixelmitte testen
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            if dx * dx + dy * dy <= r2 {
                blend_pixel(image, x, y, color);
            }
        }
    }
}

/// Zeichnet eine Strecke mit gegebener Strichstärke.
///
/// Rasterisiert die Kapsel um die Strecke (runde Enden), dadurch
/// schließen Polylinien ohne Lücken an den Knickpunkten.
pub fn draw_segment(
    image: &mut RgbaImage,
    from: (f64, f64),
    to: (f64, f64),
    width: f64,
    color: Rgba<u8>,
) {
    let half = (width / 2.0).max(0.5);
    let min_x = (from.0.min(to.0) - half).floor() as i64;
    let max_x = (from.0.max(to.0) + half).ceil() as i64;
    let min_y = (from.1.min(to.1) - half).floor() as i64;
    let max_y = (from.1.max(to.1) + half).ceil() as i64;

    // Riesige Boxen (Segmente weit außerhalb) auf die Bildfläche begrenzen
    let min_x = min_x.max(-1);
    let min_y = min_y.max(-1);
    let max_x = max_x.min(image.width() as i64);
    let max_y = max_y.min(image.height() as i64);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = (x as f64 + 0.5, y as f64 + 0.5);
            if distance_to_segment(p, from, to) <= half {
                blend_pixel(image, x, y, color);
            }
        }
    }
}

/// Zeichnet eine offene Polylinie.
pub fn draw_polyline(image: &mut RgbaImage, points: &[(f64, f64)], width: f64, color: Rgba<u8>) {
    match points {
        [] => {}
        [single] => draw_filled_circle(image, single.0, single.1, width / 2.0, color),
        _ => {
            for pair in points.windows(2) {
                draw_segment(image, pair[0], pair[1], width, color);
            }
        }
    }
}

/// Zeichnet den Umriss eines Polygon-Rings (geschlossen).
pub fn draw_polygon_outline(
    image: &mut RgbaImage,
    ring: &[(f64, f64)],
    width: f64,
    color: Rgba<u8>,
) {
    draw_polyline(image, ring, width, color);
    if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
        if ring.len() > 2 && first != last {
            draw_segment(image, *last, *first, width, color);
        }
    }
}

/// Füllt ein Polygon (äußerer Ring plus Löcher) per Scanline, Even-Odd-Regel.
///
/// Abgetastet wird jeweils die Pixelmitte.
pub fn fill_polygon(image: &mut RgbaImage, rings: &[Vec<(f64, f64)>], color: Rgba<u8>) {
    let (min_y, max_y) = rings
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.1), hi.max(p.1)));
    if !min_y.is_finite() || !max_y.is_finite() {
        return;
    }
    let first_row = (min_y.floor() as i64).max(0);
    let last_row = (max_y.ceil() as i64).min(image.height() as i64 - 1);

    let mut crossings: Vec<f64> = Vec::new();
    for row in first_row..=last_row {
        let y = row as f64 + 0.5;
        crossings.clear();
        for ring in rings.iter().filter(|ring| ring.len() > 2) {
            for (i, a) in ring.iter().enumerate() {
                let b = ring[(i + 1) % ring.len()];
                if (a.1 <= y) != (b.1 <= y) {
                    crossings.push(a.0 + (y - a.1) / (b.1 - a.1) * (b.0 - a.0));
                }
            }
        }
        crossings.sort_by(|a, b| a.total_cmp(b));
        for span in crossings.chunks_exact(2) {
            let start = (span[0] - 0.5).ceil() as i64;
            let end = (span[1] - 0.5).floor() as i64;
            for x in start.max(0)..=end.min(image.width() as i64 - 1) {
                blend_pixel(image, x, row, color);
            }
        }
    }
}

/// Euklidischer Abstand eines Punkts zu einer Strecke.
pub fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let len2 = abx * abx + aby * aby;
    let t = if len2 > 0.0 {
        (((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (a.0 + t * abx, a.1 + t * aby);
    ((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}
