//! Raster-Blitting und Normalisierung von Höhendaten.

use image::{GrayImage, Rgba, RgbaImage};

use crate::draw::blend_pixel;

/// Zielrechteck in Bildschirmpixeln (Gleitkomma, darf über den Rand ragen).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rechteck über das gesamte Bild.
    pub fn covering(image: &RgbaImage) -> Self {
        Self::new(0.0, 0.0, image.width() as f64, image.height() as f64)
    }
}

/// Zeichnet `source` skaliert in `target` (Nearest-Neighbor, Alpha-Blending).
///
/// `opacity` multipliziert den Alpha-Kanal jedes Quellpixels. Nur der
/// sichtbare Ausschnitt von `rect` wird abgetastet.
pub fn blit_scaled(target: &mut RgbaImage, source: &RgbaImage, rect: PixelRect, opacity: f32) {
    if source.width() == 0 || source.height() == 0 || rect.width <= 0.0 || rect.height <= 0.0 {
        return;
    }
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity == 0.0 {
        return;
    }

    let x0 = rect.x.max(0.0).floor() as i64;
    let y0 = rect.y.max(0.0).floor() as i64;
    let x1 = (rect.x + rect.width).min(target.width() as f64).ceil() as i64;
    let y1 = (rect.y + rect.height).min(target.height() as f64).ceil() as i64;

    let sx_scale = source.width() as f64 / rect.width;
    let sy_scale = source.height() as f64 / rect.height;

    for py in y0..y1 {
        let v = (py as f64 + 0.5 - rect.y) * sy_scale;
        if v < 0.0 || v >= source.height() as f64 {
            continue;
        }
        for px in x0..x1 {
            let u = (px as f64 + 0.5 - rect.x) * sx_scale;
            if u < 0.0 || u >= source.width() as f64 {
                continue;
            }
            let src = source.get_pixel(u as u32, v as u32);
            let alpha = (src[3] as f32 * opacity).round() as u8;
            blend_pixel(target, px, py, Rgba([src[0], src[1], src[2], alpha]));
        }
    }
}

/// Skaliert Rohwerte linear auf 0–255 (Min/Max der endlichen Werte).
///
/// Nicht-endliche Werte (NoData) werden schwarz. Gibt `None` zurück, wenn
/// `values` nicht zu `width × height` passt.
pub fn normalize_to_gray(values: &[f32], width: u32, height: u32) -> Option<GrayImage> {
    if values.len() != width as usize * height as usize {
        return None;
    }

    let (min, max) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;

    let pixels = values
        .iter()
        .map(|&v| {
            if !v.is_finite() {
                0
            } else if range > 0.0 {
                (((v - min) / range) * 255.0).round() as u8
            } else {
                128
            }
        })
        .collect();

    GrayImage::from_raw(width, height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blit_scales_up() {
        let mut src = RgbaImage::new(2, 1);
        src.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        src.put_pixel(1, 0, Rgba([0, 0, 255, 255]));
        let mut dst = RgbaImage::new(4, 2);
        blit_scaled(&mut dst, &src, PixelRect::covering(&dst), 1.0);
        assert_eq!(dst.get_pixel(1, 1).0, [255, 0, 0, 255]);
        assert_eq!(dst.get_pixel(2, 0).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_blit_respects_opacity() {
        let src = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));
        let mut dst = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
        blit_scaled(&mut dst, &src, PixelRect::covering(&dst), 0.8);
        let v = dst.get_pixel(0, 0)[0];
        assert!((200..=208).contains(&v), "got {v}");
    }

    #[test]
    fn test_blit_partially_outside() {
        let src = RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255]));
        let mut dst = RgbaImage::new(4, 4);
        blit_scaled(&mut dst, &src, PixelRect::new(-2.0, -2.0, 4.0, 4.0), 1.0);
        assert_eq!(dst.get_pixel(1, 1)[3], 255);
        assert_eq!(dst.get_pixel(2, 2)[3], 0);
    }

    #[test]
    fn test_normalize_min_max() {
        let gray = normalize_to_gray(&[10.0, 20.0, f32::NAN, 15.0], 2, 2).expect("passende Größe");
        assert_eq!(gray.as_raw(), &vec![0, 255, 0, 128]);
    }

    #[test]
    fn test_normalize_size_mismatch() {
        assert!(normalize_to_gray(&[1.0, 2.0], 3, 1).is_none());
    }
}
