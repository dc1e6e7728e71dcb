//! Hillshade für einkanalige Höhenraster.
//!
//! Ein Höhenraster (DEM) wird nach der Normalisierung als Graustufenbild
//! gezeichnet; die Reliefschattierung macht Geländeformen zusätzlich
//! sichtbar.

use image::{GrayImage, RgbaImage};

/// Parameter für die Hillshade-Berechnung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HillshadeParams {
    /// Azimut der Lichtquelle in Grad (Standard: 315° = Nordwest)
    pub azimuth_deg: f32,
    /// Höhenwinkel der Lichtquelle in Grad (Standard: 45°)
    pub altitude_deg: f32,
    /// Mischfaktor: 0.0 = kein Hillshade, 1.0 = voller Effekt
    pub blend_factor: f32,
}

impl Default for HillshadeParams {
    fn default() -> Self {
        Self {
            azimuth_deg: 315.0,
            altitude_deg: 45.0,
            blend_factor: 0.45,
        }
    }
}

/// Berechnet Beleuchtungswerte (0.0 = Schatten, 1.0 = voll beleuchtet).
///
/// Bilder mit weniger als 2 Pixeln Breite oder Höhe haben keinen
/// Gradienten und liefern durchgehend 1.0.
pub fn compute_hillshade(dem: &GrayImage, params: &HillshadeParams) -> Vec<f32> {
    let width = dem.width() as usize;
    let height = dem.height() as usize;
    if width < 2 || height < 2 {
        return vec![1.0; width * height];
    }

    let azimuth = params.azimuth_deg.to_radians();
    let altitude = params.altitude_deg.to_radians();
    let (sin_alt, cos_alt) = altitude.sin_cos();

    let pixels = dem.as_raw();
    let at = |x: usize, y: usize| pixels[y * width + x] as f32;
    let mut shade = vec![1.0f32; width * height];

    for y in 0..height {
        for x in 0..width {
            let dx = match x {
                0 => at(1, y) - at(0, y),
                _ if x == width - 1 => at(x, y) - at(x - 1, y),
                _ => (at(x + 1, y) - at(x - 1, y)) / 2.0,
            };
            let dy = match y {
                0 => at(x, 1) - at(x, 0),
                _ if y == height - 1 => at(x, y) - at(x, y - 1),
                _ => (at(x, y + 1) - at(x, y - 1)) / 2.0,
            };

            let slope = (dx * dx + dy * dy).sqrt().atan();
            let aspect = (-dy).atan2(dx);
            let hs = sin_alt * slope.cos() + cos_alt * slope.sin() * (azimuth - aspect).cos();
            shade[y * width + x] = hs.clamp(0.0, 1.0);
        }
    }

    shade
}

/// Moduliert die Helligkeit eines RGBA-Bildes (Alpha bleibt unverändert).
pub fn apply_hillshade(image: &mut RgbaImage, shade: &[f32], blend: f32) {
    let base = 1.0 - blend;
    for (pixel, &hs) in image.pixels_mut().zip(shade) {
        let factor = base + blend * hs;
        for channel in &mut pixel.0[..3] {
            *channel = (*channel as f32 * factor).clamp(0.0, 255.0) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgba};

    #[test]
    fn test_flat_dem_is_uniformly_lit() {
        let dem = GrayImage::from_pixel(4, 4, Luma([100]));
        let shade = compute_hillshade(&dem, &HillshadeParams::default());
        let first = shade[0];
        assert!(shade.iter().all(|v| (v - first).abs() < 1e-6));
        // Flaches Gelände: sin(45°)
        assert!((first - 0.7071).abs() < 1e-3);
    }

    #[test]
    fn test_tiny_dem_returns_full_light() {
        let dem = GrayImage::from_pixel(1, 3, Luma([10]));
        assert_eq!(compute_hillshade(&dem, &HillshadeParams::default()), vec![1.0; 3]);
    }

    #[test]
    fn test_apply_keeps_alpha() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([200, 200, 200, 77]));
        apply_hillshade(&mut img, &[0.0, 1.0], 0.5);
        assert_eq!(img.get_pixel(0, 0).0, [100, 100, 100, 77]);
        assert_eq!(img.get_pixel(1, 0).0, [200, 200, 200, 77]);
    }
}
