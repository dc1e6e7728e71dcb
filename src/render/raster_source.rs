//! Raster-Quellen: Dekodierung der Bildpuffer für die Karte.
//!
//! Farbbilder werden direkt übernommen. Einkanalige 16-bit- und
//! Gleitkomma-Raster gelten als Höhenmodelle: sie werden per Min/Max auf
//! Graustufen normalisiert und optional schattiert. Einkanalige TIFFs
//! (Float32, Int16 usw.) liest der `tiff`-Decoder direkt.

use std::io::Cursor;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use image::{DynamicImage, RgbaImage};
use map_canvas::HillshadeParams;
use tiff::decoder::{Decoder, DecodingResult};

use crate::core::projection::{self, SpatialReference};
use crate::core::Extent;

/// Optionen für die Raster-Dekodierung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterDecodeOptions {
    /// Deckkraft beim Zeichnen (0.0–1.0)
    pub opacity: f32,
    /// Schattierung für Höhenraster (`None` = aus)
    pub hillshade: Option<HillshadeParams>,
}

impl Default for RasterDecodeOptions {
    fn default() -> Self {
        Self {
            opacity: 0.8,
            hillshade: Some(HillshadeParams::default()),
        }
    }
}

/// Ein dekodiertes, zeichenfertiges Raster.
#[derive(Debug, Clone)]
pub struct RasterSource {
    pub image: Arc<RgbaImage>,
    /// Ausdehnung im Arbeits-Bezugssystem; `None` = bildschirmfüllend
    pub bounds: Option<Extent>,
    pub opacity: f32,
    /// Aus einem Höhenmodell erzeugt
    pub elevation: bool,
}

impl RasterSource {
    /// Dekodiert einen Bildpuffer und rechnet die Georeferenz um.
    pub fn decode(
        bytes: &[u8],
        bounds: Option<Extent>,
        source: SpatialReference,
        working: SpatialReference,
        options: &RasterDecodeOptions,
    ) -> Result<Self> {
        let (image, elevation) = decode_image(bytes, options)?;
        let bounds = bounds
            .map(|b| reproject_bounds(b, source, working))
            .transpose()?;
        Ok(Self {
            image: Arc::new(image),
            bounds,
            opacity: options.opacity.clamp(0.0, 1.0),
            elevation,
        })
    }
}

/// Dekodiert PNG/JPEG/TIFF zu RGBA. Liefert zusätzlich, ob es ein Höhenraster war.
pub fn decode_image(bytes: &[u8], options: &RasterDecodeOptions) -> Result<(RgbaImage, bool)> {
    if bytes.is_empty() {
        bail!("Rasterpuffer ist leer");
    }
    if is_tiff(bytes) {
        if let Some((values, width, height)) = tiff_elevation_values(bytes)? {
            return Ok((elevation_image(&values, width, height, options)?, true));
        }
    }

    let decoded =
        image::load_from_memory(bytes).context("Rasterdaten konnten nicht dekodiert werden")?;
    if decoded.width() == 0 || decoded.height() == 0 {
        bail!("Raster hat keine Pixel");
    }

    let Some(values) = elevation_values(&decoded) else {
        return Ok((decoded.to_rgba8(), false));
    };
    let rgba = elevation_image(&values, decoded.width(), decoded.height(), options)?;
    Ok((rgba, true))
}

/// Normalisiert Höhenwerte auf Graustufen und schattiert optional.
fn elevation_image(
    values: &[f32],
    width: u32,
    height: u32,
    options: &RasterDecodeOptions,
) -> Result<RgbaImage> {
    let gray = map_canvas::normalize_to_gray(values, width, height)
        .context("Höhenraster hat eine unerwartete Größe")?;
    let mut rgba = DynamicImage::ImageLuma8(gray.clone()).to_rgba8();
    if let Some(params) = options.hillshade {
        let shade = map_canvas::compute_hillshade(&gray, &params);
        map_canvas::apply_hillshade(&mut rgba, &shade, params.blend_factor);
    }
    log::debug!("Höhenraster {width}x{height} normalisiert");
    Ok(rgba)
}

fn is_tiff(bytes: &[u8]) -> bool {
    bytes.starts_with(b"II*\0") || bytes.starts_with(b"MM\0*")
}

/// Werte eines einkanaligen TIFF mit mehr als 8 bit pro Sample.
///
/// `None` für Farb- und 8-bit-TIFFs, die `image` selbst dekodiert.
fn tiff_elevation_values(bytes: &[u8]) -> Result<Option<(Vec<f32>, u32, u32)>> {
    let mut decoder = Decoder::new(Cursor::new(bytes)).context("TIFF-Kopf nicht lesbar")?;
    match decoder.colortype().context("TIFF-Farbtyp nicht lesbar")? {
        tiff::ColorType::Gray(bits) if bits > 8 => {}
        _ => return Ok(None),
    }
    let (width, height) = decoder.dimensions().context("TIFF-Größe nicht lesbar")?;
    if width == 0 || height == 0 {
        bail!("Raster hat keine Pixel");
    }

    let values: Vec<f32> = match decoder
        .read_image()
        .context("TIFF-Höhenraster konnte nicht dekodiert werden")?
    {
        DecodingResult::U16(data) => data.into_iter().map(f32::from).collect(),
        DecodingResult::I16(data) => data.into_iter().map(f32::from).collect(),
        DecodingResult::U32(data) => data.into_iter().map(|v| v as f32).collect(),
        DecodingResult::I32(data) => data.into_iter().map(|v| v as f32).collect(),
        DecodingResult::F32(data) => data,
        DecodingResult::F64(data) => data.into_iter().map(|v| v as f32).collect(),
        _ => return Ok(None),
    };
    Ok(Some((values, width, height)))
}

/// Rohwerte einkanaliger Höhenraster; `None` für Farb- und 8-bit-Bilder.
fn elevation_values(image: &DynamicImage) -> Option<Vec<f32>> {
    match image {
        DynamicImage::ImageLuma16(buffer) => Some(buffer.as_raw().iter().map(|&v| v as f32).collect()),
        DynamicImage::ImageRgb32F(buffer) => {
            let grey = buffer.pixels().all(|p| p[0] == p[1] && p[1] == p[2]);
            grey.then(|| buffer.pixels().map(|p| p[0]).collect())
        }
        DynamicImage::ImageRgba32F(buffer) => {
            let grey = buffer.pixels().all(|p| p[0] == p[1] && p[1] == p[2]);
            grey.then(|| buffer.pixels().map(|p| p[0]).collect())
        }
        _ => None,
    }
}

/// Rechnet die Eckpunkte eines Raster-Extents um und bildet die Hülle.
pub fn reproject_bounds(
    bounds: Extent,
    from: SpatialReference,
    to: SpatialReference,
) -> Result<Extent> {
    let corners = bounds
        .corners()
        .iter()
        .map(|corner| projection::transform(*corner, from, to))
        .collect::<Result<Vec<_>>>()
        .context("Raster-Ausdehnung kann nicht umgerechnet werden")?;
    let extent = Extent::from_points(&corners).context("Raster-Ausdehnung ist leer")?;
    if !extent.is_fittable() {
        bail!("Raster-Ausdehnung ist ungültig: {extent:?}");
    }
    Ok(extent)
}
