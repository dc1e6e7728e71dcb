//! Darstellungsstile für Vektor-Features, Beschriftungen und AOI-Marker.

use image::Rgba;

use crate::shared::ViewerOptions;

/// Stil der Vektor-Layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorStyle {
    pub stroke: Rgba<u8>,
    /// Strichbreite in Pixeln
    pub stroke_width: f64,
    /// Polygonfüllung; Alpha 0 = nur Umriss
    pub fill: Rgba<u8>,
    pub point_radius: f64,
    pub label: LabelStyle,
}

/// Stil der `NroLot`-Beschriftung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStyle {
    pub color: Rgba<u8>,
    pub outline: Rgba<u8>,
    pub scale: u32,
}

/// Stil der AOI-Marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub radius: f64,
    pub fill: Rgba<u8>,
    pub stroke: Rgba<u8>,
    pub stroke_width: f64,
}

impl VectorStyle {
    pub fn from_options(options: &ViewerOptions) -> Self {
        Self {
            stroke: Rgba(options.vector_stroke_color),
            stroke_width: options.vector_stroke_width.max(0.0),
            fill: Rgba(options.vector_fill_color),
            point_radius: options.vector_point_radius.max(0.0),
            label: LabelStyle {
                color: Rgba(options.label_color),
                outline: Rgba(options.label_outline_color),
                scale: options.label_scale.max(1),
            },
        }
    }

    /// `true`, wenn Polygone eine sichtbare Füllung haben.
    pub fn has_fill(&self) -> bool {
        self.fill[3] > 0
    }
}

impl Default for VectorStyle {
    fn default() -> Self {
        Self::from_options(&ViewerOptions::default())
    }
}

impl MarkerStyle {
    pub fn from_options(options: &ViewerOptions) -> Self {
        Self {
            radius: options.marker_radius.max(0.0),
            fill: Rgba(options.marker_fill_color),
            stroke: Rgba(options.marker_stroke_color),
            stroke_width: options.marker_stroke_width.max(0.0),
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self::from_options(&ViewerOptions::default())
    }
}
