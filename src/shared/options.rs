//! Zentrale Konfiguration des Kataster-Viewers.
//!
//! `ViewerOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Ansicht ─────────────────────────────────────────────────────────

/// Startmittelpunkt (Länge, Breite in Grad).
pub const INITIAL_CENTER_LON_LAT: [f64; 2] = [-4.0, 5.25];
/// Startzoomstufe.
pub const INITIAL_ZOOM: f64 = 13.0;
/// Arbeits-Bezugssystem der Karte.
pub const WORKING_REFERENCE: &str = "EPSG:3857";
/// Minimale Zoomstufe.
pub const MIN_ZOOM: f64 = 0.0;
/// Maximale Zoomstufe.
pub const MAX_ZOOM: f64 = 28.0;
/// Hintergrundfarbe der Kartenfläche (RGBA).
pub const BACKGROUND_COLOR: [u8; 4] = [242, 239, 233, 255];

// ── Vektor-Stil ─────────────────────────────────────────────────────

/// Umrissfarbe der Vektor-Features (RGBA: Rot).
pub const VECTOR_STROKE_COLOR: [u8; 4] = [255, 0, 0, 255];
/// Umrissbreite in Pixeln.
pub const VECTOR_STROKE_WIDTH: f64 = 3.0;
/// Füllfarbe der Polygone (transparent).
pub const VECTOR_FILL_COLOR: [u8; 4] = [0, 0, 0, 0];
/// Radius gezeichneter Punkt-Features in Pixeln.
pub const VECTOR_POINT_RADIUS: f64 = 4.0;
/// Textfarbe der `NroLot`-Beschriftung.
pub const LABEL_COLOR: [u8; 4] = [255, 0, 0, 255];
/// Konturfarbe der Beschriftung.
pub const LABEL_OUTLINE_COLOR: [u8; 4] = [255, 255, 255, 255];
/// Vergrößerungsfaktor des Bitmap-Fonts.
pub const LABEL_SCALE: u32 = 2;

// ── AOI-Marker ──────────────────────────────────────────────────────

/// Marker-Radius in Pixeln.
pub const MARKER_RADIUS: f64 = 6.0;
/// Füllfarbe der AOI-Marker (RGBA: Rot).
pub const MARKER_FILL_COLOR: [u8; 4] = [255, 0, 0, 255];
/// Umrissfarbe der AOI-Marker (RGBA: Weiß).
pub const MARKER_STROKE_COLOR: [u8; 4] = [255, 255, 255, 255];
/// Umrissbreite der AOI-Marker in Pixeln.
pub const MARKER_STROKE_WIDTH: f64 = 2.0;

// ── Raster ──────────────────────────────────────────────────────────

/// Deckkraft der Raster-Layer.
pub const RASTER_OPACITY: f32 = 0.8;

// ── Ansichtsanpassung ───────────────────────────────────────────────

/// Innenabstand beim Einpassen neuer Layer (Pixel).
pub const LAYER_FIT_PADDING: f64 = 20.0;
/// Dauer der Layer-Einpassung (ms).
pub const LAYER_FIT_DURATION_MS: u64 = 1000;
/// Innenabstand beim Springen zu einem Lot (Pixel).
pub const LOT_FIT_PADDING: f64 = 50.0;
/// Dauer des Sprungs zu einem Lot (ms).
pub const LOT_FIT_DURATION_MS: u64 = 1500;

// ── Popup & Hit-Test ────────────────────────────────────────────────

/// Popup-Versatz relativ zum Klickpunkt (Pixel, negativ = nach oben).
pub const POPUP_OFFSET_PX: [f64; 2] = [0.0, -10.0];
/// Zusätzliche Klick-Toleranz zur halben Strichbreite (Pixel).
pub const HIT_TOLERANCE_PX: f64 = 0.0;

// ── Analyse & Export ────────────────────────────────────────────────

/// Endpunkt des Analyse-Dienstes.
pub const ANALYSIS_ENDPOINT: &str = "http://localhost:8000/api/detect_constructions/";
/// Zeitlimit einer Analyse-Anfrage (Sekunden).
pub const ANALYSIS_TIMEOUT_SECS: u64 = 120;
/// Zieldatei des Koordinaten-Exports.
pub const EXPORT_PATH: &str = "coordonnees.csv";

/// Hillshade-Optionen für einkanalige Höhenraster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HillshadeOptions {
    /// Hillshade anwenden
    pub enabled: bool,
    /// Azimut der Lichtquelle in Grad
    pub azimuth_deg: f32,
    /// Höhenwinkel der Lichtquelle in Grad
    pub altitude_deg: f32,
    /// Mischfaktor (0.0 = aus, 1.0 = voll)
    pub blend_factor: f32,
}

impl Default for HillshadeOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            azimuth_deg: 315.0,
            altitude_deg: 45.0,
            blend_factor: 0.45,
        }
    }
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Viewer-Optionen.
/// Wird als `cadastre_viewer.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    // ── Ansicht ─────────────────────────────────────────────────
    /// Startmittelpunkt (Länge, Breite)
    pub initial_center_lon_lat: [f64; 2],
    /// Startzoomstufe
    pub initial_zoom: f64,
    /// Arbeits-Bezugssystem (EPSG-Bezeichner)
    pub working_reference: String,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Hintergrundfarbe der Kartenfläche
    pub background_color: [u8; 4],

    // ── Vektor-Stil ─────────────────────────────────────────────
    pub vector_stroke_color: [u8; 4],
    pub vector_stroke_width: f64,
    pub vector_fill_color: [u8; 4],
    pub vector_point_radius: f64,
    pub label_color: [u8; 4],
    pub label_outline_color: [u8; 4],
    pub label_scale: u32,

    // ── AOI-Marker ──────────────────────────────────────────────
    pub marker_radius: f64,
    pub marker_fill_color: [u8; 4],
    pub marker_stroke_color: [u8; 4],
    pub marker_stroke_width: f64,

    // ── Raster ──────────────────────────────────────────────────
    pub raster_opacity: f32,
    pub hillshade: HillshadeOptions,

    // ── Ansichtsanpassung ───────────────────────────────────────
    pub layer_fit_padding: f64,
    pub layer_fit_duration_ms: u64,
    pub lot_fit_padding: f64,
    pub lot_fit_duration_ms: u64,

    // ── Popup & Hit-Test ────────────────────────────────────────
    pub popup_offset_px: [f64; 2],
    pub hit_tolerance_px: f64,

    // ── Analyse & Export ────────────────────────────────────────
    pub analysis_endpoint: String,
    pub analysis_timeout_secs: u64,
    pub export_path: String,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            initial_center_lon_lat: INITIAL_CENTER_LON_LAT,
            initial_zoom: INITIAL_ZOOM,
            working_reference: WORKING_REFERENCE.to_string(),
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            background_color: BACKGROUND_COLOR,
            vector_stroke_color: VECTOR_STROKE_COLOR,
            vector_stroke_width: VECTOR_STROKE_WIDTH,
            vector_fill_color: VECTOR_FILL_COLOR,
            vector_point_radius: VECTOR_POINT_RADIUS,
            label_color: LABEL_COLOR,
            label_outline_color: LABEL_OUTLINE_COLOR,
            label_scale: LABEL_SCALE,
            marker_radius: MARKER_RADIUS,
            marker_fill_color: MARKER_FILL_COLOR,
            marker_stroke_color: MARKER_STROKE_COLOR,
            marker_stroke_width: MARKER_STROKE_WIDTH,
            raster_opacity: RASTER_OPACITY,
            hillshade: HillshadeOptions::default(),
            layer_fit_padding: LAYER_FIT_PADDING,
            layer_fit_duration_ms: LAYER_FIT_DURATION_MS,
            lot_fit_padding: LOT_FIT_PADDING,
            lot_fit_duration_ms: LOT_FIT_DURATION_MS,
            popup_offset_px: POPUP_OFFSET_PX,
            hit_tolerance_px: HIT_TOLERANCE_PX,
            analysis_endpoint: ANALYSIS_ENDPOINT.to_string(),
            analysis_timeout_secs: ANALYSIS_TIMEOUT_SECS,
            export_path: EXPORT_PATH.to_string(),
        }
    }
}

impl ViewerOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("cadastre-viewer"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("cadastre_viewer.toml")
    }

    /// Klick-Toleranz in Pixeln: halbe Strichbreite plus Zusatztoleranz.
    pub fn hit_tolerance(&self) -> f64 {
        self.vector_stroke_width / 2.0 + self.hit_tolerance_px
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_falls_back_per_field() {
        let opts: ViewerOptions = toml::from_str(
            r#"
            raster_opacity = 0.5
            export_path = "aoi.csv"
            [hillshade]
            enabled = false
            azimuth_deg = 270.0
            altitude_deg = 30.0
            blend_factor = 0.2
            "#,
        )
        .unwrap();
        assert_eq!(opts.raster_opacity, 0.5);
        assert_eq!(opts.export_path, "aoi.csv");
        assert!(!opts.hillshade.enabled);
        assert_eq!(opts.vector_stroke_width, VECTOR_STROKE_WIDTH);
        assert_eq!(opts.analysis_endpoint, ANALYSIS_ENDPOINT);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cadastre_viewer.toml");
        let mut opts = ViewerOptions::default();
        opts.lot_fit_padding = 64.0;
        opts.save_to_file(&path).unwrap();

        let loaded = ViewerOptions::load_from_file(&path);
        assert_eq!(loaded.lot_fit_padding, 64.0);
        assert_eq!(loaded.working_reference, WORKING_REFERENCE);
    }

    #[test]
    fn test_missing_or_broken_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = ViewerOptions::load_from_file(&dir.path().join("fehlt.toml"));
        assert_eq!(missing.initial_zoom, INITIAL_ZOOM);

        let broken = dir.path().join("kaputt.toml");
        std::fs::write(&broken, "raster_opacity = [").unwrap();
        assert_eq!(ViewerOptions::load_from_file(&broken).raster_opacity, RASTER_OPACITY);
    }

    #[test]
    fn test_hit_tolerance_includes_half_stroke() {
        assert_eq!(ViewerOptions::default().hit_tolerance(), 1.5);
    }
}
