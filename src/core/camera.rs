//! Kartenansicht: Mittelpunkt, Auflösung und animierte Ansichtsanpassung.
//!
//! Koordinaten der Ansicht liegen im Arbeits-Bezugssystem der Karte
//! (Web Mercator, Meter). Pixel haben den Ursprung oben links, die
//! Karten-y-Achse zeigt nach oben.

use glam::DVec2;

use super::geometry::Extent;

/// Innenabstand in Pixeln beim Einpassen eines Extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    /// Gleicher Abstand auf allen Seiten.
    pub fn uniform(px: f64) -> Self {
        Self {
            top: px,
            right: px,
            bottom: px,
            left: px,
        }
    }
}

/// Protokoll der letzten Ansichtsanpassung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitRecord {
    /// Eingepasster Extent (Arbeits-Bezugssystem)
    pub extent: Extent,
    pub padding: Padding,
    pub duration_ms: u64,
    pub target_center: DVec2,
    pub target_resolution: f64,
}

#[derive(Debug, Clone, Copy)]
struct ViewAnimation {
    from_center: DVec2,
    from_resolution: f64,
    to_center: DVec2,
    to_resolution: f64,
    duration_ms: f64,
    elapsed_ms: f64,
}

/// 2D-Kartenansicht mit Zoomgrenzen und Fit-Animation.
#[derive(Debug, Clone)]
pub struct MapView {
    /// Mittelpunkt in Kartenkoordinaten
    pub center: DVec2,
    /// Karteneinheiten pro Pixel
    pub resolution: f64,
    min_zoom: f64,
    max_zoom: f64,
    animation: Option<ViewAnimation>,
    last_fit: Option<FitRecord>,
}

impl MapView {
    /// Auflösung bei Zoomstufe 0 (256-px-Kacheln, Web Mercator).
    pub const BASE_RESOLUTION: f64 = 156_543.033_928_040_97;

    /// Erstellt eine Ansicht; `zoom` wird auf die Grenzen begrenzt.
    pub fn new(center: DVec2, zoom: f64, min_zoom: f64, max_zoom: f64) -> Self {
        let (min_zoom, max_zoom) = (min_zoom.min(max_zoom), min_zoom.max(max_zoom));
        Self {
            center,
            resolution: Self::resolution_for_zoom(zoom.clamp(min_zoom, max_zoom)),
            min_zoom,
            max_zoom,
            animation: None,
            last_fit: None,
        }
    }

    pub fn resolution_for_zoom(zoom: f64) -> f64 {
        Self::BASE_RESOLUTION / 2f64.powf(zoom)
    }

    /// Aktuelle (gebrochene) Zoomstufe.
    pub fn zoom(&self) -> f64 {
        (Self::BASE_RESOLUTION / self.resolution).log2()
    }

    fn clamp_resolution(&self, resolution: f64) -> f64 {
        let min_res = Self::resolution_for_zoom(self.max_zoom);
        let max_res = Self::resolution_for_zoom(self.min_zoom);
        if resolution.is_nan() {
            return max_res;
        }
        resolution.clamp(min_res, max_res)
    }

    /// Pixel (Ursprung oben links) → Kartenkoordinate.
    pub fn pixel_to_map(&self, pixel: DVec2, viewport: [u32; 2]) -> DVec2 {
        let half = DVec2::new(viewport[0] as f64, viewport[1] as f64) / 2.0;
        DVec2::new(
            self.center.x + (pixel.x - half.x) * self.resolution,
            self.center.y - (pixel.y - half.y) * self.resolution,
        )
    }

    /// Kartenkoordinate → Pixel (Ursprung oben links).
    pub fn map_to_pixel(&self, p: DVec2, viewport: [u32; 2]) -> DVec2 {
        let half = DVec2::new(viewport[0] as f64, viewport[1] as f64) / 2.0;
        DVec2::new(
            half.x + (p.x - self.center.x) / self.resolution,
            half.y - (p.y - self.center.y) / self.resolution,
        )
    }

    /// Sichtbarer Kartenausschnitt.
    pub fn visible_extent(&self, viewport: [u32; 2]) -> Extent {
        Extent::new(
            self.pixel_to_map(DVec2::ZERO, viewport),
            self.pixel_to_map(DVec2::new(viewport[0] as f64, viewport[1] as f64), viewport),
        )
    }

    /// Passt die Ansicht an einen Extent an.
    ///
    /// `duration_ms == 0` springt sofort, sonst startet eine Animation, die
    /// über [`MapView::advance`] fortgeschrieben wird. Eine laufende
    /// Animation wird ersetzt.
    pub fn fit(
        &mut self,
        extent: Extent,
        viewport: [u32; 2],
        padding: Padding,
        duration_ms: u64,
    ) -> FitRecord {
        let avail_w = (viewport[0] as f64 - padding.left - padding.right).max(1.0);
        let avail_h = (viewport[1] as f64 - padding.top - padding.bottom).max(1.0);
        let resolution =
            self.clamp_resolution((extent.width() / avail_w).max(extent.height() / avail_h));

        // Extent-Mitte auf die Mitte des gepolsterten Bereichs legen
        let offset_px = DVec2::new(
            (padding.left - padding.right) / 2.0,
            (padding.top - padding.bottom) / 2.0,
        );
        let extent_center = extent.center();
        let target_center = DVec2::new(
            extent_center.x - offset_px.x * resolution,
            extent_center.y + offset_px.y * resolution,
        );

        if duration_ms == 0 {
            self.center = target_center;
            self.resolution = resolution;
            self.animation = None;
        } else {
            self.animation = Some(ViewAnimation {
                from_center: self.center,
                from_resolution: self.resolution,
                to_center: target_center,
                to_resolution: resolution,
                duration_ms: duration_ms as f64,
                elapsed_ms: 0.0,
            });
        }

        let record = FitRecord {
            extent,
            padding,
            duration_ms,
            target_center,
            target_resolution: resolution,
        };
        self.last_fit = Some(record);
        record
    }

    /// Schreibt eine laufende Animation um `elapsed_ms` fort.
    ///
    /// Gibt `true` zurück, solange die Animation noch läuft.
    pub fn advance(&mut self, elapsed_ms: u64) -> bool {
        let Some(mut animation) = self.animation else {
            return false;
        };
        animation.elapsed_ms += elapsed_ms as f64;
        let t = (animation.elapsed_ms / animation.duration_ms).min(1.0);
        let eased = t * t * (3.0 - 2.0 * t);

        self.center = animation.from_center.lerp(animation.to_center, eased);
        self.resolution = animation.from_resolution
            + (animation.to_resolution - animation.from_resolution) * eased;

        if t >= 1.0 {
            self.center = animation.to_center;
            self.resolution = animation.to_resolution;
            self.animation = None;
            false
        } else {
            self.animation = Some(animation);
            true
        }
    }

    /// Beendet eine laufende Animation sofort am Ziel.
    pub fn finish_animation(&mut self) {
        if let Some(animation) = self.animation.take() {
            self.center = animation.to_center;
            self.resolution = animation.to_resolution;
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Letzte Ansichtsanpassung (auch wenn die Animation noch läuft).
    pub fn last_fit(&self) -> Option<&FitRecord> {
        self.last_fit.as_ref()
    }
}
