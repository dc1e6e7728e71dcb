//! Marker-Overlay für erfasste AOI-Punkte.
//!
//! Liegt über allen Layern, ist nicht anklickbar und bleibt über
//! Layer-Änderungen hinweg bestehen.

use glam::DVec2;

/// Ein Marker an einer Kartenposition (Arbeits-Bezugssystem).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    /// ID des zugehörigen AOI-Punkts
    pub aoi_id: u64,
    pub position: DVec2,
}

/// Quelle der AOI-Marker in Erfassungsreihenfolge.
#[derive(Debug, Clone, Default)]
pub struct MarkerSource {
    markers: Vec<Marker>,
}

impl MarkerSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, aoi_id: u64, position: DVec2) {
        self.markers.push(Marker { aoi_id, position });
    }

    pub fn clear(&mut self) {
        self.markers.clear();
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
