//! Sammlung der vom Bediener markierten AOI-Punkte.

use super::notify::{Notifier, SubscriptionId};

/// Ein markierter Punkt in WGS84.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AoiPoint {
    pub id: u64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Änderung der AOI-Sammlung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AoiEvent {
    Added(AoiPoint),
    Cleared { removed: usize },
}

/// Punkte in Erfassungsreihenfolge.
///
/// Die ID-Vergabe läuft über einen Zähler, der beim Leeren nicht
/// zurückgesetzt wird: IDs sind streng steigend und werden nie
/// wiederverwendet.
#[derive(Debug, Default)]
pub struct AoiCollector {
    points: Vec<AoiPoint>,
    next_id: u64,
    notifier: Notifier<AoiEvent>,
}

impl AoiCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hängt einen Punkt an und vergibt die nächste ID.
    pub fn add(&mut self, latitude: f64, longitude: f64) -> AoiPoint {
        let point = AoiPoint {
            id: self.next_id,
            latitude,
            longitude,
        };
        self.next_id += 1;
        self.points.push(point);
        log::info!(
            "AOI-Punkt {} erfasst: lat {:.6}, lon {:.6}",
            point.id,
            latitude,
            longitude
        );
        self.notifier.notify(&AoiEvent::Added(point));
        point
    }

    /// Entfernt alle Punkte. Der ID-Zähler läuft weiter.
    pub fn clear(&mut self) -> usize {
        let removed = self.points.len();
        self.points.clear();
        self.notifier.notify(&AoiEvent::Cleared { removed });
        removed
    }

    pub fn points(&self) -> &[AoiPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&AoiEvent) + Send + 'static) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }
}
