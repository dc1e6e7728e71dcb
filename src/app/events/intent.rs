use crate::core::{LayerDescriptor, LayerId, SubmissionOutcome};

/// App-Intent und App-Command Events.
/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum AppIntent {
    // ── Layer ───────────────────────────────────────────────────
    /// Import-Dialog hat einen Layer geliefert
    LayerImported { descriptor: LayerDescriptor },
    /// Layer entfernen
    LayerRemoveRequested { id: LayerId },
    /// Sichtbarkeit eines Layers umschalten
    LayerVisibilityToggled { id: LayerId },

    // ── Ansicht ─────────────────────────────────────────────────
    /// Kartenfläche hat eine neue Größe
    ViewportResized { size: [u32; 2] },
    /// Zeit für laufende Ansichts-Animationen ist vergangen
    ViewAdvanced { elapsed_ms: u64 },
    /// Laufende Ansichts-Animation sofort beenden
    ViewAnimationsCompleted,
    /// Startansicht wiederherstellen
    ResetViewRequested,

    // ── Karteninteraktion ───────────────────────────────────────
    /// Klick auf die Karte (Pixel, Ursprung oben links)
    MapClicked { pixel: glam::DVec2 },
    /// Auswahl-Popup geschlossen
    PopupClosed,
    /// Punkterfassung ein- oder ausschalten
    CaptureModeSet { enabled: bool },
    /// Punkterfassung umschalten
    CaptureModeToggled,
    /// Erfasste AOI-Punkte verwerfen
    AoiClearRequested,
    /// AOI-Punkte als Tabelle exportieren
    ExportCoordinatesRequested,

    // ── Capture & Analyse ───────────────────────────────────────
    /// Aktuelle Kartenansicht rastern
    MapCaptureRequested,
    /// Bediener sendet das Capture nicht ab
    MapCaptureDiscarded,
    /// Fehlermeldung der Capture-Pipeline quittiert
    CaptureFailureAcknowledged,
    /// Antwort des Analyse-Dienstes liegt vor
    AnalysisFinished { outcome: SubmissionOutcome },
    /// Lot in der Ergebnisliste gewählt (`None` hebt die Auswahl auf)
    LotSelected { numero_lot: Option<String> },
}
