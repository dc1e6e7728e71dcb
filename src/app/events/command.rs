use crate::core::{LayerDescriptor, LayerId, SubmissionOutcome};

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Layer in die Registry aufnehmen
    AddLayer { descriptor: LayerDescriptor },
    /// Layer aus der Registry entfernen
    RemoveLayer { id: LayerId },
    /// Sichtbarkeit eines Layers umschalten
    ToggleLayerVisibility { id: LayerId },
    /// Layer-Stapel mit der Registry abgleichen
    ReconcileLayers,

    /// Viewport-Größe setzen
    SetViewportSize { size: [u32; 2] },
    /// Ansichts-Animation fortschreiben
    AdvanceView { elapsed_ms: u64 },
    /// Ansichts-Animation am Ziel beenden
    CompleteViewAnimation,
    /// Startansicht wiederherstellen
    ResetView,

    /// AOI-Punkt an Pixelposition erfassen
    AddAoiPoint { pixel: glam::DVec2 },
    /// Feature unter Pixelposition suchen und Popup füllen
    PickFeatureAt { pixel: glam::DVec2 },
    /// Popup schließen
    ClosePopup,
    /// Interaktionsmodus setzen
    SetCaptureMode { enabled: bool },
    /// AOI-Punkte und Marker verwerfen
    ClearAoi,
    /// Export-Flag setzen
    ArmCoordinateExport,
    /// Export ausführen, falls angefordert (setzt das Flag zurück)
    RunCoordinateExport,

    /// Kartenansicht rastern
    CaptureMap,
    /// Capture verwerfen
    DiscardCapture,
    /// Analyse-Ergebnis übernehmen
    ApplyAnalysisOutcome { outcome: SubmissionOutcome },
    /// Capture-Fehler quittieren
    AcknowledgeCaptureFailure,
    /// Lot auswählen
    SelectLot { numero_lot: Option<String> },
    /// Ansicht auf das Feature des gewählten Lots einpassen
    FitToSelectedLot,
}
