use glam::DVec2;

use crate::core::{Attributes, LayerId};

/// Popup mit den Attributen des zuletzt angeklickten Features.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionPopup {
    pub layer_id: LayerId,
    pub layer_name: String,
    /// Alle Attribute außer der Geometrie
    pub attributes: Attributes,
    /// Kartenkoordinate des Klicks
    pub anchor: DVec2,
    /// Versatz des Popups gegenüber dem Anker in Pixeln
    pub offset_px: [f64; 2],
}

/// UI-bezogener Anwendungszustand
#[derive(Debug, Default)]
pub struct UiState {
    /// Offenes Auswahl-Popup
    pub popup: Option<SelectionPopup>,
    /// Temporäre Statusnachricht für den Bediener
    pub status_message: Option<String>,
}

impl UiState {
    /// Erstellt den Standard-UI-Zustand (kein Popup, keine Meldung).
    pub fn new() -> Self {
        Self::default()
    }
}
