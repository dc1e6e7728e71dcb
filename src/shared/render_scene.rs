//! Render-Szene als expliziter Übergabevertrag zwischen App und Renderer.
//!
//! Lebt im shared-Modul, da `app` sie baut und `render` sie konsumiert.

use crate::core::MapView;

/// Read-only Daten für einen Render-Durchlauf.
#[derive(Debug, Clone)]
pub struct RenderScene {
    /// Kartenansicht für diesen Durchlauf
    pub view: MapView,
    /// Größe der Kartenfläche in Pixeln [Breite, Höhe]
    pub viewport_size: [u32; 2],
    /// Hintergrundfarbe (RGBA)
    pub background: [u8; 4],
}

impl RenderScene {
    /// Gibt zurück, ob die Kartenfläche eine Größe hat.
    pub fn has_area(&self) -> bool {
        self.viewport_size[0] > 0 && self.viewport_size[1] > 0
    }
}
