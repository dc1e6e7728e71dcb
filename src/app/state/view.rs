use crate::core::MapView;

/// View-bezogener Anwendungszustand
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Kartenansicht im Arbeits-Bezugssystem
    pub map_view: MapView,
    /// Aktuelle Größe der Kartenfläche in Pixel
    pub viewport_size: [u32; 2],
}

impl ViewState {
    /// Erstellt den View-Zustand; die Viewport-Größe ist bis zur ersten
    /// Meldung der Kartenfläche 0x0.
    pub fn new(map_view: MapView) -> Self {
        Self {
            map_view,
            viewport_size: [0, 0],
        }
    }

    /// `true` sobald die Kartenfläche eine Größe hat.
    pub fn has_viewport(&self) -> bool {
        self.viewport_size[0] > 0 && self.viewport_size[1] > 0
    }
}
