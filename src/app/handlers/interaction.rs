//! Handler für Kartenklicks, Interaktionsmodus und Lot-Auswahl.

use glam::DVec2;

use crate::app::use_cases;
use crate::app::AppState;

/// Erfasst einen AOI-Punkt an der Pixelposition.
pub fn add_aoi_point(state: &mut AppState, pixel: DVec2) {
    use_cases::pointer::capture_point(state, pixel);
}

/// Sucht das Feature unter dem Klick.
pub fn pick_feature(state: &mut AppState, pixel: DVec2) {
    use_cases::pointer::pick_feature(state, pixel);
}

/// Schließt das Auswahl-Popup.
pub fn close_popup(state: &mut AppState) {
    use_cases::pointer::close_popup(state);
}

/// Setzt den Interaktionsmodus.
pub fn set_capture_mode(state: &mut AppState, enabled: bool) {
    use_cases::pointer::set_capture_mode(state, enabled);
}

/// Verwirft alle AOI-Punkte.
pub fn clear_aoi(state: &mut AppState) {
    use_cases::pointer::clear_aoi(state);
}

/// Wählt ein Lot aus der Ergebnisliste.
pub fn select_lot(state: &mut AppState, numero_lot: Option<String>) {
    use_cases::selection::select_lot(state, numero_lot);
}
