//! Handler für Kartenansicht und Viewport.

use crate::app::use_cases;
use crate::app::AppState;

/// Aktualisiert die Viewport-Größe im State.
pub fn set_viewport_size(state: &mut AppState, size: [u32; 2]) {
    use_cases::camera::resize(state, size);
}

/// Schreibt Ansichts-Animationen fort.
pub fn advance(state: &mut AppState, elapsed_ms: u64) {
    use_cases::camera::advance(state, elapsed_ms);
}

/// Beendet die laufende Animation am Ziel.
pub fn complete_animation(state: &mut AppState) {
    use_cases::camera::complete_animation(state);
}

/// Setzt die Ansicht auf die Startansicht zurück.
pub fn reset(state: &mut AppState) {
    use_cases::camera::reset(state);
}

/// Passt die Ansicht auf das gewählte Lot ein.
pub fn fit_to_selected_lot(state: &mut AppState) {
    use_cases::selection::fit_to_selected_lot(state);
}
