//! Handler für den Koordinaten-Export.

use crate::app::use_cases;
use crate::app::AppState;

/// Setzt die Export-Anforderung.
pub fn arm(state: &mut AppState) {
    use_cases::export::arm(state);
}

/// Führt einen angeforderten Export aus.
pub fn run(state: &mut AppState) {
    use_cases::export::run(state);
}
