//! Use-Cases für den Koordinaten-Export der AOI-Punkte.

use std::path::Path;

use crate::app::AppState;
use crate::io::coordinates;

/// Fordert einen Export an; ausgeführt wird er im Abgleichschritt.
pub fn arm(state: &mut AppState) {
    state.mode.request_export();
}

/// Führt einen angeforderten Export aus und setzt die Anforderung zurück.
///
/// Fehler werden protokolliert und als Statusmeldung angezeigt, die
/// Anforderung wird auch dann zurückgesetzt.
pub fn run(state: &mut AppState) {
    if !state.mode.export_requested() {
        return;
    }
    let path = Path::new(&state.options.export_path);
    match coordinates::export_to_path(path, state.aoi.points()) {
        Ok(rows) => {
            state.ui.status_message = Some(format!(
                "{rows} Koordinaten exportiert nach {}",
                path.display()
            ));
        }
        Err(e) => {
            log::error!("Koordinaten-Export fehlgeschlagen: {e:#}");
            state.ui.status_message = Some(format!("Export fehlgeschlagen: {e}"));
        }
    }
    state.mode.reset_export();
}
