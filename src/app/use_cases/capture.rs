//! Use-Cases für Karten-Capture und das Übernehmen von Analyse-Ergebnissen.

use crate::app::{render_scene, AppState};
use crate::core::{CaptureState, SubmissionOutcome};
use crate::render;

/// Rastert die aktuelle Kartenansicht als PNG in die Capture-Pipeline.
pub fn capture_map(state: &mut AppState) {
    let scene = render_scene::build(state);
    let compositor = &state.compositor;
    if state
        .capture
        .capture(|| render::render_png(compositor, &scene))
        .is_some()
    {
        state.ui.status_message = None;
    } else if let CaptureState::Failed { reason } = state.capture.state() {
        state.ui.status_message = Some(format!("Capture fehlgeschlagen: {reason}"));
    }
}

/// Verwirft ein nicht abgeschicktes Capture.
pub fn discard(state: &mut AppState) {
    if state.capture.discard() {
        log::info!("Capture verworfen");
    }
}

/// Übernimmt das Ergebnis einer Analyse.
///
/// Erfolg ersetzt die Lot-Liste, ein Fehler lässt sie stehen und wird dem
/// Bediener als Statusmeldung angezeigt.
pub fn apply_outcome(state: &mut AppState, outcome: SubmissionOutcome) {
    match state.capture.finish_submit(outcome, &mut state.analysis) {
        Ok(count) => {
            state.ui.status_message = Some(format!("Analyse abgeschlossen: {count} Lots"));
        }
        Err(reason) => {
            state.ui.status_message = Some(format!("Analyse fehlgeschlagen: {reason}"));
        }
    }
}

/// Quittiert einen Capture- oder Analysefehler.
pub fn acknowledge_failure(state: &mut AppState) {
    state.capture.acknowledge_failure();
    state.ui.status_message = None;
}
