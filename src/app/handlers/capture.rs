//! Handler für Capture und Analyse-Ergebnisse.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::SubmissionOutcome;

/// Rastert die aktuelle Kartenansicht.
pub fn capture_map(state: &mut AppState) {
    use_cases::capture::capture_map(state);
}

/// Verwirft das aktuelle Capture.
pub fn discard(state: &mut AppState) {
    use_cases::capture::discard(state);
}

/// Übernimmt das Ergebnis einer Analyse.
pub fn apply_outcome(state: &mut AppState, outcome: SubmissionOutcome) {
    use_cases::capture::apply_outcome(state, outcome);
}

/// Quittiert einen Fehlerzustand.
pub fn acknowledge_failure(state: &mut AppState) {
    use_cases::capture::acknowledge_failure(state);
}
