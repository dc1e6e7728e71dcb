//! Use-Cases für die Lot-Auswahl aus der Ergebnisliste.

use crate::app::AppState;
use crate::core::Padding;

/// Wählt ein Lot aus oder hebt die Auswahl auf.
pub fn select_lot(state: &mut AppState, numero_lot: Option<String>) {
    state.analysis.select_lot(numero_lot);
}

/// Passt die Ansicht auf das Feature des gewählten Lots ein.
///
/// Ohne passendes Feature bleibt die Auswahl offen und wird beim nächsten
/// Layer-Abgleich erneut gesucht.
pub fn fit_to_selected_lot(state: &mut AppState) {
    state.sync.selection_seen = state.analysis.selection_revision();
    let Some(lot) = state.analysis.selected_lot() else {
        state.sync.selection_pending = false;
        return;
    };

    let Some(found) = state.compositor.find_lot_feature(lot) else {
        log::info!("Lot {lot} in keinem Layer gefunden");
        state.sync.selection_pending = true;
        return;
    };

    if !state.view.has_viewport() {
        log::debug!("Kein Viewport, Einpassen auf Lot {lot} zurückgestellt");
        state.sync.selection_pending = true;
        return;
    }

    log::info!("Ansicht auf Lot {lot} (Layer {})", found.layer_id);
    state.view.map_view.fit(
        found.extent,
        state.view.viewport_size,
        Padding::uniform(state.options.lot_fit_padding),
        state.options.lot_fit_duration_ms,
    );
    state.sync.selection_pending = false;
}
