//! Use-Cases für Layer-Verwaltung und den Abgleich mit dem Compositor.

use crate::app::AppState;
use crate::core::{LayerDescriptor, LayerId, Padding};

use super::selection;

/// Nimmt einen importierten Layer in die Registry auf.
pub fn add(state: &mut AppState, descriptor: LayerDescriptor) -> anyhow::Result<()> {
    state.layers.add(descriptor)
}

/// Entfernt einen Layer; ein Popup auf diesem Layer wird geschlossen.
pub fn remove(state: &mut AppState, id: &LayerId) {
    match state.layers.remove(id) {
        Some(_) => close_popup_on(state, id),
        None => log::warn!("Layer {id} nicht gefunden, nichts entfernt"),
    }
}

/// Schaltet die Sichtbarkeit eines Layers um.
pub fn toggle_visibility(state: &mut AppState, id: &LayerId) {
    match state.layers.toggle_visibility(id) {
        Some(visible) => {
            log::debug!("Layer {id} sichtbar: {visible}");
            if !visible {
                close_popup_on(state, id);
            }
        }
        None => log::warn!("Layer {id} nicht gefunden, Sichtbarkeit unverändert"),
    }
}

/// Gleicht den gerenderten Stapel mit der Registry ab.
///
/// Neu gerenderte Vektor-Layer werden in die Ansicht eingepasst. Ein noch
/// nicht gefundenes Lot wird danach erneut gesucht.
pub fn reconcile(state: &mut AppState) {
    let report = state.compositor.reconcile(state.layers.layers());
    state.sync.layers_seen = state.layers.revision();

    if let Some(extent) = report.fit_extent {
        if state.view.has_viewport() {
            state.view.map_view.fit(
                extent,
                state.view.viewport_size,
                Padding::uniform(state.options.layer_fit_padding),
                state.options.layer_fit_duration_ms,
            );
        } else {
            log::debug!("Kein Viewport, Einpassen auf neue Layer übersprungen");
        }
    }

    if !report.failures.is_empty() {
        let names: Vec<&str> = report
            .failures
            .iter()
            .map(|failure| failure.layer_name.as_str())
            .collect();
        state.ui.status_message = Some(format!(
            "Layer konnten nicht geladen werden: {}",
            names.join(", ")
        ));
    }

    if state.sync.selection_pending {
        selection::fit_to_selected_lot(state);
    }

    let popup_layer_gone = state.ui.popup.as_ref().is_some_and(|popup| {
        !state
            .compositor
            .rendered_layers()
            .iter()
            .any(|layer| layer.layer_id == popup.layer_id)
    });
    if popup_layer_gone {
        state.ui.popup = None;
    }
}

fn close_popup_on(state: &mut AppState, id: &LayerId) {
    if state
        .ui
        .popup
        .as_ref()
        .is_some_and(|popup| &popup.layer_id == id)
    {
        state.ui.popup = None;
    }
}
