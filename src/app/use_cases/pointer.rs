//! Use-Cases für Kartenklicks: AOI-Erfassung und Feature-Auswahl.

use glam::DVec2;

use crate::app::state::SelectionPopup;
use crate::app::AppState;
use crate::core::feature::popup_attributes;

/// Erfasst einen AOI-Punkt an der Klickposition.
///
/// Der Marker bleibt im Arbeits-Bezugssystem, der AOI-Punkt bekommt die
/// auf WGS84 zurückgerechneten Koordinaten.
pub fn capture_point(state: &mut AppState, pixel: DVec2) {
    if !state.view.has_viewport() {
        log::warn!("Klick ohne Kartenfläche ignoriert");
        return;
    }
    let map_position = state
        .view
        .map_view
        .pixel_to_map(pixel, state.view.viewport_size);
    let lon_lat = state.compositor.config().working.to_wgs84(map_position);
    let point = state.aoi.add(lon_lat.y, lon_lat.x);
    state.compositor.markers_mut().add(point.id, map_position);
}

/// Sucht das oberste Feature unter dem Klick und füllt das Popup.
///
/// Ohne Treffer wird das Popup geschlossen.
pub fn pick_feature(state: &mut AppState, pixel: DVec2) {
    let viewport = state.view.viewport_size;
    let map_view = &state.view.map_view;
    let popup = state
        .compositor
        .feature_at_pixel(map_view, viewport, pixel)
        .map(|hit| {
            log::debug!(
                "Feature '{}' in Layer '{}' gewählt",
                hit.feature.label(),
                hit.layer_name
            );
            SelectionPopup {
                layer_id: hit.layer_id.clone(),
                layer_name: hit.layer_name.to_string(),
                attributes: popup_attributes(hit.feature),
                anchor: map_view.pixel_to_map(pixel, viewport),
                offset_px: state.options.popup_offset_px,
            }
        });
    if popup.is_none() {
        log::debug!("Kein Feature unter ({:.0}, {:.0})", pixel.x, pixel.y);
    }
    state.ui.popup = popup;
}

/// Schließt das Auswahl-Popup.
pub fn close_popup(state: &mut AppState) {
    state.ui.popup = None;
}

/// Setzt den Interaktionsmodus; im Erfassungsmodus gibt es kein Popup.
pub fn set_capture_mode(state: &mut AppState, enabled: bool) {
    state.mode.set_capturing(enabled);
    if enabled {
        state.ui.popup = None;
    }
}

/// Verwirft alle AOI-Punkte samt Markern.
pub fn clear_aoi(state: &mut AppState) {
    let removed = state.aoi.clear();
    state.compositor.markers_mut().clear();
    log::info!("{removed} AOI-Punkte verworfen");
}
