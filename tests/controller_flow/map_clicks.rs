use approx::assert_relative_eq;
use cadastre_viewer::{AppCommand, AppController, AppIntent, InteractionMode};
use serde_json::json;

use crate::{click, import_parcels, pixel_of, state_with_viewport};

#[test]
fn test_click_on_lot_opens_popup_with_attributes() {
    let mut controller = AppController::new();
    let mut state = state_with_viewport();
    let id = import_parcels(&mut controller, &mut state);

    let pixel = pixel_of(&state, -4.001, 5.249);
    click(&mut controller, &mut state, pixel);

    match state.command_log.entries().last() {
        Some(AppCommand::PickFeatureAt { .. }) => {}
        other => panic!("Unerwarteter letzter Command: {other:?}"),
    }
    let popup = state.ui.popup.as_ref().expect("Popup sollte offen sein");
    assert_eq!(popup.layer_id, id);
    assert_eq!(popup.attributes.get("NroLot"), Some(&json!("12")));
    assert_eq!(popup.attributes.get("Proprietaire"), Some(&json!("Kouassi")));
    assert_eq!(popup.offset_px, [0.0, -10.0]);

    let expected_anchor = state
        .view
        .map_view
        .pixel_to_map(pixel, state.view.viewport_size);
    assert_relative_eq!(popup.anchor.x, expected_anchor.x);
    assert_relative_eq!(popup.anchor.y, expected_anchor.y);
}

#[test]
fn test_click_on_empty_area_closes_popup() {
    let mut controller = AppController::new();
    let mut state = state_with_viewport();
    import_parcels(&mut controller, &mut state);

    let pixel = pixel_of(&state, -4.001, 5.249);
    click(&mut controller, &mut state, pixel);
    assert!(state.ui.popup.is_some());

    let pixel = pixel_of(&state, -3.997, 5.253);
    click(&mut controller, &mut state, pixel);
    assert!(state.ui.popup.is_none());
}

#[test]
fn test_capture_mode_click_records_aoi_point() {
    let mut controller = AppController::new();
    let mut state = state_with_viewport();
    import_parcels(&mut controller, &mut state);

    controller
        .handle_intent(&mut state, AppIntent::CaptureModeToggled)
        .expect("Moduswechsel sollte funktionieren");
    assert_eq!(state.mode.mode(), InteractionMode::Capturing);

    let pixel = pixel_of(&state, -4.001, 5.249);
    click(&mut controller, &mut state, pixel);

    match state.command_log.entries().last() {
        Some(AppCommand::AddAoiPoint { .. }) => {}
        other => panic!("Unerwarteter letzter Command: {other:?}"),
    }
    assert!(state.ui.popup.is_none());
    let point = state.aoi.points()[0];
    assert_eq!(point.id, 0);
    assert_relative_eq!(point.longitude, -4.001, epsilon = 1e-9);
    assert_relative_eq!(point.latitude, 5.249, epsilon = 1e-9);
    assert_eq!(state.compositor.markers().len(), 1);
}

#[test]
fn test_markers_are_not_hit_testable() {
    let mut controller = AppController::new();
    let mut state = state_with_viewport();
    import_parcels(&mut controller, &mut state);
    let pixel = pixel_of(&state, -3.997, 5.253);
    controller
        .handle_intent(&mut state, AppIntent::CaptureModeSet { enabled: true })
        .unwrap();
    click(&mut controller, &mut state, pixel);
    controller
        .handle_intent(&mut state, AppIntent::CaptureModeToggled)
        .unwrap();
    assert_eq!(state.mode.mode(), InteractionMode::Default);

    click(&mut controller, &mut state, pixel);
    assert!(state.ui.popup.is_none());
    assert_eq!(state.aoi.len(), 1);
}

#[test]
fn test_clearing_aoi_removes_points_and_markers() {
    let mut controller = AppController::new();
    let mut state = state_with_viewport();

    controller
        .handle_intent(&mut state, AppIntent::CaptureModeSet { enabled: true })
        .unwrap();
    for x in [100.0, 200.0, 300.0] {
        click(&mut controller, &mut state, glam::DVec2::new(x, 300.0));
    }
    assert_eq!(state.aoi.len(), 3);

    controller
        .handle_intent(&mut state, AppIntent::AoiClearRequested)
        .unwrap();
    assert!(state.aoi.is_empty());
    assert!(state.compositor.markers().is_empty());
}
