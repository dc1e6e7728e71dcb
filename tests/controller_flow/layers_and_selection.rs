use std::io::Cursor;

use cadastre_viewer::core::Padding;
use cadastre_viewer::{AppCommand, AppController, AppIntent, LayerDescriptor};
use glam::DVec2;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use crate::{import_parcels, state_with_viewport};

fn png_bytes() -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([0, 120, 0, 255])))
        .write_to(&mut buffer, ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

#[test]
fn test_layer_import_reconciles_and_fits_view() {
    let mut controller = AppController::new();
    let mut state = state_with_viewport();

    import_parcels(&mut controller, &mut state);

    assert_eq!(state.compositor.rendered_layers().len(), 1);
    let fit = state.view.map_view.last_fit().expect("Ansicht sollte eingepasst sein");
    assert_eq!(fit.padding, Padding::uniform(20.0));
    assert_eq!(fit.duration_ms, 1000);
    assert!(state
        .command_log
        .entries()
        .iter()
        .any(|command| matches!(command, AppCommand::ReconcileLayers)));
}

#[test]
fn test_visibility_toggle_does_not_refit() {
    let mut controller = AppController::new();
    let mut state = state_with_viewport();
    let id = import_parcels(&mut controller, &mut state);
    let first_fit = *state.view.map_view.last_fit().unwrap();

    controller
        .handle_intent(&mut state, AppIntent::LayerVisibilityToggled { id: id.clone() })
        .expect("Ausblenden sollte funktionieren");
    assert!(state.compositor.rendered_layers().is_empty());

    controller
        .handle_intent(&mut state, AppIntent::LayerVisibilityToggled { id })
        .expect("Einblenden sollte funktionieren");
    assert_eq!(state.compositor.rendered_layers().len(), 1);
    assert_eq!(*state.view.map_view.last_fit().unwrap(), first_fit);
}

#[test]
fn test_lot_selection_fits_view_to_lot() {
    let mut controller = AppController::new();
    let mut state = state_with_viewport();
    import_parcels(&mut controller, &mut state);

    controller
        .handle_intent(
            &mut state,
            AppIntent::LotSelected {
                numero_lot: Some("7".to_string()),
            },
        )
        .expect("Lot-Auswahl sollte funktionieren");

    match state.command_log.entries().last() {
        Some(AppCommand::FitToSelectedLot) => {}
        other => panic!("Unerwarteter letzter Command: {other:?}"),
    }
    let fit = state.view.map_view.last_fit().unwrap();
    assert_eq!(fit.padding, Padding::uniform(50.0));
    assert_eq!(fit.duration_ms, 1500);

    let working = state.compositor.config().working;
    assert!(fit.extent.contains(working.from_wgs84(DVec2::new(-3.993, 5.257))));
    assert!(!fit.extent.contains(working.from_wgs84(DVec2::new(-4.001, 5.249))));
}

#[test]
fn test_reselecting_same_lot_fits_again() {
    let mut controller = AppController::new();
    let mut state = state_with_viewport();
    import_parcels(&mut controller, &mut state);

    for _ in 0..2 {
        controller
            .handle_intent(
                &mut state,
                AppIntent::LotSelected {
                    numero_lot: Some("12".to_string()),
                },
            )
            .unwrap();
    }

    let fits = state
        .command_log
        .entries()
        .iter()
        .filter(|command| matches!(command, AppCommand::FitToSelectedLot))
        .count();
    assert_eq!(fits, 2);
}

#[test]
fn test_lot_selected_before_layer_is_resolved_on_import() {
    let mut controller = AppController::new();
    let mut state = state_with_viewport();

    controller
        .handle_intent(
            &mut state,
            AppIntent::LotSelected {
                numero_lot: Some("12".to_string()),
            },
        )
        .unwrap();
    assert!(state.view.map_view.last_fit().is_none());
    assert!(state.sync.selection_pending);

    import_parcels(&mut controller, &mut state);

    let fit = state.view.map_view.last_fit().unwrap();
    assert_eq!(fit.padding, Padding::uniform(50.0));
    assert!(!state.sync.selection_pending);
}

#[test]
fn test_corrupt_raster_does_not_block_vector_layer() {
    let mut controller = AppController::new();
    let mut state = state_with_viewport();

    controller
        .handle_intent(
            &mut state,
            AppIntent::LayerImported {
                descriptor: LayerDescriptor::raster("kaputt", "EPSG:3857", vec![0u8; 16], None),
            },
        )
        .expect("Ein defekter Layer darf den Intent nicht scheitern lassen");
    import_parcels(&mut controller, &mut state);

    let rendered = state.compositor.rendered_layers();
    assert_eq!(rendered.len(), 1);
    assert_eq!(rendered[0].name, "parcelles");
    assert!(state.ui.status_message.as_deref().unwrap().contains("kaputt"));
}

#[test]
fn test_duplicate_layer_id_fails_intent() {
    let mut controller = AppController::new();
    let mut state = state_with_viewport();
    let descriptor = LayerDescriptor::vector_text("a", "EPSG:4326", "{}").with_id("a");

    controller
        .handle_intent(
            &mut state,
            AppIntent::LayerImported {
                descriptor: descriptor.clone(),
            },
        )
        .unwrap();
    let result = controller.handle_intent(&mut state, AppIntent::LayerImported { descriptor });

    assert!(result.is_err());
    assert_eq!(state.layers.len(), 1);
}

#[test]
fn test_removing_raster_releases_its_blob() {
    let mut controller = AppController::new();
    let mut state = state_with_viewport();
    let descriptor = LayerDescriptor::raster(
        "ortho",
        "EPSG:4326",
        png_bytes(),
        Some(cadastre_viewer::Extent::new(
            DVec2::new(-4.01, 5.24),
            DVec2::new(-3.99, 5.26),
        )),
    );
    let id = descriptor.id.clone();

    controller
        .handle_intent(&mut state, AppIntent::LayerImported { descriptor })
        .unwrap();
    assert_eq!(state.compositor.rendered_layers().len(), 1);
    assert_eq!(state.blobs.live_count(), 1);

    controller
        .handle_intent(&mut state, AppIntent::LayerRemoveRequested { id })
        .unwrap();
    assert!(state.compositor.rendered_layers().is_empty());
    assert_eq!(state.blobs.live_count(), 0);
}
