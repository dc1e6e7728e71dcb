use cadastre_viewer::core::CaptureState;
use cadastre_viewer::{AppCommand, AppController, AppIntent};
use glam::DVec2;

use crate::{click, import_parcels, state_with_viewport};

#[test]
fn test_export_request_writes_csv_and_resets_flag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coordonnees.csv");
    let mut controller = AppController::new();
    let mut state = state_with_viewport();
    state.options.export_path = path.display().to_string();

    controller
        .handle_intent(&mut state, AppIntent::CaptureModeSet { enabled: true })
        .unwrap();
    for x in [100.0, 400.0, 700.0] {
        click(&mut controller, &mut state, DVec2::new(x, 300.0));
    }
    controller
        .handle_intent(&mut state, AppIntent::ExportCoordinatesRequested)
        .expect("Export sollte ohne Fehler durchlaufen");

    match state.command_log.entries().last() {
        Some(AppCommand::RunCoordinateExport) => {}
        other => panic!("Unerwarteter letzter Command: {other:?}"),
    }
    assert!(!state.mode.export_requested());

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Longitude,Latitude,ID");
    for (i, line) in lines[1..].iter().enumerate() {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields[2], i.to_string());
        let lat: f64 = fields[1].parse().unwrap();
        assert!((lat - 5.25).abs() < 1e-9);
    }
}

#[test]
fn test_failed_export_is_reported_not_propagated() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = AppController::new();
    let mut state = state_with_viewport();
    state.options.export_path = dir
        .path()
        .join("fehlt")
        .join("aoi.csv")
        .display()
        .to_string();

    controller
        .handle_intent(&mut state, AppIntent::ExportCoordinatesRequested)
        .expect("Exportfehler sollen nicht propagiert werden");

    assert!(!state.mode.export_requested());
    assert!(state.ui.status_message.is_some());
}

#[test]
fn test_capture_and_discard_release_the_png() {
    let mut controller = AppController::new();
    let mut state = state_with_viewport();
    import_parcels(&mut controller, &mut state);
    let live_before = state.blobs.live_count();

    controller
        .handle_intent(&mut state, AppIntent::MapCaptureRequested)
        .unwrap();
    let CaptureState::Captured { byte_len, .. } = *state.capture.state() else {
        panic!("Unerwarteter Capture-Zustand: {:?}", state.capture.state());
    };
    assert!(byte_len > 0);
    let png = state.capture.captured_png().unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    assert_eq!(state.blobs.live_count(), live_before + 1);

    controller
        .handle_intent(&mut state, AppIntent::MapCaptureDiscarded)
        .unwrap();
    assert_eq!(*state.capture.state(), CaptureState::Idle);
    assert_eq!(state.blobs.live_count(), live_before);
}
