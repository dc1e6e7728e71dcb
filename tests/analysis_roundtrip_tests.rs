use std::sync::Mutex;

use async_trait::async_trait;
use cadastre_viewer::core::CaptureState;
use cadastre_viewer::{AnalysisService, AppCommand, AppController, AppIntent, AppState, Lot};

/// In-Process-Ersatz für den Analyse-Dienst.
struct FakeService {
    response: Result<Vec<Lot>, String>,
    received: Mutex<Vec<Vec<u8>>>,
}

impl FakeService {
    fn answering(response: Result<Vec<Lot>, String>) -> Self {
        Self {
            response,
            received: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AnalysisService for FakeService {
    async fn detect_constructions(&self, png: Vec<u8>) -> anyhow::Result<Vec<Lot>> {
        self.received.lock().unwrap().push(png);
        self.response.clone().map_err(anyhow::Error::msg)
    }
}

fn captured_state(controller: &mut AppController) -> AppState {
    let mut state = AppState::new();
    state.view.viewport_size = [64, 48];
    controller
        .handle_intent(&mut state, AppIntent::MapCaptureRequested)
        .expect("Capture sollte funktionieren");
    state
}

#[tokio::test]
async fn test_successful_analysis_replaces_lots() {
    let mut controller = AppController::new();
    let mut state = captured_state(&mut controller);
    let service = FakeService::answering(Ok(vec![Lot::new("3", "x")]));

    controller
        .submit_capture(&mut state, &service)
        .await
        .expect("Übermittlung sollte funktionieren");

    assert_eq!(state.analysis.lots(), &[Lot::new("3", "x")]);
    assert_eq!(*state.capture.state(), CaptureState::Idle);
    assert_eq!(state.blobs.live_count(), 0);

    let received = service.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(&received[0][..8], b"\x89PNG\r\n\x1a\n");

    match state.command_log.entries().last() {
        Some(AppCommand::ApplyAnalysisOutcome { outcome }) => assert!(outcome.result.is_ok()),
        other => panic!("Unerwarteter letzter Command: {other:?}"),
    }
}

#[tokio::test]
async fn test_failed_analysis_keeps_previous_lots() {
    let mut controller = AppController::new();
    let mut state = captured_state(&mut controller);
    controller
        .submit_capture(
            &mut state,
            &FakeService::answering(Ok(vec![Lot::new("3", "x")])),
        )
        .await
        .unwrap();

    controller
        .handle_intent(&mut state, AppIntent::MapCaptureRequested)
        .unwrap();
    controller
        .submit_capture(
            &mut state,
            &FakeService::answering(Err("Dienst nicht erreichbar".to_string())),
        )
        .await
        .expect("Dienstfehler sollen nicht propagiert werden");

    assert_eq!(state.analysis.lots(), &[Lot::new("3", "x")]);
    assert!(matches!(state.capture.state(), CaptureState::Failed { .. }));
    assert!(state
        .ui
        .status_message
        .as_deref()
        .unwrap()
        .contains("Dienst nicht erreichbar"));
    assert_eq!(state.blobs.live_count(), 0);

    controller
        .handle_intent(&mut state, AppIntent::CaptureFailureAcknowledged)
        .unwrap();
    assert_eq!(*state.capture.state(), CaptureState::Idle);
}

#[tokio::test]
async fn test_submit_without_capture_fails() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    let service = FakeService::answering(Ok(Vec::new()));

    let result = controller.submit_capture(&mut state, &service).await;

    assert!(result.is_err());
    assert!(service.received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_service_as_trait_object() {
    let mut controller = AppController::new();
    let mut state = captured_state(&mut controller);
    let service: Box<dyn AnalysisService> =
        Box::new(FakeService::answering(Ok(vec![Lot::new("12", "Extension")])));

    controller
        .submit_capture(&mut state, service.as_ref())
        .await
        .unwrap();

    assert_eq!(state.analysis.lots()[0].numero_lot, "12");
}
