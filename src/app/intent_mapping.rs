//! Mapping von UI-Intents auf mutierende App-Commands.

use super::{AppCommand, AppIntent, AppState};

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
///
/// Kartenklicks hängen vom Interaktionsmodus ab: im Erfassungsmodus wird
/// ein AOI-Punkt gesetzt, sonst das Feature unter dem Klick gesucht.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::LayerImported { descriptor } => vec![AppCommand::AddLayer { descriptor }],
        AppIntent::LayerRemoveRequested { id } => vec![AppCommand::RemoveLayer { id }],
        AppIntent::LayerVisibilityToggled { id } => {
            vec![AppCommand::ToggleLayerVisibility { id }]
        }

        AppIntent::ViewportResized { size } => vec![AppCommand::SetViewportSize { size }],
        AppIntent::ViewAdvanced { elapsed_ms } => vec![AppCommand::AdvanceView { elapsed_ms }],
        AppIntent::ViewAnimationsCompleted => vec![AppCommand::CompleteViewAnimation],
        AppIntent::ResetViewRequested => vec![AppCommand::ResetView],

        AppIntent::MapClicked { pixel } => {
            if state.mode.is_capturing() {
                vec![AppCommand::AddAoiPoint { pixel }]
            } else {
                vec![AppCommand::PickFeatureAt { pixel }]
            }
        }
        AppIntent::PopupClosed => vec![AppCommand::ClosePopup],
        AppIntent::CaptureModeSet { enabled } => vec![AppCommand::SetCaptureMode { enabled }],
        AppIntent::CaptureModeToggled => vec![AppCommand::SetCaptureMode {
            enabled: !state.mode.is_capturing(),
        }],
        AppIntent::AoiClearRequested => vec![AppCommand::ClearAoi],
        AppIntent::ExportCoordinatesRequested => vec![AppCommand::ArmCoordinateExport],

        AppIntent::MapCaptureRequested => vec![AppCommand::CaptureMap],
        AppIntent::MapCaptureDiscarded => vec![AppCommand::DiscardCapture],
        AppIntent::CaptureFailureAcknowledged => vec![AppCommand::AcknowledgeCaptureFailure],
        AppIntent::AnalysisFinished { outcome } => {
            vec![AppCommand::ApplyAnalysisOutcome { outcome }]
        }
        AppIntent::LotSelected { numero_lot } => vec![AppCommand::SelectLot { numero_lot }],
    }
}
