//! Application Controller für zentrale Event-Verarbeitung.

use super::render_scene;
use super::{AppCommand, AppIntent, AppState};
use crate::analysis::AnalysisService;
use crate::shared::RenderScene;

/// Orchestriert UI-Events und Use-Cases auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    ///
    /// Nach den Commands des Intents folgt der Abgleichschritt: geänderte
    /// Registry, geänderte Lot-Auswahl und ein angeforderter Export werden
    /// an dieser Stelle nachgezogen.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        self.synchronize(state)
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    fn synchronize(&mut self, state: &mut AppState) -> anyhow::Result<()> {
        if state.layers.revision() != state.sync.layers_seen {
            self.handle_command(state, AppCommand::ReconcileLayers)?;
        }
        if state.analysis.selection_revision() != state.sync.selection_seen {
            self.handle_command(state, AppCommand::FitToSelectedLot)?;
        }
        if state.mode.export_requested() {
            self.handle_command(state, AppCommand::RunCoordinateExport)?;
        }
        Ok(())
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Layer ===
            AppCommand::AddLayer { descriptor } => handlers::layers::add(state, descriptor)?,
            AppCommand::RemoveLayer { id } => handlers::layers::remove(state, &id),
            AppCommand::ToggleLayerVisibility { id } => {
                handlers::layers::toggle_visibility(state, &id)
            }
            AppCommand::ReconcileLayers => handlers::layers::reconcile(state),

            // === Ansicht ===
            AppCommand::SetViewportSize { size } => handlers::view::set_viewport_size(state, size),
            AppCommand::AdvanceView { elapsed_ms } => handlers::view::advance(state, elapsed_ms),
            AppCommand::CompleteViewAnimation => handlers::view::complete_animation(state),
            AppCommand::ResetView => handlers::view::reset(state),
            AppCommand::FitToSelectedLot => handlers::view::fit_to_selected_lot(state),

            // === Karteninteraktion ===
            AppCommand::AddAoiPoint { pixel } => handlers::interaction::add_aoi_point(state, pixel),
            AppCommand::PickFeatureAt { pixel } => handlers::interaction::pick_feature(state, pixel),
            AppCommand::ClosePopup => handlers::interaction::close_popup(state),
            AppCommand::SetCaptureMode { enabled } => {
                handlers::interaction::set_capture_mode(state, enabled)
            }
            AppCommand::ClearAoi => handlers::interaction::clear_aoi(state),
            AppCommand::SelectLot { numero_lot } => {
                handlers::interaction::select_lot(state, numero_lot)
            }

            // === Export ===
            AppCommand::ArmCoordinateExport => handlers::export::arm(state),
            AppCommand::RunCoordinateExport => handlers::export::run(state),

            // === Capture & Analyse ===
            AppCommand::CaptureMap => handlers::capture::capture_map(state),
            AppCommand::DiscardCapture => handlers::capture::discard(state),
            AppCommand::ApplyAnalysisOutcome { outcome } => {
                handlers::capture::apply_outcome(state, outcome)
            }
            AppCommand::AcknowledgeCaptureFailure => handlers::capture::acknowledge_failure(state),
        }

        Ok(())
    }

    /// Schickt das aktuelle Capture an den Analyse-Dienst und übernimmt
    /// das Ergebnis als `AnalysisFinished`-Intent.
    ///
    /// Schlägt nur fehl, wenn kein Capture bereitliegt; Fehler des Dienstes
    /// landen im Capture-Zustand und in der Statusmeldung.
    pub async fn submit_capture<S: AnalysisService + ?Sized>(
        &mut self,
        state: &mut AppState,
        service: &S,
    ) -> anyhow::Result<()> {
        let pending = state.capture.begin_submit()?;
        let outcome = pending.send(service).await;
        self.handle_intent(state, AppIntent::AnalysisFinished { outcome })
    }

    /// Baut die Render-Szene für den aktuellen Frame.
    pub fn build_render_scene(&self, state: &AppState) -> RenderScene {
        render_scene::build(state)
    }
}
