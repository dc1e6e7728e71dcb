use glam::DVec2;

use crate::app::CommandLog;
use crate::core::{
    AnalysisResultStore, AoiCollector, BlobStore, CapturePipeline, InteractionModeStore,
    LayerRegistry, MapView, SpatialReference,
};
use crate::render::{CompositorConfig, LayerCompositor};
use crate::shared::ViewerOptions;

use super::{UiState, ViewState};

/// Abgleichstand zwischen den Speichern und ihren Beobachtern.
///
/// Der Controller vergleicht nach jedem Intent die Revisionen der Speicher
/// mit diesen Werten und stößt Abgleich bzw. Einpassen nur bei Änderung an.
#[derive(Debug, Clone, Default)]
pub struct SyncState {
    /// Registry-Revision des letzten Layer-Abgleichs
    pub layers_seen: u64,
    /// Auswahl-Revision des letzten Einpassens
    pub selection_seen: u64,
    /// Gewähltes Lot wurde noch in keinem Layer gefunden
    pub selection_pending: bool,
}

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Importierte Layer in Importreihenfolge
    pub layers: LayerRegistry,
    /// Interaktionsmodus und Export-Flag
    pub mode: InteractionModeStore,
    /// Erfasste AOI-Punkte
    pub aoi: AoiCollector,
    /// Lots der letzten Analyse und aktuelle Auswahl
    pub analysis: AnalysisResultStore,
    /// Gemeinsamer Speicher für Binärdaten (Raster, Captures)
    pub blobs: BlobStore,
    /// Gerenderter Layer-Stapel samt AOI-Markern
    pub compositor: LayerCompositor,
    /// Capture- und Übermittlungszustand
    pub capture: CapturePipeline,
    /// View-State
    pub view: ViewState,
    /// UI-State
    pub ui: UiState,
    /// Abgleichstand der Beobachter
    pub sync: SyncState,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Laufzeit-Optionen
    pub options: ViewerOptions,
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State mit Standardoptionen.
    pub fn new() -> Self {
        Self::with_options(ViewerOptions::default())
    }

    /// Erstellt einen leeren App-State mit den gegebenen Optionen.
    pub fn with_options(options: ViewerOptions) -> Self {
        let blobs = BlobStore::new();
        let config = CompositorConfig::from_options(&options);
        let map_view = initial_map_view(&options, config.working);

        Self {
            layers: LayerRegistry::new(),
            mode: InteractionModeStore::new(),
            aoi: AoiCollector::new(),
            analysis: AnalysisResultStore::new(),
            compositor: LayerCompositor::new(blobs.clone(), config),
            capture: CapturePipeline::new(blobs.clone()),
            blobs,
            view: ViewState::new(map_view),
            ui: UiState::new(),
            sync: SyncState::default(),
            command_log: CommandLog::new(),
            options,
        }
    }

    /// Startansicht laut Optionen.
    pub fn initial_view(&self) -> MapView {
        initial_map_view(&self.options, self.compositor.config().working)
    }

    /// Anzahl der Layer in der Registry (für Statusanzeige)
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Anzahl der erfassten AOI-Punkte (für Statusanzeige)
    pub fn aoi_count(&self) -> usize {
        self.aoi.len()
    }
}

fn initial_map_view(options: &ViewerOptions, working: SpatialReference) -> MapView {
    let center = working.from_wgs84(DVec2::from(options.initial_center_lon_lat));
    MapView::new(
        center,
        options.initial_zoom,
        options.min_zoom,
        options.max_zoom,
    )
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
