//! Kataster-Viewer Library.
//! Kartenkern (Layer, Interaktion, Capture, Export) als Library exportiert
//! für Tests, den Headless-Runner und Wiederverwendung.

pub mod analysis;
pub mod app;
pub mod core;
pub mod io;
pub mod render;
pub mod shared;

pub use analysis::{AnalysisService, HttpAnalysisService};
pub use app::{AppCommand, AppController, AppIntent, AppState, SelectionPopup, UiState, ViewState};
pub use core::{
    AnalysisResultStore, AoiCollector, AoiPoint, BlobStore, CaptureState, Extent, Feature,
    InteractionMode, InteractionModeStore, LayerDescriptor, LayerId, LayerKind, LayerRegistry,
    Lot, MapView, SpatialReference,
};
pub use render::LayerCompositor;
pub use shared::{RenderScene, ViewerOptions};
