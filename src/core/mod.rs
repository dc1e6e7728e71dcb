//! Core-Domänentypen: Layer, Features, Projektionen, Kartenansicht und
//! die prozessweiten Zustandsspeicher.

pub mod analysis_result;
pub mod aoi;
pub mod blob;
pub mod camera;
pub mod capture;
pub mod feature;
pub mod geometry;
pub mod interaction_mode;
pub mod layer;
pub mod layer_registry;
pub mod notify;
pub mod projection;

pub use analysis_result::{AnalysisEvent, AnalysisResultStore, Lot};
pub use aoi::{AoiCollector, AoiEvent, AoiPoint};
pub use blob::{BlobHandle, BlobStore, HandleArena};
pub use camera::{FitRecord, MapView, Padding};
pub use capture::{CapturePipeline, CaptureState, PendingSubmission, SubmissionOutcome};
pub use feature::{Attributes, Feature, LOT_ATTRIBUTE};
pub use geometry::{Extent, Geometry};
pub use interaction_mode::{InteractionMode, InteractionModeStore, ModeEvent};
pub use layer::{LayerDescriptor, LayerId, LayerKind, LayerPayload, RasterPayload, VectorPayload};
pub use layer_registry::{LayerEvent, LayerRegistry};
pub use notify::{Notifier, SubscriptionId};
pub use projection::SpatialReference;
