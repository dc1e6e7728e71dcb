//! Layer-Komposition und Software-Rendering der Karte.
//!
//! [`LayerCompositor`] besitzt den gerenderten Layer-Stapel, die
//! Raster-Handles und die AOI-Marker. [`render_surface`] zeichnet daraus
//! ein RGBA-Bild für eine [`RenderScene`](crate::shared::RenderScene).

pub mod compositor;
pub mod markers;
pub mod raster_source;
pub mod style;
pub mod surface;
pub mod vector_source;

pub use compositor::{
    CompositorConfig, JobResolution, LayerCompositor, LayerFailure, LayerJob, LayerJobOutput,
    LotMatch, ReconcileReport, RenderedContent, RenderedLayer,
};
pub use hit_test::FeatureHit;
pub use markers::{Marker, MarkerSource};
pub use raster_source::{RasterDecodeOptions, RasterSource};
pub use style::{LabelStyle, MarkerStyle, VectorStyle};
pub use surface::{render_png, render_surface};
pub use vector_source::VectorSource;
