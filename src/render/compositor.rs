//! LayerCompositor: baut den Layer-Stapel aus dem Registry-Inhalt.
//!
//! Ablauf einer Abstimmung:
//! 1. [`LayerCompositor::begin_reconcile`] startet eine neue Generation,
//!    gibt die Handles der vorherigen frei und erzeugt je sichtbarem Layer
//!    einen [`LayerJob`] mit fester Stapelposition.
//! 2. [`LayerJob::run`] dekodiert rein funktional (darf woanders laufen).
//! 3. [`LayerCompositor::finish_job`] übernimmt das Ergebnis. Ergebnisse
//!    veralteter Generationen werden verworfen, ihre Handles sofort frei.
//!
//! Raster liegen immer unter Vektoren: Raster erhalten `z = i`, Vektoren
//! `z = raster_anzahl + j`, jeweils in Registry-Reihenfolge.

use std::collections::HashSet;

use anyhow::{Context, Result};
use glam::DVec2;

use super::hit_test::{self, FeatureHit};
use super::markers::MarkerSource;
use super::raster_source::{RasterDecodeOptions, RasterSource};
use super::style::{MarkerStyle, VectorStyle};
use super::vector_source::VectorSource;
use crate::core::projection::SpatialReference;
use crate::core::{
    BlobHandle, BlobStore, Extent, HandleArena, LayerDescriptor, LayerId, LayerPayload, MapView,
};
use crate::shared::ViewerOptions;

/// Feste Einstellungen des Compositors.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositorConfig {
    /// Arbeits-Bezugssystem der Karte
    pub working: SpatialReference,
    pub raster: RasterDecodeOptions,
    pub style: VectorStyle,
    pub markers: MarkerStyle,
    /// Zusätzliche Klick-Toleranz in Pixeln (zur halben Strichbreite)
    pub hit_tolerance_px: f64,
}

impl CompositorConfig {
    /// Ein ungültiges Arbeits-Bezugssystem fällt auf Web Mercator zurück.
    pub fn from_options(options: &ViewerOptions) -> Self {
        let working = SpatialReference::parse(&options.working_reference).unwrap_or_else(|e| {
            log::warn!("Arbeits-Bezugssystem ungültig, verwende EPSG:3857: {e:#}");
            SpatialReference::WebMercator
        });
        let hillshade = options.hillshade.enabled.then(|| map_canvas::HillshadeParams {
            azimuth_deg: options.hillshade.azimuth_deg,
            altitude_deg: options.hillshade.altitude_deg,
            blend_factor: options.hillshade.blend_factor,
        });
        Self {
            working,
            raster: RasterDecodeOptions {
                opacity: options.raster_opacity,
                hillshade,
            },
            style: VectorStyle::from_options(options),
            markers: MarkerStyle::from_options(options),
            hit_tolerance_px: options.hit_tolerance_px.max(0.0),
        }
    }
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            working: SpatialReference::WebMercator,
            raster: RasterDecodeOptions::default(),
            style: VectorStyle::default(),
            markers: MarkerStyle::default(),
            hit_tolerance_px: 0.0,
        }
    }
}

/// Zeichenfertiger Inhalt eines Layers.
#[derive(Debug, Clone)]
pub enum RenderedContent {
    Raster(RasterSource),
    Vector(VectorSource),
}

/// Ein Eintrag im Layer-Stapel.
#[derive(Debug, Clone)]
pub struct RenderedLayer {
    pub layer_id: LayerId,
    pub name: String,
    /// Stapelposition; kleiner = weiter unten
    pub z_index: usize,
    pub content: RenderedContent,
}

impl RenderedLayer {
    pub fn is_raster(&self) -> bool {
        matches!(self.content, RenderedContent::Raster(_))
    }

    pub fn vector(&self) -> Option<&VectorSource> {
        match &self.content {
            RenderedContent::Vector(source) => Some(source),
            RenderedContent::Raster(_) => None,
        }
    }
}

/// Dekodier-Auftrag für einen Layer einer bestimmten Generation.
#[derive(Debug, Clone)]
pub struct LayerJob {
    generation: u64,
    layer_id: LayerId,
    layer_name: String,
    z_index: usize,
    spatial_reference: String,
    payload: LayerPayload,
    working: SpatialReference,
    raster: RasterDecodeOptions,
}

/// Ergebnis eines [`LayerJob`] inklusive aller erzeugten Handles.
#[derive(Debug)]
pub struct LayerJobOutput {
    generation: u64,
    layer_id: LayerId,
    layer_name: String,
    z_index: usize,
    handles: Vec<BlobHandle>,
    result: Result<RenderedContent>,
}

impl LayerJob {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn layer_id(&self) -> &LayerId {
        &self.layer_id
    }

    pub fn z_index(&self) -> usize {
        self.z_index
    }

    /// Dekodiert den Layer. Fehler bleiben auf diesen Layer beschränkt.
    pub fn run(self, blobs: &BlobStore) -> LayerJobOutput {
        let mut handles = Vec::new();
        let result = self.decode(blobs, &mut handles);
        LayerJobOutput {
            generation: self.generation,
            layer_id: self.layer_id,
            layer_name: self.layer_name,
            z_index: self.z_index,
            handles,
            result,
        }
    }

    fn decode(&self, blobs: &BlobStore, handles: &mut Vec<BlobHandle>) -> Result<RenderedContent> {
        let source = SpatialReference::parse(&self.spatial_reference)?;
        match &self.payload {
            LayerPayload::Raster(raster) => {
                let handle = blobs.create(raster.bytes.clone());
                handles.push(handle);
                let bytes = blobs
                    .get(handle)
                    .context("Raster-Handle wurde vorzeitig freigegeben")?;
                let decoded =
                    RasterSource::decode(&bytes, raster.bounds, source, self.working, &self.raster)?;
                Ok(RenderedContent::Raster(decoded))
            }
            LayerPayload::Vector(vector) => Ok(RenderedContent::Vector(
                VectorSource::from_payload(vector, source, self.working)?,
            )),
        }
    }
}

/// Fehlgeschlagener Layer einer Abstimmung.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerFailure {
    pub layer_id: LayerId,
    pub layer_name: String,
    pub reason: String,
}

/// Was [`LayerCompositor::finish_job`] mit einem Ergebnis gemacht hat.
#[derive(Debug, Clone, PartialEq)]
pub enum JobResolution {
    /// In den Stapel übernommen; `fit` = erstmals gerenderter Vektor-Extent
    Rendered { fit: Option<Extent> },
    Failed(LayerFailure),
    /// Veraltete Generation
    Discarded,
}

/// Zusammenfassung einer vollständigen Abstimmung.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    pub generation: u64,
    pub rendered: usize,
    pub failures: Vec<LayerFailure>,
    /// Vereinigung der Extents erstmals gerenderter Vektor-Layer
    pub fit_extent: Option<Extent>,
}

/// Treffer der Lot-Suche.
#[derive(Debug, Clone, PartialEq)]
pub struct LotMatch {
    pub layer_id: LayerId,
    pub extent: Extent,
}

/// Besitzt den gerenderten Layer-Stapel und alle Raster-Handles.
pub struct LayerCompositor {
    blobs: BlobStore,
    config: CompositorConfig,
    generation: u64,
    arena: HandleArena,
    layers: Vec<RenderedLayer>,
    /// Vektor-Layer, auf die bereits eingepasst wurde
    fitted_layers: HashSet<LayerId>,
    markers: MarkerSource,
}

impl LayerCompositor {
    pub fn new(blobs: BlobStore, config: CompositorConfig) -> Self {
        Self {
            blobs,
            config,
            generation: 0,
            arena: HandleArena::new(),
            layers: Vec::new(),
            fitted_layers: HashSet::new(),
            markers: MarkerSource::new(),
        }
    }

    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    pub fn blobs(&self) -> &BlobStore {
        &self.blobs
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Startet eine neue Generation für den übergebenen Layer-Stand.
    ///
    /// Gibt alle Handles der vorherigen Generation frei und leert den Stapel.
    pub fn begin_reconcile(&mut self, layers: &[LayerDescriptor]) -> Vec<LayerJob> {
        self.generation += 1;
        let released = self.arena.release_all(&self.blobs);
        if released > 0 {
            log::debug!(
                "Generation {}: {released} Raster-Handles freigegeben",
                self.generation
            );
        }
        self.layers.clear();
        self.fitted_layers
            .retain(|id| layers.iter().any(|layer| &layer.id == id));

        let visible = || layers.iter().filter(|layer| layer.visible);
        let raster_count = visible()
            .filter(|layer| matches!(layer.payload, LayerPayload::Raster(_)))
            .count();
        let rasters = visible()
            .filter(|layer| matches!(layer.payload, LayerPayload::Raster(_)))
            .enumerate();
        let vectors = visible()
            .filter(|layer| matches!(layer.payload, LayerPayload::Vector(_)))
            .enumerate()
            .map(|(j, layer)| (raster_count + j, layer));

        rasters
            .chain(vectors)
            .map(|(z_index, layer)| LayerJob {
                generation: self.generation,
                layer_id: layer.id.clone(),
                layer_name: layer.name.clone(),
                z_index,
                spatial_reference: layer.spatial_reference.clone(),
                payload: layer.payload.clone(),
                working: self.config.working,
                raster: self.config.raster,
            })
            .collect()
    }

    /// Übernimmt das Ergebnis eines Jobs in den Stapel.
    pub fn finish_job(&mut self, output: LayerJobOutput) -> JobResolution {
        if output.generation != self.generation {
            let released = output
                .handles
                .iter()
                .filter(|handle| self.blobs.release(**handle))
                .count();
            log::debug!(
                "Veraltetes Ergebnis für Layer '{}' verworfen (Generation {} < {}), {released} Handles freigegeben",
                output.layer_name,
                output.generation,
                self.generation
            );
            return JobResolution::Discarded;
        }

        self.arena.extend(output.handles);

        let content = match output.result {
            Ok(content) => content,
            Err(err) => {
                return JobResolution::Failed(LayerFailure {
                    layer_id: output.layer_id,
                    layer_name: output.layer_name,
                    reason: format!("{err:#}"),
                });
            }
        };

        let fit = match &content {
            RenderedContent::Vector(source) => source
                .extent()
                .filter(Extent::is_fittable)
                .filter(|_| self.fitted_layers.insert(output.layer_id.clone())),
            RenderedContent::Raster(_) => None,
        };

        let position = self
            .layers
            .partition_point(|layer| layer.z_index < output.z_index);
        self.layers.insert(
            position,
            RenderedLayer {
                layer_id: output.layer_id,
                name: output.layer_name,
                z_index: output.z_index,
                content,
            },
        );
        JobResolution::Rendered { fit }
    }

    /// Vollständige Abstimmung in einem Schritt.
    ///
    /// Fehler einzelner Layer werden geloggt und im Bericht gesammelt.
    pub fn reconcile(&mut self, layers: &[LayerDescriptor]) -> ReconcileReport {
        let jobs = self.begin_reconcile(layers);
        let mut report = ReconcileReport {
            generation: self.generation,
            ..ReconcileReport::default()
        };

        for job in jobs {
            let output = job.run(&self.blobs);
            match self.finish_job(output) {
                JobResolution::Rendered { fit } => {
                    report.rendered += 1;
                    if let Some(extent) = fit {
                        report.fit_extent = Some(match report.fit_extent {
                            Some(current) => current.union(&extent),
                            None => extent,
                        });
                    }
                }
                JobResolution::Failed(failure) => {
                    log::error!(
                        "Layer '{}' konnte nicht geladen werden: {}",
                        failure.layer_name,
                        failure.reason
                    );
                    report.failures.push(failure);
                }
                JobResolution::Discarded => {}
            }
        }

        log::info!(
            "Layer-Stapel aktualisiert: {} gerendert, {} fehlgeschlagen (Generation {})",
            report.rendered,
            report.failures.len(),
            report.generation
        );
        report
    }

    /// Gerenderte Layer in Stapelreihenfolge (unten zuerst).
    pub fn rendered_layers(&self) -> &[RenderedLayer] {
        &self.layers
    }

    /// Anzahl der von der aktuellen Generation gehaltenen Handles.
    pub fn held_handles(&self) -> usize {
        self.arena.len()
    }

    /// Sucht das erste Feature in Stapelreihenfolge, dessen `NroLot` passt.
    pub fn find_lot_feature(&self, lot: &str) -> Option<LotMatch> {
        self.layers.iter().find_map(|layer| {
            let source = layer.vector()?;
            source
                .features()
                .iter()
                .filter(|feature| feature.matches_lot(lot))
                .find_map(|feature| feature.extent())
                .map(|extent| LotMatch {
                    layer_id: layer.layer_id.clone(),
                    extent,
                })
        })
    }

    /// Oberstes Feature unter einem Bildschirmpixel.
    pub fn feature_at_pixel(
        &self,
        view: &MapView,
        viewport: [u32; 2],
        pixel: DVec2,
    ) -> Option<FeatureHit<'_>> {
        hit_test::feature_at_pixel(
            &self.layers,
            view,
            viewport,
            pixel,
            &self.config.style,
            self.config.hit_tolerance_px,
        )
    }

    pub fn markers(&self) -> &MarkerSource {
        &self.markers
    }

    pub fn markers_mut(&mut self) -> &mut MarkerSource {
        &mut self.markers
    }

    /// Räumt den Compositor ab: Generation verwerfen, alle Handles frei.
    pub fn teardown(&mut self) {
        self.generation += 1;
        let released = self.arena.release_all(&self.blobs);
        self.layers.clear();
        self.fitted_layers.clear();
        self.markers.clear();
        log::debug!("Compositor abgebaut, {released} Handles freigegeben");
    }
}

impl Drop for LayerCompositor {
    fn drop(&mut self) {
        self.arena.release_all(&self.blobs);
    }
}

impl std::fmt::Debug for LayerCompositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerCompositor")
            .field("generation", &self.generation)
            .field("layers", &self.layers.len())
            .field("handles", &self.arena.len())
            .field("markers", &self.markers.len())
            .finish()
    }
}
