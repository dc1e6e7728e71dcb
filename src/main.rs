//! Kataster-Viewer, Headless-Runner.
//!
//! Lädt Layer aus Dateien, steuert den Kartenkern über Intents und führt
//! optional Capture, Analyse, Lot-Auswahl und Koordinaten-Export aus.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cadastre_viewer::core::CaptureState;
use cadastre_viewer::{
    AppController, AppIntent, AppState, Extent, HttpAnalysisService, LayerDescriptor,
    ViewerOptions,
};
use clap::Parser;
use glam::DVec2;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Vektor-Layer (GeoJSON), optional mit Bezugssystem: `datei.geojson#EPSG:32630`
    #[arg(long = "vector", value_name = "FILE[#EPSG]")]
    vectors: Vec<String>,

    /// Raster-Layer, optional mit Ausdehnung und Bezugssystem:
    /// `ortho.tif#minx,miny,maxx,maxy#EPSG:3857`
    #[arg(long = "raster", value_name = "FILE[#BOUNDS[#EPSG]]")]
    rasters: Vec<String>,

    /// Kartenansicht als PNG speichern
    #[arg(long, value_name = "PNG")]
    capture: Option<PathBuf>,

    /// Kartenansicht an den Analyse-Dienst senden
    #[arg(long, default_value_t = false)]
    analyze: bool,

    /// Lot auswählen und die Ansicht darauf einpassen
    #[arg(long, value_name = "LOT")]
    select: Option<String>,

    /// AOI-Punkt erfassen (Länge, Breite in Grad)
    #[arg(long = "aoi", value_name = "LON,LAT", value_parser = parse_lon_lat)]
    aoi: Vec<DVec2>,

    /// Erfasste AOI-Punkte als CSV exportieren
    #[arg(long, value_name = "CSV")]
    export: Option<PathBuf>,

    /// Größe der Kartenfläche
    #[arg(long, value_name = "WxH", default_value = "1280x720", value_parser = parse_viewport)]
    viewport: [u32; 2],

    /// Optionen-Datei (TOML); sonst `cadastre_viewer.toml` neben der Binary
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    AppRunner::run(Args::parse()).await
}

struct AppRunner {
    state: AppState,
    controller: AppController,
}

impl AppRunner {
    async fn run(args: Args) -> Result<()> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("Kataster-Viewer v{} startet...", env!("CARGO_PKG_VERSION"));

        let config_path = args.options.clone().unwrap_or_else(ViewerOptions::config_path);
        let mut options = ViewerOptions::load_from_file(&config_path);
        if let Some(path) = &args.export {
            options.export_path = path.display().to_string();
        }

        let mut runner = Self {
            state: AppState::with_options(options),
            controller: AppController::new(),
        };
        runner.intent(AppIntent::ViewportResized {
            size: args.viewport,
        })?;

        for spec in &args.vectors {
            let descriptor = vector_layer(spec)?;
            runner.intent(AppIntent::LayerImported { descriptor })?;
        }
        for spec in &args.rasters {
            let descriptor = raster_layer(spec)?;
            runner.intent(AppIntent::LayerImported { descriptor })?;
        }
        runner.intent(AppIntent::ViewAnimationsCompleted)?;

        if let Some(lot) = &args.select {
            runner.intent(AppIntent::LotSelected {
                numero_lot: Some(lot.clone()),
            })?;
            runner.intent(AppIntent::ViewAnimationsCompleted)?;
        }

        if !args.aoi.is_empty() {
            runner.capture_aoi(&args.aoi)?;
        }

        if args.capture.is_some() || args.analyze {
            runner.capture_map(args.capture.as_deref(), args.analyze).await?;
        }

        if args.export.is_some() {
            runner.intent(AppIntent::ExportCoordinatesRequested)?;
        }

        if let Some(message) = &runner.state.ui.status_message {
            println!("{message}");
        }
        runner.state.compositor.teardown();
        Ok(())
    }

    fn intent(&mut self, intent: AppIntent) -> Result<()> {
        self.controller.handle_intent(&mut self.state, intent)
    }

    /// Setzt AOI-Punkte wie Klicks im Erfassungsmodus.
    fn capture_aoi(&mut self, points: &[DVec2]) -> Result<()> {
        self.intent(AppIntent::CaptureModeSet { enabled: true })?;
        for lon_lat in points {
            let map_position = self.state.compositor.config().working.from_wgs84(*lon_lat);
            let pixel = self
                .state
                .view
                .map_view
                .map_to_pixel(map_position, self.state.view.viewport_size);
            self.intent(AppIntent::MapClicked { pixel })?;
        }
        self.intent(AppIntent::CaptureModeSet { enabled: false })
    }

    async fn capture_map(&mut self, png_path: Option<&Path>, analyze: bool) -> Result<()> {
        self.intent(AppIntent::MapCaptureRequested)?;
        if let CaptureState::Failed { reason } = self.state.capture.state() {
            anyhow::bail!("Capture fehlgeschlagen: {reason}");
        }

        if let (Some(path), Some(png)) = (png_path, self.state.capture.captured_png()) {
            std::fs::write(path, &png[..])
                .with_context(|| format!("PNG {} kann nicht geschrieben werden", path.display()))?;
            log::info!("Kartenansicht gespeichert: {}", path.display());
        }

        if analyze {
            let service = HttpAnalysisService::from_options(&self.state.options)?;
            self.controller
                .submit_capture(&mut self.state, &service)
                .await?;
            for lot in self.state.analysis.lots() {
                println!("Lot {}: {}", lot.numero_lot, lot.description);
            }
        } else {
            self.intent(AppIntent::MapCaptureDiscarded)?;
        }
        Ok(())
    }
}

fn vector_layer(spec: &str) -> Result<LayerDescriptor> {
    let mut parts = spec.split('#');
    let path = Path::new(parts.next().unwrap_or_default());
    let reference = parts.next().unwrap_or("EPSG:4326");
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Vektor-Layer {} nicht lesbar", path.display()))?;
    Ok(LayerDescriptor::vector_text(layer_name(path), reference, text))
}

fn raster_layer(spec: &str) -> Result<LayerDescriptor> {
    let mut parts = spec.split('#');
    let path = Path::new(parts.next().unwrap_or_default());
    let bounds = parts.next().map(parse_bounds).transpose()?;
    let reference = parts.next().unwrap_or("EPSG:4326");
    let bytes = std::fs::read(path)
        .with_context(|| format!("Raster-Layer {} nicht lesbar", path.display()))?;
    Ok(LayerDescriptor::raster(
        layer_name(path),
        reference,
        bytes,
        bounds,
    ))
}

fn layer_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn parse_numbers<const N: usize>(text: &str, separator: char) -> Option<[f64; N]> {
    let values: Vec<f64> = text
        .split(separator)
        .map(|part| part.trim().parse().ok())
        .collect::<Option<_>>()?;
    values.try_into().ok()
}

fn parse_bounds(text: &str) -> Result<Extent> {
    let [min_x, min_y, max_x, max_y] = parse_numbers::<4>(text, ',')
        .with_context(|| format!("Ausdehnung '{text}' erwartet minx,miny,maxx,maxy"))?;
    Ok(Extent::new(
        DVec2::new(min_x, min_y),
        DVec2::new(max_x, max_y),
    ))
}

fn parse_lon_lat(text: &str) -> Result<DVec2, String> {
    parse_numbers::<2>(text, ',')
        .map(DVec2::from)
        .ok_or_else(|| format!("'{text}' erwartet LON,LAT"))
}

fn parse_viewport(text: &str) -> Result<[u32; 2], String> {
    let (width, height) = text
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("'{text}' erwartet BREITExHÖHE"))?;
    match (width.trim().parse(), height.trim().parse()) {
        (Ok(width), Ok(height)) if width > 0 && height > 0 => Ok([width, height]),
        _ => Err(format!("'{text}' ist keine gültige Größe")),
    }
}
