use std::thread;

use cadastre_viewer::core::{BlobStore, LayerDescriptor};
use cadastre_viewer::render::{CompositorConfig, JobResolution, LayerCompositor};
use cadastre_viewer::{LayerRegistry, ViewerOptions};

const PARCELS: &str = include_str!("fixtures/parcels.geojson");

fn compositor() -> (BlobStore, LayerCompositor) {
    let blobs = BlobStore::new();
    let config = CompositorConfig::from_options(&ViewerOptions::default());
    (blobs.clone(), LayerCompositor::new(blobs, config))
}

#[test]
fn test_jobs_decoded_on_worker_threads_keep_stacking_order() {
    let (blobs, mut compositor) = compositor();
    let mut registry = LayerRegistry::new();
    registry
        .add(LayerDescriptor::vector_text("oben", "EPSG:4326", PARCELS))
        .unwrap();
    registry
        .add(LayerDescriptor::raster("unten", "EPSG:3857", vec![0u8; 8], None))
        .unwrap();
    registry
        .add(LayerDescriptor::vector_text("mitte", "EPSG:4326", PARCELS))
        .unwrap();

    let jobs = compositor.begin_reconcile(registry.layers());
    let outputs: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = jobs
            .into_iter()
            .map(|job| {
                let blobs = blobs.clone();
                scope.spawn(move || job.run(&blobs))
            })
            .collect();
        handles
            .into_iter()
            .rev()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    let mut failed = 0;
    for output in outputs {
        if let JobResolution::Failed(_) = compositor.finish_job(output) {
            failed += 1;
        }
    }

    assert_eq!(failed, 1);
    let names: Vec<&str> = compositor
        .rendered_layers()
        .iter()
        .map(|layer| layer.name.as_str())
        .collect();
    assert_eq!(names, ["oben", "mitte"]);
}

#[test]
fn test_results_of_superseded_generation_are_discarded() {
    let (blobs, mut compositor) = compositor();
    let layers = [LayerDescriptor::raster("ortho", "EPSG:3857", vec![1u8; 8], None)];

    let stale_jobs = compositor.begin_reconcile(&layers);
    let stale_outputs: Vec<_> = stale_jobs.into_iter().map(|job| job.run(&blobs)).collect();
    assert_eq!(blobs.live_count(), 1);

    compositor.reconcile(&[]);
    for output in stale_outputs {
        assert!(matches!(
            compositor.finish_job(output),
            JobResolution::Discarded
        ));
    }
    assert_eq!(blobs.live_count(), 0);
}

#[test]
fn test_teardown_releases_all_handles() {
    let (blobs, mut compositor) = compositor();
    let layers = [
        LayerDescriptor::raster("a", "EPSG:3857", vec![1u8; 8], None),
        LayerDescriptor::raster("b", "EPSG:3857", vec![2u8; 8], None),
    ];
    compositor.reconcile(&layers);
    assert_eq!(blobs.live_count(), 2);

    compositor.teardown();
    assert_eq!(blobs.live_count(), 0);
    assert!(compositor.rendered_layers().is_empty());
}

#[test]
fn test_lot_lookup_prefers_lower_layer() {
    let (_, mut compositor) = compositor();
    let lower = LayerDescriptor::vector_text("unten", "EPSG:4326", PARCELS);
    let upper = LayerDescriptor::vector_text("oben", "EPSG:4326", PARCELS);
    let lower_id = lower.id.clone();
    compositor.reconcile(&[lower, upper]);

    let found = compositor.find_lot_feature(" 12 ").unwrap();
    assert_eq!(found.layer_id, lower_id);
    assert!(compositor.find_lot_feature("99").is_none());
}
