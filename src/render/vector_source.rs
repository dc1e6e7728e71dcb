//! Vektor-Quellen: geparste und reprojizierte Features eines Layers.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::core::projection::{self, SpatialReference};
use crate::core::{Extent, Feature, VectorPayload};
use crate::io::geojson;

/// Features eines Vektor-Layers im Arbeits-Bezugssystem.
#[derive(Debug, Clone)]
pub struct VectorSource {
    features: Arc<[Feature]>,
    extent: Option<Extent>,
}

impl VectorSource {
    /// Parsed die Nutzdaten und rechnet alle Geometrien um.
    pub fn from_payload(
        payload: &VectorPayload,
        source: SpatialReference,
        working: SpatialReference,
    ) -> Result<Self> {
        let parsed;
        let features: &[Feature] = match payload {
            VectorPayload::Text(text) => {
                parsed = geojson::parse_feature_collection(text)?;
                &parsed[..]
            }
            VectorPayload::Features(features) => &features[..],
        };

        let reprojected = features
            .iter()
            .enumerate()
            .map(|(index, feature)| {
                let geometry = feature
                    .geometry
                    .map_coords(&|p| projection::transform(p, source, working))
                    .with_context(|| format!("Feature #{index} nicht umrechenbar ({source} → {working})"))?;
                Ok(Feature {
                    geometry,
                    ..feature.clone()
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_features(reprojected))
    }

    /// Quelle aus bereits umgerechneten Features.
    pub fn from_features(features: Vec<Feature>) -> Self {
        let extent = features
            .iter()
            .filter_map(Feature::extent)
            .reduce(|a, b| a.union(&b));
        Self {
            features: features.into(),
            extent,
        }
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Gesamtausdehnung aller Features (`None` ohne Koordinaten).
    pub fn extent(&self) -> Option<Extent> {
        self.extent
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TWO_POINTS: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {"NroLot": "1"}, "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}},
        {"type": "Feature", "properties": {"NroLot": "2"}, "geometry": {"type": "Point", "coordinates": [1.0, 1.0]}}
    ]}"#;

    #[test]
    fn test_text_payload_is_parsed_and_reprojected() {
        let payload = VectorPayload::Text(TWO_POINTS.into());
        let source =
            VectorSource::from_payload(&payload, SpatialReference::Wgs84, SpatialReference::WebMercator)
                .unwrap();
        assert_eq!(source.len(), 2);
        let extent = source.extent().unwrap();
        assert_relative_eq!(extent.min_x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(extent.max_x, 111_319.490_793_273_57, epsilon = 1e-6);
        assert_eq!(source.features()[1].label(), "2");
    }

    #[test]
    fn test_structured_payload_is_used_directly() {
        let features = geojson::parse_feature_collection(TWO_POINTS).unwrap();
        let payload = VectorPayload::Features(features.into());
        let source =
            VectorSource::from_payload(&payload, SpatialReference::Wgs84, SpatialReference::Wgs84)
                .unwrap();
        assert_eq!(
            source.extent(),
            Some(Extent::new(glam::DVec2::ZERO, glam::DVec2::ONE))
        );
    }

    #[test]
    fn test_empty_collection_has_no_extent() {
        let payload = VectorPayload::Text(r#"{"type": "FeatureCollection", "features": []}"#.into());
        let source =
            VectorSource::from_payload(&payload, SpatialReference::Wgs84, SpatialReference::WebMercator)
                .unwrap();
        assert!(source.is_empty());
        assert!(source.extent().is_none());
    }

    #[test]
    fn test_invalid_text_fails() {
        let payload = VectorPayload::Text("<kml/>".into());
        assert!(
            VectorSource::from_payload(&payload, SpatialReference::Wgs84, SpatialReference::WebMercator)
                .is_err()
        );
    }
}
