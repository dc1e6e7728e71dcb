//! Parser für GeoJSON-Feature-Collections.
//!
//! Akzeptiert `FeatureCollection`, einzelne `Feature`s und nackte
//! Geometrien. Features ohne Geometrie werden übersprungen, Positionen
//! mit mehr als zwei Werten verlieren die Höhe.

use anyhow::{bail, Context, Result};
use glam::DVec2;
use serde_json::Value;

use crate::core::{Attributes, Feature, Geometry};

/// Parsed GeoJSON-Text zu einer Feature-Liste.
pub fn parse_feature_collection(text: &str) -> Result<Vec<Feature>> {
    let value: Value = serde_json::from_str(text).context("GeoJSON ist kein gültiges JSON")?;
    features_from_value(&value)
}

/// Liest Features aus einem bereits geparsten GeoJSON-Wert.
pub fn features_from_value(value: &Value) -> Result<Vec<Feature>> {
    let type_name = value
        .get("type")
        .and_then(Value::as_str)
        .context("GeoJSON-Objekt ohne 'type'")?;

    match type_name {
        "FeatureCollection" => {
            let entries = value
                .get("features")
                .and_then(Value::as_array)
                .context("FeatureCollection ohne 'features'-Array")?;
            let mut features = Vec::with_capacity(entries.len());
            for (index, entry) in entries.iter().enumerate() {
                if let Some(feature) =
                    parse_feature(entry).with_context(|| format!("Feature #{index}"))?
                {
                    features.push(feature);
                }
            }
            Ok(features)
        }
        "Feature" => Ok(parse_feature(value)?.into_iter().collect()),
        _ => {
            let geometry = parse_geometry(value)?
                .context("Geometrie ohne Koordinaten")?;
            Ok(vec![Feature::new(geometry, Attributes::new())])
        }
    }
}

fn parse_feature(value: &Value) -> Result<Option<Feature>> {
    if value.get("type").and_then(Value::as_str) != Some("Feature") {
        bail!("Eintrag ist kein Feature");
    }

    let attributes = match value.get("properties") {
        None | Some(Value::Null) => Attributes::new(),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
        Some(_) => bail!("'properties' muss ein Objekt sein"),
    };

    let geometry = match value.get("geometry") {
        None | Some(Value::Null) => None,
        Some(geometry) => parse_geometry(geometry)?,
    };
    let Some(geometry) = geometry else {
        log::debug!("Feature ohne Geometrie übersprungen");
        return Ok(None);
    };

    Ok(Some(Feature {
        id: value.get("id").cloned(),
        geometry,
        attributes,
    }))
}

fn parse_geometry(value: &Value) -> Result<Option<Geometry>> {
    let type_name = value
        .get("type")
        .and_then(Value::as_str)
        .context("Geometrie ohne 'type'")?;

    if type_name == "GeometryCollection" {
        let members = value
            .get("geometries")
            .and_then(Value::as_array)
            .context("GeometryCollection ohne 'geometries'")?;
        let mut geometries = Vec::with_capacity(members.len());
        for member in members {
            if let Some(geometry) = parse_geometry(member)? {
                geometries.push(geometry);
            }
        }
        return Ok(Some(Geometry::GeometryCollection(geometries)));
    }

    let coordinates = value
        .get("coordinates")
        .with_context(|| format!("{type_name} ohne 'coordinates'"))?;
    if coordinates.is_null() {
        return Ok(None);
    }

    let geometry = match type_name {
        "Point" => Geometry::Point(parse_position(coordinates)?),
        "MultiPoint" => Geometry::MultiPoint(parse_positions(coordinates)?),
        "LineString" => Geometry::LineString(parse_positions(coordinates)?),
        "MultiLineString" => Geometry::MultiLineString(parse_nested(coordinates, parse_positions)?),
        "Polygon" => Geometry::Polygon(parse_nested(coordinates, parse_positions)?),
        "MultiPolygon" => Geometry::MultiPolygon(parse_nested(coordinates, |rings| {
            parse_nested(rings, parse_positions)
        })?),
        other => bail!("Unbekannter Geometrietyp '{other}'"),
    };
    Ok(Some(geometry))
}

fn parse_position(value: &Value) -> Result<DVec2> {
    let items = value.as_array().context("Position ist kein Array")?;
    if items.len() < 2 {
        bail!("Position braucht mindestens zwei Werte");
    }
    let x = items[0].as_f64().context("x ist keine Zahl")?;
    let y = items[1].as_f64().context("y ist keine Zahl")?;
    Ok(DVec2::new(x, y))
}

fn parse_positions(value: &Value) -> Result<Vec<DVec2>> {
    value
        .as_array()
        .context("Koordinatenliste ist kein Array")?
        .iter()
        .map(parse_position)
        .collect()
}

fn parse_nested<T>(value: &Value, parse: impl Fn(&Value) -> Result<T>) -> Result<Vec<T>> {
    value
        .as_array()
        .context("Verschachtelte Koordinaten sind kein Array")?
        .iter()
        .map(parse)
        .collect()
}
