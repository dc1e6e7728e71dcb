//! Dateiformate: GeoJSON-Import und Koordinaten-Export.

pub mod coordinates;
pub mod geojson;

pub use coordinates::{coordinate_rows, export_to_path, write_coordinates, CoordinateRow};
pub use geojson::{features_from_value, parse_feature_collection};
