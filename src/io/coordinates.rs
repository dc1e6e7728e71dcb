//! Tabellarischer Export der AOI-Punkte (Longitude, Latitude, ID).

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::AoiPoint;

/// Kopfzeile der Exportdatei.
pub const EXPORT_HEADER: [&str; 3] = ["Longitude", "Latitude", "ID"];

/// Eine Datenzeile des Exports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateRow {
    pub longitude: f64,
    pub latitude: f64,
    pub id: u64,
}

/// Wandelt AOI-Punkte in Exportzeilen um (Reihenfolge bleibt erhalten).
///
/// Enthält die Eingabe eine nicht-endliche Koordinate, gilt sie als
/// fehlerhaft und ergibt eine leere Tabelle.
pub fn coordinate_rows(points: &[AoiPoint]) -> Vec<CoordinateRow> {
    if points
        .iter()
        .any(|p| !p.latitude.is_finite() || !p.longitude.is_finite())
    {
        log::warn!("AOI-Liste enthält ungültige Koordinaten, Export ohne Zeilen");
        return Vec::new();
    }
    points
        .iter()
        .map(|p| CoordinateRow {
            longitude: p.longitude,
            latitude: p.latitude,
            id: p.id,
        })
        .collect()
}

/// Schreibt Kopfzeile und Datenzeilen als CSV.
pub fn write_coordinates<W: Write>(writer: W, points: &[AoiPoint]) -> Result<usize> {
    let rows = coordinate_rows(points);
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(EXPORT_HEADER)
        .context("Kopfzeile konnte nicht geschrieben werden")?;
    for row in &rows {
        csv_writer
            .write_record([
                row.longitude.to_string(),
                row.latitude.to_string(),
                row.id.to_string(),
            ])
            .with_context(|| format!("Zeile für AOI {} konnte nicht geschrieben werden", row.id))?;
    }
    csv_writer.flush().context("CSV-Export konnte nicht abgeschlossen werden")?;
    Ok(rows.len())
}

/// Schreibt den Export in eine Datei.
pub fn export_to_path(path: &Path, points: &[AoiPoint]) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Exportdatei {} kann nicht angelegt werden", path.display()))?;
    let rows = write_coordinates(std::io::BufWriter::new(file), points)?;
    log::info!("{rows} Koordinaten nach {} exportiert", path.display());
    Ok(rows)
}
