//! Layer-Deskriptoren: was der Import-Dialog an die Karte übergibt.

use std::fmt;
use std::sync::Arc;

use super::feature::Feature;
use super::geometry::Extent;

/// Opake, eindeutige Layer-Kennung.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(String);

impl LayerId {
    /// Erzeugt eine neue zufällige Kennung (UUID v4).
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for LayerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Art eines Layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Vector,
    Raster,
}

/// Vektor-Nutzdaten: Rohtext (GeoJSON) oder bereits strukturierte Features.
#[derive(Debug, Clone)]
pub enum VectorPayload {
    Text(Arc<str>),
    Features(Arc<[Feature]>),
}

/// Raster-Nutzdaten: Binärpuffer plus optionale Georeferenzierung.
#[derive(Clone)]
pub struct RasterPayload {
    /// Kodiertes Bild (PNG, JPEG, TIFF)
    pub bytes: Arc<[u8]>,
    /// Ausdehnung im deklarierten Bezugssystem des Layers.
    /// Ohne Angabe wird das Raster bildschirmfüllend gezeichnet.
    pub bounds: Option<Extent>,
}

impl fmt::Debug for RasterPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterPayload")
            .field("bytes", &format_args!("{} Bytes", self.bytes.len()))
            .field("bounds", &self.bounds)
            .finish()
    }
}

/// Nutzdaten eines Layers, getaggt nach Layer-Art.
#[derive(Debug, Clone)]
pub enum LayerPayload {
    Vector(VectorPayload),
    Raster(RasterPayload),
}

impl LayerPayload {
    pub fn kind(&self) -> LayerKind {
        match self {
            LayerPayload::Vector(_) => LayerKind::Vector,
            LayerPayload::Raster(_) => LayerKind::Raster,
        }
    }
}

/// Beschreibung eines importierten Layers.
#[derive(Debug, Clone)]
pub struct LayerDescriptor {
    pub id: LayerId,
    pub name: String,
    pub kind: LayerKind,
    pub visible: bool,
    /// Bezeichner des Bezugssystems (z.B. `EPSG:4326`); leer = WGS84
    pub spatial_reference: String,
    pub payload: LayerPayload,
}

impl LayerDescriptor {
    /// Erstellt einen sichtbaren Layer und prüft, dass Art und Nutzdaten passen.
    pub fn new(
        id: LayerId,
        name: impl Into<String>,
        kind: LayerKind,
        spatial_reference: impl Into<String>,
        payload: LayerPayload,
    ) -> anyhow::Result<Self> {
        if payload.kind() != kind {
            anyhow::bail!(
                "Layer-Art {:?} passt nicht zu Nutzdaten vom Typ {:?}",
                kind,
                payload.kind()
            );
        }
        Ok(Self {
            id,
            name: name.into(),
            kind,
            visible: true,
            spatial_reference: spatial_reference.into(),
            payload,
        })
    }

    /// Vektor-Layer aus GeoJSON-Text mit neuer Kennung.
    pub fn vector_text(
        name: impl Into<String>,
        spatial_reference: impl Into<String>,
        text: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            id: LayerId::generate(),
            name: name.into(),
            kind: LayerKind::Vector,
            visible: true,
            spatial_reference: spatial_reference.into(),
            payload: LayerPayload::Vector(VectorPayload::Text(text.into())),
        }
    }

    /// Raster-Layer aus einem Binärpuffer mit neuer Kennung.
    pub fn raster(
        name: impl Into<String>,
        spatial_reference: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
        bounds: Option<Extent>,
    ) -> Self {
        Self {
            id: LayerId::generate(),
            name: name.into(),
            kind: LayerKind::Raster,
            visible: true,
            spatial_reference: spatial_reference.into(),
            payload: LayerPayload::Raster(RasterPayload {
                bytes: bytes.into(),
                bounds,
            }),
        }
    }

    /// Gibt den Layer mit fester Kennung zurück (Tests, reproduzierbare Importe).
    pub fn with_id(mut self, id: impl Into<LayerId>) -> Self {
        self.id = id.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = LayerId::generate();
        let b = LayerId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn test_new_rejects_kind_mismatch() {
        let payload = LayerPayload::Raster(RasterPayload {
            bytes: Arc::from(vec![1u8, 2, 3]),
            bounds: None,
        });
        let result = LayerDescriptor::new(
            LayerId::from("x"),
            "falsch",
            LayerKind::Vector,
            "EPSG:4326",
            payload,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_convenience_constructors_set_kind() {
        let vector = LayerDescriptor::vector_text("parzellen", "", "{}");
        assert_eq!(vector.kind, LayerKind::Vector);
        assert_eq!(vector.payload.kind(), LayerKind::Vector);
        assert!(vector.visible);

        let raster = LayerDescriptor::raster("luftbild", "EPSG:3857", vec![0u8; 4], None)
            .with_id("r1");
        assert_eq!(raster.id.as_str(), "r1");
        assert_eq!(raster.payload.kind(), LayerKind::Raster);
    }

    #[test]
    fn test_raster_debug_omits_bytes() {
        let raster = LayerDescriptor::raster("r", "", vec![7u8; 1000], None);
        let text = format!("{:?}", raster.payload);
        assert!(text.contains("1000 Bytes"));
    }
}
