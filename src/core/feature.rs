//! Features eines Vektor-Layers und der `NroLot`-Attributvertrag.

use indexmap::IndexMap;
use serde_json::Value;

use super::geometry::{Extent, Geometry};

/// Attributschlüssel für Lot-Nummern (Beschriftung und Selektionsabgleich).
pub const LOT_ATTRIBUTE: &str = "NroLot";

/// Attribut-Map eines Features (Reihenfolge wie in der Quelldatei).
pub type Attributes = IndexMap<String, Value>;

/// Ein Feature: Geometrie plus frei strukturierte Attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Optionale Feature-ID aus der Quelle
    pub id: Option<Value>,
    pub geometry: Geometry,
    pub attributes: Attributes,
}

impl Feature {
    pub fn new(geometry: Geometry, attributes: Attributes) -> Self {
        Self {
            id: None,
            geometry,
            attributes,
        }
    }

    /// Wert des `NroLot`-Attributs, falls vorhanden und nicht `null`.
    pub fn lot_number(&self) -> Option<&Value> {
        self.attributes
            .get(LOT_ATTRIBUTE)
            .filter(|value| !value.is_null())
    }

    /// Beschriftungstext: `NroLot` als Text, leer wenn nicht vorhanden.
    pub fn label(&self) -> String {
        match self.lot_number() {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Number(number)) => number.to_string(),
            Some(Value::Bool(flag)) => flag.to_string(),
            _ => String::new(),
        }
    }

    /// Prüft, ob das Feature zur Lot-Referenz `lot` gehört.
    pub fn matches_lot(&self, lot: &str) -> bool {
        self.lot_number()
            .is_some_and(|value| lot_value_matches(value, lot))
    }

    pub fn extent(&self) -> Option<Extent> {
        self.geometry.extent()
    }
}

/// Vergleicht einen `NroLot`-Wert mit einer Lot-Referenz.
///
/// Texte werden getrimmt und exakt verglichen. Ganzzahlige Werte passen zu
/// einer Referenz mit derselben Ganzzahl, übrige Zahlen nur zu ihrer
/// kanonischen Schreibweise. Es gibt keinen Umweg über `f64`.
pub fn lot_value_matches(value: &Value, lot: &str) -> bool {
    let reference = lot.trim();
    if reference.is_empty() {
        return false;
    }

    match value {
        Value::String(text) => text.trim() == reference,
        Value::Number(number) => {
            if let Some(n) = number.as_u64() {
                reference.parse::<u64>().is_ok_and(|r| r == n)
            } else if let Some(n) = number.as_i64() {
                reference.parse::<i64>().is_ok_and(|r| r == n)
            } else {
                number.to_string() == reference
            }
        }
        _ => false,
    }
}

/// Attribute für die Anzeige im Popup: alles außer der Geometrie.
pub fn popup_attributes(feature: &Feature) -> Attributes {
    feature
        .attributes
        .iter()
        .filter(|(key, _)| key.as_str() != "geometry")
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
