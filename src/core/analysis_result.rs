//! Ergebnisse des Analyse-Dienstes und die aktuelle Lot-Auswahl.

use serde::{Deserialize, Deserializer, Serialize};

use super::notify::{Notifier, SubscriptionId};

/// Ein vom Analyse-Dienst gemeldetes Lot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lot {
    /// Lot-Nummer; der Dienst liefert sie als Text oder als Zahl
    #[serde(deserialize_with = "lot_number_from_json")]
    pub numero_lot: String,
    #[serde(default)]
    pub description: String,
    /// Lage der Konstruktion relativ zur Parzelle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// Schweregrad der Abweichung
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravite: Option<String>,
}

impl Lot {
    pub fn new(numero_lot: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            numero_lot: numero_lot.into(),
            description: description.into(),
            position: None,
            gravite: None,
        }
    }
}

fn lot_number_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawLotNumber {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawLotNumber::deserialize(deserializer)? {
        RawLotNumber::Text(text) => text,
        RawLotNumber::Number(number) => number.to_string(),
    })
}

/// Änderung im Ergebnis-Speicher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisEvent {
    LotsReplaced { count: usize },
    SelectionChanged(Option<String>),
}

/// Lot-Liste der letzten erfolgreichen Analyse plus Auswahl.
#[derive(Debug, Default)]
pub struct AnalysisResultStore {
    lots: Vec<Lot>,
    selected: Option<String>,
    selection_revision: u64,
    notifier: Notifier<AnalysisEvent>,
}

impl AnalysisResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ersetzt die Lot-Liste vollständig. Die Auswahl bleibt bestehen.
    pub fn set_lots(&mut self, lots: Vec<Lot>) {
        let count = lots.len();
        self.lots = lots;
        log::info!("{count} Lots vom Analyse-Dienst übernommen");
        self.notifier.notify(&AnalysisEvent::LotsReplaced { count });
    }

    /// Wählt ein Lot aus (oder hebt die Auswahl mit `None` auf).
    ///
    /// Jeder Aufruf zählt als Auswahländerung, auch bei gleicher Nummer:
    /// erneutes Auswählen springt erneut zum Lot.
    pub fn select_lot(&mut self, numero_lot: Option<String>) {
        self.selected = numero_lot;
        self.selection_revision += 1;
        self.notifier
            .notify(&AnalysisEvent::SelectionChanged(self.selected.clone()));
    }

    pub fn lots(&self) -> &[Lot] {
        &self.lots
    }

    pub fn selected_lot(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selection_revision(&self) -> u64 {
        self.selection_revision
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&AnalysisEvent) + Send + 'static,
    ) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }
}
