//! Geordnete Sammlung der importierten Layer.

use super::layer::{LayerDescriptor, LayerId};
use super::notify::{Notifier, SubscriptionId};

/// Änderung an der Layer-Sammlung.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerEvent {
    Added { id: LayerId },
    Removed { id: LayerId },
    VisibilityChanged { id: LayerId, visible: bool },
}

/// Layer in Import-Reihenfolge; IDs sind eindeutig.
#[derive(Debug, Default)]
pub struct LayerRegistry {
    layers: Vec<LayerDescriptor>,
    revision: u64,
    notifier: Notifier<LayerEvent>,
}

impl LayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hängt einen Layer an. Schlägt bei bereits vergebener ID fehl.
    pub fn add(&mut self, descriptor: LayerDescriptor) -> anyhow::Result<()> {
        if self.contains(&descriptor.id) {
            anyhow::bail!("Layer-ID '{}' ist bereits registriert", descriptor.id);
        }
        let id = descriptor.id.clone();
        log::info!(
            "Layer '{}' ({:?}, {}) hinzugefügt",
            descriptor.name,
            descriptor.kind,
            if descriptor.spatial_reference.is_empty() {
                "EPSG:4326"
            } else {
                descriptor.spatial_reference.as_str()
            }
        );
        self.layers.push(descriptor);
        self.changed(LayerEvent::Added { id });
        Ok(())
    }

    /// Entfernt einen Layer und gibt ihn zurück.
    pub fn remove(&mut self, id: &LayerId) -> Option<LayerDescriptor> {
        let index = self.layers.iter().position(|layer| &layer.id == id)?;
        let removed = self.layers.remove(index);
        log::info!("Layer '{}' entfernt", removed.name);
        self.changed(LayerEvent::Removed { id: id.clone() });
        Some(removed)
    }

    /// Schaltet die Sichtbarkeit um. Liefert den neuen Zustand.
    pub fn toggle_visibility(&mut self, id: &LayerId) -> Option<bool> {
        let visible = !self.get(id)?.visible;
        self.set_visibility(id, visible)
    }

    /// Setzt die Sichtbarkeit. Benachrichtigt nur bei tatsächlicher Änderung.
    pub fn set_visibility(&mut self, id: &LayerId, visible: bool) -> Option<bool> {
        let layer = self.layers.iter_mut().find(|layer| &layer.id == id)?;
        if layer.visible != visible {
            layer.visible = visible;
            self.changed(LayerEvent::VisibilityChanged {
                id: id.clone(),
                visible,
            });
        }
        Some(visible)
    }

    pub fn get(&self, id: &LayerId) -> Option<&LayerDescriptor> {
        self.layers.iter().find(|layer| &layer.id == id)
    }

    pub fn contains(&self, id: &LayerId) -> bool {
        self.get(id).is_some()
    }

    /// Alle Layer in Import-Reihenfolge.
    pub fn layers(&self) -> &[LayerDescriptor] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Zähler, der bei jeder Änderung steigt.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&LayerEvent) + Send + 'static,
    ) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    fn changed(&mut self, event: LayerEvent) {
        self.revision += 1;
        self.notifier.notify(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn vector(id: &str) -> LayerDescriptor {
        LayerDescriptor::vector_text(id, "EPSG:4326", "{}").with_id(id)
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut registry = LayerRegistry::new();
        registry.add(vector("a")).unwrap();
        assert!(registry.add(vector("a")).is_err());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.revision(), 1);
    }

    #[test]
    fn test_order_is_preserved_after_remove() {
        let mut registry = LayerRegistry::new();
        for id in ["a", "b", "c"] {
            registry.add(vector(id)).unwrap();
        }
        let removed = registry.remove(&LayerId::from("b")).unwrap();
        assert_eq!(removed.id.as_str(), "b");
        let ids: Vec<_> = registry.layers().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(registry.remove(&LayerId::from("b")).is_none());
    }

    #[test]
    fn test_events_are_delivered() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut registry = LayerRegistry::new();
        {
            let events = Arc::clone(&events);
            registry.subscribe(move |e| events.lock().unwrap().push(e.clone()));
        }

        let id = LayerId::from("a");
        registry.add(vector("a")).unwrap();
        assert_eq!(registry.toggle_visibility(&id), Some(false));
        // Gleicher Wert → kein Ereignis
        assert_eq!(registry.set_visibility(&id, false), Some(false));
        registry.remove(&id);

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                LayerEvent::Added { id: id.clone() },
                LayerEvent::VisibilityChanged {
                    id: id.clone(),
                    visible: false
                },
                LayerEvent::Removed { id },
            ]
        );
        assert_eq!(registry.revision(), 3);
    }

    #[test]
    fn test_toggle_unknown_layer() {
        let mut registry = LayerRegistry::new();
        assert_eq!(registry.toggle_visibility(&LayerId::from("x")), None);
        assert_eq!(registry.revision(), 0);
    }
}
