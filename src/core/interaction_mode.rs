//! Interaktionsmodus der Karte und Export-Anforderung.

use super::notify::{Notifier, SubscriptionId};

/// Wie ein Kartenklick interpretiert wird.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    /// Klick wählt ein Feature aus (Popup)
    #[default]
    Default,
    /// Klick erfasst einen AOI-Punkt
    Capturing,
}

/// Änderung im Modus-Speicher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    ModeChanged(InteractionMode),
    ExportRequestChanged(bool),
}

/// Zwei unabhängige Schalter: Erfassungsmodus und Export-Anforderung.
#[derive(Debug, Default)]
pub struct InteractionModeStore {
    mode: InteractionMode,
    export_requested: bool,
    revision: u64,
    notifier: Notifier<ModeEvent>,
}

impl InteractionModeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn is_capturing(&self) -> bool {
        self.mode == InteractionMode::Capturing
    }

    pub fn set_capturing(&mut self, capturing: bool) {
        let mode = if capturing {
            InteractionMode::Capturing
        } else {
            InteractionMode::Default
        };
        if self.mode != mode {
            self.mode = mode;
            log::info!("Interaktionsmodus: {mode:?}");
            self.changed(ModeEvent::ModeChanged(mode));
        }
    }

    /// Schaltet den Erfassungsmodus um und liefert den neuen Modus.
    pub fn toggle_capturing(&mut self) -> InteractionMode {
        self.set_capturing(!self.is_capturing());
        self.mode
    }

    pub fn export_requested(&self) -> bool {
        self.export_requested
    }

    /// Fordert einen Koordinaten-Export an.
    pub fn request_export(&mut self) {
        if !self.export_requested {
            self.export_requested = true;
            self.changed(ModeEvent::ExportRequestChanged(true));
        }
    }

    /// Setzt die Export-Anforderung zurück.
    pub fn reset_export(&mut self) {
        if self.export_requested {
            self.export_requested = false;
            self.changed(ModeEvent::ExportRequestChanged(false));
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ModeEvent) + Send + 'static) -> SubscriptionId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    fn changed(&mut self, event: ModeEvent) {
        self.revision += 1;
        self.notifier.notify(&event);
    }
}
