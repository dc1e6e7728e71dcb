//! Zustandsautomat für Karten-Capture und Analyse-Übermittlung.
//!
//! Ablauf: `Idle → Capturing → (Captured | Failed) → Idle`. Aus
//! `Captured` führt [`CapturePipeline::begin_submit`] nach `Submitting`;
//! das Ergebnis wird mit [`CapturePipeline::finish_submit`] übernommen.
//! Das PNG liegt hinter einem [`BlobHandle`], das auf jedem Ausgang
//! freigegeben wird.

use std::sync::Arc;

use crate::analysis::AnalysisService;

use super::analysis_result::{AnalysisResultStore, Lot};
use super::blob::{BlobHandle, BlobStore};

/// Zustand der Capture-Pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CaptureState {
    #[default]
    Idle,
    /// Oberfläche wird gerastert
    Capturing,
    /// PNG liegt bereit
    Captured { handle: BlobHandle, byte_len: usize },
    /// PNG ist beim Analyse-Dienst
    Submitting { handle: BlobHandle },
    /// Capture oder Analyse fehlgeschlagen
    Failed { reason: String },
}

/// Ein abgeschicktes, noch nicht beantwortetes Capture.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub handle: BlobHandle,
    pub png: Arc<[u8]>,
}

impl PendingSubmission {
    /// Schickt das PNG an den Dienst und wartet auf das Ergebnis.
    ///
    /// Fehler werden nicht propagiert, sondern im Ergebnis transportiert.
    pub async fn send<S: AnalysisService + ?Sized>(self, service: &S) -> SubmissionOutcome {
        log::info!("Sende Capture ({} Bytes) an den Analyse-Dienst", self.png.len());
        let result = service
            .detect_constructions(self.png.to_vec())
            .await
            .map_err(|e| format!("{e:#}"));
        SubmissionOutcome {
            handle: self.handle,
            result,
        }
    }
}

/// Ergebnis einer Übermittlung.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub handle: BlobHandle,
    pub result: Result<Vec<Lot>, String>,
}

/// Capture-Pipeline mit eigener Sicht auf den Blob-Speicher.
#[derive(Debug)]
pub struct CapturePipeline {
    state: CaptureState,
    blobs: BlobStore,
}

impl CapturePipeline {
    pub fn new(blobs: BlobStore) -> Self {
        Self {
            state: CaptureState::Idle,
            blobs,
        }
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    /// `true` während Capture oder Übermittlung laufen.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.state,
            CaptureState::Capturing | CaptureState::Submitting { .. }
        )
    }

    /// Rastert die Karte über `render` (liefert PNG-Bytes).
    ///
    /// Ein vorhandenes, nicht abgeschicktes Capture wird ersetzt. Bei
    /// Fehler wechselt der Zustand nach `Failed` und es gibt kein Handle.
    pub fn capture<F>(&mut self, render: F) -> Option<BlobHandle>
    where
        F: FnOnce() -> anyhow::Result<Vec<u8>>,
    {
        if self.is_busy() {
            log::warn!("Capture ignoriert: Pipeline ist beschäftigt ({:?})", self.state);
            return None;
        }
        self.release_held();
        self.state = CaptureState::Capturing;

        match render() {
            Ok(png) if !png.is_empty() => {
                let byte_len = png.len();
                let handle = self.blobs.create(Arc::from(png));
                log::info!("Karte erfasst ({byte_len} Bytes)");
                self.state = CaptureState::Captured { handle, byte_len };
                Some(handle)
            }
            Ok(_) => {
                self.fail("Rasterung lieferte ein leeres Bild".to_string());
                None
            }
            Err(e) => {
                self.fail(format!("{e:#}"));
                None
            }
        }
    }

    /// PNG-Bytes des aktuellen Captures (auch während der Übermittlung).
    pub fn captured_png(&self) -> Option<Arc<[u8]>> {
        match self.state {
            CaptureState::Captured { handle, .. } | CaptureState::Submitting { handle } => {
                self.blobs.get(handle)
            }
            _ => None,
        }
    }

    /// Verwirft ein Capture (Bediener sendet nicht ab) oder quittiert einen Fehler.
    pub fn discard(&mut self) -> bool {
        match self.state {
            CaptureState::Captured { .. } | CaptureState::Failed { .. } => {
                self.release_held();
                self.state = CaptureState::Idle;
                true
            }
            CaptureState::Idle => false,
            CaptureState::Capturing | CaptureState::Submitting { .. } => {
                log::warn!("Verwerfen nicht möglich während {:?}", self.state);
                false
            }
        }
    }

    /// Startet die Übermittlung des aktuellen Captures.
    pub fn begin_submit(&mut self) -> anyhow::Result<PendingSubmission> {
        let CaptureState::Captured { handle, .. } = self.state else {
            anyhow::bail!("Kein Capture zum Absenden vorhanden ({:?})", self.state);
        };
        let Some(png) = self.blobs.get(handle) else {
            self.fail("Capture-Daten sind nicht mehr verfügbar".to_string());
            anyhow::bail!("Capture-Daten sind nicht mehr verfügbar");
        };
        self.state = CaptureState::Submitting { handle };
        Ok(PendingSubmission { handle, png })
    }

    /// Übernimmt das Ergebnis einer Übermittlung.
    ///
    /// Erfolg ersetzt die Lot-Liste vollständig, ein Fehler lässt sie
    /// unverändert. Das Capture-Handle wird in jedem Fall freigegeben.
    pub fn finish_submit(
        &mut self,
        outcome: SubmissionOutcome,
        results: &mut AnalysisResultStore,
    ) -> Result<usize, String> {
        self.blobs.release(outcome.handle);
        if let CaptureState::Submitting { handle } = self.state {
            if handle != outcome.handle {
                log::warn!("Analyse-Ergebnis gehört zu einem anderen Capture");
                self.blobs.release(handle);
            }
        }

        match outcome.result {
            Ok(lots) => {
                let count = lots.len();
                results.set_lots(lots);
                self.state = CaptureState::Idle;
                Ok(count)
            }
            Err(reason) => {
                log::error!("Analyse fehlgeschlagen: {reason}");
                self.state = CaptureState::Failed {
                    reason: reason.clone(),
                };
                Err(reason)
            }
        }
    }

    /// Quittiert einen Fehlerzustand.
    pub fn acknowledge_failure(&mut self) {
        if matches!(self.state, CaptureState::Failed { .. }) {
            self.state = CaptureState::Idle;
        }
    }

    fn fail(&mut self, reason: String) {
        log::error!("Capture fehlgeschlagen: {reason}");
        self.state = CaptureState::Failed { reason };
    }

    fn release_held(&mut self) {
        match self.state {
            CaptureState::Captured { handle, .. } | CaptureState::Submitting { handle } => {
                self.blobs.release(handle);
            }
            _ => {}
        }
    }
}

impl Drop for CapturePipeline {
    fn drop(&mut self) {
        self.release_held();
    }
}
