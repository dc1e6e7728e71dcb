//! Transiente Binär-Ressourcen (dekodierte Raster-Puffer, Capture-PNGs).
//!
//! Jede Ressource wird über ein [`BlobHandle`] angesprochen und muss
//! explizit freigegeben werden. [`HandleArena`] sammelt die Handles eines
//! Durchlaufs, damit sie gemeinsam freigegeben werden können.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Kennung einer registrierten Binär-Ressource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlobHandle(u64);

impl BlobHandle {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

#[derive(Default)]
struct BlobTable {
    next_id: u64,
    entries: HashMap<u64, Arc<[u8]>>,
}

/// Prozessweite Ablage für transiente Binärdaten.
///
/// Klone teilen sich dieselbe Tabelle.
#[derive(Clone, Default)]
pub struct BlobStore {
    inner: Arc<Mutex<BlobTable>>,
}

impl BlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> MutexGuard<'_, BlobTable> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registriert Binärdaten und gibt ein neues Handle zurück.
    pub fn create(&self, bytes: Arc<[u8]>) -> BlobHandle {
        let mut table = self.table();
        table.next_id += 1;
        let id = table.next_id;
        table.entries.insert(id, bytes);
        BlobHandle(id)
    }

    /// Liefert die Daten zu einem lebenden Handle.
    pub fn get(&self, handle: BlobHandle) -> Option<Arc<[u8]>> {
        self.table().entries.get(&handle.0).cloned()
    }

    /// Gibt ein Handle frei. Liefert `false`, wenn es bereits frei war.
    pub fn release(&self, handle: BlobHandle) -> bool {
        self.table().entries.remove(&handle.0).is_some()
    }

    /// Anzahl aktuell lebender Handles.
    pub fn live_count(&self) -> usize {
        self.table().entries.len()
    }

    pub fn is_live(&self, handle: BlobHandle) -> bool {
        self.table().entries.contains_key(&handle.0)
    }
}

impl std::fmt::Debug for BlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobStore")
            .field("live", &self.live_count())
            .finish()
    }
}

/// Freigabeliste der Handles eines Durchlaufs.
#[derive(Debug, Default)]
pub struct HandleArena {
    handles: Vec<BlobHandle>,
}

impl HandleArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, handle: BlobHandle) {
        self.handles.push(handle);
    }

    pub fn extend(&mut self, handles: impl IntoIterator<Item = BlobHandle>) {
        self.handles.extend(handles);
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Gibt alle gesammelten Handles frei und leert die Liste.
    ///
    /// Liefert die Anzahl tatsächlich freigegebener Handles.
    pub fn release_all(&mut self, store: &BlobStore) -> usize {
        self.handles
            .drain(..)
            .filter(|handle| store.release(*handle))
            .count()
    }
}
