//! Handler für Layer-Registry und Layer-Abgleich.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::{LayerDescriptor, LayerId};

/// Nimmt einen importierten Layer auf.
pub fn add(state: &mut AppState, descriptor: LayerDescriptor) -> anyhow::Result<()> {
    use_cases::layers::add(state, descriptor)
}

/// Entfernt einen Layer.
pub fn remove(state: &mut AppState, id: &LayerId) {
    use_cases::layers::remove(state, id);
}

/// Schaltet die Sichtbarkeit eines Layers um.
pub fn toggle_visibility(state: &mut AppState, id: &LayerId) {
    use_cases::layers::toggle_visibility(state, id);
}

/// Gleicht den Compositor mit der Registry ab.
pub fn reconcile(state: &mut AppState) {
    use_cases::layers::reconcile(state);
}
