//! Use-Case-Funktionen für die Kartenansicht.

use crate::app::AppState;

/// Aktualisiert die Größe der Kartenfläche.
pub fn resize(state: &mut AppState, size: [u32; 2]) {
    state.view.viewport_size = size;
}

/// Schreibt laufende Ansichts-Animationen fort.
pub fn advance(state: &mut AppState, elapsed_ms: u64) {
    state.view.map_view.advance(elapsed_ms);
}

/// Beendet eine laufende Animation am Ziel.
pub fn complete_animation(state: &mut AppState) {
    state.view.map_view.finish_animation();
}

/// Setzt die Ansicht auf die Startansicht zurück.
pub fn reset(state: &mut AppState) {
    state.view.map_view = state.initial_view();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Extent, Padding};
    use approx::assert_relative_eq;
    use glam::DVec2;

    #[test]
    fn test_reset_restores_initial_view() {
        let mut state = AppState::new();
        resize(&mut state, [400, 400]);
        let initial = state.view.map_view.center;
        state.view.map_view.fit(
            Extent::new(DVec2::new(0.0, 0.0), DVec2::new(1000.0, 1000.0)),
            [400, 400],
            Padding::uniform(0.0),
            0,
        );
        reset(&mut state);
        assert_relative_eq!(state.view.map_view.center.x, initial.x);
        assert_relative_eq!(state.view.map_view.zoom(), 13.0, epsilon = 1e-9);
    }

    #[test]
    fn test_complete_animation_jumps_to_target() {
        let mut state = AppState::new();
        let record = state.view.map_view.fit(
            Extent::new(DVec2::new(0.0, 0.0), DVec2::new(1000.0, 1000.0)),
            [400, 400],
            Padding::uniform(0.0),
            1000,
        );
        advance(&mut state, 100);
        assert!(state.view.map_view.is_animating());
        complete_animation(&mut state);
        assert!(!state.view.map_view.is_animating());
        assert_relative_eq!(state.view.map_view.center.x, record.target_center.x);
    }
}
