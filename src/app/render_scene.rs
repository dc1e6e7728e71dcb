//! Builder für Render-Szenen aus dem AppState.

use crate::app::AppState;
use crate::shared::RenderScene;

/// Baut eine RenderScene aus dem aktuellen AppState.
pub fn build(state: &AppState) -> RenderScene {
    RenderScene {
        view: state.view.map_view.clone(),
        viewport_size: state.view.viewport_size,
        background: state.options.background_color,
    }
}

#[cfg(test)]
mod tests {
    use super::build;
    use crate::app::AppState;

    #[test]
    fn build_snapshots_view_and_background() {
        let mut state = AppState::new();
        state.view.viewport_size = [1280, 720];
        state.options.background_color = [10, 20, 30, 255];

        let scene = build(&state);

        assert!(scene.has_area());
        assert_eq!(scene.viewport_size, [1280, 720]);
        assert_eq!(scene.background, [10, 20, 30, 255]);
        assert_eq!(scene.view.center, state.view.map_view.center);
    }

    #[test]
    fn build_without_viewport_has_no_area() {
        let state = AppState::new();
        assert!(!build(&state).has_area());
    }
}
