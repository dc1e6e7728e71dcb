//! Application State: alle prozessweiten Speicher plus View- und UI-Zustand.

mod app_state;
mod ui;
mod view;

pub use app_state::{AppState, SyncState};
pub use ui::{SelectionPopup, UiState};
pub use view::ViewState;
