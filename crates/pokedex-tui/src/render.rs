//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference, draw to a ratatui
//! frame, and never mutate state or return effects.

use ratatui::Frame;

use crate::features::{home, login};
use crate::state::{AppState, Route, TuiState};

/// Spinner frames for in-flight operations.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Slows the spinner relative to the tick rate.
const SPINNER_SPEED_DIVISOR: usize = 4;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();

    match app.tui.route {
        Route::Login => login::render::render(&app.tui, frame, area),
        Route::Home(tab) => home::render::render(&app.tui, tab, frame, area),
    }

    // Overlay last, so it appears on top.
    if let Some(overlay) = &app.overlay {
        overlay.render(frame, area);
    }
}

/// Current spinner glyph for the tick counter.
pub fn spinner(state: &TuiState) -> &'static str {
    SPINNER_FRAMES[(state.spinner_frame / SPINNER_SPEED_DIVISOR) % SPINNER_FRAMES.len()]
}
