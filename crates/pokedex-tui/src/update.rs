//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects. Navigation between screens also runs
//! through this module so the guards sit on every attempt.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::common::TaskId;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::admin::update::AdminKeyResult;
use crate::features::{admin, home, login};
use crate::overlays::{ConfirmAction, Overlay, OverlayTransition};
use crate::state::{AppState, HomeTab, Route, TuiState};

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::TaskStarted { kind, started } => {
            app.tui.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::LoginFinished { id, result } => {
            login::update::handle_finished(&mut app.tui, id, result)
        }
        UiEvent::ProfileLoaded { id, result } => {
            home::update::handle_profile(&mut app.tui, id, result)
        }
        UiEvent::AdminGateChecked {
            id,
            admitted,
            expired,
        } => handle_admin_gate(&mut app.tui, id, admitted, expired),
        UiEvent::SeedStatusLoaded { id, result } => {
            admin::update::handle_seed_status(&mut app.tui, id, result)
        }
        UiEvent::SeedFinished { id, result } => {
            admin::update::handle_seed_finished(&mut app.tui, id, result)
        }
        UiEvent::ReseedFinished { id, result } => {
            admin::update::handle_reseed_finished(&mut app.tui, id, result)
        }
        UiEvent::PageLoaded { id, result } => {
            admin::update::handle_page_loaded(&mut app.tui, id, result)
        }
        UiEvent::RowSaved {
            row_id,
            update,
            result,
        } => admin::update::handle_row_saved(&mut app.tui, row_id, update, result),
    }
}

/// Effects to run before the first frame.
pub fn startup(app: &mut AppState) -> Vec<UiEffect> {
    match app.tui.route {
        Route::Home(_) => home::update::enter(&mut app.tui),
        Route::Login => vec![],
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    let Event::Key(key) = event else {
        return vec![];
    };
    if key.kind != KeyEventKind::Press {
        return vec![];
    }

    if is_ctrl_c(key) {
        return vec![UiEffect::Quit];
    }

    if let Some(overlay) = app.overlay.as_mut() {
        let overlay_update = overlay.handle_key(key);
        if matches!(overlay_update.transition, OverlayTransition::Close) {
            app.overlay = None;
        }
        return match overlay_update.confirmed {
            Some(ConfirmAction::Reseed) => admin::update::run_reseed(&mut app.tui),
            None => vec![],
        };
    }

    match app.tui.route {
        Route::Login => login::update::handle_key(&mut app.tui, key),
        Route::Home(tab) => {
            if tab == HomeTab::Admin {
                match admin::update::handle_key(&mut app.tui, key) {
                    AdminKeyResult::Handled(effects) => return effects,
                    AdminKeyResult::OpenConfirm => {
                        app.overlay = Some(Overlay::confirm_reseed());
                        return vec![];
                    }
                    AdminKeyResult::Ignored => {}
                }
            }
            home::update::handle_key(&mut app.tui, key)
        }
    }
}

fn is_ctrl_c(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

// ============================================================================
// Navigation and guards
// ============================================================================

/// Routes a navigation attempt through the guards.
///
/// Every home route requires a session; the admin tab additionally resolves
/// the profile asynchronously and only switches once the scope check admits
/// the user.
pub fn navigate(state: &mut TuiState, target: Route) -> Vec<UiEffect> {
    match target {
        Route::Login => {
            state.route = Route::Login;
            vec![]
        }
        Route::Home(tab) => {
            if !state.api.tokens().is_logged_in() {
                state.route = Route::Login;
                return vec![];
            }
            if tab == HomeTab::Admin {
                if state.tasks.admin_gate.is_running() {
                    return vec![];
                }
                let task = state.task_seq.next_id();
                return vec![UiEffect::CheckAdminGate { task }];
            }
            state.route = Route::Home(tab);
            vec![]
        }
    }
}

fn handle_admin_gate(
    state: &mut TuiState,
    id: TaskId,
    admitted: bool,
    expired: bool,
) -> Vec<UiEffect> {
    if !state.tasks.admin_gate.finish_if_active(id) {
        return vec![];
    }
    if expired {
        return force_login(state);
    }
    if admitted {
        state.route = Route::Home(HomeTab::Admin);
        return admin::update::enter(state);
    }
    // Fail closed: anything but an admitted profile lands on the overview.
    state.route = Route::Home(HomeTab::Overview);
    vec![]
}

/// Forced navigation to the login screen after an irrecoverable 401.
/// The token store was already cleared by the client.
pub fn force_login(state: &mut TuiState) -> Vec<UiEffect> {
    state.home = Default::default();
    state.route = Route::Login;
    state.login.error = Some("Session expired. Please log in again.".to_string());
    vec![]
}
