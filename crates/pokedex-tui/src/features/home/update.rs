//! Home shell reducer: tab navigation, profile results, logout.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pokedex_core::session::User;

use crate::common::TaskId;
use crate::effects::UiEffect;
use crate::events::ApiFailure;
use crate::features::admin::AdminState;
use crate::state::{HomeTab, Route, TuiState};
use crate::update::{force_login, navigate};

use super::HomeState;

/// Called when the home shell becomes the active screen.
/// Fetches the profile for the header once per session.
pub fn enter(state: &mut TuiState) -> Vec<UiEffect> {
    if state.home.user.is_some() || state.tasks.profile.is_running() {
        return vec![];
    }
    let task = state.task_seq.next_id();
    vec![UiEffect::FetchProfile { task }]
}

pub fn handle_profile(
    state: &mut TuiState,
    id: TaskId,
    result: Result<User, ApiFailure>,
) -> Vec<UiEffect> {
    if !state.tasks.profile.finish_if_active(id) {
        return vec![];
    }

    match result {
        Ok(user) => {
            state.home.is_admin = user.is_admin();
            state.home.user = Some(user);
            vec![]
        }
        Err(failure) => {
            state.home.user = None;
            state.home.is_admin = false;
            if failure.session_expired {
                return force_login(state);
            }
            vec![]
        }
    }
}

pub fn handle_key(state: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    let Route::Home(tab) = state.route else {
        return vec![];
    };
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Tab => navigate(state, Route::Home(next_tab(tab, 1))),
        KeyCode::BackTab => navigate(state, Route::Home(next_tab(tab, -1))),
        KeyCode::Char(ch @ '1'..='5') => {
            let index = (ch as usize) - ('1' as usize);
            navigate(state, Route::Home(HomeTab::ALL[index]))
        }
        KeyCode::Char('l') if ctrl => logout(state),
        KeyCode::Char('q') => vec![UiEffect::Quit],
        _ => vec![],
    }
}

/// Clears the session and returns to the login screen. The token store and
/// profile cache are cleared by the runtime when it executes the effect.
pub fn logout(state: &mut TuiState) -> Vec<UiEffect> {
    state.home = HomeState::default();
    state.admin = AdminState::default();
    state.login.error = None;
    state.route = Route::Login;
    vec![UiEffect::Logout]
}

fn next_tab(tab: HomeTab, step: isize) -> HomeTab {
    let tabs = HomeTab::ALL;
    let current = tabs.iter().position(|t| *t == tab).unwrap_or(0) as isize;
    let len = tabs.len() as isize;
    let next = (current + step).rem_euclid(len);
    tabs[next as usize]
}
