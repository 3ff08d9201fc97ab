//! Login feature reducer.

use crossterm::event::{KeyCode, KeyEvent};

use crate::common::TaskId;
use crate::effects::UiEffect;
use crate::events::ApiFailure;
use crate::features::home;
use crate::state::{HomeTab, Route, TuiState};

use super::LoginField;

pub fn handle_key(state: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            state.login.focus = match state.login.focus {
                LoginField::Email => LoginField::Password,
                LoginField::Password => LoginField::Email,
            };
            vec![]
        }
        KeyCode::Enter => submit(state),
        KeyCode::Backspace => {
            match state.login.focus {
                LoginField::Email => state.login.email.pop(),
                LoginField::Password => state.login.password.pop(),
            };
            vec![]
        }
        KeyCode::Char(ch) => {
            match state.login.focus {
                LoginField::Email => state.login.email.push(ch),
                LoginField::Password => state.login.password.push(ch),
            }
            vec![]
        }
        _ => vec![],
    }
}

/// Validates the form and starts the login exchange. Re-entrant submits
/// while a login is in flight are rejected.
pub fn submit(state: &mut TuiState) -> Vec<UiEffect> {
    if state.tasks.login.is_running() {
        return vec![];
    }
    if !state.login.is_valid() {
        state.login.error = Some("Enter a valid email and password.".to_string());
        return vec![];
    }

    state.login.error = None;
    let task = state.task_seq.next_id();
    vec![UiEffect::SubmitLogin {
        task,
        email: state.login.email.clone(),
        password: state.login.password.clone(),
    }]
}

pub fn handle_finished(
    state: &mut TuiState,
    id: TaskId,
    result: Result<(), ApiFailure>,
) -> Vec<UiEffect> {
    if !state.tasks.login.finish_if_active(id) {
        return vec![];
    }

    match result {
        Ok(()) => {
            state.login.password.clear();
            state.login.error = None;
            state.route = Route::Home(HomeTab::Overview);
            home::update::enter(state)
        }
        Err(failure) => {
            state.login.error = Some(failure.message);
            vec![]
        }
    }
}
