//! Admin panel reducer.
//!
//! All list, seed, and edit state transitions live here. Effects are returned
//! for the runtime to execute; nothing in this module touches the network.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pokedex_core::catalog::{PokemonMeta, Rarity, RowUpdate, parse_base_stats};

use crate::common::TaskId;
use crate::effects::UiEffect;
use crate::events::ApiFailure;
use crate::state::TuiState;
use crate::update::force_login;

use super::state::{AdminFocus, AdminState, EditSession, SCROLL_THRESHOLD};

const MAX_GENERATION: i64 = 9;
const MAX_RARITY: i64 = 5;

/// Outcome of a key press while the admin tab is active.
#[derive(Debug)]
pub enum AdminKeyResult {
    /// Not an admin key; falls through to the home shell bindings.
    Ignored,
    Handled(Vec<UiEffect>),
    /// Delete-all-and-seed needs interactive confirmation first.
    OpenConfirm,
}

/// Called when the admin guard admits the user. The panel starts from a
/// clean slate, checks the seed status, and loads the first page.
pub fn enter(state: &mut TuiState) -> Vec<UiEffect> {
    state.admin = AdminState::default();
    let mut effects = check_status(state);
    effects.extend(load_page(state, true));
    effects
}

// ============================================================================
// Seed status and actions
// ============================================================================

pub fn check_status(state: &mut TuiState) -> Vec<UiEffect> {
    if state.tasks.seed_status.is_running() {
        return vec![];
    }
    state.admin.error = None;
    let task = state.task_seq.next_id();
    vec![UiEffect::CheckSeedStatus { task }]
}

pub fn handle_seed_status(
    state: &mut TuiState,
    id: TaskId,
    result: Result<bool, ApiFailure>,
) -> Vec<UiEffect> {
    if !state.tasks.seed_status.finish_if_active(id) {
        return vec![];
    }
    match result {
        Ok(seeded) => {
            state.admin.seeded = Some(seeded);
            vec![]
        }
        Err(failure) => {
            state.admin.error = Some(failure.message.clone());
            expired_to_login(state, &failure)
        }
    }
}

pub fn run_seed(state: &mut TuiState) -> Vec<UiEffect> {
    if state.tasks.seed_action.is_running() {
        return vec![];
    }
    state.admin.message = None;
    state.admin.error = None;
    let task = state.task_seq.next_id();
    vec![UiEffect::RunSeed { task }]
}

/// Starts delete-all-and-seed. Only reachable through the confirmation
/// overlay.
pub fn run_reseed(state: &mut TuiState) -> Vec<UiEffect> {
    if state.tasks.seed_action.is_running() {
        return vec![];
    }
    state.admin.message = None;
    state.admin.error = None;
    let task = state.task_seq.next_id();
    vec![UiEffect::RunReseed { task }]
}

pub fn handle_seed_finished(
    state: &mut TuiState,
    id: TaskId,
    result: Result<(), ApiFailure>,
) -> Vec<UiEffect> {
    seed_action_finished(state, id, result, "Pokémon data seeded successfully.")
}

pub fn handle_reseed_finished(
    state: &mut TuiState,
    id: TaskId,
    result: Result<(), ApiFailure>,
) -> Vec<UiEffect> {
    seed_action_finished(state, id, result, "All data deleted and re-seeded successfully.")
}

fn seed_action_finished(
    state: &mut TuiState,
    id: TaskId,
    result: Result<(), ApiFailure>,
    success_message: &str,
) -> Vec<UiEffect> {
    if !state.tasks.seed_action.finish_if_active(id) {
        return vec![];
    }
    match result {
        Ok(()) => {
            state.admin.seeded = Some(true);
            state.admin.message = Some(success_message.to_string());
            load_page(state, true)
        }
        Err(failure) => {
            // One generic error; which step failed is not distinguished, the
            // seeded flag stays as it was, and the list is not reloaded.
            state.admin.error = Some(failure.message.clone());
            expired_to_login(state, &failure)
        }
    }
}

// ============================================================================
// Paged list
// ============================================================================

/// Requests the next page, or page 1 after a reset.
///
/// No-op while a fetch is in flight, and (without reset) once a short page
/// has marked the list as exhausted.
pub fn load_page(state: &mut TuiState, reset: bool) -> Vec<UiEffect> {
    if state.tasks.list_page.is_running() {
        return vec![];
    }
    if !reset && !state.admin.has_more {
        return vec![];
    }

    if reset {
        state.admin.list.clear();
        state.admin.page_no = 0;
        state.admin.has_more = true;
        state.admin.cursor = 0;
        state.admin.list_error = None;
        state.admin.edits.clear();
        state.admin.editing = None;
    }

    let task = state.task_seq.next_id();
    vec![UiEffect::LoadPage {
        task,
        page_no: state.admin.page_no + 1,
        page_size: state.config.page_size,
        filter: state.admin.filter.clone(),
    }]
}

pub fn handle_page_loaded(
    state: &mut TuiState,
    id: TaskId,
    result: Result<Vec<PokemonMeta>, ApiFailure>,
) -> Vec<UiEffect> {
    if !state.tasks.list_page.finish_if_active(id) {
        return vec![];
    }
    match result {
        Ok(rows) => {
            // A full page means another one may exist; anything shorter ends
            // the scroll until the next reset.
            state.admin.has_more = rows.len() == state.config.page_size as usize;
            state.admin.page_no += 1;
            state.admin.list.extend(rows);
            state.admin.list_error = None;
            if state.admin.cursor >= state.admin.list.len() {
                state.admin.cursor = state.admin.list.len().saturating_sub(1);
            }
            vec![]
        }
        Err(failure) => {
            state.admin.list_error = Some(failure.message.clone());
            expired_to_login(state, &failure)
        }
    }
}

/// Requests the next page when the cursor is close enough to the bottom of
/// the loaded list. Checked on every cursor move, not debounced.
pub fn maybe_fetch_more(state: &mut TuiState) -> Vec<UiEffect> {
    if state.admin.list.is_empty() {
        return vec![];
    }
    if state.admin.cursor + SCROLL_THRESHOLD >= state.admin.list.len() {
        return load_page(state, false);
    }
    vec![]
}

// ============================================================================
// Filters
// ============================================================================

pub fn apply_search(state: &mut TuiState) -> Vec<UiEffect> {
    state.admin.filter.search_term = state.admin.search_draft.trim().to_string();
    state.admin.focus = AdminFocus::Table;
    load_page(state, true)
}

pub fn cycle_generation(state: &mut TuiState) -> Vec<UiEffect> {
    state.admin.filter.generation = match state.admin.filter.generation {
        None => Some(1),
        Some(generation) if generation >= MAX_GENERATION => None,
        Some(generation) => Some(generation + 1),
    };
    load_page(state, true)
}

pub fn cycle_rarity(state: &mut TuiState) -> Vec<UiEffect> {
    state.admin.filter.rarity = match state.admin.filter.rarity {
        None => Some(1),
        Some(rarity) if rarity >= MAX_RARITY => None,
        Some(rarity) => Some(rarity + 1),
    };
    load_page(state, true)
}

pub fn reset_filters(state: &mut TuiState) -> Vec<UiEffect> {
    state.admin.filter = Default::default();
    state.admin.search_draft.clear();
    load_page(state, true)
}

// ============================================================================
// Row edit lifecycle
// ============================================================================

/// Snapshots the cursor row and opens its edit inputs. Re-opens the existing
/// session for a row left in edit state by a failed save.
pub fn start_edit(state: &mut TuiState) {
    let Some(row) = state.admin.current_row() else {
        return;
    };
    let row_id = row.id;
    if state.admin.saving.contains(&row_id) {
        return;
    }
    if !state.admin.edits.contains_key(&row_id) {
        let session = EditSession::open(row);
        state.admin.edits.insert(row_id, session);
    }
    state.admin.editing = Some(row_id);
    state.admin.error = None;
}

/// Restores the snapshot into the list and discards the session.
pub fn cancel_edit(state: &mut TuiState) {
    let Some(row_id) = state.admin.editing.take() else {
        return;
    };
    if let Some(session) = state.admin.edits.remove(&row_id)
        && let Some(row) = state.admin.list.iter_mut().find(|row| row.id == row_id)
    {
        *row = session.snapshot;
    }
}

/// Validates the scratch fields and posts the update. Validation failures
/// set an error and never reach the network.
pub fn save_edit(state: &mut TuiState) -> Vec<UiEffect> {
    let Some(row_id) = state.admin.editing else {
        return vec![];
    };
    if state.admin.saving.contains(&row_id) {
        return vec![];
    }
    let Some(session) = state.admin.edits.get(&row_id) else {
        return vec![];
    };

    let Ok(rarity) = session.rarity.trim().parse::<i64>() else {
        state.admin.error = Some("Rarity must be a number".to_string());
        return vec![];
    };
    let Ok(generation_id) = session.generation.trim().parse::<i64>() else {
        state.admin.error = Some("Generation must be a number".to_string());
        return vec![];
    };
    let base_stats = match parse_base_stats(&session.snapshot.base_stat_total, &session.base_stats)
    {
        Ok(value) => value,
        Err(err) => {
            state.admin.error = Some(err.to_string());
            return vec![];
        }
    };

    state.admin.error = None;
    state.admin.saving.insert(row_id);
    vec![UiEffect::SaveRow {
        update: RowUpdate {
            id: row_id,
            rarity,
            base_stats,
            generation_id,
        },
    }]
}

pub fn handle_row_saved(
    state: &mut TuiState,
    row_id: i64,
    update: RowUpdate,
    result: Result<(), ApiFailure>,
) -> Vec<UiEffect> {
    state.admin.saving.remove(&row_id);
    match result {
        Ok(()) => {
            // Replace only the fields that were sent; the rest of the row
            // keeps its fetched values.
            if let Some(row) = state.admin.list.iter_mut().find(|row| row.id == row_id) {
                row.rarity = Rarity::Code(update.rarity);
                row.generation_id = update.generation_id;
                row.base_stat_total = update.base_stats;
            }
            state.admin.edits.remove(&row_id);
            if state.admin.editing == Some(row_id) {
                state.admin.editing = None;
            }
            state.admin.message = Some("Changes saved.".to_string());
            vec![]
        }
        Err(failure) => {
            state.admin.error = Some(failure.message.clone());
            // The row stays in edit state.
            expired_to_login(state, &failure)
        }
    }
}

// ============================================================================
// Keys
// ============================================================================

pub fn handle_key(state: &mut TuiState, key: KeyEvent) -> AdminKeyResult {
    // Ctrl chords belong to the home shell (Ctrl+L logout), even mid-edit.
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return AdminKeyResult::Ignored;
    }

    if state.admin.editing.is_some() {
        return AdminKeyResult::Handled(handle_edit_key(state, key));
    }
    if state.admin.focus == AdminFocus::Search {
        return AdminKeyResult::Handled(handle_search_key(state, key));
    }

    match key.code {
        KeyCode::Up => {
            state.admin.cursor = state.admin.cursor.saturating_sub(1);
            AdminKeyResult::Handled(vec![])
        }
        KeyCode::Down => AdminKeyResult::Handled(move_cursor_down(state, 1)),
        KeyCode::PageUp => {
            state.admin.cursor = state.admin.cursor.saturating_sub(10);
            AdminKeyResult::Handled(vec![])
        }
        KeyCode::PageDown => AdminKeyResult::Handled(move_cursor_down(state, 10)),
        KeyCode::End => {
            let step = state.admin.list.len();
            AdminKeyResult::Handled(move_cursor_down(state, step))
        }
        KeyCode::Home => {
            state.admin.cursor = 0;
            AdminKeyResult::Handled(vec![])
        }
        KeyCode::Enter | KeyCode::Char('e') => {
            start_edit(state);
            AdminKeyResult::Handled(vec![])
        }
        KeyCode::Char('s') => AdminKeyResult::Handled(run_seed(state)),
        KeyCode::Char('d') => AdminKeyResult::OpenConfirm,
        KeyCode::Char('c') => AdminKeyResult::Handled(check_status(state)),
        KeyCode::Char('/') => {
            state.admin.focus = AdminFocus::Search;
            state.admin.search_draft = state.admin.filter.search_term.clone();
            AdminKeyResult::Handled(vec![])
        }
        KeyCode::Char('g') => AdminKeyResult::Handled(cycle_generation(state)),
        KeyCode::Char('f') => AdminKeyResult::Handled(cycle_rarity(state)),
        KeyCode::Char('x') => AdminKeyResult::Handled(reset_filters(state)),
        _ => AdminKeyResult::Ignored,
    }
}

fn move_cursor_down(state: &mut TuiState, step: usize) -> Vec<UiEffect> {
    if !state.admin.list.is_empty() {
        state.admin.cursor = (state.admin.cursor + step).min(state.admin.list.len() - 1);
    }
    maybe_fetch_more(state)
}

fn handle_edit_key(state: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc => {
            cancel_edit(state);
            vec![]
        }
        KeyCode::Enter => save_edit(state),
        KeyCode::Tab => {
            if let Some(row_id) = state.admin.editing
                && let Some(session) = state.admin.edits.get_mut(&row_id)
            {
                session.field = session.field.next();
            }
            vec![]
        }
        KeyCode::Backspace => {
            if let Some(row_id) = state.admin.editing
                && let Some(session) = state.admin.edits.get_mut(&row_id)
            {
                session.active_field_mut().pop();
            }
            vec![]
        }
        KeyCode::Char(ch) => {
            if let Some(row_id) = state.admin.editing
                && let Some(session) = state.admin.edits.get_mut(&row_id)
            {
                session.active_field_mut().push(ch);
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_search_key(state: &mut TuiState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc => {
            state.admin.search_draft = state.admin.filter.search_term.clone();
            state.admin.focus = AdminFocus::Table;
            vec![]
        }
        KeyCode::Enter => apply_search(state),
        KeyCode::Backspace => {
            state.admin.search_draft.pop();
            vec![]
        }
        KeyCode::Char(ch) => {
            state.admin.search_draft.push(ch);
            vec![]
        }
        _ => vec![],
    }
}

fn expired_to_login(state: &mut TuiState, failure: &ApiFailure) -> Vec<UiEffect> {
    if failure.session_expired {
        return force_login(state);
    }
    vec![]
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pokedex_core::api::ApiClient;
    use pokedex_core::config::Config;
    use pokedex_core::session::{TokenStore, UserStore};
    use serde_json::json;

    use super::*;
    use crate::common::TaskStarted;
    use crate::state::Route;

    fn fixture() -> (tempfile::TempDir, TuiState) {
        let dir = tempfile::tempdir().unwrap();
        let tokens = Arc::new(TokenStore::open_at(dir.path().join("tokens.json")).unwrap());
        let api = Arc::new(ApiClient::new("http://localhost:9", tokens));
        let config = Config {
            page_size: 3,
            ..Config::default()
        };
        let state = TuiState::new(config, api, Arc::new(UserStore::new()));
        (dir, state)
    }

    fn row(id: i64) -> PokemonMeta {
        PokemonMeta {
            id,
            name: format!("mon-{id}"),
            generation_id: 1,
            rarity: Rarity::Code(2),
            base_stat_total: json!(300 + id),
        }
    }

    /// Pulls the task id out of a single-effect batch and marks the slot
    /// started, the way the runtime would.
    fn begin(state: &mut TuiState, effects: &[UiEffect]) -> TaskId {
        let id = match effects {
            [UiEffect::LoadPage { task, .. }]
            | [UiEffect::CheckSeedStatus { task }]
            | [UiEffect::RunSeed { task }]
            | [UiEffect::RunReseed { task }] => *task,
            other => panic!("expected one task effect, got {other:?}"),
        };
        match &effects[0] {
            UiEffect::LoadPage { .. } => state.tasks.list_page.on_started(&TaskStarted { id }),
            UiEffect::CheckSeedStatus { .. } => {
                state.tasks.seed_status.on_started(&TaskStarted { id });
            }
            _ => state.tasks.seed_action.on_started(&TaskStarted { id }),
        }
        id
    }

    fn load_rows(state: &mut TuiState, reset: bool, rows: Vec<PokemonMeta>) {
        let effects = load_page(state, reset);
        let id = begin(state, &effects);
        let followup = handle_page_loaded(state, id, Ok(rows));
        assert!(followup.is_empty());
    }

    /// Test: successful fetches append; a full page keeps has_more true.
    #[test]
    fn test_pages_append_in_order() {
        let (_dir, mut state) = fixture();

        load_rows(&mut state, true, vec![row(1), row(2), row(3)]);
        assert_eq!(state.admin.list.len(), 3);
        assert_eq!(state.admin.page_no, 1);
        assert!(state.admin.has_more);

        load_rows(&mut state, false, vec![row(4), row(5), row(6)]);
        assert_eq!(state.admin.list.len(), 6);
        assert_eq!(state.admin.page_no, 2);
        assert!(state.admin.has_more);
        let ids: Vec<i64> = state.admin.list.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    /// Test: a short page flips has_more and further loads are no-ops.
    #[test]
    fn test_short_page_exhausts_list() {
        let (_dir, mut state) = fixture();

        load_rows(&mut state, true, vec![row(1), row(2), row(3)]);
        load_rows(&mut state, false, vec![row(4)]);
        assert!(!state.admin.has_more);
        assert_eq!(state.admin.list.len(), 4);

        assert!(load_page(&mut state, false).is_empty());
        assert_eq!(state.admin.list.len(), 4);
    }

    /// Test: a load while one is in flight is a no-op.
    #[test]
    fn test_load_noop_while_in_flight() {
        let (_dir, mut state) = fixture();

        let effects = load_page(&mut state, true);
        begin(&mut state, &effects);

        assert!(load_page(&mut state, false).is_empty());
        assert!(load_page(&mut state, true).is_empty());
    }

    /// Test: reset discards accumulated rows and reproduces page 1.
    #[test]
    fn test_reset_reproduces_first_page() {
        let (_dir, mut state) = fixture();

        load_rows(&mut state, true, vec![row(1), row(2), row(3)]);
        load_rows(&mut state, false, vec![row(4), row(5), row(6)]);

        let effects = load_page(&mut state, true);
        assert!(state.admin.list.is_empty());
        assert!(matches!(effects.as_slice(), [UiEffect::LoadPage { page_no: 1, .. }]));

        let id = begin(&mut state, &effects);
        handle_page_loaded(&mut state, id, Ok(vec![row(1), row(2), row(3)]));

        let ids: Vec<i64> = state.admin.list.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(state.admin.page_no, 1);
    }

    /// Test: a stale result (superseded task id) is dropped.
    #[test]
    fn test_stale_page_result_dropped() {
        let (_dir, mut state) = fixture();

        let effects = load_page(&mut state, true);
        let stale = begin(&mut state, &effects);
        // The slot moves on to another task.
        state.tasks.list_page.finish_if_active(stale);
        let effects = load_page(&mut state, true);
        begin(&mut state, &effects);

        handle_page_loaded(&mut state, stale, Ok(vec![row(1)]));
        assert!(state.admin.list.is_empty());
    }

    /// Test: the cursor nearing the bottom requests the next page.
    #[test]
    fn test_infinite_scroll_threshold() {
        let (_dir, mut state) = fixture();
        state.admin.list = (1..=10).map(row).collect();
        state.admin.has_more = true;
        state.admin.page_no = 1;

        state.admin.cursor = 3;
        assert!(maybe_fetch_more(&mut state).is_empty());

        state.admin.cursor = 5;
        let effects = maybe_fetch_more(&mut state);
        assert!(matches!(effects.as_slice(), [UiEffect::LoadPage { page_no: 2, .. }]));
    }

    /// Test: cancel after edit restores the snapshot exactly.
    #[test]
    fn test_cancel_edit_restores_snapshot() {
        let (_dir, mut state) = fixture();
        state.admin.list = vec![row(1)];
        let original = state.admin.list[0].clone();

        start_edit(&mut state);
        assert_eq!(state.admin.editing, Some(1));

        let session = state.admin.edits.get_mut(&1).unwrap();
        session.rarity = "5".to_string();
        session.base_stats = "999".to_string();

        cancel_edit(&mut state);
        assert_eq!(state.admin.list[0], original);
        assert!(state.admin.edits.is_empty());
        assert_eq!(state.admin.editing, None);
    }

    /// Test: non-numeric base stats on a numeric original never reach the
    /// network.
    #[test]
    fn test_save_edit_rejects_bad_base_stats() {
        let (_dir, mut state) = fixture();
        state.admin.list = vec![row(1)];
        start_edit(&mut state);

        state.admin.edits.get_mut(&1).unwrap().base_stats = "not a number".to_string();
        let effects = save_edit(&mut state);

        assert!(effects.is_empty());
        assert!(state.admin.error.is_some());
        assert!(state.admin.saving.is_empty());
    }

    /// Test: a valid save posts the payload and replaces only the sent
    /// fields on success.
    #[test]
    fn test_save_edit_roundtrip() {
        let (_dir, mut state) = fixture();
        state.admin.list = vec![row(1)];
        start_edit(&mut state);

        {
            let session = state.admin.edits.get_mut(&1).unwrap();
            session.rarity = "4".to_string();
            session.generation = "3".to_string();
            session.base_stats = "480".to_string();
        }

        let effects = save_edit(&mut state);
        let update = match &effects[..] {
            [UiEffect::SaveRow { update }] => update.clone(),
            other => panic!("expected SaveRow, got {other:?}"),
        };
        assert_eq!(update.id, 1);
        assert_eq!(update.rarity, 4);
        assert_eq!(update.generation_id, 3);
        assert_eq!(update.base_stats, json!(480));
        assert!(state.admin.saving.contains(&1));

        handle_row_saved(&mut state, 1, update, Ok(()));
        let saved = &state.admin.list[0];
        assert_eq!(saved.rarity, Rarity::Code(4));
        assert_eq!(saved.generation_id, 3);
        assert_eq!(saved.base_stat_total, json!(480));
        assert_eq!(saved.name, "mon-1");
        assert!(state.admin.edits.is_empty());
        assert_eq!(state.admin.editing, None);
        assert!(state.admin.saving.is_empty());
        assert!(state.admin.message.is_some());
    }

    /// Test: a failed save leaves the row in edit state.
    #[test]
    fn test_save_failure_keeps_edit_state() {
        let (_dir, mut state) = fixture();
        state.admin.list = vec![row(1)];
        start_edit(&mut state);

        let effects = save_edit(&mut state);
        let update = match &effects[..] {
            [UiEffect::SaveRow { update }] => update.clone(),
            other => panic!("expected SaveRow, got {other:?}"),
        };

        handle_row_saved(&mut state, 1, update, Err(ApiFailure::new("Save failed.")));
        assert_eq!(state.admin.error.as_deref(), Some("Save failed."));
        assert!(state.admin.edits.contains_key(&1));
        assert_eq!(state.admin.editing, Some(1));
        assert!(state.admin.saving.is_empty());
    }

    /// Test: seeding success flips the flag and reloads the list.
    #[test]
    fn test_seed_success_reloads_list() {
        let (_dir, mut state) = fixture();
        state.admin.list = vec![row(1)];
        state.admin.page_no = 1;

        let effects = run_seed(&mut state);
        let id = begin(&mut state, &effects);

        let followup = handle_seed_finished(&mut state, id, Ok(()));
        assert_eq!(state.admin.seeded, Some(true));
        assert!(state.admin.message.is_some());
        assert!(matches!(followup.as_slice(), [UiEffect::LoadPage { page_no: 1, .. }]));
        assert!(state.admin.list.is_empty());
    }

    /// Test: a failed delete-and-seed chain reports one error, leaves the
    /// seeded flag alone, and does not reload the list.
    #[test]
    fn test_reseed_failure_changes_nothing() {
        let (_dir, mut state) = fixture();
        state.admin.seeded = Some(false);
        state.admin.list = vec![row(1)];

        let effects = run_reseed(&mut state);
        let id = begin(&mut state, &effects);

        let followup = handle_reseed_finished(
            &mut state,
            id,
            Err(ApiFailure::new("Delete or re-seed operation failed.")),
        );
        assert!(followup.is_empty());
        assert_eq!(state.admin.seeded, Some(false));
        assert_eq!(state.admin.list.len(), 1);
        assert_eq!(
            state.admin.error.as_deref(),
            Some("Delete or re-seed operation failed.")
        );
    }

    /// Test: a mutating action is rejected while one is running.
    #[test]
    fn test_seed_rejected_while_action_in_flight() {
        let (_dir, mut state) = fixture();

        let effects = run_seed(&mut state);
        begin(&mut state, &effects);

        assert!(run_seed(&mut state).is_empty());
        assert!(run_reseed(&mut state).is_empty());
    }

    /// Test: a session-expired page failure forces the login screen.
    #[test]
    fn test_expired_session_forces_login() {
        let (_dir, mut state) = fixture();

        let effects = load_page(&mut state, true);
        let id = begin(&mut state, &effects);

        let failure = ApiFailure {
            message: "Unable to load the catalog list".to_string(),
            session_expired: true,
        };
        handle_page_loaded(&mut state, id, Err(failure));
        assert_eq!(state.route, Route::Login);
    }

    /// Test: filter changes reset the accumulated list.
    #[test]
    fn test_filter_change_resets_list() {
        let (_dir, mut state) = fixture();
        load_rows(&mut state, true, vec![row(1), row(2), row(3)]);

        let effects = cycle_generation(&mut state);
        assert_eq!(state.admin.filter.generation, Some(1));
        assert!(state.admin.list.is_empty());
        assert!(matches!(effects.as_slice(), [UiEffect::LoadPage { page_no: 1, .. }]));
    }
}
