//! Effect handler implementations.
//!
//! Pure async functions: call the core API, map the outcome onto a `UiEvent`
//! for the inbox. Error details go to the log; the UI only sees the generic
//! message and the session-expired flag.

use std::sync::Arc;

use pokedex_core::api::{ApiClient, is_session_expired};
use pokedex_core::catalog::{CatalogFilter, RowUpdate};
use pokedex_core::session::UserStore;

use crate::common::TaskId;
use crate::events::{ApiFailure, UiEvent};

fn failure(err: &anyhow::Error, message: &str) -> ApiFailure {
    tracing::warn!("api request failed: {err:#}");
    ApiFailure {
        message: message.to_string(),
        session_expired: is_session_expired(err),
    }
}

pub async fn login(api: Arc<ApiClient>, id: TaskId, email: String, password: String) -> UiEvent {
    let result = api
        .login(&email, &password)
        .await
        .map_err(|err| failure(&err, "Invalid email or password"));
    UiEvent::LoginFinished { id, result }
}

pub async fn fetch_profile(api: Arc<ApiClient>, users: Arc<UserStore>, id: TaskId) -> UiEvent {
    let result = users
        .me(&api)
        .await
        .map_err(|err| failure(&err, "Unable to load profile"));
    UiEvent::ProfileLoaded { id, result }
}

/// Admin guard: any failure is treated as non-admin.
pub async fn admin_gate(api: Arc<ApiClient>, users: Arc<UserStore>, id: TaskId) -> UiEvent {
    match users.me(&api).await {
        Ok(user) => UiEvent::AdminGateChecked {
            id,
            admitted: user.is_admin(),
            expired: false,
        },
        Err(err) => {
            tracing::warn!("admin gate profile fetch failed: {err:#}");
            UiEvent::AdminGateChecked {
                id,
                admitted: false,
                expired: is_session_expired(&err),
            }
        }
    }
}

pub async fn seed_status(api: Arc<ApiClient>, id: TaskId) -> UiEvent {
    let result = api
        .is_seeded()
        .await
        .map_err(|err| failure(&err, "Unable to load seed status"));
    UiEvent::SeedStatusLoaded { id, result }
}

pub async fn run_seed(api: Arc<ApiClient>, id: TaskId) -> UiEvent {
    let result = api
        .seed()
        .await
        .map_err(|err| failure(&err, "Seeding failed."));
    UiEvent::SeedFinished { id, result }
}

pub async fn run_reseed(api: Arc<ApiClient>, id: TaskId) -> UiEvent {
    let result = api
        .reseed()
        .await
        .map_err(|err| failure(&err, "Delete or re-seed operation failed."));
    UiEvent::ReseedFinished { id, result }
}

pub async fn load_page(
    api: Arc<ApiClient>,
    id: TaskId,
    filter: CatalogFilter,
    page_no: u32,
    page_size: u32,
) -> UiEvent {
    let result = api
        .fetch_page(&filter, page_no, page_size)
        .await
        .map_err(|err| failure(&err, "Unable to load the catalog list"));
    UiEvent::PageLoaded { id, result }
}

pub async fn save_row(api: Arc<ApiClient>, update: RowUpdate) -> UiEvent {
    let row_id = update.id;
    let result = api
        .save_row(&update)
        .await
        .map_err(|err| failure(&err, "Save failed."));
    UiEvent::RowSaved {
        row_id,
        update,
        result,
    }
}
