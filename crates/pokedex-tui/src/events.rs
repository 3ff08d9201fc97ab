//! Events consumed by the reducer.
//!
//! Async handlers send these through the runtime's inbox channel; terminal
//! input and the tick timer feed in directly.

use pokedex_core::catalog::{PokemonMeta, RowUpdate};
use pokedex_core::session::User;

use crate::common::{TaskId, TaskKind, TaskStarted};

/// A failed API call, reduced to what the UI needs: the generic message to
/// display and whether the session was invalidated along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub message: String,
    pub session_expired: bool,
}

impl ApiFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            session_expired: false,
        }
    }
}

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic timer; drives the spinner and render cadence.
    Tick,
    /// Raw terminal input.
    Terminal(crossterm::event::Event),
    /// An async task was spawned; occupies its slot.
    TaskStarted { kind: TaskKind, started: TaskStarted },

    LoginFinished {
        id: TaskId,
        result: Result<(), ApiFailure>,
    },
    ProfileLoaded {
        id: TaskId,
        result: Result<User, ApiFailure>,
    },
    /// Admin guard verdict. `expired` forces navigation to login.
    AdminGateChecked {
        id: TaskId,
        admitted: bool,
        expired: bool,
    },
    SeedStatusLoaded {
        id: TaskId,
        result: Result<bool, ApiFailure>,
    },
    SeedFinished {
        id: TaskId,
        result: Result<(), ApiFailure>,
    },
    ReseedFinished {
        id: TaskId,
        result: Result<(), ApiFailure>,
    },
    PageLoaded {
        id: TaskId,
        result: Result<Vec<PokemonMeta>, ApiFailure>,
    },
    /// One row save settled; `update` carries the fields that were sent.
    RowSaved {
        row_id: i64,
        update: RowUpdate,
        result: Result<(), ApiFailure>,
    },
}
