//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only; the reducer itself never
//! performs I/O.

use pokedex_core::catalog::{CatalogFilter, RowUpdate};

use crate::common::TaskId;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, PartialEq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Exchange credentials for tokens and store them.
    SubmitLogin {
        task: TaskId,
        email: String,
        password: String,
    },

    /// Clear the stored session and the cached profile. Synchronous.
    Logout,

    /// Fetch the current user's profile for the home shell.
    FetchProfile { task: TaskId },

    /// Resolve the admin guard (profile scope check, fail closed).
    CheckAdminGate { task: TaskId },

    /// Fetch the "is the catalog seeded" flag.
    CheckSeedStatus { task: TaskId },

    /// Trigger the bulk seed.
    RunSeed { task: TaskId },

    /// Delete everything, then seed (sequential).
    RunReseed { task: TaskId },

    /// Fetch one page of catalog records.
    LoadPage {
        task: TaskId,
        page_no: u32,
        page_size: u32,
        filter: CatalogFilter,
    },

    /// Save an edited row.
    SaveRow { update: RowUpdate },
}
