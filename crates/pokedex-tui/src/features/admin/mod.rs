//! Admin seed panel: seed status and actions, the paged catalog list with
//! filters and infinite scroll, and the inline row edit lifecycle.

pub mod render;
pub mod state;
pub mod update;

pub use state::{AdminFocus, AdminState, EditField, EditSession};
