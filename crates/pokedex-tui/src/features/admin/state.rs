use std::collections::{HashMap, HashSet};

use pokedex_core::catalog::{CatalogFilter, PokemonMeta};
use serde_json::Value;

/// How close (in rows) the cursor must get to the bottom of the loaded list
/// before the next page is requested.
pub const SCROLL_THRESHOLD: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminFocus {
    #[default]
    Table,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Rarity,
    Generation,
    BaseStats,
}

impl EditField {
    pub fn next(self) -> Self {
        match self {
            EditField::Rarity => EditField::Generation,
            EditField::Generation => EditField::BaseStats,
            EditField::BaseStats => EditField::Rarity,
        }
    }
}

/// Transient per-row edit state: the pre-edit snapshot plus the scratch
/// text fields bound to the edit inputs. Discarded on save or cancel.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub snapshot: PokemonMeta,
    pub rarity: String,
    pub generation: String,
    pub base_stats: String,
    pub field: EditField,
}

impl EditSession {
    pub fn open(row: &PokemonMeta) -> Self {
        Self {
            snapshot: row.clone(),
            rarity: row.rarity.code().to_string(),
            generation: row.generation_id.to_string(),
            base_stats: stringify_base_stats(&row.base_stat_total),
            field: EditField::Rarity,
        }
    }

    pub fn active_field_mut(&mut self) -> &mut String {
        match self.field {
            EditField::Rarity => &mut self.rarity,
            EditField::Generation => &mut self.generation,
            EditField::BaseStats => &mut self.base_stats,
        }
    }
}

/// Renders a base-stat value into editable text: bare digits for numbers,
/// JSON text for structured stats.
pub fn stringify_base_stats(value: &Value) -> String {
    match value {
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

/// Admin panel state.
///
/// The in-flight bookkeeping for the status check, the mutating seed action
/// and the page fetch lives in the shared task table; row saves are tracked
/// per id in `saving` since saves on distinct rows may overlap.
#[derive(Debug, Default)]
pub struct AdminState {
    /// None = unknown (not checked yet or check in flight).
    pub seeded: Option<bool>,
    /// Success message from the last admin action.
    pub message: Option<String>,
    /// Error from the last admin action, status check, or edit validation.
    pub error: Option<String>,

    /// Accumulated rows, in server-returned page order.
    pub list: Vec<PokemonMeta>,
    /// Error from the last page fetch.
    pub list_error: Option<String>,
    /// Last successfully fetched page number; 0 before the first page.
    pub page_no: u32,
    /// Heuristic: the last page was full, so another may exist.
    pub has_more: bool,

    pub filter: CatalogFilter,
    /// Search input text while the search field is focused.
    pub search_draft: String,
    pub focus: AdminFocus,
    /// Cursor position in the loaded list.
    pub cursor: usize,

    /// Edit sessions keyed by row id. A row stays here after a failed save.
    pub edits: HashMap<i64, EditSession>,
    /// Row whose edit inputs currently receive keys.
    pub editing: Option<i64>,
    /// Rows with a save in flight.
    pub saving: HashSet<i64>,
}

impl AdminState {
    pub fn current_row(&self) -> Option<&PokemonMeta> {
        self.list.get(self.cursor)
    }
}
