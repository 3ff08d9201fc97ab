//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── route: Route             (current screen)
//! │   ├── login: LoginFormState    (login form)
//! │   ├── home: HomeState          (shell: profile, active tab)
//! │   ├── admin: AdminState        (seed panel, catalog list, edits)
//! │   ├── task_seq / tasks         (async operation slots)
//! │   └── api / users / config     (core handles)
//! └── overlay: Option<Overlay>     (modal overlays)
//! ```
//!
//! State is split between `TuiState` and `Option<Overlay>` so overlay
//! handlers can take `&mut self` and `&mut TuiState` simultaneously.

use std::sync::Arc;

use pokedex_core::api::ApiClient;
use pokedex_core::config::Config;
use pokedex_core::session::UserStore;

use crate::common::{TaskSeq, Tasks};
use crate::features::admin::AdminState;
use crate::features::home::HomeState;
use crate::features::login::LoginFormState;
use crate::overlays::Overlay;

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(config: Config, api: Arc<ApiClient>, users: Arc<UserStore>) -> Self {
        Self {
            tui: TuiState::new(config, api, users),
            overlay: None,
        }
    }
}

/// The screens of the application.
///
/// The login screen is public; everything under the home shell requires a
/// session, and the admin tab additionally requires the Admin scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Home(HomeTab),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeTab {
    Overview,
    Minigame,
    Store,
    Duel,
    Admin,
}

impl HomeTab {
    pub const ALL: [HomeTab; 5] = [
        HomeTab::Overview,
        HomeTab::Minigame,
        HomeTab::Store,
        HomeTab::Duel,
        HomeTab::Admin,
    ];

    pub fn title(self) -> &'static str {
        match self {
            HomeTab::Overview => "Home",
            HomeTab::Minigame => "Minigame",
            HomeTab::Store => "Store",
            HomeTab::Duel => "Duel",
            HomeTab::Admin => "Admin",
        }
    }
}

/// TUI application state (non-overlay).
pub struct TuiState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Current screen.
    pub route: Route,
    /// Login form state.
    pub login: LoginFormState,
    /// Home shell state (profile, active tab).
    pub home: HomeState,
    /// Admin seed panel state.
    pub admin: AdminState,
    /// Task id sequence for async operations.
    pub task_seq: TaskSeq,
    /// Operation slots.
    pub tasks: Tasks,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
    /// Client configuration.
    pub config: Config,
    /// API client (owns the token store).
    pub api: Arc<ApiClient>,
    /// Per-session profile cache.
    pub users: Arc<UserStore>,
}

impl TuiState {
    /// Creates the initial state. A persisted access token drops the user
    /// straight into the home shell, mirroring a reloaded page with a live
    /// session; otherwise the login screen is shown.
    pub fn new(config: Config, api: Arc<ApiClient>, users: Arc<UserStore>) -> Self {
        let route = if api.tokens().is_logged_in() {
            Route::Home(HomeTab::Overview)
        } else {
            Route::Login
        };

        Self {
            should_quit: false,
            route,
            login: LoginFormState::default(),
            home: HomeState::default(),
            admin: AdminState::default(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            spinner_frame: 0,
            config,
            api,
            users,
        }
    }
}
