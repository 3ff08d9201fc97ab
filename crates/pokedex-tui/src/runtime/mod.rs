//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here. The
//! reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Async handlers send `UiEvent`s directly to `inbox_tx`; the runtime drains
//! `inbox_rx` each frame. This eliminates per-operation receivers.

mod handlers;

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event;
use pokedex_core::api::ApiClient;
use pokedex_core::config::Config;
use pokedex_core::session::UserStore;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::common::{TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Target frame rate while something is in flight (~60fps).
pub const FRAME_DURATION: std::time::Duration = std::time::Duration::from_millis(16);

/// Poll duration when idle. Longer timeout reduces CPU usage.
pub const IDLE_POLL_DURATION: std::time::Duration = std::time::Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop or panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    last_tick: std::time::Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime and takes over the terminal.
    pub fn new(config: Config, api: Arc<ApiClient>, users: Arc<UserStore>) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let state = AppState::new(config, api, users);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            inbox_tx,
            inbox_rx,
            last_tick: std::time::Instant::now(),
        })
    }

    /// Runs the main event loop until the user quits.
    pub fn run(&mut self) -> Result<()> {
        let effects = update::startup(&mut self.state);
        self.execute_effects(effects);
        self.event_loop()
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.tui.should_quit {
            let events = self.collect_events()?;

            for event in events {
                let marks_dirty = matches!(&event, UiEvent::Tick | UiEvent::Terminal(_));
                let effects = update::update(&mut self.state, event);
                if marks_dirty {
                    dirty = true;
                }
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects events from the inbox, the terminal, and the tick timer.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Fast polling while anything is in flight keeps the spinner moving;
        // otherwise slow polling saves CPU.
        let busy =
            self.state.tui.tasks.is_any_running() || !self.state.tui.admin.saving.is_empty();
        let tick_interval = if busy {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Block until the next tick is due, unless events are waiting.
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            std::time::Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(std::time::Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = std::time::Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async handler, sending its result event to the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    /// Like `spawn_effect`, but announces the task so its slot is occupied
    /// before the result can arrive.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let _ = self.inbox_tx.send(UiEvent::TaskStarted {
            kind,
            started: TaskStarted { id },
        });
        self.spawn_effect(f);
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        let api = Arc::clone(&self.state.tui.api);
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }

            UiEffect::Logout => {
                if let Err(err) = api.logout() {
                    tracing::warn!("failed to clear stored session: {err:#}");
                }
                self.state.tui.users.invalidate();
            }

            UiEffect::SubmitLogin {
                task,
                email,
                password,
            } => {
                self.spawn_task(TaskKind::Login, task, move || {
                    handlers::login(api, task, email, password)
                });
            }

            UiEffect::FetchProfile { task } => {
                let users = Arc::clone(&self.state.tui.users);
                self.spawn_task(TaskKind::Profile, task, move || {
                    handlers::fetch_profile(api, users, task)
                });
            }

            UiEffect::CheckAdminGate { task } => {
                let users = Arc::clone(&self.state.tui.users);
                self.spawn_task(TaskKind::AdminGate, task, move || {
                    handlers::admin_gate(api, users, task)
                });
            }

            UiEffect::CheckSeedStatus { task } => {
                self.spawn_task(TaskKind::SeedStatus, task, move || {
                    handlers::seed_status(api, task)
                });
            }

            UiEffect::RunSeed { task } => {
                self.spawn_task(TaskKind::SeedAction, task, move || {
                    handlers::run_seed(api, task)
                });
            }

            UiEffect::RunReseed { task } => {
                self.spawn_task(TaskKind::SeedAction, task, move || {
                    handlers::run_reseed(api, task)
                });
            }

            UiEffect::LoadPage {
                task,
                page_no,
                page_size,
                filter,
            } => {
                self.spawn_task(TaskKind::ListPage, task, move || {
                    handlers::load_page(api, task, filter, page_no, page_size)
                });
            }

            UiEffect::SaveRow { update } => {
                // Saves are tracked per row id, not in the task table.
                self.spawn_effect(move || handlers::save_row(api, update));
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
