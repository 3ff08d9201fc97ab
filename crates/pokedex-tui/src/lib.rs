//! Full-screen TUI for the pokedex client.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};
use std::sync::Arc;

use anyhow::Result;
use pokedex_core::api::ApiClient;
use pokedex_core::config::Config;
use pokedex_core::session::{TokenStore, UserStore};
pub use runtime::TuiRuntime;

/// Runs the interactive client.
///
/// Opens the persisted token store, builds the API client, and hands control
/// to the TUI runtime until the user quits.
pub async fn run(config: Config) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!("The pokedex UI requires a terminal.");
    }

    let tokens = Arc::new(TokenStore::open()?);
    let api = Arc::new(ApiClient::new(&config.base_url, tokens));
    let users = Arc::new(UserStore::new());

    let mut runtime = TuiRuntime::new(config, api, users)?;
    runtime.run()
}
