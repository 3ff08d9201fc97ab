//! Subcommand implementations.

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use pokedex_core::api::{ApiClient, status_of};
use pokedex_core::config::{Config, paths};
use pokedex_core::session::TokenStore;

use super::ConfigCommands;

pub async fn login(config: &Config, email: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };
    if password.is_empty() {
        anyhow::bail!("Password must not be empty");
    }

    let tokens = Arc::new(TokenStore::open()?);
    let api = ApiClient::new(&config.base_url, tokens);

    match api.login(email, &password).await {
        Ok(()) => {
            println!("Logged in as {email}");
            Ok(())
        }
        Err(err) if status_of(&err).is_some() => {
            tracing::warn!("login rejected: {err:#}");
            anyhow::bail!("Invalid email or password")
        }
        Err(err) => Err(err),
    }
}

pub fn logout() -> Result<()> {
    let tokens = TokenStore::open()?;
    if tokens.is_logged_in() {
        tokens.clear()?;
        println!("Logged out.");
    } else {
        println!("No active session.");
    }
    Ok(())
}

pub fn config(config: &Config, command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            println!("base_url = {}", config.base_url);
            println!("page_size = {}", config.page_size);
        }
        ConfigCommands::Path => {
            println!("{}", paths::config_path().display());
        }
        ConfigCommands::SetUrl { url } => {
            Config::save_base_url(url)?;
            println!("base_url set to {url}");
        }
    }
    Ok(())
}

fn read_password() -> Result<String> {
    eprint!("Password: ");
    std::io::stderr().flush().ok();

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
