//! CLI entry and dispatch.

use anyhow::Result;
use clap::Parser;
use pokedex_core::config::Config;

mod commands;

#[derive(Parser)]
#[command(name = "pokedex")]
#[command(version)]
#[command(about = "Terminal client for the Pokémon catalog service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the API base URL from config
    #[arg(long, env = "POKEDEX_BASE_URL")]
    base_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and store the session tokens
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        /// Password (read from stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Log out (clear the stored access token)
    Logout,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the resolved configuration
    Show,
    /// Print the config file path
    Path,
    /// Set the API base URL
    SetUrl {
        #[arg(value_name = "URL")]
        url: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = crate::logging::init();

    let mut config = Config::load()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    let runtime = tokio::runtime::Runtime::new()?;

    match cli.command {
        None => run_ui(&runtime, config),
        Some(Commands::Login { email, password }) => {
            runtime.block_on(commands::login(&config, &email, password))
        }
        Some(Commands::Logout) => commands::logout(),
        Some(Commands::Config { command }) => commands::config(&config, &command),
    }
}

#[cfg(feature = "tui")]
fn run_ui(runtime: &tokio::runtime::Runtime, config: Config) -> Result<()> {
    runtime.block_on(pokedex_tui::run(config))
}

#[cfg(not(feature = "tui"))]
fn run_ui(_runtime: &tokio::runtime::Runtime, _config: Config) -> Result<()> {
    anyhow::bail!("This build has no UI. Use the login/logout/config subcommands.")
}
