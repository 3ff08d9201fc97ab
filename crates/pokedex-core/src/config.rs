//! Configuration management for pokedex.
//!
//! Loads configuration from ${POKEDEX_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the catalog API, e.g. `https://api.example.com`.
    pub base_url: String,

    /// Page size used by the admin catalog list.
    pub page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    const DEFAULT_BASE_URL: &str = "http://localhost:5000";
    const DEFAULT_PAGE_SIZE: u32 = 20;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Saves only the `base_url` field to the config file.
    ///
    /// Creates the file from the default template if it doesn't exist.
    /// Preserves existing fields and comments using toml_edit.
    pub fn save_base_url(base_url: &str) -> Result<()> {
        Self::save_base_url_to(&paths::config_path(), base_url)
    }

    /// Saves only the `base_url` field to a specific config file path.
    pub fn save_base_url_to(path: &Path, base_url: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        // The URL must parse before it is persisted.
        url::Url::parse(base_url).with_context(|| format!("Invalid base URL: {base_url}"))?;

        let contents = if path.exists() {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        doc["base_url"] = value(base_url);

        Self::write_config(path, &doc.to_string())
    }

    fn write_config(path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }
}

/// Returns the default config.toml template with comments.
pub fn default_config_template() -> &'static str {
    r#"# pokedex configuration

# Base URL of the catalog API backend.
base_url = "http://localhost:5000"

# Page size for the admin catalog list.
page_size = 20
"#
}

pub mod paths {
    //! Path resolution for pokedex configuration and data directories.
    //!
    //! POKEDEX_HOME resolution order:
    //! 1. POKEDEX_HOME environment variable (if set)
    //! 2. ~/.config/pokedex (default)

    use std::path::PathBuf;

    /// Returns the pokedex home directory.
    ///
    /// Checks POKEDEX_HOME env var first, falls back to ~/.config/pokedex
    pub fn pokedex_home() -> PathBuf {
        if let Ok(home) = std::env::var("POKEDEX_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("pokedex"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        pokedex_home().join("config.toml")
    }

    /// Returns the path to the persisted token file.
    pub fn tokens_path() -> PathBuf {
        pokedex_home().join("tokens.json")
    }

    /// Returns the directory for log files.
    pub fn logs_dir() -> PathBuf {
        pokedex_home().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: missing file yields defaults.
    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.page_size, 20);
    }

    /// Test: partial file keeps defaults for absent keys.
    #[test]
    fn test_load_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = \"https://api.example.com\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.page_size, 20);
    }

    /// Test: save_base_url creates the file from template and updates the key.
    #[test]
    fn test_save_base_url_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        Config::save_base_url_to(&path, "https://api.example.com").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_url, "https://api.example.com");

        // Template comments survive the edit.
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("# pokedex configuration"));
    }

    /// Test: save_base_url preserves unrelated user keys.
    #[test]
    fn test_save_base_url_preserves_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = \"http://old\"\npage_size = 50\n").unwrap();

        Config::save_base_url_to(&path, "http://new").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_url, "http://new");
        assert_eq!(config.page_size, 50);
    }

    /// Test: invalid URLs are rejected before anything is written.
    #[test]
    fn test_save_base_url_rejects_invalid_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let result = Config::save_base_url_to(&path, "not a url");
        assert!(result.is_err());
        assert!(!path.exists());
    }
}
