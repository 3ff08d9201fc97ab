//! Token storage and retrieval.
//!
//! Stores the session tokens in `<base>/tokens.json` with restricted
//! permissions (0600). Tokens are never logged.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// Persisted token pair. At most one of each exists at a time.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TokenCache {
    /// The access token (short-lived).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// The refresh token (long-lived).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// File-backed token store.
///
/// The in-memory cache is the source of truth for the running session and is
/// written back to disk on every mutation. Presence of an access token is
/// what "logged in" means; there is no expiry checking here, validity is
/// only discovered when a request fails.
#[derive(Debug)]
pub struct TokenStore {
    path: PathBuf,
    cache: Mutex<TokenCache>,
}

impl TokenStore {
    /// Opens the token store at the default location.
    ///
    /// # Errors
    /// Returns an error if an existing token file cannot be read or parsed.
    pub fn open() -> Result<Self> {
        Self::open_at(paths::tokens_path())
    }

    /// Opens a token store at a specific path.
    /// Starts empty if the file doesn't exist.
    pub fn open_at(path: PathBuf) -> Result<Self> {
        let cache = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read tokens from {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse tokens from {}", path.display()))?
        } else {
            TokenCache::default()
        };

        Ok(Self {
            path,
            cache: Mutex::new(cache),
        })
    }

    /// Stores both tokens and persists them.
    pub fn set(&self, access: &str, refresh: &str) -> Result<()> {
        let snapshot = {
            let mut cache = self.lock();
            cache.access_token = Some(access.to_string());
            cache.refresh_token = Some(refresh.to_string());
            cache.clone()
        };
        self.save(&snapshot)
    }

    /// Returns the current access token, if any.
    pub fn access(&self) -> Option<String> {
        self.lock().access_token.clone()
    }

    /// Returns the current refresh token, if any.
    pub fn refresh_token(&self) -> Option<String> {
        self.lock().refresh_token.clone()
    }

    /// Removes the access token only. The refresh token stays in place.
    pub fn clear(&self) -> Result<()> {
        let snapshot = {
            let mut cache = self.lock();
            cache.access_token = None;
            cache.clone()
        };
        self.save(&snapshot)
    }

    /// Returns whether an access token is present.
    pub fn is_logged_in(&self) -> bool {
        self.lock().access_token.is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TokenCache> {
        self.cache.lock().expect("token cache lock poisoned")
    }

    /// Writes the token file with restricted permissions (0600).
    fn save(&self, cache: &TokenCache) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(cache).context("Failed to serialize tokens")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> TokenStore {
        TokenStore::open_at(dir.path().join("tokens.json")).unwrap()
    }

    /// Test: set stores both tokens and is_logged_in flips.
    #[test]
    fn test_set_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(!store.is_logged_in());
        store.set("access-1", "refresh-1").unwrap();

        assert!(store.is_logged_in());
        assert_eq!(store.access().as_deref(), Some("access-1"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
    }

    /// Test: clear removes the access token only.
    #[test]
    fn test_clear_keeps_refresh_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set("access-1", "refresh-1").unwrap();

        store.clear().unwrap();

        assert!(!store.is_logged_in());
        assert_eq!(store.access(), None);
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
    }

    /// Test: tokens survive a reopen (page-reload equivalent).
    #[test]
    fn test_tokens_persist_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");

        TokenStore::open_at(path.clone())
            .unwrap()
            .set("access-1", "refresh-1")
            .unwrap();

        let reopened = TokenStore::open_at(path).unwrap();
        assert!(reopened.is_logged_in());
        assert_eq!(reopened.access().as_deref(), Some("access-1"));
        assert_eq!(reopened.refresh_token().as_deref(), Some("refresh-1"));
    }

    /// Test: set overwrites the previous pair (at most one of each).
    #[test]
    fn test_set_replaces_previous_pair() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set("access-1", "refresh-1").unwrap();
        store.set("access-2", "refresh-2").unwrap();

        assert_eq!(store.access().as_deref(), Some("access-2"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-2"));
    }

    /// Test: token file has restricted permissions on Unix.
    #[cfg(unix)]
    #[test]
    fn test_token_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        TokenStore::open_at(path.clone())
            .unwrap()
            .set("access-1", "refresh-1")
            .unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
