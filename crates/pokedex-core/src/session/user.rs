//! Per-session profile cache.
//!
//! The profile is fetched once per session and memoized. Concurrent first
//! callers share a single in-flight request; a failed fetch caches nothing,
//! so the next call refetches.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::api::ApiClient;

/// Scope value that grants access to the admin panel.
pub const ADMIN_SCOPE: &str = "Admin";

/// The current user's profile as returned by `GET /me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub scope: String,
}

impl User {
    /// Returns whether this user may enter the admin panel.
    pub fn is_admin(&self) -> bool {
        self.scope == ADMIN_SCOPE
    }
}

/// Session-scoped cache for the current user's profile.
#[derive(Debug, Default)]
pub struct UserStore {
    cached: std::sync::Mutex<Option<User>>,
    // Serializes first fetches so concurrent callers issue one request.
    fetch_lock: tokio::sync::Mutex<()>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached user without touching the network.
    pub fn cached(&self) -> Option<User> {
        self.lock().clone()
    }

    /// Returns the cached user, fetching and caching it on first use.
    ///
    /// # Errors
    /// Returns an error if the profile fetch fails; nothing is cached then.
    pub async fn me(&self, api: &ApiClient) -> Result<User> {
        if let Some(user) = self.cached() {
            return Ok(user);
        }

        let _guard = self.fetch_lock.lock().await;
        // A concurrent caller may have populated the cache while we waited.
        if let Some(user) = self.cached() {
            return Ok(user);
        }

        let user: User = api.get_json("/me", &[]).await?;
        *self.lock() = Some(user.clone());
        Ok(user)
    }

    /// Drops the cached profile. Called on logout so a later login cannot
    /// observe the previous user's scope.
    pub fn invalidate(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<User>> {
        self.cached.lock().expect("user cache lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(scope: &str) -> User {
        User {
            user_id: "u-1".to_string(),
            email: "ash@example.com".to_string(),
            scope: scope.to_string(),
        }
    }

    /// Test: scope comparison is exact.
    #[test]
    fn test_is_admin() {
        assert!(user("Admin").is_admin());
        assert!(!user("admin").is_admin());
        assert!(!user("Trainer").is_admin());
    }

    /// Test: invalidate drops the cached profile.
    #[test]
    fn test_invalidate() {
        let store = UserStore::new();
        *store.lock() = Some(user("Admin"));
        assert!(store.cached().is_some());

        store.invalidate();
        assert!(store.cached().is_none());
    }
}
