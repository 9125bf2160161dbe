//! Session context carrying the bearer credential
//!
//! The session holds two keys, `token` (bearer credential) and `user`
//! (serialized profile of the signed-in account). It is handed to the
//! [`ApiClient`](crate::client::ApiClient) when that is constructed; the
//! client reads the token before every call and clears both keys when the
//! backend answers 401.
//!
//! # Example
//!
//! ```rust
//! use trailhead::session::{Session, UserProfile};
//!
//! let session = Session::in_memory();
//! assert!(!session.is_signed_in());
//!
//! let profile = UserProfile::new(7, "admin@trail.vn").with_role("ADMIN");
//! session.sign_in("eyJhbGciOi...", &profile).unwrap();
//! assert_eq!(session.token().as_deref(), Some("eyJhbGciOi..."));
//! assert!(session.user().unwrap().is_admin());
//!
//! session.clear().unwrap();
//! assert!(session.user().is_none());
//! ```

mod store;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::error::Result;
use crate::listing::RecordId;

pub use store::{FileStore, MemoryStore, SessionStore};

/// Storage key of the bearer credential
pub const TOKEN_KEY: &str = "token";

/// Storage key of the serialized user profile
pub const USER_KEY: &str = "user";

/// Profile of the signed-in account, as stored under [`USER_KEY`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: RecordId,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl UserProfile {
    pub fn new(id: impl Into<RecordId>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            full_name: None,
            role: None,
            avatar_url: None,
        }
    }

    #[must_use]
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Whether the account may use the admin dashboard
    pub fn is_admin(&self) -> bool {
        self.role
            .as_deref()
            .is_some_and(|role| role.eq_ignore_ascii_case("ADMIN"))
    }
}

/// Shared handle to the session store
///
/// Cloning is cheap; clones see the same storage.
#[derive(Debug, Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Session that lives only as long as the process
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// File-backed session when a path is configured, in-memory otherwise
    pub fn from_config(config: &SessionConfig) -> Result<Self> {
        match &config.path {
            Some(path) => Ok(Self::new(FileStore::open(path)?)),
            None => Ok(Self::in_memory()),
        }
    }

    /// The bearer credential, if a non-empty one is stored
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// The stored profile
    ///
    /// A profile that no longer decodes is reported and treated as absent.
    pub fn user(&self) -> Option<UserProfile> {
        let raw = self.store.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding undecodable stored user profile");
                None
            }
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }

    /// Store the credential and profile handed out by the backend
    pub fn sign_in(&self, token: impl Into<String>, profile: &UserProfile) -> Result<()> {
        self.store.set(TOKEN_KEY, token.into())?;
        self.store.set(USER_KEY, serde_json::to_string(profile)?)?;
        tracing::info!(user = %profile.email, "Session signed in");
        Ok(())
    }

    /// Replace only the credential, e.g. after a refresh
    pub fn set_token(&self, token: impl Into<String>) -> Result<()> {
        self.store.set(TOKEN_KEY, token.into())
    }

    /// Forget the credential and the profile
    ///
    /// Both keys are always attempted; the first failure is returned.
    pub fn clear(&self) -> Result<()> {
        let token = self.store.remove(TOKEN_KEY);
        let user = self.store.remove(USER_KEY);
        token.and(user)?;
        tracing::info!("Session cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_empty_token_is_not_signed_in() {
        let session = Session::in_memory();
        session.set_token("").unwrap();
        assert!(session.token().is_none());
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_sign_in_and_clear() {
        let session = Session::in_memory();
        let profile = UserProfile::new("u-1", "hoa@trail.vn").with_full_name("Le Hoa");
        session.sign_in("tok", &profile).unwrap();

        assert!(session.is_signed_in());
        assert_eq!(session.user(), Some(profile));

        session.clear().unwrap();
        assert!(session.token().is_none());
        assert!(session.user().is_none());
    }

    /// Store whose token key cannot be removed
    #[derive(Debug, Default)]
    struct StuckTokenStore {
        inner: MemoryStore,
    }

    impl SessionStore for StuckTokenStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: String) -> Result<()> {
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            if key == TOKEN_KEY {
                return Err(crate::Error::Session("token is locked".to_string()));
            }
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_clear_removes_profile_when_token_removal_fails() {
        let session = Session::new(StuckTokenStore::default());
        session
            .sign_in("tok", &UserProfile::new(1, "a@b.c"))
            .unwrap();

        let err = session.clear().unwrap_err();
        assert!(matches!(err, crate::Error::Session(_)));
        assert!(session.user().is_none());
    }

    #[test]
    fn test_clones_share_storage() {
        let session = Session::in_memory();
        let clone = session.clone();
        session.set_token("shared").unwrap();
        assert_eq!(clone.token().as_deref(), Some("shared"));
    }

    #[test]
    fn test_corrupt_profile_reads_as_absent() {
        let store = MemoryStore::new();
        store.set(USER_KEY, "{broken".to_string()).unwrap();
        let session = Session::new(store);
        assert!(session.user().is_none());
    }

    #[test]
    fn test_profile_wire_format() {
        let profile = UserProfile::new(3, "a@b.c").with_role("RANGER");
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 3, "email": "a@b.c", "role": "RANGER" }));
        assert!(!profile.is_admin());
    }

    #[test]
    fn test_from_config_file_backed() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("session.json");
        let config = SessionConfig {
            path: Some(path.clone()),
        };

        let session = Session::from_config(&config).unwrap();
        session.set_token("persisted").unwrap();

        let reopened = Session::from_config(&config).unwrap();
        assert_eq!(reopened.token().as_deref(), Some("persisted"));
        assert!(path.exists());
    }

    #[test]
    fn test_from_config_in_memory() {
        let session = Session::from_config(&SessionConfig::default()).unwrap();
        assert!(!session.is_signed_in());
    }
}
