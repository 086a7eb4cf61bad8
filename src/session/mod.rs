//! Session Store
//!
//! Holds the API token for the signed-in user. The store is created once at
//! the application root and handed to every view; clones share the same
//! token.
//!
//! There is no client-side expiry. A protected call that comes back with
//! HTTP 401 invalidates the session, and the next protected view redirects
//! to the login page.

pub mod storage;

pub use storage::{MemoryTokenStorage, TokenStorage, TOKEN_STORAGE_KEY};

#[cfg(feature = "native")]
pub use storage::FileTokenStorage;

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Token persistence errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Token storage {path:?} failed: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Token storage unavailable: {0}")]
    Unavailable(String),

    #[error("Token storage lock poisoned")]
    Poisoned,
}

/// Shared handle to the current session
#[derive(Clone)]
pub struct SessionStore {
    token: Arc<RwLock<Option<String>>>,
    storage: Arc<dyn TokenStorage>,
}

impl SessionStore {
    /// Open a session backed by `storage`, restoring any saved token.
    pub fn open(storage: impl TokenStorage + 'static) -> Self {
        let token = match storage.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("Could not restore session: {}", e);
                None
            }
        };

        if token.is_some() {
            tracing::debug!("Restored saved session");
        }

        Self {
            token: Arc::new(RwLock::new(token)),
            storage: Arc::new(storage),
        }
    }

    /// Session that lives only as long as the process
    pub fn ephemeral() -> Self {
        Self::open(MemoryTokenStorage::new())
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().map(|t| t.is_some()).unwrap_or(false)
    }

    /// Remember `token` in memory and in durable storage.
    ///
    /// A storage failure is logged; the in-memory session still starts.
    pub fn login(&self, token: impl Into<String>) {
        let token = token.into();

        if let Err(e) = self.storage.store(&token) {
            tracing::warn!("Could not persist session token: {}", e);
        }
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token);
        }

        tracing::info!("Session started");
    }

    /// Forget the token everywhere.
    pub fn logout(&self) {
        if let Err(e) = self.storage.clear() {
            tracing::warn!("Could not clear stored session token: {}", e);
        }
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }

        tracing::info!("Session ended");
    }

    /// Drop the session after the server rejected the token.
    pub fn invalidate(&self, reason: &str) {
        tracing::warn!(reason, "Session rejected by server, signing out");
        self.logout();
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_persists_token() {
        let storage = MemoryTokenStorage::new();
        let session = SessionStore::open(storage.clone());
        assert!(!session.is_authenticated());

        session.login("abc123");
        assert_eq!(session.token().as_deref(), Some("abc123"));
        assert_eq!(storage.peek().as_deref(), Some("abc123"));

        // Reads keep returning the token until logout
        assert_eq!(session.token().as_deref(), Some("abc123"));
        assert!(session.clone().is_authenticated());
    }

    #[test]
    fn test_logout_clears_memory_and_storage() {
        let storage = MemoryTokenStorage::with_token("abc123");
        let session = SessionStore::open(storage.clone());
        assert_eq!(session.token().as_deref(), Some("abc123"));

        session.logout();
        assert_eq!(session.token(), None);
        assert_eq!(storage.peek(), None);
    }

    #[test]
    fn test_restore_on_open() {
        let storage = MemoryTokenStorage::new();
        SessionStore::open(storage.clone()).login("persisted");

        let reopened = SessionStore::open(storage);
        assert_eq!(reopened.token().as_deref(), Some("persisted"));
    }

    #[test]
    fn test_clones_share_state() {
        let session = SessionStore::ephemeral();
        let other = session.clone();

        session.login("t");
        assert!(other.is_authenticated());

        other.invalidate("test");
        assert!(!session.is_authenticated());
    }

    struct BrokenStorage;

    impl TokenStorage for BrokenStorage {
        fn load(&self) -> Result<Option<String>, SessionError> {
            Err(SessionError::Unavailable("disk on fire".into()))
        }
        fn store(&self, _token: &str) -> Result<(), SessionError> {
            Err(SessionError::Unavailable("disk on fire".into()))
        }
        fn clear(&self) -> Result<(), SessionError> {
            Err(SessionError::Unavailable("disk on fire".into()))
        }
    }

    #[test]
    fn test_storage_failures_do_not_block_memory_session() {
        let session = SessionStore::open(BrokenStorage);
        assert!(!session.is_authenticated());

        session.login("t");
        assert!(session.is_authenticated());

        session.logout();
        assert!(!session.is_authenticated());
    }
}
