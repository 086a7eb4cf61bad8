//! Durable Token Storage
//!
//! Backends that keep the session token across restarts.

use std::sync::{Arc, Mutex};

use super::SessionError;

/// Fixed key (or file name) under which the token is persisted
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Somewhere the session token survives a reload
pub trait TokenStorage: Send + Sync {
    /// Previously stored token, if any
    fn load(&self) -> Result<Option<String>, SessionError>;

    fn store(&self, token: &str) -> Result<(), SessionError>;

    fn clear(&self) -> Result<(), SessionError>;
}

/// Process-local storage for tests and `--ephemeral` runs
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `token`, as if saved by an earlier run
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(token.into()))),
        }
    }

    /// Current stored value, bypassing any session
    pub fn peek(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Result<Option<String>, SessionError> {
        let slot = self.slot.lock().map_err(|_| SessionError::Poisoned)?;
        Ok(slot.clone())
    }

    fn store(&self, token: &str) -> Result<(), SessionError> {
        let mut slot = self.slot.lock().map_err(|_| SessionError::Poisoned)?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut slot = self.slot.lock().map_err(|_| SessionError::Poisoned)?;
        *slot = None;
        Ok(())
    }
}

#[cfg(feature = "native")]
pub use file::FileTokenStorage;

#[cfg(feature = "native")]
mod file {
    use std::io::ErrorKind;
    use std::path::{Path, PathBuf};

    use super::{SessionError, TokenStorage, TOKEN_STORAGE_KEY};

    /// Token kept in a single file, by default under the user's data dir
    #[derive(Debug, Clone)]
    pub struct FileTokenStorage {
        path: PathBuf,
    }

    impl FileTokenStorage {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// `<data_local_dir>/quickcard/token`, or `./.quickcard/token`
        pub fn default_path() -> PathBuf {
            dirs::data_local_dir()
                .map(|p| p.join("quickcard"))
                .unwrap_or_else(|| PathBuf::from(".quickcard"))
                .join(TOKEN_STORAGE_KEY)
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl TokenStorage for FileTokenStorage {
        fn load(&self) -> Result<Option<String>, SessionError> {
            match std::fs::read_to_string(&self.path) {
                Ok(content) => {
                    let token = content.trim();
                    Ok((!token.is_empty()).then(|| token.to_string()))
                }
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(SessionError::Io {
                    path: self.path.clone(),
                    error: e.to_string(),
                }),
            }
        }

        fn store(&self, token: &str) -> Result<(), SessionError> {
            let io_err = |e: std::io::Error| SessionError::Io {
                path: self.path.clone(),
                error: e.to_string(),
            };

            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
            std::fs::write(&self.path, token).map_err(io_err)?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                    .map_err(io_err)?;
            }

            Ok(())
        }

        fn clear(&self) -> Result<(), SessionError> {
            match std::fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(SessionError::Io {
                    path: self.path.clone(),
                    error: e.to_string(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let storage = MemoryTokenStorage::new();
        assert_eq!(storage.load().unwrap(), None);

        storage.store("abc").unwrap();
        assert_eq!(storage.load().unwrap().as_deref(), Some("abc"));

        storage.clear().unwrap();
        assert_eq!(storage.peek(), None);
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path().join("nested").join("token"));

        assert_eq!(storage.load().unwrap(), None);
        storage.clear().unwrap();

        storage.store("secret-token").unwrap();
        assert_eq!(storage.load().unwrap().as_deref(), Some("secret-token"));

        // A fresh handle on the same path sees the stored token
        let reopened = FileTokenStorage::new(storage.path());
        assert_eq!(reopened.load().unwrap().as_deref(), Some("secret-token"));

        reopened.clear().unwrap();
        assert_eq!(storage.load().unwrap(), None);
    }
}
