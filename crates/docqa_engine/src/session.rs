//! Credential storage and the session handle shared by every component that
//! needs the current access token.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use client_logging::{client_debug, client_warn};
use thiserror::Error;

use crate::persist::{replace_private_file, PersistError};
use crate::TokenPair;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not encode credentials: {0}")]
    Encode(String),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Holds the access/refresh pair. Last write wins; there is no expiry
/// tracking and no rotation.
pub trait CredentialStore: Send + Sync {
    fn save(&self, access_token: &str, refresh_token: &str) -> Result<(), StoreError>;

    /// Both stored tokens, if any.
    fn load(&self) -> Option<TokenPair>;

    /// Removes every stored value.
    fn clear(&self) -> Result<(), StoreError>;

    /// The stored access token, if any.
    fn read(&self) -> Option<String> {
        self.load().map(|pair| pair.access)
    }
}

#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<Option<TokenPair>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn save(&self, access_token: &str, refresh_token: &str) -> Result<(), StoreError> {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(TokenPair {
            access: access_token.to_string(),
            refresh: refresh_token.to_string(),
        });
        Ok(())
    }

    fn load(&self) -> Option<TokenPair> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Persists the pair as a RON file so it survives restarts.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialStore for FileCredentialStore {
    fn save(&self, access_token: &str, refresh_token: &str) -> Result<(), StoreError> {
        let pair = TokenPair {
            access: access_token.to_string(),
            refresh: refresh_token.to_string(),
        };
        let content = ron::ser::to_string_pretty(&pair, ron::ser::PrettyConfig::new())
            .map_err(|err| StoreError::Encode(err.to_string()))?;

        replace_private_file(&self.path, &content)?;
        client_debug!("Saved credentials to {:?}", self.path);
        Ok(())
    }

    fn load(&self) -> Option<TokenPair> {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                client_warn!("Failed to read credentials from {:?}: {}", self.path, err);
                return None;
            }
        };

        match ron::from_str(&content) {
            Ok(pair) => Some(pair),
            Err(err) => {
                client_warn!("Failed to parse credentials from {:?}: {}", self.path, err);
                None
            }
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Explicitly injected handle to the process-wide credential store.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn CredentialStore>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryCredentialStore::new()))
    }

    /// The current access token. An empty stored token counts as absent.
    pub fn access_token(&self) -> Option<String> {
        self.store.read().filter(|token| !token.is_empty())
    }

    /// Presence check only: signature and expiry are never inspected.
    pub fn has_token(&self) -> bool {
        self.access_token().is_some()
    }

    pub fn credentials(&self) -> Option<TokenPair> {
        self.store.load()
    }

    pub fn save(&self, access_token: &str, refresh_token: &str) -> Result<(), StoreError> {
        self.store.save(access_token, refresh_token)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.clear()
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("has_token", &self.has_token())
            .finish()
    }
}
