//! Session Token Slot and Gating
//!
//! The only state that survives a restart is the bearer token. The browser
//! client keeps it in local storage; the CLI keeps it in a single file under
//! the user's data directory. Either way it is one opaque string.
//!
//! Gating is a straight presence check: a token sends the user to the article
//! list, no token sends them to login. The token is never validated locally.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Route shown when a token is present
pub const ARTICLES_ROUTE: &str = "/articles";

/// Route shown when no token is present
pub const LOGIN_ROUTE: &str = "/";

/// Where the user lands given the stored token
pub fn landing_route(token: Option<&str>) -> &'static str {
    match token {
        Some(t) if !t.trim().is_empty() => ARTICLES_ROUTE,
        _ => LOGIN_ROUTE,
    }
}

/// A single key/value slot for the session token
pub trait TokenStore: Send + Sync {
    /// Read the stored token, if any
    fn load(&self) -> Result<Option<String>, SessionError>;

    /// Overwrite the stored token
    fn save(&self, token: &str) -> Result<(), SessionError>;

    /// Forget the stored token
    fn clear(&self) -> Result<(), SessionError>;
}

/// Token kept in a plain file
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_local_dir>/quill/token`, or `./.quill_token` when there is no
    /// data directory
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .map(|p| p.join("quill").join("token"))
            .unwrap_or_else(|| PathBuf::from("./.quill_token"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileTokenStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SessionError::Io {
                path: self.path.clone(),
                error: e,
            }),
        }
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SessionError::Io {
                path: parent.to_path_buf(),
                error: e,
            })?;
        }
        std::fs::write(&self.path, token).map_err(|e| SessionError::Io {
            path: self.path.clone(),
            error: e,
        })?;
        tracing::debug!(path = ?self.path, "Saved session token");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Io {
                path: self.path.clone(),
                error: e,
            }),
        }
    }
}

/// Token kept in memory only
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, SessionError> {
        self.token
            .lock()
            .map_err(|e| SessionError::Lock(e.to_string()))
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(self.slot()?.clone())
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        *self.slot()? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.slot()? = None;
        Ok(())
    }
}

/// Errors reading or writing the token slot
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Token file {path:?}: {error}")]
    Io {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("Lock error: {0}")]
    Lock(String),
}
