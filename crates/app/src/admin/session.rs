//! Session persistence
//!
//! A small JSON object on disk, keyed by name. Only the admin flag lives here.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;
use tokio::fs;

/// Key under which the admin flag is stored.
pub const ADMIN_AUTHENTICATED: &str = "admin_authenticated";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session file io error")]
    Io(#[from] std::io::Error),

    #[error("session file is not valid JSON")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the admin flag is set. A missing file means it is not.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn is_authenticated(&self) -> Result<bool, SessionError> {
        let entries = self.load().await?;

        Ok(entries
            .get(ADMIN_AUTHENTICATED)
            .and_then(Value::as_bool)
            .unwrap_or(false))
    }

    /// Set or clear the admin flag, keeping any other keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or written.
    pub async fn set_authenticated(&self, authenticated: bool) -> Result<(), SessionError> {
        let mut entries = self.load().await?;

        if authenticated {
            entries.insert(ADMIN_AUTHENTICATED.to_string(), Value::Bool(true));
        } else {
            entries.remove(ADMIN_AUTHENTICATED);
        }

        let encoded = serde_json::to_vec_pretty(&Value::Object(entries))?;

        fs::write(&self.path, encoded).await?;

        Ok(())
    }

    async fn load(&self) -> Result<Map<String, Value>, SessionError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(error) => return Err(error.into()),
        };

        match serde_json::from_slice(&bytes)? {
            Value::Object(entries) => Ok(entries),
            _ => Ok(Map::new()),
        }
    }
}
