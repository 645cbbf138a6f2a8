//! Persisted session token.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

#[derive(Serialize, Deserialize)]
struct StoredSession {
    token: String,
}

/// The current login, mirrored to a JSON file so it survives restarts.
#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    token: Option<String>,
}

impl Session {
    /// Read the session file. A missing or unreadable file means logged out.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ClientError> {
        let path = path.into();
        let token = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<StoredSession>(&raw) {
                Ok(stored) => Some(stored.token),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring corrupt session file");
                    None
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(ClientError::Session(e.to_string())),
        };

        Ok(Self { path, token })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// Remember `token` and write it to disk.
    pub fn store(&mut self, token: String) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ClientError::Session(e.to_string()))?;
        }
        let raw = serde_json::to_string(&StoredSession {
            token: token.clone(),
        })
        .map_err(|e| ClientError::Session(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| ClientError::Session(e.to_string()))?;

        self.token = Some(token);
        Ok(())
    }

    /// Forget the token (logout).
    pub fn clear(&mut self) -> Result<(), ClientError> {
        self.token = None;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Session(e.to_string())),
        }
    }
}

#[cfg(test)]
pub(crate) fn scratch_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("brawl-test-{}", uuid::Uuid::new_v4()))
        .join("session.json")
}
