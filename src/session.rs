//! Storage of the bearer token shared by every outgoing request.
//!
//! The adapter never owns the token: a [`SessionStore`] is handed to it at
//! construction, written by the login call and cleared at logout.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::domain::types::AccessToken;
use crate::repository::errors::RepositoryResult;

pub trait SessionStore: Send + Sync {
    /// Current token, if a session is open.
    fn token(&self) -> Option<AccessToken>;
    fn set_token(&self, token: AccessToken) -> RepositoryResult<()>;
    fn clear(&self) -> RepositoryResult<()>;
}

/// Process-wide token held in memory.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    token: RwLock<Option<AccessToken>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: AccessToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn token(&self) -> Option<AccessToken> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_token(&self, token: AccessToken) -> RepositoryResult<()> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
        Ok(())
    }

    fn clear(&self) -> RepositoryResult<()> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Owner read/write only: the file holds a bearer token.
#[cfg(unix)]
const SESSION_FILE_MODE: u32 = 0o600;

/// Token persisted in a single file so that separate processes share a session.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<AccessToken> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => AccessToken::new(contents).ok(),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Failed to read session file {}: {e}", self.path.display());
                None
            }
        }
    }

    fn set_token(&self, token: AccessToken) -> RepositoryResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(SESSION_FILE_MODE);
        }
        let mut file = options.open(&self.path)?;
        // `mode` only applies on creation; tighten files left by older runs.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(SESSION_FILE_MODE))?;
        }
        file.write_all(token.as_str().as_bytes())?;
        Ok(())
    }

    fn clear(&self) -> RepositoryResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
