//! Durable storage backends for the session token store.

use std::io::ErrorKind as IoErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use super::StoredSession;
use crate::error::{serialization_error, storage_error, Error};

/// Trait for persisting the current session.
///
/// The token store calls `save` or `clear` on every mutation, so implementations
/// always mirror the latest in-memory state.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Load the persisted session, if any.
    async fn load(&self) -> Result<Option<StoredSession>, Error>;

    /// Persist the session, overwriting whatever was stored before.
    async fn save(&self, session: &StoredSession) -> Result<(), Error>;

    /// Remove the persisted session. Clearing an empty storage is not an error.
    async fn clear(&self) -> Result<(), Error>;
}

/// Stores the session as a JSON document on disk.
///
/// Writes go to a sibling temp file that is renamed over the target, so a reader never
/// sees a half-written session. A file that cannot be decoded is discarded on load.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Create the temp file, owner-only on unix before any byte is written.
    async fn create_temp(&self) -> std::io::Result<tokio::fs::File> {
        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);
        options.open(self.temp_path()).await
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn load(&self) -> Result<Option<StoredSession>, Error> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error(e)),
        };

        match serde_json::from_slice(&contents) {
            Ok(session) => {
                debug!("Loaded session from {}", self.path.display());
                Ok(Some(session))
            }
            Err(e) => {
                warn!(
                    "Discarding unreadable session file {}: {e}",
                    self.path.display()
                );
                self.clear().await?;
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &StoredSession) -> Result<(), Error> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(storage_error)?;
        }

        let contents = serde_json::to_vec_pretty(session).map_err(serialization_error)?;
        let mut file = self.create_temp().await.map_err(storage_error)?;
        file.write_all(&contents).await.map_err(storage_error)?;
        file.sync_all().await.map_err(storage_error)?;
        drop(file);

        tokio::fs::rename(self.temp_path(), &self.path)
            .await
            .map_err(storage_error)?;

        debug!("Saved session to {}", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<(), Error> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == IoErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error(e)),
        }
    }
}

/// Keeps the session in process memory only.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    session: Mutex<Option<StoredSession>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already persisted session.
    pub fn with_session(session: StoredSession) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }

    /// Snapshot of what is currently persisted.
    pub fn snapshot(&self) -> Option<StoredSession> {
        self.session
            .lock()
            .map(|session| session.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn replace(&self, value: Option<StoredSession>) {
        match self.session.lock() {
            Ok(mut session) => *session = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn load(&self) -> Result<Option<StoredSession>, Error> {
        Ok(self.snapshot())
    }

    async fn save(&self, session: &StoredSession) -> Result<(), Error> {
        self.replace(Some(session.clone()));
        Ok(())
    }

    async fn clear(&self) -> Result<(), Error> {
        self.replace(None);
        Ok(())
    }
}
