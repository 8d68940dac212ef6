//! In-memory token store mirrored to durable storage.

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::RwLock;
use tracing::debug;

use super::{Session, Storage, StoredSession};
use crate::error::Error;

/// Holds the current session and mirrors every mutation to a [`Storage`] backend.
///
/// Cloning is cheap and every clone observes the same session. Writes overwrite
/// the whole session, so concurrent refreshes resolve as last-writer-wins.
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn Storage>,
    session: Arc<RwLock<Option<Session>>>,
}

impl TokenStore {
    /// Open a store, populating it from durable storage.
    pub async fn open(storage: Arc<dyn Storage>) -> Result<Self, Error> {
        let session = storage.load().await?.map(Session::from);
        debug!(
            "Token store opened (session present: {})",
            session.is_some()
        );

        Ok(Self {
            storage,
            session: Arc::new(RwLock::new(session)),
        })
    }

    /// Current session, if any.
    pub async fn get(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    pub async fn access_token(&self) -> Option<SecretString> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    pub async fn refresh_token(&self) -> Option<SecretString> {
        self.session
            .read()
            .await
            .as_ref()
            .and_then(|s| s.refresh_token.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Replace the session and persist it.
    pub async fn set(&self, session: Session) -> Result<(), Error> {
        let mut current = self.session.write().await;
        self.storage.save(&StoredSession::from(&session)).await?;
        *current = Some(session);
        Ok(())
    }

    /// Swap in a refreshed access token (and identity token when one was issued).
    ///
    /// If the session was cleared while the refresh was in flight, the refreshed token
    /// is dropped and the store stays logged out.
    pub async fn replace_access(
        &self,
        access_token: String,
        id_token: Option<String>,
    ) -> Result<(), Error> {
        let mut current = self.session.write().await;
        let Some(session) = current.take() else {
            debug!("Session was cleared during refresh, dropping refreshed token");
            return Ok(());
        };

        let session = session.with_access(access_token, id_token);
        let saved = self.storage.save(&StoredSession::from(&session)).await;
        *current = Some(session);
        saved
    }

    /// Drop the session from memory and durable storage.
    pub async fn clear(&self) -> Result<(), Error> {
        let mut current = self.session.write().await;
        *current = None;
        self.storage.clear().await
    }
}
