//! Session token types.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// The token triple handed out by the identity provider.
///
/// A session only exists while an access token is present. The refresh and
/// identity tokens are optional because a stored session may lack them.
#[derive(Debug, Clone)]
pub struct Session {
    /// Access token sent as the bearer credential.
    pub access_token: SecretString,
    /// Refresh token for obtaining new access tokens.
    pub refresh_token: Option<SecretString>,
    /// Identity token, kept alongside the access token.
    pub id_token: Option<SecretString>,
}

impl Session {
    pub fn new(
        access_token: String,
        refresh_token: Option<String>,
        id_token: Option<String>,
    ) -> Self {
        Self {
            access_token: SecretString::new(access_token),
            refresh_token: refresh_token.map(SecretString::new),
            id_token: id_token.map(SecretString::new),
        }
    }

    /// Replace the access and identity tokens after a refresh.
    /// The refresh token is kept as-is.
    pub fn with_access(mut self, access_token: String, id_token: Option<String>) -> Self {
        self.access_token = SecretString::new(access_token);
        if id_token.is_some() {
            self.id_token = id_token.map(SecretString::new);
        }
        self
    }
}

/// Plain serializable form of a [`Session`] used for durable storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
}

impl From<&Session> for StoredSession {
    fn from(session: &Session) -> Self {
        Self {
            access_token: session.access_token.expose_secret().clone(),
            refresh_token: session
                .refresh_token
                .as_ref()
                .map(|t| t.expose_secret().clone()),
            id_token: session.id_token.as_ref().map(|t| t.expose_secret().clone()),
        }
    }
}

impl From<StoredSession> for Session {
    fn from(stored: StoredSession) -> Self {
        Session::new(stored.access_token, stored.refresh_token, stored.id_token)
    }
}
