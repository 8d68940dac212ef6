//! Error types for the `domain` layer.
use std::error::Error as StdError;
use std::fmt;
use todo_auth::error::{
    Error as AuthError, ErrorKind as AuthErrorKindInner, HttpErrorKind, TokenErrorKind,
};

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field holds the original error that caused the
/// domain error. `todo-auth` errors are translated here so callers of `domain`
/// never match on `todo-auth` kinds directly.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
    Auth(AuthErrorKind),
    /// Input rejected before any request was made.
    Invalid(String),
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Config,
    Session,
    Other(String),
}

/// Enum representing failures of the remote API.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    Network,
    /// The API answered with a non-success status, optionally explaining why.
    Api {
        status: u16,
        message: Option<String>,
    },
    /// The API answered with a body that could not be understood.
    InvalidResponse,
}

/// Enum representing authentication and authorization failures.
#[derive(Debug, PartialEq)]
pub enum AuthErrorKind {
    /// The session is gone or could not be refreshed; the user has to log in again.
    LoginRequired,
    /// The operation is reserved for premium users.
    PremiumRequired,
    /// The identity provider refused the credentials or code.
    Rejected(Option<String>),
}

pub const LOGIN_REQUIRED_MESSAGE: &str = "Your session has expired, please log in again";
pub const PREMIUM_REQUIRED_MESSAGE: &str = "Tags are available to premium users only";

impl Error {
    pub fn new(error_kind: DomainErrorKind) -> Self {
        Error {
            source: None,
            error_kind,
        }
    }

    pub fn invalid(message: &str) -> Self {
        Self::new(DomainErrorKind::Invalid(message.to_string()))
    }

    pub fn requires_login(&self) -> bool {
        self.error_kind == DomainErrorKind::Auth(AuthErrorKind::LoginRequired)
    }

    /// Message meant for the user, when the error carries one.
    ///
    /// Network failures and internal errors return `None` so callers can fall back to
    /// an operation-specific message.
    pub fn user_message(&self) -> Option<String> {
        match &self.error_kind {
            DomainErrorKind::External(ExternalErrorKind::Api { message, .. }) => message.clone(),
            DomainErrorKind::Auth(AuthErrorKind::Rejected(message)) => message.clone(),
            DomainErrorKind::Auth(AuthErrorKind::LoginRequired) => {
                Some(LOGIN_REQUIRED_MESSAGE.to_string())
            }
            DomainErrorKind::Auth(AuthErrorKind::PremiumRequired) => {
                Some(PREMIUM_REQUIRED_MESSAGE.to_string())
            }
            DomainErrorKind::Invalid(message) => Some(message.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.user_message() {
            Some(message) => write!(f, "Domain Error: {message}"),
            None => write!(f, "Domain Error: {:?}", self.error_kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

// This is where we translate errors from the `todo-auth` layer to the `domain` layer.
impl From<AuthError> for Error {
    fn from(err: AuthError) -> Self {
        let error_kind = if err.requires_login() {
            DomainErrorKind::Auth(AuthErrorKind::LoginRequired)
        } else {
            match &err.error_kind {
                AuthErrorKindInner::Http(HttpErrorKind::BuilderFailed) => {
                    DomainErrorKind::Internal(InternalErrorKind::Other(
                        "Failed to build HTTP request".to_string(),
                    ))
                }
                AuthErrorKindInner::Http(_) => {
                    DomainErrorKind::External(ExternalErrorKind::Network)
                }
                AuthErrorKindInner::Session(_) => {
                    DomainErrorKind::Internal(InternalErrorKind::Session)
                }
                AuthErrorKindInner::Token(TokenErrorKind::Decode) => {
                    DomainErrorKind::Internal(InternalErrorKind::Other(err.to_string()))
                }
                AuthErrorKindInner::Token(_) => DomainErrorKind::Auth(AuthErrorKind::LoginRequired),
            }
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

impl From<reqwest_middleware::Error> for Error {
    fn from(err: reqwest_middleware::Error) -> Self {
        AuthError::from(err).into()
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::InvalidResponse),
            }
        } else {
            AuthError::from(err).into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_auth::error::{storage_error, token_error};

    #[test]
    fn test_refresh_failures_become_login_required() {
        let err: Error = token_error(TokenErrorKind::RefreshFailed, "expired").into();
        assert!(err.requires_login());

        let err: Error = token_error(TokenErrorKind::MissingRefreshToken, "none").into();
        assert!(err.requires_login());
        assert_eq!(err.user_message().as_deref(), Some(LOGIN_REQUIRED_MESSAGE));
    }

    #[test]
    fn test_storage_failures_are_internal_session_errors() {
        let err: Error = storage_error("read-only file system").into();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Session)
        );
        assert!(err.user_message().is_none());
    }

    #[test]
    fn test_api_errors_expose_server_message() {
        let err = Error::new(DomainErrorKind::External(ExternalErrorKind::Api {
            status: 400,
            message: Some("Description is required".to_string()),
        }));

        assert_eq!(
            err.user_message().as_deref(),
            Some("Description is required")
        );
        assert_eq!(err.to_string(), "Domain Error: Description is required");
    }

    #[test]
    fn test_network_errors_have_no_user_message() {
        let err = Error::new(DomainErrorKind::External(ExternalErrorKind::Network));
        assert!(err.user_message().is_none());
    }
}
