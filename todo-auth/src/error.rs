//! Error types for the `todo-auth` crate.
//!
//! Follows the same pattern as domain::error with a root Error struct and error kind enums.

use std::error::Error as StdError;
use std::fmt;

/// Top-level error type for todo-auth crate.
/// Holds error kind and optional source for error chaining.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// Major categories of errors in todo-auth.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    Session(SessionErrorKind),
    Token(TokenErrorKind),
    Http(HttpErrorKind),
}

/// Errors from the session token store and its durable storage.
#[derive(Debug, PartialEq)]
pub enum SessionErrorKind {
    Storage,
    Serialization,
}

/// Errors from token decoding and refresh.
#[derive(Debug, PartialEq)]
pub enum TokenErrorKind {
    /// The token is not a decodable JWT.
    Decode,
    /// A 401 was received and there is no refresh token to recover with.
    MissingRefreshToken,
    /// The refresh endpoint rejected the refresh token or could not be reached.
    RefreshFailed,
}

/// Errors from HTTP client operations.
#[derive(Debug, PartialEq)]
pub enum HttpErrorKind {
    BuilderFailed,
    RequestFailed,
    Network,
}

impl Error {
    /// True when the session is gone and the user has to log in again.
    pub fn requires_login(&self) -> bool {
        matches!(
            self.error_kind,
            ErrorKind::Token(TokenErrorKind::MissingRefreshToken)
                | ErrorKind::Token(TokenErrorKind::RefreshFailed)
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            ErrorKind::Session(kind) => write!(f, "Session error: {:?}", kind),
            ErrorKind::Token(kind) => write!(f, "Token error: {:?}", kind),
            ErrorKind::Http(kind) => write!(f, "HTTP error: {:?}", kind),
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

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let error_kind = if err.is_builder() {
            ErrorKind::Http(HttpErrorKind::BuilderFailed)
        } else if err.is_request() {
            ErrorKind::Http(HttpErrorKind::RequestFailed)
        } else {
            ErrorKind::Http(HttpErrorKind::Network)
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

impl From<reqwest_middleware::Error> for Error {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(err) => err.into(),
            // Errors raised by our own middleware travel through anyhow; unwrap them again.
            reqwest_middleware::Error::Middleware(err) => match err.downcast::<Error>() {
                Ok(err) => err,
                Err(err) => Error {
                    source: Some(err.into()),
                    error_kind: ErrorKind::Http(HttpErrorKind::Network),
                },
            },
        }
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: ErrorKind::Token(TokenErrorKind::Decode),
        }
    }
}

/// Helper function to create token errors.
pub fn token_error(kind: TokenErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Token(kind),
    }
}

/// Helper function to create session storage errors.
pub fn storage_error(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Error {
    Error {
        source: Some(err.into()),
        error_kind: ErrorKind::Session(SessionErrorKind::Storage),
    }
}

/// Helper function to create session serialization errors.
pub fn serialization_error(err: serde_json::Error) -> Error {
    Error {
        source: Some(Box::new(err)),
        error_kind: ErrorKind::Session(SessionErrorKind::Serialization),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_login_for_refresh_failures() {
        assert!(token_error(TokenErrorKind::MissingRefreshToken, "none").requires_login());
        assert!(token_error(TokenErrorKind::RefreshFailed, "rejected").requires_login());
        assert!(!token_error(TokenErrorKind::Decode, "garbage").requires_login());
        assert!(!storage_error("disk full").requires_login());
    }

    #[test]
    fn test_middleware_error_downcasts_to_crate_error() {
        let err = reqwest_middleware::Error::Middleware(anyhow::Error::new(token_error(
            TokenErrorKind::MissingRefreshToken,
            "no refresh token",
        )));

        let err: Error = err.into();
        assert_eq!(
            err.error_kind,
            ErrorKind::Token(TokenErrorKind::MissingRefreshToken)
        );
    }

    #[test]
    fn test_foreign_middleware_error_is_network() {
        let err = reqwest_middleware::Error::Middleware(anyhow::anyhow!("boom"));

        let err: Error = err.into();
        assert_eq!(err.error_kind, ErrorKind::Http(HttpErrorKind::Network));
    }
}
