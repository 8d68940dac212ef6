//! Client-side decoding of access token payloads.
//!
//! Tokens are issued and verified by the identity provider; the client only reads the
//! claims to learn who is logged in and which groups they belong to. Signatures and
//! expiry are not validated here.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{token_error, Error, ErrorKind, TokenErrorKind};

/// Claims read from an access token.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Claims {
    /// Subject identifier.
    pub sub: Option<String>,
    pub username: Option<String>,
    #[serde(rename = "cognito:username")]
    pub cognito_username: Option<String>,
    pub name: Option<String>,
    /// Group memberships.
    #[serde(rename = "cognito:groups", default)]
    pub groups: Vec<String>,
    /// Expiry as seconds since the Unix epoch.
    pub exp: Option<i64>,
}

impl Claims {
    /// Preferred login name: `username`, falling back to `cognito:username`.
    pub fn username(&self) -> Option<&str> {
        self.username
            .as_deref()
            .or(self.cognito_username.as_deref())
    }

    /// Preferred display name: `name`, falling back to `cognito:username`.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.cognito_username.as_deref())
    }

    pub fn in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    /// True when the token carries an expiry at or before `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().map(|exp| exp <= now).unwrap_or(false)
    }
}

/// Decode the claims of a JWT without verifying its signature or expiry.
pub fn decode_claims(token: &str) -> Result<Claims, Error> {
    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_header), Some(payload), Some(_signature), None) => payload,
        _ => {
            return Err(token_error(
                TokenErrorKind::Decode,
                "Token is not a three-part JWT",
            ))
        }
    };

    // Some issuers keep the padding; the URL-safe alphabet is the same either way.
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    serde_json::from_slice(&bytes).map_err(|err| Error {
        source: Some(Box::new(err)),
        error_kind: ErrorKind::Token(TokenErrorKind::Decode),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Build an unsigned JWT carrying `claims`.
    fn token(claims: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{header}.{payload}.c2lnbmF0dXJl")
    }

    #[test]
    fn test_decode_cognito_style_claims() {
        let claims = decode_claims(&token(json!({
            "sub": "abc-123",
            "cognito:username": "jdoe",
            "cognito:groups": ["Premium-user"],
            "exp": 1,
        })))
        .unwrap();

        assert_eq!(claims.sub.as_deref(), Some("abc-123"));
        assert_eq!(claims.username(), Some("jdoe"));
        assert_eq!(claims.display_name(), Some("jdoe"));
        assert!(claims.in_group("Premium-user"));
        assert!(!claims.in_group("Admin"));
    }

    #[test]
    fn test_explicit_username_and_name_win_over_cognito_username() {
        let claims = decode_claims(&token(json!({
            "sub": "abc-123",
            "username": "jane",
            "name": "Jane Doe",
            "cognito:username": "ignored",
        })))
        .unwrap();

        assert_eq!(claims.username(), Some("jane"));
        assert_eq!(claims.display_name(), Some("Jane Doe"));
        assert!(claims.groups.is_empty());
    }

    #[test]
    fn test_padded_payload_decodes() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#);
        let payload = base64::engine::general_purpose::URL_SAFE.encode(br#"{"sub":"p"}"#);

        let claims = decode_claims(&format!("{header}.{payload}.")).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("p"));
    }

    #[test]
    fn test_expired_token_still_decodes() {
        let claims = decode_claims(&token(json!({ "sub": "x", "exp": 10 }))).unwrap();

        assert!(claims.is_expired(Utc::now()));
    }

    #[test]
    fn test_token_without_exp_never_expires() {
        let claims = decode_claims(&token(json!({ "sub": "x" }))).unwrap();

        assert!(!claims.is_expired(Utc::now()));
    }

    #[test]
    fn test_garbage_tokens_are_decode_errors() {
        for garbage in ["not-a-jwt", "a.b", "a.!!!.c", "a.b.c.d"] {
            let err = decode_claims(garbage).unwrap_err();
            assert_eq!(
                err.error_kind,
                ErrorKind::Token(TokenErrorKind::Decode),
                "{garbage} should not decode"
            );
        }
    }

    #[test]
    fn test_non_json_payload_is_decode_error() {
        let payload = URL_SAFE_NO_PAD.encode(b"plain text");

        let err = decode_claims(&format!("h.{payload}.s")).unwrap_err();
        assert_eq!(err.error_kind, ErrorKind::Token(TokenErrorKind::Decode));
    }
}
