//! The logged-in user, derived from the access token on demand.

use crate::error::{AuthErrorKind, DomainErrorKind, Error};
use crate::gateway::todo_api::TodoApiClient;
use crate::users::{self, UserType};
use log::*;
use todo_auth::jwt::decode_claims;
use todo_auth::session::TokenStore;
use todo_auth::ExposeSecret;

/// Decode `access_token` into a user. Tokens that cannot be decoded yield `None`.
pub fn from_access_token(access_token: &str, premium_group: &str) -> Option<users::Model> {
    let claims = decode_claims(access_token)
        .map_err(|err| warn!("Ignoring undecodable access token: {err}"))
        .ok()?;

    let user_type = if claims.in_group(premium_group) {
        UserType::Premium
    } else {
        UserType::Free
    };

    Some(users::Model {
        username: claims.username().map(str::to_string),
        sub: claims.sub.clone(),
        name: claims.display_name().map(str::to_string),
        user_type,
    })
}

/// The user of the current session, if there is one.
pub async fn current(store: &TokenStore, premium_group: &str) -> Option<users::Model> {
    let access_token = store.access_token().await?;
    from_access_token(access_token.expose_secret(), premium_group)
}

/// The current user when they are premium.
///
/// Fails with `LoginRequired` without a session and `PremiumRequired` for free users.
pub async fn require_premium(api: &TodoApiClient) -> Result<users::Model, Error> {
    let user = current(api.store(), api.premium_group())
        .await
        .ok_or_else(|| Error::new(DomainErrorKind::Auth(AuthErrorKind::LoginRequired)))?;

    if !user.user_type.is_premium() {
        debug!("Rejecting premium operation for a {} user", user.user_type);
        return Err(Error::new(DomainErrorKind::Auth(
            AuthErrorKind::PremiumRequired,
        )));
    }

    Ok(user)
}

#[cfg(test)]
pub(crate) mod test_support {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine as _;

    /// Unsigned JWT carrying `claims`.
    pub(crate) fn token(claims: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{header}.{payload}.c2lnbmF0dXJl")
    }

    pub(crate) fn premium_token() -> String {
        token(serde_json::json!({
            "sub": "user-1",
            "cognito:username": "jdoe",
            "cognito:groups": ["Premium-user"],
        }))
    }

    pub(crate) fn free_token() -> String {
        token(serde_json::json!({
            "sub": "user-2",
            "cognito:username": "free",
        }))
    }
}
