//! Login, sign-up and session lifecycle against the `/auth` endpoints.

use crate::error::{AuthErrorKind, DomainErrorKind, Error, ExternalErrorKind};
use crate::gateway::todo_api::TodoApiClient;
use crate::messages::*;
use crate::user;
use crate::users;
use entity::auth::{
    Acknowledgement, ConfirmRequest, LoginRequest, LoginResponse, RegisterRequest,
};
use log::*;
use todo_auth::session::{Session, TokenStore};

/// Log in and store the issued session.
///
/// Returns the user decoded from the new access token, or `None` if the token could not
/// be decoded.
pub async fn login(
    api: &TodoApiClient,
    email: &str,
    password: &str,
) -> Result<Option<users::Model>, Error> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(Error::invalid(CREDENTIALS_REQUIRED));
    }

    let response: LoginResponse = api
        .post_anonymous(
            "/auth/login",
            &LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            },
        )
        .await?;

    if !response.success {
        info!("Login rejected for {email}");
        return Err(Error::new(DomainErrorKind::Auth(AuthErrorKind::Rejected(
            response.message,
        ))));
    }

    let access_token = response.access_token.ok_or_else(|| {
        warn!("Login succeeded without an access token");
        Error::new(DomainErrorKind::External(ExternalErrorKind::InvalidResponse))
    })?;

    let user = user::from_access_token(&access_token, api.premium_group());
    api.store()
        .set(Session::new(
            access_token,
            response.refresh_token,
            response.id_token,
        ))
        .await?;

    info!("Logged in as {email}");
    Ok(user)
}

pub async fn register(
    api: &TodoApiClient,
    email: &str,
    password: &str,
    name: &str,
) -> Result<Acknowledgement, Error> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(Error::invalid(CREDENTIALS_REQUIRED));
    }

    let ack = api
        .post_anonymous(
            "/auth/register",
            &RegisterRequest {
                email: email.to_string(),
                password: password.to_string(),
                name: name.trim().to_string(),
            },
        )
        .await?;

    info!("Registered {email}, awaiting confirmation");
    Ok(ack)
}

pub async fn confirm_sign_up(
    api: &TodoApiClient,
    email: &str,
    confirmation_code: &str,
) -> Result<Acknowledgement, Error> {
    let confirmation_code = confirmation_code.trim();
    if confirmation_code.is_empty() {
        return Err(Error::invalid(CODE_REQUIRED));
    }

    api.post_anonymous(
        "/auth/confirm",
        &ConfirmRequest {
            email: email.trim().to_string(),
            confirmation_code: confirmation_code.to_string(),
        },
    )
    .await
}

/// Forget the session locally. The identity provider is not contacted.
pub async fn logout(store: &TokenStore) -> Result<(), Error> {
    store.clear().await?;
    info!("Logged out");
    Ok(())
}

pub async fn current_user(store: &TokenStore, premium_group: &str) -> Option<users::Model> {
    user::current(store, premium_group).await
}

pub async fn is_authenticated(store: &TokenStore) -> bool {
    store.is_authenticated().await
}
